//! Elapsed and remaining time of a run.

use std::time::{Duration, Instant};

/// Estimates the time left from the progress made so far.
#[derive(Debug, Clone, Copy)]
pub struct Estimator {
    started: Instant,
    stopped: Option<Duration>,
}

impl Estimator {
    /// Starts measuring now.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            stopped: None,
        }
    }

    /// Freezes the elapsed time.
    pub fn stop(&mut self) {
        if self.stopped.is_none() {
            self.stopped = Some(self.started.elapsed());
        }
    }

    /// Returns the time elapsed since the start, or until [`Estimator::stop`].
    pub fn elapsed(&self) -> Duration {
        self.stopped.unwrap_or_else(|| self.started.elapsed())
    }

    /// Returns the estimated time left at `progress` percent.
    pub fn remaining(&self, progress: u8) -> Option<Duration> {
        estimate_remaining(self.elapsed(), progress)
    }
}

/// Extrapolates linearly: `elapsed * (100 - progress) / progress`.
///
/// No estimate is made at 0% (nothing to extrapolate from) or past 100%.
pub fn estimate_remaining(elapsed: Duration, progress: u8) -> Option<Duration> {
    if progress == 0 || progress > 100 {
        return None;
    }

    Some(elapsed.mul_f64(f64::from(100 - progress) / f64::from(progress)))
}

/// Formats a duration as `h:mm:ss` or `m:ss`.
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();
    let (hours, minutes, seconds) = (seconds / 3600, seconds / 60 % 60, seconds % 60);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extrapolates_linearly() {
        let remaining = estimate_remaining(Duration::from_secs(30), 25);
        assert_eq!(remaining, Some(Duration::from_secs(90)));
        assert_eq!(estimate_remaining(Duration::from_secs(30), 100), Some(Duration::ZERO));
    }

    #[test]
    fn no_estimate_without_progress() {
        assert_eq!(estimate_remaining(Duration::from_secs(30), 0), None);
        assert_eq!(estimate_remaining(Duration::from_secs(30), 101), None);
    }

    #[test]
    fn stop_freezes_elapsed_time() {
        let mut estimator = Estimator::start();
        estimator.stop();
        let frozen = estimator.elapsed();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(estimator.elapsed(), frozen);
        assert_eq!(estimator.remaining(100), Some(Duration::ZERO));
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(Duration::from_secs(65)), "1:05");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1:02:05");
    }
}
