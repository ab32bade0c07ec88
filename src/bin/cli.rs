use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use log::LevelFilter;
use std::path::PathBuf;
use vidl::config::Settings;

#[derive(Parser, Clone)]
#[command(name = "vidl", version, about = "Download videos using youtube-dl")]
pub struct Cli {
    /// Video URL, required with --no-gui
    pub url: Option<String>,

    /// Directory where the video is to be downloaded
    #[arg(long = "output", short)]
    pub output: Option<String>,

    /// Download in the terminal instead of opening a window
    #[arg(long = "no-gui", action = clap::ArgAction::SetTrue)]
    pub no_gui: bool,

    /// Downloader command, overriding the settings file
    #[arg(long = "target")]
    pub target: Option<String>,

    /// Settings file to use instead of the default one
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    #[arg(
        long = "verbosity",
        short,
        default_value = "info",
        value_parser = clap::builder::PossibleValuesParser::new([
            "info", "debug", "error", "none", "full"
        ])
    )]
    pub verbosity: String,
}

fn level(verbosity: &str) -> LevelFilter {
    match verbosity {
        "debug" => LevelFilter::Debug,
        "error" => LevelFilter::Error,
        "none" => LevelFilter::Off,
        "full" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Cli::parse();

    let level = level(&args.verbosity);
    let logger = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .build();
    let multi = MultiProgress::new();
    LogWrapper::new(multi.clone(), logger).try_init()?;
    log::set_max_level(level);

    let path = args.config.or_else(Settings::default_path);
    let mut settings = Settings::load_or_default(path.as_deref());
    if let Some(target) = args.target {
        settings.target = target;
    }

    if args.no_gui {
        let url = args.url.ok_or("A video URL is required with --no-gui")?;
        let code = vidl::headless::download(&settings, &url, args.output.as_deref(), &multi)?;
        std::process::exit(code);
    }

    if args.url.is_some() || args.output.is_some() {
        log::warn!("URL and output directory are only used with --no-gui");
    }
    vidl::run(&settings)?;
    Ok(())
}
