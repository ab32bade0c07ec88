//! The host window.

use crate::accel::{AcceleratorTable, MenuEvent};
use crate::config::HostConfig;
use crate::error::Result;
use crate::footer::{Phase, Widget};
use crate::form::{FieldWidget, Form};
use crate::hooks::Hooks;
use crate::processor::{ProcessController, ProcessEvent};
use crate::timing::{self, Estimator};
use crate::window::Window;
use eframe::egui::{self, Color32, RichText};
use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A host action, such as the one run by a footer button.
pub type Action = fn(&mut Application);

/// Handles the accelerator ("menu") events of the window.
pub type MenuHandler = Arc<dyn Fn(&mut Application, MenuEvent) + Send + Sync>;

/// The host window: a form, a console, a progress bar and a footer.
pub struct Application {
    config: HostConfig,
    form: Form,
    values: Vec<String>,
    phase: Phase,
    console: Vec<String>,
    progress: Option<u8>,
    estimator: Option<Estimator>,
    message: Option<String>,
    exit_code: Option<i32>,
    window: Arc<dyn Window>,
    controller: ProcessController,
    events: Receiver<ProcessEvent>,
    accelerators: AcceleratorTable,
    menu_handler: Option<MenuHandler>,
}

impl Application {
    /// Creates the window state, then runs the construction point of `hooks`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the process controller could not be created.
    pub fn new(
        config: HostConfig,
        form: Form,
        hooks: Hooks,
        window: Arc<dyn Window>,
    ) -> Result<Self> {
        log::debug!("Creating the host window");

        let (controller, events) = ProcessController::new(&hooks, &config, window.clone())?;
        let values = form.defaults();

        let mut app = Self {
            config,
            form,
            values,
            phase: Phase::Configuring,
            console: Vec::new(),
            progress: None,
            estimator: None,
            message: None,
            exit_code: None,
            window,
            controller,
            events,
            accelerators: AcceleratorTable::default(),
            menu_handler: None,
        };

        hooks.construct.construct(&mut app);
        Ok(app)
    }

    /// Returns the handle of the window.
    pub fn window(&self) -> Arc<dyn Window> {
        self.window.clone()
    }

    /// Returns the host configuration.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the field values, in form order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Sets the value of the field at `index`.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value.into();
        }
    }

    /// Returns the console lines of the last run.
    pub fn console(&self) -> &[String] {
        &self.console
    }

    /// Returns the last progress reported.
    pub fn progress(&self) -> Option<u8> {
        self.progress
    }

    /// Returns the validation or failure message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the exit code of the last run.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Sets the window title.
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Returns true if the footer button is currently shown.
    pub fn is_shown(&self, widget: Widget) -> bool {
        widget.is_shown(self.phase)
    }

    /// Replaces the key combinations the window reacts to.
    pub fn set_accelerator_table(&mut self, table: AcceleratorTable) {
        self.accelerators = table;
    }

    /// Returns the key combinations the window reacts to.
    pub fn accelerator_table(&self) -> &AcceleratorTable {
        &self.accelerators
    }

    /// Binds the handler called when an accelerator fires.
    pub fn bind_menu(&mut self, handler: impl Fn(&mut Application, MenuEvent) + Send + Sync + 'static) {
        self.menu_handler = Some(Arc::new(handler));
    }

    /// Delivers a menu event for `id` to the bound handler.
    pub fn fire_menu(&mut self, id: i32) {
        if let Some(handler) = self.menu_handler.clone() {
            handler(self, MenuEvent::new(id));
        }
    }

    /// Validates the form and runs the command line built from it.
    pub fn on_start(&mut self) {
        if self.controller.is_running() {
            return;
        }

        let missing = self.form.missing(&self.values);
        if !missing.is_empty() {
            self.message = Some(format!("Required: {}", missing.join(", ")));
            self.phase = Phase::Configuring;
            return;
        }

        let command = self.form.command_line(&self.config.target, &self.values);
        self.console.clear();
        self.progress = None;
        self.message = None;
        self.exit_code = None;
        self.estimator = Some(Estimator::start());

        match self.controller.run(&command) {
            Ok(()) => self.phase = Phase::Running,
            Err(e) => {
                log::error!("Failed to start: {}", e);
                self.message = Some(e.to_string());
                self.phase = Phase::Error;
            }
        }
    }

    /// Kills the running process.
    pub fn on_stop_execution(&mut self) {
        if self.controller.stop() {
            self.message = Some("Stopped".to_string());
        }
    }

    /// Closes the window.
    pub fn on_close(&mut self) {
        self.controller.stop();
        self.window.close();
    }

    /// Closes the window without running anything.
    pub fn on_cancel(&mut self) {
        self.window.close();
    }

    /// Goes back to the form, keeping the values.
    pub fn on_edit(&mut self) {
        self.phase = Phase::Configuring;
        self.message = None;
    }

    /// Applies the events sent by the process controller.
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                ProcessEvent::Output(line) => self.console.push(line),
                ProcessEvent::Progress(progress) => self.progress = Some(progress),
                ProcessEvent::Failed(error) => self.console.push(error),
                ProcessEvent::Finished(code) => {
                    self.exit_code = code;
                    if let Some(estimator) = &mut self.estimator {
                        estimator.stop();
                    }
                    if code == Some(0) {
                        self.phase = Phase::Success;
                        self.progress = Some(100);
                    } else {
                        self.phase = Phase::Error;
                    }
                }
            }
        }
    }

    fn header(&self) -> (String, String) {
        match self.phase {
            Phase::Configuring => (self.config.program_name.clone(), self.form.description.clone()),
            Phase::Running => ("Running".to_string(), "Please wait while the download runs".to_string()),
            Phase::Success => ("Finished".to_string(), "The download completed successfully".to_string()),
            Phase::Error => (
                "Error".to_string(),
                self.message
                    .clone()
                    .unwrap_or_else(|| format!("The download failed (exit code {:?})", self.exit_code)),
            ),
        }
    }

    fn timing_label(&self) -> Option<String> {
        let estimator = self.estimator?;
        let options = self.config.timing;
        match self.phase {
            Phase::Running => {}
            Phase::Success if !options.hide_time_remaining_on_complete => {}
            _ => return None,
        }

        let elapsed = timing::format_duration(estimator.elapsed());
        let remaining = self
            .progress
            .filter(|_| options.show_time_remaining)
            .and_then(|progress| estimator.remaining(progress));
        Some(match remaining {
            Some(remaining) => format!("{} elapsed, {} remaining", elapsed, timing::format_duration(remaining)),
            None => format!("{} elapsed", elapsed),
        })
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        for (field, value) in self.form.fields.iter().zip(self.values.iter_mut()) {
            ui.label(RichText::new(&field.metavar).strong());
            if !field.help.is_empty() {
                ui.label(RichText::new(&field.help).small());
            }
            ui.horizontal(|ui| {
                ui.text_edit_singleline(value);
                if field.widget == FieldWidget::DirChooser && ui.button("Browse").clicked() {
                    if let Some(folder) = rfd::FileDialog::new().set_directory(&*value).pick_folder() {
                        *value = folder.to_string_lossy().to_string();
                    }
                }
            });
            ui.add_space(8.0);
        }

        if let Some(message) = &self.message {
            ui.label(RichText::new(message).color(Color32::RED));
        }
    }

    fn show_console(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for line in &self.console {
                    ui.label(RichText::new(line).monospace());
                }
            });
    }
}

/// Returns the action a footer button runs when clicked.
pub fn button_action(widget: Widget) -> Action {
    match widget {
        Widget::StartButton | Widget::RestartButton => Application::on_start,
        Widget::StopButton => Application::on_stop_execution,
        Widget::CloseButton => Application::on_close,
        Widget::CancelButton => Application::on_cancel,
        Widget::EditButton => Application::on_edit,
    }
}

impl eframe::App for Application {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();

        let pressed = ctx.input(|input| self.accelerators.pressed(input));
        for id in pressed {
            self.fire_menu(id);
        }

        let (title, subtitle) = self.header();
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(title);
            ui.label(subtitle);
            ui.add_space(4.0);
        });

        let mut clicked = None;
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            if self.phase != Phase::Configuring {
                if let Some(progress) = self.progress {
                    ui.add(egui::ProgressBar::new(f32::from(progress) / 100.0).show_percentage());
                }
                if let Some(label) = self.timing_label() {
                    ui.label(label);
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                for widget in Widget::ALL.into_iter().rev() {
                    if self.is_shown(widget) && ui.button(widget.label()).clicked() {
                        clicked = Some(widget);
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.phase == Phase::Configuring {
                egui::ScrollArea::vertical().show(ui, |ui| self.show_form(ui));
            } else {
                self.show_console(ui);
            }
        });

        if let Some(widget) = clicked {
            button_action(widget)(self);
        }

        if self.phase == Phase::Running {
            ctx.request_repaint_after(std::time::Duration::from_secs(1));
        }
    }
}

/// Opens the host window and runs the GUI loop until it is closed.
///
/// # Errors
///
/// This function will return an error if the window could not be created.
pub fn run(config: HostConfig, form: Form, hooks: Hooks) -> Result<()> {
    let title = config.program_name.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 520.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let window: Arc<dyn Window> = Arc::new(cc.egui_ctx.clone());
            let app = Application::new(config, form, hooks, window)?;
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingOptions;
    use crate::form::Field;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeWindow {
        titles: Mutex<Vec<String>>,
        closed: AtomicUsize,
    }

    impl Window for FakeWindow {
        fn set_title(&self, title: &str) {
            self.titles.lock().unwrap().push(title.to_string());
        }

        fn close(&self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[cfg(unix)]
    fn finished_app(hide_time_remaining_on_complete: bool) -> Application {
        let config = HostConfig {
            target: "true".to_string(),
            timing: TimingOptions {
                show_time_remaining: true,
                hide_time_remaining_on_complete,
            },
            ..HostConfig::default()
        };
        let form = Form::new("Test form").field(Field::positional("url").metavar("URL"));
        let hooks = Hooks::standard(&config).unwrap();
        let mut app = Application::new(config, form, hooks, Arc::new(FakeWindow::default())).unwrap();

        app.set_value(0, "https://example.com/v");
        app.on_start();
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while app.phase() == Phase::Running {
            assert!(std::time::Instant::now() < deadline, "process did not finish");
            app.poll_events();
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert_eq!(app.phase(), Phase::Success);
        app
    }

    fn app(window: Arc<FakeWindow>) -> Application {
        let config = HostConfig {
            target: "vidl-host-no-such-executable".to_string(),
            ..HostConfig::default()
        };
        let form = Form::new("Test form").field(Field::positional("url").metavar("URL"));
        let hooks = Hooks::standard(&config).unwrap();
        Application::new(config, form, hooks, window).unwrap()
    }

    #[test]
    fn construction_shows_the_program_name() {
        let window = Arc::new(FakeWindow::default());
        let _app = app(window.clone());
        assert_eq!(*window.titles.lock().unwrap(), vec!["Video downloader".to_string()]);
    }

    #[test]
    fn start_requires_positional_fields() {
        let mut app = app(Arc::new(FakeWindow::default()));
        app.on_start();
        assert_eq!(app.phase(), Phase::Configuring);
        assert_eq!(app.message(), Some("Required: URL"));
    }

    #[test]
    fn start_failure_enters_error_phase() {
        let mut app = app(Arc::new(FakeWindow::default()));
        app.set_value(0, "https://example.com/v");
        app.on_start();
        assert_eq!(app.phase(), Phase::Error);
        assert!(app.message().is_some());

        app.on_edit();
        assert_eq!(app.phase(), Phase::Configuring);
        assert_eq!(app.values(), ["https://example.com/v".to_string()]);
    }

    #[test]
    fn menu_events_reach_the_bound_handler() {
        let mut app = app(Arc::new(FakeWindow::default()));
        app.bind_menu(|app, event| app.set_value(0, event.id().to_string()));
        app.fire_menu(-7);
        assert_eq!(app.values(), ["-7".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn timing_stays_after_success_unless_hidden() {
        let app = finished_app(false);
        assert_eq!(app.progress(), Some(100));
        let label = app.timing_label().unwrap();
        assert!(label.ends_with("elapsed, 0:00 remaining"), "{label}");

        assert_eq!(finished_app(true).timing_label(), None);
    }

    #[test]
    fn cancel_closes_the_window() {
        let window = Arc::new(FakeWindow::default());
        let mut app = app(window.clone());
        button_action(Widget::CancelButton)(&mut app);
        assert_eq!(window.closed.load(Ordering::SeqCst), 1);
    }
}
