//! A small GUI host for command-line downloaders.
//!
//! The host shows a form built from a [`Form`], turns it into a command line
//! prefixed by [`HostConfig::target`], runs it and streams the child's output
//! into a console and a progress bar.
//!
//! Its behaviour can be extended at three points (construction, command
//! dispatch and output processing) through the traits of the [`hooks`]
//! module. The host only calls the objects held in [`Hooks`], so a wrapper
//! holding the standard object can add behaviour and still call through.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use vidl_host::{Field, Form, Hooks, HostConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HostConfig::default();
//! let form = Form::new("Download videos").field(Field::positional("url").metavar("Video URL"));
//! let hooks = Hooks::standard(&config)?;
//!
//! vidl_host::run(config, form, hooks)?;
//! # Ok(())
//! # }
//! ```

pub mod accel;
pub mod app;
pub mod config;
pub mod error;
pub mod executor;
pub mod footer;
pub mod form;
pub mod hooks;
pub mod processor;
pub mod timing;
pub mod window;

pub use accel::{AcceleratorTable, MenuEvent, Modifiers, keys, new_control_id};
pub use app::{Action, Application, run};
pub use config::{HostConfig, TimingOptions};
pub use error::{Error, Result};
pub use footer::{Phase, Widget};
pub use form::{Field, FieldWidget, Form};
pub use hooks::{Construct, Dispatch, ExtractProgress, Hooks};
pub use processor::{Launcher, ProcessController, ProcessEvent};
pub use window::Window;
