//! Rich terminal rendering for `tracing` and `log` records.
//!
//! # Architecture Overview
//!
//! ```text
//!     log::info!()            ┌──────────┐
//!     ───────────────────────▶│  bridge  │──┐
//!                             └──────────┘  │   tracing::Event
//!     tracing::info!()                      ▼
//!     success!() / critical!() ──────▶ ┌──────────┐    ┌──────────┐
//!                                      │  render  │───▶│ console  │──▶ stderr
//!     panic!()  ┌───────────┐          │ RichLayer│    └──────────┘
//!     ─────────▶│ lifecycle │─────────▶└────┬─────┘
//!               │   hook    │               │
//!               └───────────┘        ┌──────┴──────┬────────────┐
//!                                    │  severity   │    text    │ traceback
//!                                    │ level table │ style/markup│ frames/box
//!                                    └─────────────┴────────────┘
//! ```
//!
//! # Quick start
//!
//! ```no_run
//! richtrace::install(richtrace::InstallOptions::default().level("success"))?;
//! richtrace::success!("ready");
//! tracing::info!(style = "red bold", "Sth is happening!");
//! # Ok::<(), richtrace::InstallError>(())
//! ```

#[macro_use]
mod macros;

pub mod bridge;
pub mod config;
pub mod console;
pub mod error;
pub mod lifecycle;
pub mod render;
pub mod severity;
pub mod text;
pub mod traceback;

pub use bridge::LogBridge;
pub use config::RichConfig;
pub use console::{ColorChoice, Console};
pub use error::InstallError;
pub use lifecycle::{install, ExceptionHook, InstallOptions};
pub use render::{RichLayer, TimeFormat};
pub use severity::{register_level, LevelSpec, Severity};
pub use text::{Style, Text, Theme};

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
