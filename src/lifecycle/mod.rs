//! Installation lifecycle.
//!
//! # Data Flow
//! ```text
//! Install (install.rs):
//!     InstallOptions → validate level/theme/styles → RichLayer
//!     → LogBridge as the `log` logger
//!     → registry + EnvFilter + RichLayer as the global subscriber
//!     → panic hook
//!
//! Panic (hook.rs):
//!     panic!() → ExceptionHook → tracing::error!("Exception:", panic.*)
//!     → RichLayer renders the traceback
//! ```
//!
//! # Design Decisions
//! - Installation is process-wide and one-shot; a second call reports the
//!   already-set logger instead of silently replacing it
//! - The hook is replaceable and optional

pub mod hook;
pub mod install;

pub use hook::{default_exception_hook, log_panic, set_exception_hook, ExceptionHook};
pub use install::{install, layer, subscriber, InstallOptions};
