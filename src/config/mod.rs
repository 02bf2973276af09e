//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RichConfig (validated)
//!     → RichConfig::into_options()
//!     → lifecycle::install
//! ```
//!
//! # Design Decisions
//! - Config is read once, before installation; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ConsoleConfig, LoggingConfig, RichConfig, Stream, TracebackConfig};
pub use validation::{validate_config, ValidationError};
