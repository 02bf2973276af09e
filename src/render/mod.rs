//! Record rendering subsystem.
//!
//! # Data Flow
//! ```text
//! tracing::Event
//!     → fields.rs (Visit: message, special keys, error chain, log origin)
//!     → layer.rs severity filter (numeric, so SUCCESS can sit above INFO)
//!     → time.rs (own line, repeated times omitted)
//!     → layer.rs message cell (rich / style / highlighter / alt / markup / text)
//!     → columns: LEVEL │ message (wrapped) │ file:line
//!     → traceback block for errors and panics
//!     → Console::write_block
//! ```
//!
//! # Design Decisions
//! - Implemented as a `Layer` rather than a `FormatEvent` so that the numeric
//!   severity filter can drop a record after its fields are known
//! - Special keys are ordinary event fields, so plain `tracing` macros can
//!   drive the renderer: `info!(style = "red bold", "...")`
//! - The `rich` key carries already-rendered output and bypasses styling

pub mod fields;
pub mod layer;
pub mod time;

pub use fields::EventFields;
pub use layer::{MessageCell, RenderSettings, RichLayer, DEFAULT_KEYWORDS};
pub use time::{TimeFormat, DEFAULT_TIME_FORMAT};
