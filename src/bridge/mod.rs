//! `log` crate integration.
//!
//! # Responsibilities
//! - Accept records from libraries that log through the `log` facade
//! - Resolve their level against the shared level table
//! - Re-emit them as `tracing` events that keep the original call site
//!   and target
//!
//! # Design Decisions
//! - `log` records already carry file/line/module of the caller, so no
//!   stack inspection is needed; they travel as `log.*` fields and the
//!   renderer prefers them over the bridge's own callsite
//! - Filtering is left to the `tracing` side; the bridge forwards
//!   everything at or above its (default zero) minimum
//! - Records go through `tracing_log::format_trace`, so subscriber filters
//!   such as `EnvFilter` match on the record's own target rather than `log`

pub mod std_log;

pub use std_log::LogBridge;
