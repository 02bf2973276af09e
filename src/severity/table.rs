//! The level-name table.

use std::sync::{OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Severity, BUILTIN_LEVELS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("unknown level name '{0}'")]
    Unknown(String),

    #[error("level name must not be empty")]
    EmptyName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LevelEntry {
    name: String,
    no: u8,
}

/// Named severities, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    entries: Vec<LevelEntry>,
}

impl LevelTable {
    /// Register a level. Names are case-insensitive and stored upper-case;
    /// registering an existing name moves it to the new number.
    pub fn register(&mut self, name: &str, no: u8) -> Result<Severity, LevelError> {
        let name = name.trim().to_ascii_uppercase();
        if name.is_empty() {
            return Err(LevelError::EmptyName);
        }

        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.no = no,
            None => self.entries.push(LevelEntry {
                name: name.clone(),
                no,
            }),
        }
        Ok(Severity::named(name, no))
    }

    pub fn by_name(&self, name: &str) -> Option<Severity> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name.trim()))
            .map(|entry| Severity::named(entry.name.clone(), entry.no))
    }

    /// The first name registered for exactly this number.
    pub fn name_of(&self, no: u8) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.no == no)
            .map(|entry| entry.name.as_str())
    }

    /// The registered level called `name`, or the bare number when the name
    /// is unknown.
    pub fn resolve(&self, name: &str, fallback: u8) -> Severity {
        self.by_name(name)
            .unwrap_or_else(|| Severity::numeric(fallback))
    }

    /// Attach the table's name to a bare severity when one matches.
    pub fn describe(&self, no: u8) -> Severity {
        match self.name_of(no) {
            Some(name) => Severity::named(name, no),
            None => Severity::numeric(no),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = (&str, u8)> {
        self.entries.iter().map(|entry| (entry.name.as_str(), entry.no))
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            entries: BUILTIN_LEVELS
                .iter()
                .map(|(name, no)| LevelEntry {
                    name: (*name).to_string(),
                    no: *no,
                })
                .collect(),
        }
    }
}

static GLOBAL: OnceLock<RwLock<LevelTable>> = OnceLock::new();

fn global() -> &'static RwLock<LevelTable> {
    GLOBAL.get_or_init(|| RwLock::new(LevelTable::default()))
}

/// Shared read access to the process-wide table.
pub fn levels() -> RwLockReadGuard<'static, LevelTable> {
    global().read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn levels_mut() -> RwLockWriteGuard<'static, LevelTable> {
    global().write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Add a custom level to the process-wide table, visible to both the `log`
/// bridge and the renderer.
pub fn register_level(name: &str, no: u8) -> Result<Severity, LevelError> {
    levels_mut().register(name, no)
}

/// A configured minimum level: a name or a bare number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LevelSpec {
    Number(u8),
    Name(String),
}

impl LevelSpec {
    /// Resolve against `table`. Unlike [`LevelTable::resolve`], an unknown
    /// name is an error here.
    pub fn severity(&self, table: &LevelTable) -> Result<Severity, LevelError> {
        match self {
            LevelSpec::Number(no) => Ok(table.describe(*no)),
            LevelSpec::Name(name) => table
                .by_name(name)
                .ok_or_else(|| LevelError::Unknown(name.clone())),
        }
    }
}

impl Default for LevelSpec {
    fn default() -> Self {
        LevelSpec::Number(super::INFO)
    }
}

impl std::fmt::Display for LevelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelSpec::Number(no) => write!(f, "{}", no),
            LevelSpec::Name(name) => f.write_str(name),
        }
    }
}

impl std::str::FromStr for LevelSpec {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LevelError::EmptyName);
        }
        Ok(match s.parse::<u8>() {
            Ok(no) => LevelSpec::Number(no),
            Err(_) => LevelSpec::Name(s.to_string()),
        })
    }
}

impl From<u8> for LevelSpec {
    fn from(value: u8) -> Self {
        LevelSpec::Number(value)
    }
}

impl From<&str> for LevelSpec {
    fn from(value: &str) -> Self {
        LevelSpec::Name(value.to_string())
    }
}
