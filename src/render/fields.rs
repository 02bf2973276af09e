//! Field collection for one event.

use std::error::Error;
use std::fmt;

use tracing::field::{Field, Visit};

/// Where the record really came from. Set by the `log` bridge so the path
/// column shows the caller instead of the bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Origin {
    pub target: Option<String>,
    pub module_path: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanicFields {
    pub payload: Option<String>,
    pub location: Option<String>,
    pub backtrace: Option<String>,
    pub note: Option<String>,
}

/// Every field of an event, with the keys the renderer understands pulled out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub message: Option<String>,
    pub severity: Option<u8>,
    pub rich: Option<String>,
    pub style: Option<String>,
    pub highlighter: Option<String>,
    pub alt: Option<String>,
    pub markup: Option<bool>,
    pub text: Option<String>,
    /// Error message followed by its `source()` chain.
    pub error: Option<Vec<String>>,
    pub backtrace: Option<String>,
    pub panic: PanicFields,
    pub origin: Origin,
    /// Remaining fields in recording order.
    pub extra: Vec<(String, String)>,
}

impl EventFields {
    pub fn has_failure(&self) -> bool {
        self.error.is_some() || self.panic.payload.is_some()
    }

    fn store(&mut self, name: &str, value: String) {
        match name {
            "message" => self.message = Some(value),
            "rich" => self.rich = Some(value),
            "style" => self.style = Some(value),
            "highlighter" => self.highlighter = Some(value),
            "alt" => self.alt = Some(value),
            "text" => self.text = Some(value),
            "markup" => match value.parse() {
                Ok(flag) => self.markup = Some(flag),
                Err(_) => self.extra.push((name.to_string(), value)),
            },
            "severity" => match value.parse() {
                Ok(no) => self.severity = Some(no),
                Err(_) => self.extra.push((name.to_string(), value)),
            },
            "backtrace" => self.backtrace = Some(value),
            "panic.payload" => self.panic.payload = Some(value),
            "panic.location" => self.panic.location = Some(value),
            "panic.backtrace" => self.panic.backtrace = Some(value),
            "panic.note" => self.panic.note = Some(value),
            "log.target" => self.origin.target = Some(value),
            "log.module_path" => self.origin.module_path = Some(value),
            "log.file" => self.origin.file = Some(value),
            "log.line" => self.origin.line = value.parse().ok(),
            _ => self.extra.push((name.to_string(), value)),
        }
    }

    fn store_number(&mut self, name: &str, value: i128) {
        match name {
            "severity" => self.severity = Some(value.clamp(0, u8::MAX as i128) as u8),
            "log.line" => self.origin.line = u32::try_from(value).ok(),
            _ => self.store(name, value.to_string()),
        }
    }
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.store(field.name(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "markup" {
            self.markup = Some(value);
        } else {
            self.store(field.name(), value.to_string());
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.store_number(field.name(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.store_number(field.name(), value.into());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        let mut chain = vec![value.to_string()];
        let mut source = value.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        if self.error.is_some() {
            self.extra.push((field.name().to_string(), chain.join(": ")));
        } else {
            self.error = Some(chain);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.store(field.name(), format!("{value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct Collect(Arc<Mutex<Vec<EventFields>>>);

    impl<S: Subscriber> Layer<S> for Collect {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = EventFields::default();
            event.record(&mut fields);
            self.0.lock().unwrap().push(fields);
        }
    }

    fn collect(f: impl FnOnce()) -> Vec<EventFields> {
        let store = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(Collect(store.clone()));
        tracing::subscriber::with_default(subscriber, f);
        let fields = store.lock().unwrap().clone();
        fields
    }

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "could not read settings")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_special_keys_are_extracted() {
        let events = collect(|| {
            tracing::info!(
                severity = 25,
                style = "red bold",
                markup = false,
                user = "ada",
                log.line = 42u32,
                "hello {}",
                1
            );
        });
        let fields = &events[0];

        assert_eq!(fields.message.as_deref(), Some("hello 1"));
        assert_eq!(fields.severity, Some(25));
        assert_eq!(fields.style.as_deref(), Some("red bold"));
        assert_eq!(fields.markup, Some(false));
        assert_eq!(fields.origin.line, Some(42));
        assert_eq!(fields.extra, vec![("user".to_string(), "ada".to_string())]);
    }

    #[test]
    fn test_error_chain_is_collected() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "missing file"));
        let events = collect(|| {
            tracing::error!(error = &err as &(dyn Error + 'static), "load failed");
        });

        assert_eq!(
            events[0].error,
            Some(vec![
                "could not read settings".to_string(),
                "missing file".to_string()
            ])
        );
        assert!(events[0].has_failure());
    }

    #[test]
    fn test_severity_is_clamped() {
        let events = collect(|| {
            tracing::info!(severity = -3, "low");
            tracing::info!(severity = 900, "high");
        });
        assert_eq!(events[0].severity, Some(0));
        assert_eq!(events[1].severity, Some(255));
    }
}
