//! Logging macros for the levels `tracing` doesn't have.

/// Log at SUCCESS (25): rendered as its own level, filtered as INFO.
///
/// ```ignore
/// richtrace::success!(job = "backup", "all files copied");
/// ```
#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        $crate::__private::tracing::info!(severity = $crate::severity::SUCCESS, $($arg)+)
    };
}

/// Log at CRITICAL (50): rendered as its own level, filtered as ERROR.
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::__private::tracing::error!(severity = $crate::severity::CRITICAL, $($arg)+)
    };
}

/// Log at INFO with the whole line painted in `style`.
///
/// ```ignore
/// richtrace::styled!("red bold", "Sth is happening!");
/// ```
#[macro_export]
macro_rules! styled {
    ($style:expr, $($arg:tt)+) => {
        $crate::__private::tracing::info!(style = $style, $($arg)+)
    };
}
