//! Structured logging helpers.
//!
//! Every lifecycle log line about a single component carries a
//! `component` field, so JSON output can be filtered per component:
//!
//! ```text
//! {"level":"INFO","fields":{"component":"db","message":"Component ready"},...}
//! ```

/// Log a component event with the standard `component` field.
///
/// ```rust,ignore
/// log_component_event!(info, name, "Component ready", elapsed_ms = 12);
/// ```
#[macro_export]
macro_rules! log_component_event {
    ($level:ident, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        ::tracing::$level!(
            component = %$component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a system-wide event with the standard `system_id` field.
#[macro_export]
macro_rules! log_system_event {
    ($level:ident, $system_id:expr, $msg:expr $(, $($field:tt)*)?) => {
        ::tracing::$level!(
            system_id = %$system_id,
            $($($field)*,)?
            $msg
        )
    };
}
