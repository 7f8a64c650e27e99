//! Tracing shim for pipeline stages.
//!
//! With the `tracing` feature the macros forward to `tracing`. Without it a
//! span is a [`NoopSpan`] guard and event fields are borrowed, never moved,
//! so a value logged here is still usable afterwards.
//!
//! Fields are `key = value`; [`trace_warn!`] also takes a single
//! `key = %value` field rendered with `Display`.

/// Info-level span for a pipeline stage.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Info-level event with counts and scores.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::event!(name: $name, tracing::Level::INFO, {})
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($(&$value,)+);
    };
    ($name:expr) => {};
}

/// Warning for input the pipeline recovers from.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($name:expr, $key:ident = %$value:expr $(,)?) => {
        tracing::warn!(name: $name, $key = %$value)
    };
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::warn!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::event!(name: $name, tracing::Level::WARN, {})
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($name:expr, $key:ident = %$value:expr $(,)?) => {
        let _ = &$value;
    };
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($(&$value,)+);
    };
    ($name:expr) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;
pub(crate) use trace_warn;

/// Span guard used when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Mirrors `Span::entered()`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{trace_event, trace_span, trace_warn};
    use crate::util::MinutiaeError;

    #[test]
    fn fields_stay_usable_after_logging() {
        let _span = trace_span!("stage", size = 3usize).entered();
        let label = String::from("thumb");
        let err = MinutiaeError::TemplateTruncated {
            expected: 13,
            got: 7,
        };
        trace_event!("stored", print = label.as_str(), slots = 13usize);
        trace_warn!("skipped", print = label.as_str());
        trace_warn!("unreadable", reason = %err);
        trace_warn!("empty");
        assert_eq!(label, "thumb");
        assert!(err.is_malformed_template());
    }
}
