//! Logging and tracing support.
//!
//! Re-exports the `tracing` macros the engine uses when the `tracing` feature
//! is enabled. Without it, no-op macros with the same names are exported at
//! the crate root, so call sites write `crate::debug!(..)` either way and
//! never need `cfg` guards.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, debug_span, trace, warn};

// When tracing is not enabled, provide no-op macros
#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[doc(hidden)]
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op debug_span macro when tracing is disabled.
    #[doc(hidden)]
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op trace macro when tracing is disabled.
    #[doc(hidden)]
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[doc(hidden)]
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

// Macros are exported at the crate root via #[macro_export],
// so noop_macros is not re-exported here.

/// Stand-in for `tracing::Span` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Mirrors `tracing::Span::entered`.
    pub fn entered(self) -> Self {
        self
    }
}
