//! Thin logging macros over [`tracing`].
//!
//! Library code never prints; everything funnels through these so the CLI
//! subscriber decides how a message looks on screen.

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

/// An `info`-level event on a dedicated target, rendered by the CLI with a
/// check mark instead of the plain status symbol.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "spoolwatch::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}
