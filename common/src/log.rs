//! Status macros on top of `tracing`.
//!
//! The CLI formatter looks at the `status` field to choose the prefix, so
//! `success!` renders as `[+]` while a plain `info!` renders as `[*]`.

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        ::tracing::info!(status = "success", $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        ::tracing::info!(status = "info", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        ::tracing::warn!(status = "warn", $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        ::tracing::error!(status = "error", $($arg)*)
    };
}
