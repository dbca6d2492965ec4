//! Logging shim.
//!
//! With the `tracing` feature on, `debug!`, `trace!` and `warn!` are the
//! `tracing` macros. Without it they expand to nothing, so the engines can log
//! from hot loops (per curve pair, per pointer move) at no cost.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __gridpath_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __gridpath_trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __gridpath_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{
    __gridpath_debug as debug, __gridpath_trace as trace, __gridpath_warn as warn,
};
