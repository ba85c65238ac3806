//! Logging macros. They forward to the `log` crate when the `log` feature is enabled.
//! Without the feature the arguments are still type checked but nothing is emitted.

#[cfg(feature = "log")]
#[doc(hidden)]
#[macro_export]
macro_rules! trace_log {
  ($($arg:tt)+) => { ::log::trace!($($arg)+) };
}

#[cfg(not(feature = "log"))]
#[doc(hidden)]
#[macro_export]
macro_rules! trace_log {
  ($($arg:tt)+) => {
    if false {
      let _ = format!($($arg)+);
    }
  };
}

#[cfg(feature = "log")]
#[doc(hidden)]
#[macro_export]
macro_rules! debug_log {
  ($($arg:tt)+) => { ::log::debug!($($arg)+) };
}

#[cfg(not(feature = "log"))]
#[doc(hidden)]
#[macro_export]
macro_rules! debug_log {
  ($($arg:tt)+) => {
    if false {
      let _ = format!($($arg)+);
    }
  };
}

#[cfg(feature = "log")]
#[doc(hidden)]
#[macro_export]
macro_rules! info_log {
  ($($arg:tt)+) => { ::log::info!($($arg)+) };
}

#[cfg(not(feature = "log"))]
#[doc(hidden)]
#[macro_export]
macro_rules! info_log {
  ($($arg:tt)+) => {
    if false {
      let _ = format!($($arg)+);
    }
  };
}

#[cfg(feature = "log")]
#[doc(hidden)]
#[macro_export]
macro_rules! warn_log {
  ($($arg:tt)+) => { ::log::warn!($($arg)+) };
}

#[cfg(not(feature = "log"))]
#[doc(hidden)]
#[macro_export]
macro_rules! warn_log {
  ($($arg:tt)+) => {
    if false {
      let _ = format!($($arg)+);
    }
  };
}

#[cfg(feature = "log")]
#[doc(hidden)]
#[macro_export]
macro_rules! error_log {
  ($($arg:tt)+) => { ::log::error!($($arg)+) };
}

#[cfg(not(feature = "log"))]
#[doc(hidden)]
#[macro_export]
macro_rules! error_log {
  ($($arg:tt)+) => {
    if false {
      let _ = format!($($arg)+);
    }
  };
}
