#[cfg(feature = "tracing")]
macro_rules! utrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "unveil", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! utrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! udebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "unveil", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! udebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! uwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "unveil", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! uwarn {
    ($($tt:tt)*) => {};
}
