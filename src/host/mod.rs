//! Host environment port: context detection, the ready signal, and haptics.

pub(crate) mod env;
