//! Persistence: the key-value port and the day-record store built on it.

pub(crate) mod day;
pub(crate) mod kv;
