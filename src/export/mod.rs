//! PNG export: encoding, the clipboard port, and the downloads fallback.

pub(crate) mod clipboard;
pub(crate) mod download;
pub(crate) mod png;
