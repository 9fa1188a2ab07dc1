//! Card rasterization: the weave grid and its chrome on a CPU pixel surface.

pub(crate) mod card;
pub(crate) mod frame;
pub(crate) mod text;
