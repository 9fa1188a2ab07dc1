//! Deterministic pattern synthesis: seed hashing, the xorshift stream, rhythm normalization and
//! the weave generator itself. Nothing in here touches IO.

pub(crate) mod generator;
pub(crate) mod hash;
pub(crate) mod pattern;
pub(crate) mod rhythm;
pub(crate) mod rng;
