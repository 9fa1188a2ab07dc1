//! Session controller: input events in, persisted weaves and a text view model out.

pub(crate) mod clock;
pub(crate) mod controller;
pub(crate) mod input;
pub(crate) mod view;
