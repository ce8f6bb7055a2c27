//! Read entities definitions.

pub mod component;
pub mod offer;
