//! Domain definitions.

pub mod board;
pub mod circuit;
pub mod component;
pub mod offer;
pub mod summary;

pub use self::{
    board::Board,
    circuit::{Circuit, CircuitList},
    component::{Component, RequiredComponent},
    offer::Offer,
    summary::Summary,
};
