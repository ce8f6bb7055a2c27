//! [`Command`] definition.

pub mod create_offer;
pub mod delete_offer;
pub mod edit_board;
pub mod edit_circuits;
pub mod import_circuits;
pub mod set_component_quantity;
pub mod update_offer;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_offer::CreateOffer, delete_offer::DeleteOffer,
    edit_board::EditBoard, edit_circuits::EditCircuits,
    import_circuits::ImportCircuits,
    set_component_quantity::SetComponentQuantity, update_offer::UpdateOffer,
};
