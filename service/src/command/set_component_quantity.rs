//! [`Command`] for setting a quantity of a [`RequiredComponent`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::RequiredComponent;
use crate::{
    domain::{
        component::{self, required},
        offer, Offer,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for setting a quantity of a [`RequiredComponent`].
///
/// Quantities of breakers last only until the next change of circuits.
#[derive(Clone, Debug)]
pub struct SetComponentQuantity {
    /// ID of the [`Offer`] the [`RequiredComponent`] belongs to.
    pub offer_id: offer::Id,

    /// ID of the [`RequiredComponent`].
    pub component_id: component::Id,

    /// New [`required::Quantity`].
    pub quantity: required::Quantity,
}

impl<Db> Command<SetComponentQuantity> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Offer>, offer::Id>>,
            Ok = Option<Offer>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Offer, offer::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Offer>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SetComponentQuantity,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SetComponentQuantity {
            offer_id,
            component_id,
            quantity,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Offer`.
        tx.execute(Lock(By::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut offer = tx
            .execute(Select(By::<Option<Offer>, _>::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;

        offer
            .required_components
            .set_quantity(&component_id, quantity)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        offer.updated_at = DateTime::now().coerce();

        tx.execute(Update(offer.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(offer)
    }
}

/// Error of [`SetComponentQuantity`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Offer`] doesn't exist.
    #[display("`Offer(id: {_0})` does not exist")]
    #[from(ignore)]
    OfferNotExists(#[error(not(source))] offer::Id),

    /// [`RequiredComponent`] doesn't exist.
    #[display("{_0}")]
    NotRequired(required::NotRequired),
}
