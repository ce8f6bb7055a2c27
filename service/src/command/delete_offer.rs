//! [`Command`] for deleting an [`Offer`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{offer, Offer},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Offer`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteOffer {
    /// ID of the [`Offer`] to be deleted.
    pub offer_id: offer::Id,
}

impl<Db> Command<DeleteOffer> for Service<Db>
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
        > + Database<
            Delete<By<Offer, offer::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteOffer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteOffer { offer_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let offer = tx
            .execute(Select(By::<Option<Offer>, _>::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(offer)
    }
}

/// Error of [`DeleteOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Offer`] doesn't exist.
    #[display("`Offer(id: {_0})` does not exist")]
    #[from(ignore)]
    OfferNotExists(#[error(not(source))] offer::Id),
}
