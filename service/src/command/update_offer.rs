//! [`Command`] for updating general data of an [`Offer`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{offer, Offer},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating general data of an [`Offer`].
///
/// [`None`] fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateOffer {
    /// ID of the [`Offer`] to be updated.
    pub offer_id: offer::Id,

    /// New [`offer::Client`] data.
    pub client: Option<offer::Client>,

    /// New [`offer::Property`] data.
    pub property: Option<offer::Property>,

    /// New [`offer::Room`]s.
    pub rooms: Option<Vec<offer::Room>>,

    /// New [`offer::PricingInputs`].
    pub pricing: Option<offer::PricingInputs>,

    /// New [`offer::CustomItem`]s.
    pub custom_items: Option<Vec<offer::CustomItem>>,
}

impl<Db> Command<UpdateOffer> for Service<Db>
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

    async fn execute(&self, cmd: UpdateOffer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateOffer {
            offer_id,
            client,
            property,
            rooms,
            pricing,
            custom_items,
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

        if let Some(client) = client {
            offer.client = client;
        }
        if let Some(property) = property {
            offer.property = property;
        }
        if let Some(rooms) = rooms {
            offer.rooms = rooms;
        }
        if let Some(pricing) = pricing {
            offer.pricing = pricing;
        }
        if let Some(items) = custom_items {
            offer.custom_items = items;
        }
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

/// Error of [`UpdateOffer`] [`Command`] execution.
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
