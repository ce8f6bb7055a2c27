//! [`Command`] for creating a new [`Offer`].

use common::{
    operations::{Commit, Insert, Transact, Transacted},
    DateTime, Money,
};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{
        circuit::CircuitList,
        component::required::RequiredComponents,
        offer::{self, PricingInputs, VatRate},
        Offer,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Offer`].
#[derive(Clone, Debug)]
pub struct CreateOffer {
    /// [`offer::Client`] of a new [`Offer`].
    pub client: offer::Client,

    /// [`offer::Property`] of a new [`Offer`].
    pub property: offer::Property,

    /// [`offer::Room`]s of a new [`Offer`].
    pub rooms: Vec<offer::Room>,
}

impl<Db> Command<CreateOffer> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Offer>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateOffer) -> Result<Self::Ok, Self::Err> {
        let CreateOffer {
            client,
            property,
            rooms,
        } = cmd;

        let now = DateTime::now();
        let offer = Offer {
            id: offer::Id::new(),
            client,
            property,
            rooms,
            circuits: CircuitList::default(),
            required_components: RequiredComponents::default(),
            board: None,
            pricing: PricingInputs {
                price_per_point: self.config().price_per_point,
                wire_value: Money::pln(Decimal::ZERO),
                connection_cost: None,
                vat_rate: VatRate::default(),
            },
            custom_items: Vec::new(),
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        tx.execute(Insert(offer.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(offer)
    }
}

/// Error of [`CreateOffer`] [`Command`] execution.
pub type ExecutionError = database::Error;
