//! In-memory [`Database`] for testing [`Command`]s and [`Query`]s.
//!
//! [`Command`]: crate::Command
//! [`Query`]: crate::Query

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use common::operations::{
    By, Commit, Delete, Insert, Lock, Select, Transact, Update,
};
use tracerr::Traced;

use crate::{
    domain::{offer, Component, Offer},
    infra::{database, Database},
    read::component::FuseLadder,
    Config, Service,
};

/// In-memory [`Database`] without transaction isolation.
#[derive(Clone, Debug, Default)]
pub(crate) struct MockDatabase(Arc<Mutex<State>>);

/// State of a [`MockDatabase`].
#[derive(Debug, Default)]
struct State {
    offers: HashMap<offer::Id, Offer>,
    components: Vec<Component>,
    fuse_ladders: Vec<FuseLadder>,
}

impl MockDatabase {
    /// Creates a new [`Service`] over an empty [`MockDatabase`] containing a
    /// single blank [`Offer`].
    pub(crate) fn service_with_offer() -> (Service<Self>, Offer) {
        let db = Self::default();
        let offer = offer::spec::offer();
        drop(db.state().offers.insert(offer.id, offer.clone()));
        (Service::new(Config::default(), db), offer)
    }

    /// Returns the stored [`Offer`] with the provided [`offer::Id`].
    pub(crate) fn offer(&self, id: offer::Id) -> Option<Offer> {
        self.state().offers.get(&id).cloned()
    }

    /// Replaces the [`Component`] catalog.
    pub(crate) fn set_components(&self, components: Vec<Component>) {
        self.state().components = components;
    }

    /// Replaces the stored [`FuseLadder`]s.
    pub(crate) fn set_fuse_ladders(&self, ladders: Vec<FuseLadder>) {
        self.state().fuse_ladders = ladders;
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().unwrap()
    }
}

impl Database<Transact> for MockDatabase {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for MockDatabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Lock<By<Offer, offer::Id>>> for MockDatabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Offer, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Select<By<Option<Offer>, offer::Id>>> for MockDatabase {
    type Ok = Option<Offer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Offer>, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.offer(by.into_inner()))
    }
}

impl Database<Insert<Offer>> for MockDatabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(offer): Insert<Offer>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.state().offers.insert(offer.id, offer));
        Ok(())
    }
}

impl Database<Update<Offer>> for MockDatabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(offer): Update<Offer>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.state().offers.insert(offer.id, offer));
        Ok(())
    }
}

impl Database<Delete<By<Offer, offer::Id>>> for MockDatabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Offer, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.state().offers.remove(&by.into_inner()));
        Ok(())
    }
}

impl Database<Select<By<Vec<Component>, ()>>> for MockDatabase {
    type Ok = Vec<Component>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Component>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state().components.clone())
    }
}

impl Database<Select<By<Vec<FuseLadder>, ()>>> for MockDatabase {
    type Ok = Vec<FuseLadder>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<FuseLadder>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state().fuse_ladders.clone())
    }
}
