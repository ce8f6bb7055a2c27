//! [`Command`] for editing the circuits of an [`Offer`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{circuit::CircuitList, RequiredComponent};
use crate::{
    domain::{
        circuit::{self, template, Circuit},
        offer, Component, Offer,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for editing the circuits of an [`Offer`].
///
/// [`RequiredComponent`]s of the [`Offer`] are re-derived after every
/// [`Action`].
#[derive(Clone, Debug)]
pub struct EditCircuits {
    /// ID of the [`Offer`] which circuits should be edited.
    pub offer_id: offer::Id,

    /// [`Action`] to be performed.
    pub action: Action,
}

/// Action upon a [`CircuitList`].
#[derive(Clone, Debug)]
pub enum Action {
    /// Appends a blank [`Circuit`] and opens it for editing.
    Add,

    /// Opens the [`Circuit`] for editing.
    Open(circuit::Id),

    /// Commits the [`Circuit`] being edited.
    Commit,

    /// Stops editing without validation.
    Cancel,

    /// Replaces the [`Circuit`] with the same ID.
    Update(Circuit),

    /// Removes the [`Circuit`].
    Delete(circuit::Id),

    /// Adds a [`Circuit`] from the [`template::Template`], or removes the one
    /// created from it.
    ToggleTemplate(template::Id),

    /// Appends the provided [`Circuit`]s with fresh IDs.
    Append(Vec<Circuit>),
}

impl<Db> Command<EditCircuits> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Offer>, offer::Id>>,
            Ok = Option<Offer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Component>, ()>>,
            Ok = Vec<Component>,
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

    async fn execute(&self, cmd: EditCircuits) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let EditCircuits { offer_id, action } = cmd;

        let template = match &action {
            Action::ToggleTemplate(id) => Some(
                template::get(*id)
                    .ok_or(E::TemplateNotExists(*id))
                    .map_err(tracerr::wrap!())?,
            ),
            Action::Add
            | Action::Open(_)
            | Action::Commit
            | Action::Cancel
            | Action::Update(_)
            | Action::Delete(_)
            | Action::Append(_) => None,
        };

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

        let circuits = &mut offer.circuits;
        match action {
            Action::Add => circuits.add().map(drop),
            Action::Open(id) => circuits.edit(id),
            Action::Commit => circuits.commit(),
            Action::Cancel => {
                circuits.cancel();
                Ok(())
            }
            Action::Update(c) => circuits.update(c),
            Action::Delete(id) => circuits.delete(id).map(drop),
            Action::ToggleTemplate(_) => {
                if let Some(t) = template {
                    drop(circuits.toggle_template(t));
                }
                Ok(())
            }
            Action::Append(new) => {
                drop(circuits.append(new));
                Ok(())
            }
        }
        .map_err(tracerr::from_and_wrap!(=> E))?;

        let catalog = tx
            .execute(Select(By::<Vec<Component>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        offer
            .required_components
            .rederive(&offer.circuits, &catalog);
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

/// Error of [`EditCircuits`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Offer`] doesn't exist.
    #[display("`Offer(id: {_0})` does not exist")]
    #[from(ignore)]
    OfferNotExists(#[error(not(source))] offer::Id),

    /// [`template::Template`] doesn't exist.
    #[display("`Template(id: {_0})` does not exist")]
    #[from(ignore)]
    TemplateNotExists(#[error(not(source))] template::Id),

    /// [`CircuitList`] rejected the [`Action`].
    #[display("{_0}")]
    Circuit(circuit::list::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::circuit::{template, Description},
        infra::database::mock::MockDatabase,
    };

    use super::{Action, Command as _, EditCircuits, ExecutionError};

    #[tokio::test]
    async fn rederives_components_on_every_change() {
        let (svc, offer) = MockDatabase::service_with_offer();

        let t = template::all()[0].id;
        let offer = svc
            .execute(EditCircuits {
                offer_id: offer.id,
                action: Action::ToggleTemplate(t),
            })
            .await
            .unwrap();

        assert_eq!(offer.circuits.len(), 1);
        assert_eq!(offer.required_components.as_slice().len(), 1);
        assert!(offer.required_components.as_slice()[0].is_derived());
        assert_eq!(svc.database().offer(offer.id).unwrap().circuits.len(), 1);
    }

    #[tokio::test]
    async fn rejects_adding_after_blank_row() {
        let (svc, offer) = MockDatabase::service_with_offer();
        let add = || EditCircuits {
            offer_id: offer.id,
            action: Action::Add,
        };

        let offer = svc.execute(add()).await.unwrap();
        assert_eq!(offer.circuits.len(), 1);

        let err = svc.execute(add()).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::Circuit(_)));
        assert_eq!(svc.database().offer(offer.id).unwrap().circuits.len(), 1);

        let mut circuit = offer.circuits.circuits()[0].clone();
        circuit.description = Description::new("Kuchnia").unwrap();
        drop(
            svc.execute(EditCircuits {
                offer_id: offer.id,
                action: Action::Update(circuit),
            })
            .await
            .unwrap(),
        );
        let offer = svc.execute(add()).await.unwrap();

        assert_eq!(offer.circuits.len(), 2);
    }

    #[tokio::test]
    async fn fails_on_unknown_offer() {
        let (svc, _) = MockDatabase::service_with_offer();

        let err = svc
            .execute(EditCircuits {
                offer_id: crate::domain::offer::Id::new(),
                action: Action::Add,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::OfferNotExists(_)));
    }
}
