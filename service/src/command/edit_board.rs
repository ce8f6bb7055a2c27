//! [`Command`] for editing the distribution [`Board`] of an [`Offer`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        board::{self, InstanceId, PieceId, Position},
        offer, Board, Offer,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for editing the distribution [`Board`] of an [`Offer`].
#[derive(Clone, Debug)]
pub struct EditBoard {
    /// ID of the [`Offer`] which [`Board`] should be edited.
    pub offer_id: offer::Id,

    /// [`Action`] to be performed.
    pub action: Action,
}

/// Action upon a [`Board`].
#[derive(Clone, Debug)]
pub enum Action {
    /// Starts the [`Board`] of the provided [`board::Size`] over, filling the
    /// pool from the current circuits and required components.
    Reset(board::Size),

    /// Mounts a new instance of the pool piece.
    Place {
        /// ID of the pool piece.
        piece: PieceId,

        /// [`Position`] to mount at.
        at: Position,
    },

    /// Moves a mounted instance.
    Move {
        /// ID of the mounted instance.
        instance: InstanceId,

        /// [`Position`] to move to.
        to: Position,
    },

    /// Unmounts an instance back to the pool.
    Remove(InstanceId),
}

impl<Db> Command<EditBoard> for Service<Db>
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

    async fn execute(&self, cmd: EditBoard) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let EditBoard { offer_id, action } = cmd;

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

        let size = match &action {
            Action::Reset(size) => *size,
            Action::Place { .. } | Action::Move { .. } | Action::Remove(_) => {
                offer.board.as_ref().map(Board::size).unwrap_or_default()
            }
        };
        let board = match (&action, offer.board.take()) {
            (Action::Reset(_), _) | (_, None) => Board::initialize(
                size,
                &offer.circuits,
                offer.required_components.as_slice(),
            ),
            (_, Some(b)) => b,
        };
        let board = offer.board.insert(board);

        match action {
            Action::Reset(_) => Ok(()),
            Action::Place { piece, at } => board.place(&piece, at).map(drop),
            Action::Move { instance, to } => board.relocate(instance, to),
            Action::Remove(instance) => board.remove(instance),
        }
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

/// Error of [`EditBoard`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Offer`] doesn't exist.
    #[display("`Offer(id: {_0})` does not exist")]
    #[from(ignore)]
    OfferNotExists(#[error(not(source))] offer::Id),

    /// [`Board`] rejected the [`Action`].
    #[display("{_0}")]
    Rejected(board::Rejection),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{edit_circuits, EditCircuits},
        domain::{
            board::{PieceKind, Position, Size},
            circuit::template,
        },
        infra::database::mock::MockDatabase,
    };

    use super::{Action, Command as _, EditBoard, ExecutionError};

    #[tokio::test]
    async fn places_and_removes_circuit_breakers() {
        let (svc, offer) = MockDatabase::service_with_offer();
        let offer = svc
            .execute(EditCircuits {
                offer_id: offer.id,
                action: edit_circuits::Action::ToggleTemplate(
                    template::all()[0].id,
                ),
            })
            .await
            .unwrap();

        let offer = svc
            .execute(EditBoard {
                offer_id: offer.id,
                action: Action::Reset(Size::default()),
            })
            .await
            .unwrap();
        let board = offer.board.as_ref().unwrap();
        let entry = board
            .pool()
            .iter()
            .find(|e| e.piece.kind == PieceKind::Circuit)
            .unwrap()
            .clone();

        let offer = svc
            .execute(EditBoard {
                offer_id: offer.id,
                action: Action::Place {
                    piece: entry.piece.id.clone(),
                    at: Position { row: 0, column: 0 },
                },
            })
            .await
            .unwrap();
        let board = offer.board.as_ref().unwrap();
        assert_eq!(board.placed().len(), 1);
        let instance = board.placed()[0].id;

        let err = svc
            .execute(EditBoard {
                offer_id: offer.id,
                action: Action::Place {
                    piece: entry.piece.id.clone(),
                    at: Position { row: 0, column: 0 },
                },
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::Rejected(_)));

        let offer = svc
            .execute(EditBoard {
                offer_id: offer.id,
                action: Action::Remove(instance),
            })
            .await
            .unwrap();
        let board = offer.board.as_ref().unwrap();
        assert!(board.placed().is_empty());
        let restored = board
            .pool()
            .iter()
            .find(|e| e.piece.id == entry.piece.id)
            .unwrap();
        assert_eq!(restored.quantity, entry.quantity);
    }
}
