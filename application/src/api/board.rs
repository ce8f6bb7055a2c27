//! [`Board`]-related definitions.

use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLObject};
use service::domain::{self, board};

use crate::{
    api::{circuit::FuseType, int, natural},
    Context, Error,
};

/// Layout of a distribution board.
#[derive(Clone, Debug)]
pub struct Board(domain::Board);

impl From<domain::Board> for Board {
    fn from(board: domain::Board) -> Self {
        Self(board)
    }
}

/// Layout of a distribution board.
#[graphql_object(context = Context)]
impl Board {
    /// Nominal number of modules of this `Board`.
    #[must_use]
    pub fn size(&self) -> i32 {
        i32::from(self.0.size().modules())
    }

    /// Number of rows of this `Board`.
    #[must_use]
    pub fn rows(&self) -> i32 {
        int(self.0.size().rows())
    }

    /// Number of modules in a single row.
    #[must_use]
    pub fn modules_per_row(&self) -> i32 {
        int(board::MODULES_PER_ROW)
    }

    /// Pieces not mounted yet.
    #[must_use]
    pub fn pool(&self) -> Vec<PoolEntry> {
        self.0.pool().iter().map(Into::into).collect()
    }

    /// Mounted pieces.
    #[must_use]
    pub fn placed(&self) -> Vec<Placed> {
        self.0.placed().iter().map(Into::into).collect()
    }

    /// Grid of cells, row by row.
    #[must_use]
    pub fn cells(&self) -> Vec<Vec<Cell>> {
        self.0
            .cells()
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect()
    }

    /// Printable label sheet, row by row.
    #[must_use]
    pub fn labels(&self) -> Vec<Vec<Label>> {
        self.0
            .labels()
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect()
    }

    /// Occupancy statistics of this `Board`.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.0.stats().into()
    }
}

/// Component to be mounted on a `Board`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "BoardPiece", context = Context)]
pub struct Piece {
    /// Identifier of this `BoardPiece` in the pool.
    pub id: String,

    /// Display name of this `BoardPiece`.
    pub name: String,

    /// Width of this `BoardPiece` in modules.
    pub modules: i32,

    /// Kind of this `BoardPiece`.
    pub kind: PieceKind,

    /// Room this `BoardPiece` protects, if any.
    pub room: Option<String>,

    /// Number of the `Circuit` this `BoardPiece` protects, if any.
    pub circuit_number: Option<i32>,

    /// Rating of this `BoardPiece`, if it's a breaker.
    pub fuse_type: Option<FuseType>,
}

impl From<&board::Piece> for Piece {
    fn from(p: &board::Piece) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            modules: int(p.modules.cells()),
            kind: p.kind.into(),
            room: p.room.clone(),
            circuit_number: p.circuit_number.map(|n| int(u32::from(n))),
            fuse_type: p.fuse_type.map(Into::into),
        }
    }
}

/// Kind of a `BoardPiece`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "BoardPieceKind")]
pub enum PieceKind {
    /// Switchgear shared by the whole installation.
    Infrastructure,

    /// Breaker of a `Circuit`.
    Circuit,
}

impl From<board::PieceKind> for PieceKind {
    fn from(kind: board::PieceKind) -> Self {
        match kind {
            board::PieceKind::Infrastructure => Self::Infrastructure,
            board::PieceKind::Circuit => Self::Circuit,
        }
    }
}

/// `BoardPiece`s available for mounting.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "BoardPoolEntry", context = Context)]
pub struct PoolEntry {
    /// Available `BoardPiece`.
    pub piece: Piece,

    /// Number of its instances left.
    pub quantity: i32,
}

impl From<&board::PoolEntry> for PoolEntry {
    fn from(e: &board::PoolEntry) -> Self {
        Self {
            piece: (&e.piece).into(),
            quantity: int(e.quantity),
        }
    }
}

/// `BoardPiece` mounted on a `Board`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "BoardPlaced", context = Context)]
pub struct Placed {
    /// Identifier of this instance, unique within its `Board`.
    pub id: i32,

    /// Mounted `BoardPiece`.
    pub piece: Piece,

    /// Position of the leftmost module.
    pub position: Position,
}

impl From<&board::Placed> for Placed {
    fn from(p: &board::Placed) -> Self {
        Self {
            id: int(u32::from(p.id)),
            piece: (&p.piece).into(),
            position: p.position.into(),
        }
    }
}

/// Zero-based cell coordinates on a `Board`.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "BoardPosition", context = Context)]
pub struct Position {
    /// Row index.
    pub row: i32,

    /// Column index.
    pub column: i32,
}

impl From<board::Position> for Position {
    fn from(p: board::Position) -> Self {
        Self {
            row: i32::from(p.row),
            column: i32::from(p.column),
        }
    }
}

/// Zero-based cell coordinates on a `Board`.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
#[graphql(name = "BoardPositionInput")]
pub struct PositionInput {
    /// Row index.
    pub row: i32,

    /// Column index.
    pub column: i32,
}

impl PositionInput {
    /// Converts this [`PositionInput`] into a [`board::Position`].
    ///
    /// # Errors
    ///
    /// Errors if any of the indices is negative or too large.
    pub fn into_domain(self) -> Result<board::Position, Error> {
        Ok(board::Position {
            row: natural(self.row)?,
            column: natural(self.column)?,
        })
    }
}

/// State of a single `Board` cell.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "BoardCell", context = Context)]
pub struct Cell {
    /// Kind of this `BoardCell`.
    pub kind: CellKind,

    /// Instance occupying this `BoardCell`, if any.
    pub placed: Option<Placed>,
}

impl From<board::Cell<'_>> for Cell {
    fn from(cell: board::Cell<'_>) -> Self {
        match cell {
            board::Cell::Empty => Self {
                kind: CellKind::Empty,
                placed: None,
            },
            board::Cell::Start(p) => Self {
                kind: CellKind::Start,
                placed: Some(p.into()),
            },
            board::Cell::Continuation(p) => Self {
                kind: CellKind::Continuation,
                placed: Some(p.into()),
            },
        }
    }
}

/// Kind of a `BoardCell`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "BoardCellKind")]
pub enum CellKind {
    /// Nothing is mounted here.
    Empty,

    /// Leftmost module of a mounted `BoardPiece`.
    Start,

    /// Further module of a mounted `BoardPiece`.
    Continuation,
}

/// Span of cells on a `Board` label sheet.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "BoardLabel", context = Context)]
pub struct Label {
    /// Number of merged cells.
    pub span: i32,

    /// Main text, absent for empty cells.
    pub text: Option<String>,

    /// Room the labeled component protects.
    pub room: Option<String>,

    /// Number of the `Circuit` the labeled component protects.
    pub circuit_number: Option<i32>,
}

impl From<board::Label> for Label {
    fn from(label: board::Label) -> Self {
        match label {
            board::Label::Empty { span } => Self {
                span: int(span),
                text: None,
                room: None,
                circuit_number: None,
            },
            board::Label::Component {
                span,
                text,
                room,
                circuit_number,
            } => Self {
                span: int(span),
                text: Some(text),
                room,
                circuit_number: circuit_number.map(|n| int(u32::from(n))),
            },
        }
    }
}

/// Occupancy statistics of a `Board`.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "BoardStats", context = Context)]
pub struct Stats {
    /// Nominal number of modules.
    pub total_modules: i32,

    /// Number of rows.
    pub rows: i32,

    /// Number of occupied cells.
    pub occupied: i32,

    /// Number of free modules.
    pub free: i32,
}

impl From<board::Stats> for Stats {
    fn from(s: board::Stats) -> Self {
        Self {
            total_modules: int(s.total_modules),
            rows: int(s.rows),
            occupied: int(s.occupied),
            free: int(s.free),
        }
    }
}

/// Parses a GraphQL `Int` into a [`board::Size`].
///
/// # Errors
///
/// Errors if the number isn't one of the [`board::Size::ALL`].
pub(crate) fn size(modules: i32) -> Result<board::Size, Error> {
    natural::<u16>(modules)
        .ok()
        .and_then(board::Size::new)
        .ok_or_else(|| crate::api::InputError::BoardSize.into())
}

#[cfg(test)]
mod spec {
    use service::domain::board;

    use super::{size, Label, PositionInput};

    #[test]
    fn parses_standard_sizes_only() {
        assert_eq!(size(36).unwrap().modules(), 36);
        assert_eq!(size(13).unwrap_err().code, "INVALID_BOARD_SIZE");
        assert_eq!(size(-12).unwrap_err().code, "INVALID_BOARD_SIZE");
    }

    #[test]
    fn converts_position() {
        let pos = PositionInput { row: 1, column: 11 }.into_domain().unwrap();

        assert_eq!(pos, board::Position { row: 1, column: 11 });
        assert!(PositionInput { row: -1, column: 0 }.into_domain().is_err());
    }

    #[test]
    fn converts_empty_label() {
        let label = Label::from(board::Label::Empty { span: 4 });

        assert_eq!(label.span, 4);
        assert!(label.text.is_none());
    }
}
