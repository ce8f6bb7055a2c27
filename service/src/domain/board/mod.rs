//! Distribution [`Board`] layout definitions.
//!
//! A [`Board`] is a grid of rows, [`MODULES_PER_ROW`] DIN rail modules each.
//! Its only state is the pool of [`Piece`]s waiting to be mounted and the
//! arena of [`Placed`] ones, so the grid itself is computed on read.

pub mod label;

use derive_more::{AsRef, Display, Error, From, Into};
use serde::{Deserialize, Serialize};

use crate::domain::{
    circuit::{self, CircuitList, FuseType},
    component::{Modules, RequiredComponent},
};

pub use self::label::Label;

/// Number of DIN rail modules in a single [`Board`] row.
pub const MODULES_PER_ROW: usize = 12;

/// Distribution board being laid out.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// [`Size`] of this [`Board`].
    size: Size,

    /// [`Piece`]s not mounted yet.
    pool: Vec<PoolEntry>,

    /// [`Piece`]s mounted on this [`Board`].
    placed: Vec<Placed>,

    /// Next [`InstanceId`] to be assigned.
    next_instance: u32,
}

impl Board {
    /// Creates a new empty [`Board`] of the provided [`Size`] with the
    /// provided pool of [`Piece`]s.
    #[must_use]
    pub fn new(size: Size, pool: Vec<PoolEntry>) -> Self {
        Self {
            size,
            pool,
            placed: Vec::new(),
            next_instance: 1,
        }
    }

    /// Creates a new empty [`Board`] of the provided [`Size`] with the pool
    /// required by the provided [`CircuitList`] and [`RequiredComponent`]s.
    #[must_use]
    pub fn initialize(
        size: Size,
        circuits: &CircuitList,
        required: &[RequiredComponent],
    ) -> Self {
        Self::new(size, pool(circuits, required))
    }

    /// Returns [`Size`] of this [`Board`].
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Returns [`Piece`]s of this [`Board`] not mounted yet.
    #[must_use]
    pub fn pool(&self) -> &[PoolEntry] {
        &self.pool
    }

    /// Returns [`Piece`]s mounted on this [`Board`].
    #[must_use]
    pub fn placed(&self) -> &[Placed] {
        &self.placed
    }

    /// Mounts a new instance of the pool [`Piece`] with the provided
    /// [`PieceId`] at the provided [`Position`].
    ///
    /// # Errors
    ///
    /// If the [`Piece`] is unknown, exhausted or doesn't fit at the
    /// [`Position`]. Nothing is changed then.
    pub fn place(
        &mut self,
        piece: &PieceId,
        at: Position,
    ) -> Result<InstanceId, Rejection> {
        let entry = self
            .pool
            .iter()
            .position(|e| &e.piece.id == piece)
            .ok_or(Rejection::UnknownPiece)?;
        if self.pool[entry].quantity == 0 {
            return Err(Rejection::Exhausted);
        }
        self.check_fits(self.pool[entry].piece.modules, at, None)?;

        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        self.pool[entry].quantity -= 1;
        self.placed.push(Placed {
            id,
            piece: self.pool[entry].piece.clone(),
            position: at,
        });
        Ok(id)
    }

    /// Moves the [`Placed`] instance with the provided [`InstanceId`] to the
    /// provided [`Position`].
    ///
    /// # Errors
    ///
    /// If there is no such instance or it doesn't fit at the [`Position`].
    /// The instance stays where it was then.
    pub fn relocate(
        &mut self,
        id: InstanceId,
        to: Position,
    ) -> Result<(), Rejection> {
        let idx = self
            .placed
            .iter()
            .position(|p| p.id == id)
            .ok_or(Rejection::UnknownInstance)?;
        self.check_fits(self.placed[idx].piece.modules, to, Some(id))?;
        self.placed[idx].position = to;
        Ok(())
    }

    /// Unmounts the [`Placed`] instance with the provided [`InstanceId`],
    /// returning it to the pool.
    ///
    /// # Errors
    ///
    /// If there is no such instance.
    pub fn remove(&mut self, id: InstanceId) -> Result<(), Rejection> {
        let idx = self
            .placed
            .iter()
            .position(|p| p.id == id)
            .ok_or(Rejection::UnknownInstance)?;
        let Placed { piece, .. } = self.placed.remove(idx);

        let same_id = self.pool.iter().position(|e| {
            e.piece.kind == piece.kind && e.piece.id == piece.id
        });
        let same_shape = || {
            self.pool.iter().position(|e| {
                let p = &e.piece;
                p.kind == piece.kind
                    && p.name == piece.name
                    && p.modules == piece.modules
                    && p.fuse_type == piece.fuse_type
                    && p.room == piece.room
            })
        };
        match same_id.or_else(same_shape) {
            Some(entry) => self.pool[entry].quantity += 1,
            None => self.pool.push(PoolEntry { piece, quantity: 1 }),
        }
        Ok(())
    }

    /// Returns the grid of this [`Board`], row by row.
    #[must_use]
    pub fn cells(&self) -> Vec<Vec<Cell<'_>>> {
        let mut grid =
            vec![vec![Cell::Empty; MODULES_PER_ROW]; self.size.rows()];
        for p in &self.placed {
            let Some(row) = grid.get_mut(p.position.row()) else {
                continue;
            };
            let start = p.position.column();
            for (i, cell) in row
                .iter_mut()
                .skip(start)
                .take(p.piece.modules.cells())
                .enumerate()
            {
                *cell = if i == 0 {
                    Cell::Start(p)
                } else {
                    Cell::Continuation(p)
                };
            }
        }
        grid
    }

    /// Returns the label sheet of this [`Board`], row by row.
    #[must_use]
    pub fn labels(&self) -> Vec<Vec<Label>> {
        self.cells().iter().map(|row| label::row(row)).collect()
    }

    /// Returns [`Stats`] of this [`Board`].
    #[must_use]
    pub fn stats(&self) -> Stats {
        let occupied = self
            .placed
            .iter()
            .map(|p| p.piece.modules.cells())
            .sum::<usize>();
        let total = usize::from(self.size.modules());
        Stats {
            total_modules: total,
            rows: self.size.rows(),
            occupied,
            free: total.saturating_sub(occupied),
        }
    }

    /// Checks whether a [`Piece`] of the provided width fits at the provided
    /// [`Position`], ignoring the `moving` instance.
    fn check_fits(
        &self,
        modules: Modules,
        at: Position,
        moving: Option<InstanceId>,
    ) -> Result<(), Rejection> {
        if at.row() >= self.size.rows() {
            return Err(Rejection::OutOfRange);
        }
        let (start, end) = (at.column(), at.column() + modules.cells());
        if end > MODULES_PER_ROW {
            return Err(Rejection::DoesNotFit);
        }

        let overlaps = self.placed.iter().any(|p| {
            Some(p.id) != moving
                && p.position.row == at.row
                && p.position.column() < end
                && start < p.position.column() + p.piece.modules.cells()
        });
        if overlaps {
            return Err(Rejection::Occupied);
        }
        Ok(())
    }
}

/// Size of a [`Board`], in modules.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct Size(u16);

impl Size {
    /// All the available [`Size`]s.
    pub const ALL: [u16; 13] =
        [12, 24, 36, 48, 54, 72, 96, 120, 144, 180, 216, 252, 288];

    /// Creates a new [`Size`] if it's one of the [`Size::ALL`].
    #[must_use]
    pub fn new(modules: u16) -> Option<Self> {
        Self::ALL.contains(&modules).then_some(Self(modules))
    }

    /// Returns the number of modules of this [`Size`].
    #[must_use]
    pub const fn modules(self) -> u16 {
        self.0
    }

    /// Returns the number of rows of a [`Board`] having this [`Size`].
    #[must_use]
    pub fn rows(self) -> usize {
        usize::from(self.0).div_ceil(MODULES_PER_ROW)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self(36)
    }
}

impl TryFrom<u16> for Size {
    type Error = &'static str;

    fn try_from(modules: u16) -> Result<Self, Self::Error> {
        Self::new(modules).ok_or("invalid `board::Size`")
    }
}

/// Kind of a [`Piece`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PieceKind {
    /// Switchgear shared by the whole installation.
    Infrastructure,

    /// Breaker of a circuit.
    Circuit,
}

/// Component to be mounted on a [`Board`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    /// ID of this [`Piece`].
    pub id: PieceId,

    /// Display name of this [`Piece`].
    pub name: String,

    /// Width of this [`Piece`].
    pub modules: Modules,

    /// [`PieceKind`] of this [`Piece`].
    pub kind: PieceKind,

    /// Room (circuit description) this [`Piece`] protects, if any.
    pub room: Option<String>,

    /// Number of the circuit this [`Piece`] protects, if any.
    pub circuit_number: Option<circuit::Number>,

    /// Rating of this [`Piece`], if it's a breaker.
    pub fuse_type: Option<FuseType>,
}

impl Piece {
    /// Creates a new infrastructure [`Piece`].
    fn infrastructure(id: String, name: String, modules: Modules) -> Self {
        Self {
            id: PieceId(id),
            name,
            modules,
            kind: PieceKind::Infrastructure,
            room: None,
            circuit_number: None,
            fuse_type: None,
        }
    }
}

/// ID of a pool [`Piece`], like `main-switch`.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
pub struct PieceId(String);

/// Pool entry of [`Piece`]s not mounted yet.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PoolEntry {
    /// Available [`Piece`].
    pub piece: Piece,

    /// Number of available instances of the [`Piece`].
    pub quantity: u32,
}

/// [`Piece`] mounted on a [`Board`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Placed {
    /// ID of this instance.
    pub id: InstanceId,

    /// Mounted [`Piece`].
    pub piece: Piece,

    /// [`Position`] of the leftmost module of the [`Piece`].
    pub position: Position,
}

/// ID of a [`Placed`] instance, unique within its [`Board`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct InstanceId(u32);

/// Zero-based cell coordinates on a [`Board`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Position {
    /// Row index.
    pub row: u16,

    /// Column index.
    pub column: u16,
}

impl Position {
    /// Returns the row index of this [`Position`].
    fn row(self) -> usize {
        usize::from(self.row)
    }

    /// Returns the column index of this [`Position`].
    fn column(self) -> usize {
        usize::from(self.column)
    }
}

/// State of a single [`Board`] cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cell<'b> {
    /// Nothing is mounted here.
    Empty,

    /// Leftmost module of a [`Placed`] [`Piece`].
    Start(&'b Placed),

    /// Further module of a [`Placed`] [`Piece`].
    Continuation(&'b Placed),
}

/// Occupancy statistics of a [`Board`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stats {
    /// Nominal number of modules.
    pub total_modules: usize,

    /// Number of rows.
    pub rows: usize,

    /// Number of occupied cells.
    pub occupied: usize,

    /// Number of free modules.
    pub free: usize,
}

/// Reason a [`Board`] change was rejected.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum Rejection {
    /// Target row doesn't exist.
    #[display("Row is out of the board")]
    OutOfRange,

    /// [`Piece`] doesn't fit into the rest of the row.
    #[display("Component doesn't fit into the row")]
    DoesNotFit,

    /// Target cells are occupied by another [`Piece`].
    #[display("Cells are occupied by another component")]
    Occupied,

    /// No instances of the [`Piece`] are left in the pool.
    #[display("No components of this kind are left")]
    Exhausted,

    /// [`Piece`] is not in the pool.
    #[display("Component is not in the pool")]
    UnknownPiece,

    /// [`Placed`] instance doesn't exist.
    #[display("Component is not on the board")]
    UnknownInstance,
}

/// Default infrastructure every [`Board`] starts with.
const DEFAULT_INFRASTRUCTURE: [(&str, &str, u8); 5] = [
    ("main-switch", "Wyłącznik główny", 3),
    ("pen-connector", "Złączka PEN", 2),
    ("surge-protection", "Ogranicznik przepięć", 4),
    ("distribution-block", "Blok rozdzielczy", 4),
    ("rcd-1f", "RCD 1-fazowy", 2),
];

/// Three-phase residual current device.
const RCD_3F: (&str, &str, u8) = ("rcd-3f", "RCD 3-fazowy", 4);

/// Resolves the infrastructure [`PieceId`] and width of a known component
/// name or ID.
fn known_infrastructure(name: &str) -> Option<(&'static str, u8)> {
    Some(match name {
        "Rozłącznik izolacyjny" | "Wyłącznik główny" | "isolator" => {
            ("main-switch", 3)
        }
        "Złączka podziału PEN" | "Złączka PEN" | "pen_splitter" => {
            ("pen-connector", 2)
        }
        "Zabezpieczenie przepięciowe"
        | "Ogranicznik przepięć"
        | "surge_protection" => ("surge-protection", 4),
        "Blok rozdzielczy" | "distribution_block" => ("distribution-block", 4),
        "Wyłącznik różnicowoprądowy 1F" | "RCD 1-fazowy" | "rcd_1f" => {
            ("rcd-1f", 2)
        }
        "Wyłącznik różnicowoprądowy 3F" | "RCD 3-fazowy" | "rcd_3f" => {
            ("rcd-3f", 4)
        }
        _ => return None,
    })
}

/// Lowercases the provided text, replacing whitespace runs with dashes.
fn slug(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Builds the pool of a new [`Board`].
fn pool(
    circuits: &CircuitList,
    required: &[RequiredComponent],
) -> Vec<PoolEntry> {
    let three_phase = circuits
        .circuits()
        .iter()
        .any(|c| c.kind() == circuit::PhaseKind::Three);
    let mut pool = DEFAULT_INFRASTRUCTURE
        .into_iter()
        .chain(three_phase.then_some(RCD_3F))
        .map(|(id, name, modules)| PoolEntry {
            piece: Piece::infrastructure(
                id.into(),
                name.into(),
                Modules::from(modules),
            ),
            quantity: 1,
        })
        .collect::<Vec<_>>();
    let defaults = pool.len();

    for r in required.iter().filter(|r| !r.is_derived()) {
        let quantity = u32::from(r.quantity);
        if quantity == 0 {
            continue;
        }
        let c = &r.component;
        let known = known_infrastructure(c.name.as_ref())
            .or_else(|| known_infrastructure(c.id.as_ref()));
        let (id, modules) = match known {
            Some((id, modules)) => (id.to_owned(), Modules::from(modules)),
            None => (
                format!("component-{}", slug(c.name.as_ref())),
                if c.modules.cells() == 0 { Modules::ONE } else { c.modules },
            ),
        };

        match pool.iter().position(|e| e.piece.id.as_ref() == id.as_str()) {
            Some(i) if i < defaults => pool[i].quantity = quantity,
            Some(i) => {
                pool[i].quantity = pool[i].quantity.saturating_add(quantity);
            }
            None => pool.push(PoolEntry {
                piece: Piece::infrastructure(id, c.name.to_string(), modules),
                quantity,
            }),
        }
    }

    let first_breaker = pool.len();
    for c in circuits.circuits() {
        let name = format!("B{}", c.fuse_type);
        let room = c.description.to_string();
        let poles = c.socket_switch_count.breaker_poles();
        let room_slug = if room.is_empty() {
            "unknown".to_owned()
        } else {
            slug(&room)
        };
        let id = PieceId(format!(
            "circuit-{}-{room_slug}",
            name.to_lowercase(),
        ));

        // Rooms differing only in case or spacing share one entry.
        let existing =
            pool[first_breaker..].iter_mut().find(|e| e.piece.id == id);
        if let Some(e) = existing {
            e.quantity = e.quantity.saturating_add(poles);
            continue;
        }

        pool.push(PoolEntry {
            piece: Piece {
                id,
                name,
                modules: Modules::ONE,
                kind: PieceKind::Circuit,
                room: Some(room),
                circuit_number: Some(c.number),
                fuse_type: Some(c.fuse_type),
            },
            quantity: poles,
        });
    }
    pool
}

#[cfg(test)]
mod spec {
    use super::{
        Board, Cell, Modules, Piece, PieceId, PieceKind, PoolEntry, Position,
        Rejection, Size,
    };
    use crate::domain::{
        circuit::{
            Circuit, CircuitList, Description, FuseType, Id, Number, Phase,
            SocketSwitchCount,
        },
        component::{
            required::spec::component, Quantity, RequiredComponent,
        },
    };

    fn piece(id: &str, modules: u8) -> PoolEntry {
        PoolEntry {
            piece: Piece::infrastructure(
                id.into(),
                id.to_uppercase(),
                Modules::from(modules),
            ),
            quantity: 2,
        }
    }

    fn board() -> Board {
        Board::new(
            Size::new(24).unwrap(),
            vec![piece("rcd", 2), piece("spd", 4)],
        )
    }

    fn at(row: u16, column: u16) -> Position {
        Position { row, column }
    }

    fn id(s: &str) -> PieceId {
        PieceId::from(s.to_owned())
    }

    fn quantity(b: &Board, piece: &str) -> u32 {
        b.pool()
            .iter()
            .find(|e| e.piece.id.as_ref() == piece)
            .map(|e| e.quantity)
            .unwrap()
    }

    #[test]
    fn sizes() {
        assert_eq!(Size::default().rows(), 3);
        assert_eq!(Size::new(54).unwrap().rows(), 5);
        assert_eq!(Size::new(288).unwrap().rows(), 24);
        assert!(Size::new(30).is_none());
    }

    #[test]
    fn places_from_pool() {
        let mut b = board();

        let _ = b.place(&id("spd"), at(1, 3)).unwrap();

        assert_eq!(quantity(&b, "spd"), 1);
        let row = &b.cells()[1];
        assert_eq!(row[2], Cell::Empty);
        assert!(matches!(row[3], Cell::Start(_)));
        for cell in &row[4..7] {
            assert!(matches!(cell, Cell::Continuation(_)));
        }
        assert_eq!(row[7], Cell::Empty);
        assert_eq!(b.stats().occupied, 4);
        assert_eq!(b.stats().free, 20);
    }

    #[test]
    fn rejects_overlap_without_changes() {
        let mut b = board();
        let _ = b.place(&id("spd"), at(0, 0)).unwrap();
        let before = b.clone();

        assert_eq!(b.place(&id("rcd"), at(0, 3)), Err(Rejection::Occupied));
        assert_eq!(b, before);
        assert_eq!(quantity(&b, "rcd"), 2);
    }

    #[test]
    fn rejects_out_of_row_and_range() {
        let mut b = board();

        assert_eq!(b.place(&id("spd"), at(0, 9)), Err(Rejection::DoesNotFit));
        assert_eq!(b.place(&id("spd"), at(2, 0)), Err(Rejection::OutOfRange));
        assert_eq!(b.place(&id("spd"), at(0, 8)).map(|_| ()), Ok(()));
    }

    #[test]
    fn rejects_exhausted_pool() {
        let mut b = board();
        let _ = b.place(&id("rcd"), at(0, 0)).unwrap();
        let _ = b.place(&id("rcd"), at(0, 2)).unwrap();

        assert_eq!(b.place(&id("rcd"), at(0, 4)), Err(Rejection::Exhausted));
        assert_eq!(quantity(&b, "rcd"), 0);
    }

    #[test]
    fn moves_within_own_cells_and_keeps_place_on_conflict() {
        let mut b = board();
        let spd = b.place(&id("spd"), at(0, 0)).unwrap();
        let rcd = b.place(&id("rcd"), at(0, 6)).unwrap();

        b.relocate(spd, at(0, 1)).unwrap();
        assert_eq!(b.placed()[0].position, at(0, 1));

        assert_eq!(b.relocate(spd, at(0, 4)), Err(Rejection::Occupied));
        assert_eq!(b.placed()[0].position, at(0, 1));
        assert_eq!(b.relocate(rcd, at(1, 11)), Err(Rejection::DoesNotFit));
    }

    #[test]
    fn removal_returns_to_pool() {
        let mut b = board();
        let spd = b.place(&id("spd"), at(0, 0)).unwrap();

        b.remove(spd).unwrap();

        assert_eq!(quantity(&b, "spd"), 2);
        assert!(b.placed().is_empty());
        assert_eq!(b.remove(spd), Err(Rejection::UnknownInstance));
    }

    #[test]
    fn removal_recreates_vanished_entry() {
        let mut b = board();
        let spd = b.place(&id("spd"), at(0, 0)).unwrap();
        b.pool.retain(|e| e.piece.id.as_ref() != "spd");

        b.remove(spd).unwrap();

        assert_eq!(quantity(&b, "spd"), 1);
    }

    #[test]
    fn initializes_pool_from_offer() {
        let mut circuits = Vec::new();
        for (n, (text, amps, sockets, phase)) in [
            ("Kuchnia", 16, 2, Phase::L1),
            ("Kuchnia", 16, 0, Phase::L2),
            ("Płyta indukcyjna", 20, 1, Phase::ThreePhase),
        ]
        .into_iter()
        .enumerate()
        {
            let n = u32::try_from(n + 1).unwrap();
            let mut c = Circuit::blank(Id::from(n), Number::from(n));
            c.description = Description::new(text).unwrap();
            c.fuse_type = FuseType::new(amps).unwrap();
            c.socket_switch_count = SocketSwitchCount::from(sockets);
            c.phase = phase;
            circuits.push(c);
        }
        let required = [
            RequiredComponent {
                component: component(
                    "isolator",
                    "Rozłącznik izolacyjny",
                    3,
                    90,
                ),
                quantity: Quantity::new(2).unwrap(),
            },
            RequiredComponent {
                component: component("timer", "Zegar sterujący", 0, 50),
                quantity: Quantity::new(1).unwrap(),
            },
            RequiredComponent {
                component: component("mcb_b16", "B16A", 1, 32),
                quantity: Quantity::new(3).unwrap(),
            },
        ];

        let b = Board::initialize(
            Size::default(),
            &CircuitList::new(circuits),
            &required,
        );

        assert_eq!(quantity(&b, "main-switch"), 2);
        assert_eq!(quantity(&b, "rcd-3f"), 1);
        assert_eq!(quantity(&b, "component-zegar-sterujący"), 1);
        assert_eq!(quantity(&b, "circuit-b16a-kuchnia"), 3);
        assert_eq!(quantity(&b, "circuit-b20a-płyta-indukcyjna"), 1);
        assert!(b
            .pool()
            .iter()
            .all(|e| !e.piece.id.as_ref().starts_with("component-b16a")));

        let kitchen = &b
            .pool()
            .iter()
            .find(|e| e.piece.kind == PieceKind::Circuit)
            .unwrap()
            .piece;
        assert_eq!(kitchen.room.as_deref(), Some("Kuchnia"));
        assert_eq!(kitchen.circuit_number, Some(Number::from(1)));
        assert_eq!(kitchen.modules, Modules::ONE);
    }

    #[test]
    fn merges_rooms_differing_in_case_and_spacing() {
        let rooms = ["Kuchnia", "kuchnia", "Pokój  gościnny", "pokój gościnny"];
        let circuits = rooms
            .into_iter()
            .zip(1..)
            .map(|(text, n)| {
                let mut c = Circuit::blank(Id::from(n), Number::from(n));
                c.description = Description::new(text).unwrap();
                c
            })
            .collect();

        let mut b = Board::initialize(
            Size::default(),
            &CircuitList::new(circuits),
            &[],
        );

        let circuit_entries = b
            .pool()
            .iter()
            .filter(|e| e.piece.kind == PieceKind::Circuit)
            .count();
        assert_eq!(circuit_entries, 2);
        assert_eq!(quantity(&b, "circuit-b10a-kuchnia"), 2);
        assert_eq!(quantity(&b, "circuit-b10a-pokój-gościnny"), 2);
        let kitchen = id("circuit-b10a-kuchnia");
        assert!(b.place(&kitchen, at(0, 0)).is_ok());
        assert!(b.place(&kitchen, at(0, 1)).is_ok());
        assert_eq!(quantity(&b, "circuit-b10a-kuchnia"), 0);
    }
}
