//! Printable [`Label`] sheet of a [`Board`].

#[cfg(doc)]
use super::Board;
use super::{Cell, PieceKind, Placed};
use crate::domain::circuit;

/// Span of consecutive cells in a [`Board`] row on a label sheet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Label {
    /// Empty cells.
    Empty {
        /// Number of merged cells.
        span: usize,
    },

    /// Cells of a single mounted component.
    Component {
        /// Number of merged cells.
        span: usize,

        /// Main label text.
        text: String,

        /// Room the component protects, if any.
        room: Option<String>,

        /// Number of the circuit the component protects, if any.
        circuit_number: Option<circuit::Number>,
    },
}

impl Label {
    /// Builds the [`Label`] of the provided [`Placed`] component.
    fn of(p: &Placed) -> Self {
        let text = match p.piece.kind {
            PieceKind::Circuit => p.piece.name.clone(),
            PieceKind::Infrastructure => abbreviate(&p.piece.name),
        };
        let room = match p.piece.kind {
            PieceKind::Circuit => {
                p.piece.room.clone().filter(|r| !r.is_empty())
            }
            PieceKind::Infrastructure => None,
        };
        Self::Component {
            span: p.piece.modules.cells(),
            text,
            room,
            circuit_number: p.piece.circuit_number,
        }
    }
}

/// Returns the label text of an infrastructure component.
fn abbreviate(name: &str) -> String {
    match name {
        "Wyłącznik główny" => "WYŁ. GŁ.".into(),
        "Złączka PEN" => "PEN".into(),
        "Ogranicznik przepięć" => "OGR.PRZEP.".into(),
        "Blok rozdzielczy" => "BLOK ROZD.".into(),
        other => other.to_uppercase(),
    }
}

/// Merges the provided grid row into [`Label`]s.
pub(super) fn row(cells: &[Cell<'_>]) -> Vec<Label> {
    let mut labels = Vec::new();
    for cell in cells {
        match cell {
            Cell::Start(p) => labels.push(Label::of(p)),
            Cell::Continuation(_) => {}
            Cell::Empty => {
                if let Some(Label::Empty { span }) = labels.last_mut() {
                    *span += 1;
                } else {
                    labels.push(Label::Empty { span: 1 });
                }
            }
        }
    }
    labels
}

#[cfg(test)]
mod spec {
    use super::Label;
    use crate::domain::board::{
        Board, Modules, Piece, PieceId, PieceKind, PoolEntry, Position, Size,
    };

    fn entry(name: &str, modules: u8, kind: PieceKind) -> PoolEntry {
        PoolEntry {
            piece: Piece {
                id: PieceId::from(name.to_lowercase()),
                name: name.into(),
                modules: Modules::from(modules),
                kind,
                room: (kind == PieceKind::Circuit).then(|| "Kuchnia".into()),
                circuit_number: None,
                fuse_type: None,
            },
            quantity: 1,
        }
    }

    #[test]
    fn merges_spans() {
        let mut b = Board::new(
            Size::new(12).unwrap(),
            vec![
                entry("Wyłącznik główny", 3, PieceKind::Infrastructure),
                entry("Zegar", 1, PieceKind::Infrastructure),
                entry("B16A", 1, PieceKind::Circuit),
            ],
        );
        let spots = [("wyłącznik główny", 0), ("zegar", 5), ("b16a", 6)];
        for (id, column) in spots {
            let at = Position { row: 0, column };
            let _ = b.place(&PieceId::from(id.to_owned()), at).unwrap();
        }

        let labels = b.labels();

        assert_eq!(labels.len(), 1);
        assert_eq!(
            labels[0],
            [
                Label::Component {
                    span: 3,
                    text: "WYŁ. GŁ.".into(),
                    room: None,
                    circuit_number: None,
                },
                Label::Empty { span: 2 },
                Label::Component {
                    span: 1,
                    text: "ZEGAR".into(),
                    room: None,
                    circuit_number: None,
                },
                Label::Component {
                    span: 1,
                    text: "B16A".into(),
                    room: Some("Kuchnia".into()),
                    circuit_number: None,
                },
                Label::Empty { span: 5 },
            ],
        );
    }
}
