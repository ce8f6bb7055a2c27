//! [`CircuitList`] definitions.

use std::cmp::Ordering;

use derive_more::{Display, Error as StdError};
use serde::{Deserialize, Serialize};
use strum::EnumString;

#[cfg(doc)]
use super::{Cable, Description};
use super::{
    Circuit, FuseType, Id, Length, Number, Phase, PhaseKind, Power,
    SocketSwitchCount, Template, Voltage, Zone,
};

/// Ordered list of [`Circuit`]s with at most one row open for editing.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitList {
    /// [`Circuit`]s in their insertion order.
    circuits: Vec<Circuit>,

    /// [`Id`] of the [`Circuit`] currently open for editing, if any.
    editing: Option<Id>,
}

impl CircuitList {
    /// Creates a new [`CircuitList`] out of the provided [`Circuit`]s.
    #[must_use]
    pub fn new(circuits: Vec<Circuit>) -> Self {
        Self {
            circuits,
            editing: None,
        }
    }

    /// Returns all the [`Circuit`]s of this [`CircuitList`] in their
    /// insertion order.
    #[must_use]
    pub fn circuits(&self) -> &[Circuit] {
        &self.circuits
    }

    /// Returns the [`Circuit`] with the provided [`Id`], if any.
    #[must_use]
    pub fn get(&self, id: Id) -> Option<&Circuit> {
        self.circuits.iter().find(|c| c.id == id)
    }

    /// Returns [`Id`] of the [`Circuit`] currently open for editing, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<Id> {
        self.editing
    }

    /// Returns the number of [`Circuit`]s in this [`CircuitList`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    /// Indicates whether this [`CircuitList`] has no [`Circuit`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    /// Returns the [`Id`] to be assigned to the next added [`Circuit`].
    #[must_use]
    pub fn next_id(&self) -> Id {
        self.circuits
            .iter()
            .map(|c| c.id)
            .max()
            .unwrap_or_default()
            .next()
    }

    /// Returns the [`Number`] to be assigned to the next added [`Circuit`].
    fn next_number(&self) -> Number {
        Number::from(u32::try_from(self.circuits.len() + 1).unwrap_or(u32::MAX))
    }

    /// Appends a blank [`Circuit`] and opens it for editing, closing the
    /// previously edited one.
    ///
    /// # Errors
    ///
    /// With [`Error::MissingDescription`] if the [`Circuit`] being edited has
    /// no [`Description`] yet.
    pub fn add(&mut self) -> Result<Id, Error> {
        self.ensure_described()?;

        let id = self.next_id();
        self.circuits.push(Circuit::blank(id, self.next_number()));
        self.editing = Some(id);
        Ok(id)
    }

    /// Opens the [`Circuit`] with the provided [`Id`] for editing.
    ///
    /// # Errors
    ///
    /// With [`Error::NotFound`] if there is no such [`Circuit`].
    pub fn edit(&mut self, id: Id) -> Result<(), Error> {
        if self.get(id).is_none() {
            return Err(Error::NotFound(id));
        }
        self.editing = Some(id);
        Ok(())
    }

    /// Replaces the [`Circuit`] having the same [`Id`] as the provided one.
    ///
    /// # Errors
    ///
    /// - With [`Error::NotFound`] if there is no such [`Circuit`].
    /// - With [`Error::MissingDescription`] if the provided [`Circuit`] has
    ///   an empty [`Description`].
    pub fn update(&mut self, circuit: Circuit) -> Result<(), Error> {
        let existing = self
            .circuits
            .iter_mut()
            .find(|c| c.id == circuit.id)
            .ok_or(Error::NotFound(circuit.id))?;
        if circuit.description.is_empty() {
            return Err(Error::MissingDescription);
        }
        *existing = circuit;
        Ok(())
    }

    /// Closes the [`Circuit`] being edited, if any.
    ///
    /// # Errors
    ///
    /// With [`Error::MissingDescription`] if the [`Circuit`] being edited has
    /// no [`Description`] yet.
    pub fn commit(&mut self) -> Result<(), Error> {
        self.ensure_described()?;
        self.editing = None;
        Ok(())
    }

    /// Closes the [`Circuit`] being edited, if any, without any checks.
    pub fn cancel(&mut self) {
        self.editing = None;
    }

    /// Removes the [`Circuit`] with the provided [`Id`].
    ///
    /// # Errors
    ///
    /// With [`Error::NotFound`] if there is no such [`Circuit`].
    pub fn delete(&mut self, id: Id) -> Result<Circuit, Error> {
        let pos = self
            .circuits
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::NotFound(id))?;
        if self.editing == Some(id) {
            self.editing = None;
        }
        Ok(self.circuits.remove(pos))
    }

    /// Adds a [`Circuit`] created from the provided [`Template`], or removes
    /// the [`Circuit`] described the same way as the [`Template`] if there is
    /// one already.
    pub fn toggle_template(&mut self, template: &Template) -> Toggled {
        let used = self
            .circuits
            .iter()
            .find(|c| c.description.as_ref() == template.description)
            .map(|c| c.id);
        if let Some(id) = used {
            self.circuits.retain(|c| c.id != id);
            if self.editing == Some(id) {
                self.editing = None;
            }
            return Toggled::Removed(id);
        }

        let id = self.next_id();
        let circuit = Circuit::from_template(id, self.next_number(), template);
        self.circuits.push(circuit);
        Toggled::Added(id)
    }

    /// Appends the provided [`Circuit`]s, assigning them fresh [`Id`]s
    /// continuing from the current maximum.
    ///
    /// Returns the number of appended [`Circuit`]s.
    pub fn append(
        &mut self,
        circuits: impl IntoIterator<Item = Circuit>,
    ) -> usize {
        let mut id = self.next_id();
        let before = self.circuits.len();
        for mut c in circuits {
            c.id = id;
            id = id.next();
            self.circuits.push(c);
        }
        self.circuits.len() - before
    }

    /// Returns the [`Circuit`]s matching the provided [`Filter`], ordered by
    /// the provided [`Sort`] (or in insertion order if there is none).
    #[must_use]
    pub fn view(&self, filter: &Filter, sort: Option<Sort>) -> Vec<&Circuit> {
        let mut rows = self
            .circuits
            .iter()
            .filter(|c| filter.matches(c))
            .collect::<Vec<_>>();
        if let Some(sort) = sort {
            rows.sort_by(|a, b| sort.compare(a, b));
        }
        rows
    }

    /// Ensures the [`Circuit`] being edited, if any, is described.
    fn ensure_described(&self) -> Result<(), Error> {
        let undescribed = self
            .editing
            .and_then(|id| self.get(id))
            .is_some_and(|c| c.description.is_empty());
        if undescribed {
            Err(Error::MissingDescription)
        } else {
            Ok(())
        }
    }
}

/// Outcome of [`CircuitList::toggle_template()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Toggled {
    /// New [`Circuit`] has been added.
    Added(Id),

    /// Existing [`Circuit`] has been removed.
    Removed(Id),
}

/// Error of modifying a [`CircuitList`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// [`Circuit`] is required to have a [`Description`].
    #[display("Circuit description is required")]
    MissingDescription,

    /// [`Circuit`] doesn't exist.
    #[display("Circuit `{_0}` doesn't exist")]
    NotFound(#[error(not(source))] Id),
}

/// Per-column filter of [`CircuitList::view()`].
///
/// Text columns match case-insensitive substrings, the others match exactly.
#[derive(Clone, Debug, Default)]
pub struct Filter {
    /// Exact [`Number`].
    pub number: Option<Number>,

    /// Substring of a [`Description`].
    pub description: Option<String>,

    /// Exact [`SocketSwitchCount`].
    pub socket_switch_count: Option<SocketSwitchCount>,

    /// Exact [`Zone`].
    pub zone: Option<Zone>,

    /// Exact [`Voltage`].
    pub voltage: Option<Voltage>,

    /// Substring of a [`Cable`].
    pub cable: Option<String>,

    /// Exact [`Length`].
    pub length: Option<Length>,

    /// Exact [`Power`].
    pub power: Option<Power>,

    /// Exact [`FuseType`].
    pub fuse_type: Option<FuseType>,

    /// Exact [`Phase`].
    pub phase: Option<Phase>,

    /// Exact [`PhaseKind`].
    pub kind: Option<PhaseKind>,
}

impl Filter {
    /// Checks whether the provided [`Circuit`] passes this [`Filter`].
    fn matches(&self, c: &Circuit) -> bool {
        fn contains(text: &str, needle: Option<&String>) -> bool {
            needle.is_none_or(|n| {
                text.to_lowercase().contains(&n.trim().to_lowercase())
            })
        }
        fn equals<T: PartialEq>(value: T, expected: Option<T>) -> bool {
            expected.is_none_or(|e| e == value)
        }

        equals(c.number, self.number)
            && contains(c.description.as_ref(), self.description.as_ref())
            && equals(c.socket_switch_count, self.socket_switch_count)
            && equals(c.zone, self.zone)
            && equals(c.voltage, self.voltage)
            && contains(c.cable.as_ref(), self.cable.as_ref())
            && equals(c.length, self.length)
            && equals(c.power, self.power)
            && equals(c.fuse_type, self.fuse_type)
            && equals(c.phase, self.phase)
            && equals(c.kind(), self.kind)
    }
}

/// Sorting of [`CircuitList::view()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sort {
    /// [`Column`] to sort by.
    pub column: Column,

    /// [`Direction`] to sort in.
    pub direction: Direction,
}

impl Sort {
    /// Compares the provided [`Circuit`]s according to this [`Sort`].
    fn compare(self, a: &Circuit, b: &Circuit) -> Ordering {
        fn text(a: &str, b: &str) -> Ordering {
            a.to_lowercase().cmp(&b.to_lowercase())
        }

        let ord = match self.column {
            Column::Number => a.number.cmp(&b.number),
            Column::Description => {
                text(a.description.as_ref(), b.description.as_ref())
            }
            Column::SocketSwitchCount => {
                a.socket_switch_count.cmp(&b.socket_switch_count)
            }
            Column::Zone => text(&a.zone.to_string(), &b.zone.to_string()),
            Column::Voltage => a.voltage.cmp(&b.voltage),
            Column::Cable => text(a.cable.as_ref(), b.cable.as_ref()),
            Column::Length => a.length.cmp(&b.length),
            Column::Power => a.power.cmp(&b.power),
            Column::FuseType => a.fuse_type.cmp(&b.fuse_type),
            Column::Phase => text(&a.phase.to_string(), &b.phase.to_string()),
            Column::Kind => a.kind().u8().cmp(&b.kind().u8()),
        };
        match self.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }
}

/// Column of a [`CircuitList`] to sort by.
#[derive(Clone, Copy, Debug, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Column {
    /// [`Circuit::number`].
    Number,

    /// [`Circuit::description`].
    Description,

    /// [`Circuit::socket_switch_count`].
    SocketSwitchCount,

    /// [`Circuit::zone`].
    Zone,

    /// [`Circuit::voltage`].
    Voltage,

    /// [`Circuit::cable`].
    Cable,

    /// [`Circuit::length`].
    Length,

    /// [`Circuit::power`].
    Power,

    /// [`Circuit::fuse_type`].
    FuseType,

    /// [`Circuit::phase`].
    Phase,

    /// [`Circuit::kind()`].
    Kind,
}

/// Direction of a [`Sort`].
#[derive(Clone, Copy, Debug, Default, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Ascending.
    #[default]
    Asc,

    /// Descending.
    Desc,
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{
        super::{template, Description, Id, Phase, Power},
        CircuitList, Column, Direction, Error, Filter, Sort, Toggled,
    };

    fn described(list: &mut CircuitList, id: Id, text: &str) {
        let mut c = list.get(id).unwrap().clone();
        c.description = Description::new(text).unwrap();
        list.update(c).unwrap();
    }

    #[test]
    fn adds_blank_rows_in_sequence() {
        let mut list = CircuitList::default();

        let first = list.add().unwrap();
        described(&mut list, first, "Gniazda salon");
        let second = list.add().unwrap();

        assert_eq!(u32::from(first), 1);
        assert_eq!(u32::from(second), 2);
        assert_eq!(u32::from(list.get(second).unwrap().number), 2);
        assert_eq!(list.editing(), Some(second));
    }

    #[test]
    fn refuses_to_add_while_edited_row_is_undescribed() {
        let mut list = CircuitList::default();
        let _ = list.add().unwrap();

        assert_eq!(list.add(), Err(Error::MissingDescription));
        assert_eq!(list.commit(), Err(Error::MissingDescription));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn rejects_update_without_description() {
        let mut list = CircuitList::default();
        let id = list.add().unwrap();
        let c = list.get(id).unwrap().clone();

        assert_eq!(list.update(c), Err(Error::MissingDescription));
    }

    #[test]
    fn deleting_edited_row_closes_editing() {
        let mut list = CircuitList::default();
        let id = list.add().unwrap();

        let _ = list.delete(id).unwrap();

        assert_eq!(list.editing(), None);
        assert_eq!(list.delete(id), Err(Error::NotFound(id)));
    }

    #[test]
    fn ids_continue_from_maximum() {
        let mut list = CircuitList::default();
        let a = list.add().unwrap();
        described(&mut list, a, "A");
        let b = list.add().unwrap();
        described(&mut list, b, "B");
        let _ = list.delete(a).unwrap();

        let c = list.add().unwrap();

        assert_eq!(u32::from(c), 3);
    }

    #[test]
    fn toggles_template() {
        let mut list = CircuitList::default();
        let t = &template::all()[0];

        let Toggled::Added(id) = list.toggle_template(t) else {
            panic!("expected addition");
        };
        assert_eq!(list.get(id).unwrap().description.as_ref(), t.description);

        assert_eq!(list.toggle_template(t), Toggled::Removed(id));
        assert!(list.is_empty());
    }

    #[test]
    fn appends_with_fresh_ids() {
        let mut list = CircuitList::default();
        let id = list.add().unwrap();
        described(&mut list, id, "A");
        let imported = list.circuits().to_vec();

        assert_eq!(list.append(imported), 1);
        assert_eq!(
            list.circuits().iter().map(|c| u32::from(c.id)).collect::<Vec<_>>(),
            [1, 2],
        );
    }

    #[test]
    fn views_filtered_and_sorted() {
        let mut list = CircuitList::default();
        for (text, kw, phase) in [
            ("gniazda kuchnia", 2, Phase::L1),
            ("Oświetlenie", 1, Phase::L2),
            ("Gniazda garaż", 3, Phase::L1),
        ] {
            let id = list.add().unwrap();
            let mut c = list.get(id).unwrap().clone();
            c.description = Description::new(text).unwrap();
            c.power = Power::new(Decimal::from(kw)).unwrap();
            c.phase = phase;
            list.update(c).unwrap();
        }

        let filter = Filter {
            description: Some("GNIAZDA".into()),
            ..Filter::default()
        };
        let by_desc = Sort {
            column: Column::Description,
            direction: Direction::Asc,
        };
        let view = list.view(&filter, Some(by_desc));
        assert_eq!(
            view.iter().map(|c| c.description.as_ref()).collect::<Vec<_>>(),
            ["Gniazda garaż", "gniazda kuchnia"],
        );

        let by_power = Sort {
            column: Column::Power,
            direction: Direction::Desc,
        };
        let filter = Filter {
            phase: Some(Phase::L1),
            ..Filter::default()
        };
        let view = list.view(&filter, Some(by_power));
        assert_eq!(
            view.iter().map(|c| c.power.kilowatts()).collect::<Vec<_>>(),
            [Decimal::from(3), Decimal::from(2)],
        );
    }
}
