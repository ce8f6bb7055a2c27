//! [`Circuit`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject, GraphQLScalar};
use service::{domain, read};

use crate::{
    api::{self, int, natural, scalar},
    Context, Error,
};

/// Electrical branch circuit of an `Offer`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Circuit {
    /// Identifier of this `Circuit`, unique within its `Offer`.
    pub id: i32,

    /// Number of this `Circuit` shown to the user.
    pub number: i32,

    /// Description of this `Circuit`, usually the room it serves.
    pub description: String,

    /// Number of sockets or switches on this `Circuit`.
    pub socket_switch_count: i32,

    /// Zone of the building this `Circuit` is located in.
    pub zone: Zone,

    /// Nominal voltage, in volts.
    pub voltage: i32,

    /// Cable this `Circuit` is wired with.
    pub cable: String,

    /// Length of the cable, in meters.
    pub length: scalar::Decimal,

    /// Power drawn by this `Circuit`, in kW.
    pub power: scalar::Decimal,

    /// Rating of the breaker protecting this `Circuit`.
    pub fuse_type: FuseType,

    /// Phase this `Circuit` is wired to.
    pub phase: Phase,

    /// Supply kind of this `Circuit`, derived from its `phase`.
    pub kind: PhaseKind,
}

impl From<&domain::Circuit> for Circuit {
    fn from(c: &domain::Circuit) -> Self {
        Self {
            id: int(u32::from(c.id)),
            number: int(u32::from(c.number)),
            description: c.description.to_string(),
            socket_switch_count: int(u32::from(c.socket_switch_count)),
            zone: c.zone.into(),
            voltage: i32::from(u16::from(c.voltage)),
            cable: c.cable.to_string(),
            length: rust_decimal::Decimal::from(c.length).into(),
            power: c.power.kilowatts().into(),
            fuse_type: c.fuse_type.into(),
            phase: c.phase.into(),
            kind: c.kind().into(),
        }
    }
}

/// `Circuit` data to be stored.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct CircuitInput {
    /// Identifier of the `Circuit` to be replaced.
    pub id: i32,

    /// Number of the `Circuit` shown to the user.
    pub number: i32,

    /// Description of the `Circuit`.
    pub description: String,

    /// Number of sockets or switches on the `Circuit`.
    pub socket_switch_count: i32,

    /// Zone of the building the `Circuit` is located in.
    pub zone: Zone,

    /// Nominal voltage, in volts.
    pub voltage: i32,

    /// Cable the `Circuit` is wired with.
    pub cable: String,

    /// Length of the cable, in meters.
    pub length: scalar::Decimal,

    /// Power drawn by the `Circuit`, in kW.
    pub power: scalar::Decimal,

    /// Rating of the breaker protecting the `Circuit`.
    pub fuse_type: FuseType,

    /// Phase the `Circuit` is wired to.
    pub phase: Phase,
}

impl CircuitInput {
    /// Validates this [`CircuitInput`] into a [`domain::Circuit`].
    ///
    /// # Errors
    ///
    /// Errors if any of the values is out of its domain.
    pub fn into_domain(self) -> Result<domain::Circuit, Error> {
        use api::InputError as E;

        Ok(domain::Circuit {
            id: natural::<u32>(self.id)?.into(),
            number: natural::<u32>(self.number)?.into(),
            description: domain::circuit::Description::new(&self.description)
                .ok_or(E::TooLong)?,
            socket_switch_count: natural::<u32>(self.socket_switch_count)?
                .into(),
            zone: self.zone.into(),
            voltage: natural::<u16>(self.voltage)?.into(),
            cable: domain::circuit::Cable::new(&self.cable).ok_or(E::Blank)?,
            length: domain::circuit::Length::new(self.length.into())
                .ok_or(E::Negative)?,
            power: domain::circuit::Power::new(self.power.into())
                .ok_or(E::Negative)?,
            fuse_type: self.fuse_type.into(),
            phase: self.phase.into(),
        })
    }
}

/// Per-column filter of `Circuit`s.
///
/// Text columns match case-insensitive substrings, the others match exactly.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
pub struct CircuitFilter {
    /// Exact `Circuit` number.
    pub number: Option<i32>,

    /// Substring of a description.
    pub description: Option<String>,

    /// Exact number of sockets or switches.
    pub socket_switch_count: Option<i32>,

    /// Exact zone.
    pub zone: Option<Zone>,

    /// Exact voltage.
    pub voltage: Option<i32>,

    /// Substring of a cable.
    pub cable: Option<String>,

    /// Exact cable length.
    pub length: Option<scalar::Decimal>,

    /// Exact power.
    pub power: Option<scalar::Decimal>,

    /// Exact breaker rating.
    pub fuse_type: Option<FuseType>,

    /// Exact phase.
    pub phase: Option<Phase>,

    /// Exact supply kind.
    pub kind: Option<PhaseKind>,
}

impl CircuitFilter {
    /// Converts this [`CircuitFilter`] into a domain one.
    ///
    /// # Errors
    ///
    /// Errors if any of the values is out of its domain.
    pub fn into_domain(self) -> Result<domain::circuit::list::Filter, Error> {
        use api::InputError as E;

        Ok(domain::circuit::list::Filter {
            number: self
                .number
                .map(natural::<u32>)
                .transpose()?
                .map(Into::into),
            description: self.description,
            socket_switch_count: self
                .socket_switch_count
                .map(natural::<u32>)
                .transpose()?
                .map(Into::into),
            zone: self.zone.map(Into::into),
            voltage: self
                .voltage
                .map(natural::<u16>)
                .transpose()?
                .map(Into::into),
            cable: self.cable,
            length: self
                .length
                .map(|l| {
                    domain::circuit::Length::new(l.into()).ok_or(E::Negative)
                })
                .transpose()?,
            power: self
                .power
                .map(|p| {
                    domain::circuit::Power::new(p.into()).ok_or(E::Negative)
                })
                .transpose()?,
            fuse_type: self.fuse_type.map(Into::into),
            phase: self.phase.map(Into::into),
            kind: self.kind.map(Into::into),
        })
    }
}

/// Sorting of `Circuit`s.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
pub struct CircuitSort {
    /// Column to sort by.
    pub column: SortColumn,

    /// Direction to sort in, ascending by default.
    pub direction: Option<SortDirection>,
}

impl From<CircuitSort> for domain::circuit::list::Sort {
    fn from(sort: CircuitSort) -> Self {
        Self {
            column: sort.column.into(),
            direction: sort.direction.map(Into::into).unwrap_or_default(),
        }
    }
}

/// Column of `Circuit`s to sort by.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "CircuitSortColumn")]
pub enum SortColumn {
    /// `Circuit.number`.
    Number,

    /// `Circuit.description`.
    Description,

    /// `Circuit.socketSwitchCount`.
    SocketSwitchCount,

    /// `Circuit.zone`.
    Zone,

    /// `Circuit.voltage`.
    Voltage,

    /// `Circuit.cable`.
    Cable,

    /// `Circuit.length`.
    Length,

    /// `Circuit.power`.
    Power,

    /// `Circuit.fuseType`.
    FuseType,

    /// `Circuit.phase`.
    Phase,

    /// `Circuit.kind`.
    Kind,
}

impl From<SortColumn> for domain::circuit::list::Column {
    fn from(column: SortColumn) -> Self {
        use SortColumn as C;
        match column {
            C::Number => Self::Number,
            C::Description => Self::Description,
            C::SocketSwitchCount => Self::SocketSwitchCount,
            C::Zone => Self::Zone,
            C::Voltage => Self::Voltage,
            C::Cable => Self::Cable,
            C::Length => Self::Length,
            C::Power => Self::Power,
            C::FuseType => Self::FuseType,
            C::Phase => Self::Phase,
            C::Kind => Self::Kind,
        }
    }
}

/// Direction of a `CircuitSort`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum SortDirection {
    /// Ascending.
    Asc,

    /// Descending.
    Desc,
}

impl From<SortDirection> for domain::circuit::list::Direction {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}

/// Zone of a building.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum Zone {
    /// Ground floor (`Parter`).
    GroundFloor,

    /// Upper floor (`Piętro`).
    UpperFloor,
}

impl From<domain::circuit::Zone> for Zone {
    fn from(zone: domain::circuit::Zone) -> Self {
        use domain::circuit::Zone as Z;
        match zone {
            Z::GroundFloor => Self::GroundFloor,
            Z::UpperFloor => Self::UpperFloor,
        }
    }
}

impl From<Zone> for domain::circuit::Zone {
    fn from(zone: Zone) -> Self {
        match zone {
            Zone::GroundFloor => Self::GroundFloor,
            Zone::UpperFloor => Self::UpperFloor,
        }
    }
}

/// Supply phase of a `Circuit`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum Phase {
    /// First single phase.
    L1,

    /// Second single phase.
    L2,

    /// Third single phase.
    L3,

    /// All three phases (`3Φ`).
    ThreePhase,
}

impl From<domain::circuit::Phase> for Phase {
    fn from(phase: domain::circuit::Phase) -> Self {
        use domain::circuit::Phase as P;
        match phase {
            P::L1 => Self::L1,
            P::L2 => Self::L2,
            P::L3 => Self::L3,
            P::ThreePhase => Self::ThreePhase,
        }
    }
}

impl From<Phase> for domain::circuit::Phase {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::L1 => Self::L1,
            Phase::L2 => Self::L2,
            Phase::L3 => Self::L3,
            Phase::ThreePhase => Self::ThreePhase,
        }
    }
}

/// Supply kind of a `Circuit`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum PhaseKind {
    /// Single-phase supply (`1φ`).
    Single,

    /// Three-phase supply (`3φ`).
    Three,
}

impl From<domain::circuit::PhaseKind> for PhaseKind {
    fn from(kind: domain::circuit::PhaseKind) -> Self {
        use domain::circuit::PhaseKind as K;
        match kind {
            K::Single => Self::Single,
            K::Three => Self::Three,
        }
    }
}

impl From<PhaseKind> for domain::circuit::PhaseKind {
    fn from(kind: PhaseKind) -> Self {
        match kind {
            PhaseKind::Single => Self::Single,
            PhaseKind::Three => Self::Three,
        }
    }
}

/// Rating of a breaker.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = scalar::Via::<domain::circuit::FuseType>)]
pub struct FuseType(domain::circuit::FuseType);

/// Breaker ratings offered for `Circuit`s of a `PhaseKind`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct FuseLadder {
    /// Supply kind of the `Circuit`s.
    pub kind: PhaseKind,

    /// Offered ratings, ascending.
    pub fuse_types: Vec<FuseType>,
}

impl From<read::component::FuseLadder> for FuseLadder {
    fn from(ladder: read::component::FuseLadder) -> Self {
        Self {
            kind: ladder.kind.into(),
            fuse_types: ladder.fuse_types.into_iter().map(Into::into).collect(),
        }
    }
}

/// Built-in preset a `Circuit` may be created from.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "CircuitTemplate", context = Context)]
pub struct Template {
    /// Identifier of this `CircuitTemplate`.
    pub id: i32,

    /// Description of the created `Circuit`.
    pub description: String,

    /// Zone of the created `Circuit`.
    pub zone: Zone,

    /// Voltage of the created `Circuit`, in volts.
    pub voltage: i32,

    /// Cable of the created `Circuit`.
    pub cable: String,

    /// Power of the created `Circuit`, in kW.
    pub power: scalar::Decimal,

    /// Phase of the created `Circuit`.
    pub phase: Phase,

    /// Supply kind of the created `Circuit`.
    pub kind: PhaseKind,
}

impl From<&domain::circuit::Template> for Template {
    fn from(t: &domain::circuit::Template) -> Self {
        Self {
            id: i32::from(u16::from(t.id)),
            description: t.description.to_owned(),
            zone: t.zone.into(),
            voltage: i32::from(u16::from(t.voltage)),
            cable: t.cable.to_owned(),
            power: t.power.kilowatts().into(),
            phase: t.phase.into(),
            kind: t.phase.kind().into(),
        }
    }
}

/// Power and protection figures of an `Offer` circuits.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "CircuitSummary", context = Context)]
pub struct Summary {
    /// Total power on the `L1` phase, in kW.
    pub sum_l1: scalar::Decimal,

    /// Total power on the `L2` phase, in kW.
    pub sum_l2: scalar::Decimal,

    /// Total power on the `L3` phase, in kW.
    pub sum_l3: scalar::Decimal,

    /// Total power of three-phase `Circuit`s, in kW.
    pub sum_three_phase: scalar::Decimal,

    /// Total power of all `Circuit`s, in kW.
    pub total_power: scalar::Decimal,

    /// Maximum power of a single `Circuit`, in kW.
    pub max_phase_power: scalar::Decimal,

    /// Current of the `maxPhasePower`, in amperes.
    pub nominal_current: scalar::Decimal,

    /// Total power after applying the simultaneity factor, in kW.
    pub calculated_power: scalar::Decimal,

    /// Number of single-phase `Circuit`s.
    pub count_single_phase: i32,

    /// Number of three-phase `Circuit`s.
    pub count_three_phase: i32,

    /// Protection current required by the `calculatedPower`, in amperes.
    pub recommended_protection: i32,

    /// Standard protection rating covering the `recommendedProtection`, in
    /// amperes.
    pub suggested_protection: i32,

    /// Cable cross-section matching the `suggestedProtection`.
    pub suggested_cable: String,

    /// Protection rating before the electricity meter, in amperes.
    pub pre_meter_protection: i32,
}

impl From<domain::Summary> for Summary {
    fn from(s: domain::Summary) -> Self {
        Self {
            sum_l1: s.sum_l1.into(),
            sum_l2: s.sum_l2.into(),
            sum_l3: s.sum_l3.into(),
            sum_three_phase: s.sum_three_phase.into(),
            total_power: s.total_power.into(),
            max_phase_power: s.max_phase_power.into(),
            nominal_current: s.nominal_current.into(),
            calculated_power: s.calculated_power.into(),
            count_single_phase: int(s.count_single_phase),
            count_three_phase: int(s.count_three_phase),
            recommended_protection: int(s.recommended_protection),
            suggested_protection: int(s.suggested_protection),
            suggested_cable: s.suggested_cable.to_owned(),
            pre_meter_protection: int(s.pre_meter_protection),
        }
    }
}

/// `Circuit`s exported into a CSV file.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "CircuitCsvExport", context = Context)]
pub struct CsvExport {
    /// Suggested name of the file.
    pub file_name: String,

    /// Content of the file.
    pub content: String,
}

impl CsvExport {
    /// Exports the rows of the provided [`domain::CircuitList`] visible
    /// with the provided filter and sort, at the current moment.
    #[must_use]
    pub fn of(
        list: &domain::CircuitList,
        filter: &domain::circuit::list::Filter,
        sort: Option<domain::circuit::list::Sort>,
    ) -> Self {
        Self {
            file_name: domain::circuit::csv::file_name(DateTime::now()),
            content: domain::circuit::csv::export(list.view(filter, sort)),
        }
    }
}

/// Outcome of a `Circuit`s import.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "CircuitImportResult", context = Context)]
pub struct ImportResult {
    /// `Offer` the `Circuit`s have been imported into.
    pub offer: api::Offer,

    /// Number of imported `Circuit`s.
    pub imported: i32,

    /// Number of skipped malformed rows.
    pub skipped: i32,

    /// User-facing summary of the import.
    pub message: String,
}

impl From<(domain::Offer, domain::circuit::csv::Imported)> for ImportResult {
    fn from(
        (offer, imported): (domain::Offer, domain::circuit::csv::Imported),
    ) -> Self {
        Self {
            message: imported.message(),
            imported: int(imported.circuits.len()),
            skipped: int(imported.skipped),
            offer: offer.into(),
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use service::domain::circuit::{self, Circuit as DomainCircuit};

    use super::{
        Circuit, CircuitFilter, CircuitInput, CircuitSort, CsvExport, Phase,
        PhaseKind, SortColumn, SortDirection,
    };

    fn input() -> CircuitInput {
        let c = Circuit::from(&DomainCircuit::blank(
            circuit::Id::from(4),
            circuit::Number::from(4),
        ));
        CircuitInput {
            id: c.id,
            number: c.number,
            description: "  Kuchnia ".into(),
            socket_switch_count: 3,
            zone: c.zone,
            voltage: 400,
            cable: c.cable,
            length: c.length,
            power: Decimal::new(35, 1).into(),
            fuse_type: c.fuse_type,
            phase: Phase::ThreePhase,
        }
    }

    #[test]
    fn converts_valid_input() {
        let c = input().into_domain().unwrap();

        assert_eq!(c.description.to_string(), "Kuchnia");
        assert_eq!(u16::from(c.voltage), 400);
        assert_eq!(c.kind(), circuit::PhaseKind::Three);
        assert!(matches!(Circuit::from(&c).kind, PhaseKind::Three));
    }

    #[test]
    fn rejects_invalid_input() {
        let negative = CircuitInput {
            socket_switch_count: -1,
            ..input()
        };
        let blank_cable = CircuitInput {
            cable: "   ".into(),
            ..input()
        };
        let negative_power = CircuitInput {
            power: Decimal::NEGATIVE_ONE.into(),
            ..input()
        };

        assert_eq!(
            negative.into_domain().unwrap_err().code,
            "NEGATIVE_NUMBER",
        );
        assert_eq!(blank_cable.into_domain().unwrap_err().code, "BLANK_TEXT");
        assert_eq!(
            negative_power.into_domain().unwrap_err().code,
            "NEGATIVE_NUMBER",
        );
    }

    #[test]
    fn converts_filter() {
        let filter = CircuitFilter {
            description: Some("kuch".into()),
            voltage: Some(230),
            kind: Some(PhaseKind::Single),
            ..CircuitFilter::default()
        }
        .into_domain()
        .unwrap();

        assert_eq!(filter.description.as_deref(), Some("kuch"));
        assert_eq!(filter.voltage.map(u16::from), Some(230));
        assert_eq!(filter.kind, Some(circuit::PhaseKind::Single));
        assert!(CircuitFilter {
            number: Some(-2),
            ..CircuitFilter::default()
        }
        .into_domain()
        .is_err());
    }

    #[test]
    fn exports_csv_in_displayed_order() {
        let circuits = [
            ("Oświetlenie", 5, circuit::Phase::L1),
            ("Płyta", 70, circuit::Phase::ThreePhase),
            ("Gniazda", 20, circuit::Phase::L2),
        ]
        .into_iter()
        .zip(1..)
        .map(|((text, tenths_kw, phase), n)| {
            let mut c = DomainCircuit::blank(
                circuit::Id::from(n),
                circuit::Number::from(n),
            );
            c.description = circuit::Description::new(text).unwrap();
            c.power = circuit::Power::new(Decimal::new(tenths_kw, 1)).unwrap();
            c.phase = phase;
            c
        })
        .collect();
        let list = circuit::CircuitList::new(circuits);
        let filter = CircuitFilter {
            kind: Some(PhaseKind::Single),
            ..CircuitFilter::default()
        }
        .into_domain()
        .unwrap();
        let sort = CircuitSort {
            column: SortColumn::Power,
            direction: Some(SortDirection::Desc),
        };

        let export = CsvExport::of(&list, &filter, Some(sort.into()));

        let descriptions = export
            .content
            .split("\r\n")
            .skip(1)
            .map(|row| row.split(';').nth(1).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(descriptions, ["Gniazda", "Oświetlenie"]);
        assert!(export.file_name.starts_with("kalkulacja_obwodow_"));
    }
}
