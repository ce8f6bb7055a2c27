//! [`Circuit`] definitions.

pub mod csv;
pub mod list;
pub mod template;

use std::{fmt, str::FromStr};

use common::define_kind;
use derive_more::{AsRef, Display, From, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

pub use self::{list::CircuitList, template::Template};

/// Single electrical branch circuit of an installation being quoted.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    /// ID of this [`Circuit`], unique within its [`CircuitList`].
    pub id: Id,

    /// [`Number`] of this [`Circuit`] shown to the user.
    pub number: Number,

    /// [`Description`] of this [`Circuit`].
    pub description: Description,

    /// Number of sockets or switches on this [`Circuit`].
    pub socket_switch_count: SocketSwitchCount,

    /// [`Zone`] of the building this [`Circuit`] is located in.
    pub zone: Zone,

    /// Nominal [`Voltage`] of this [`Circuit`].
    pub voltage: Voltage,

    /// [`Cable`] this [`Circuit`] is wired with.
    pub cable: Cable,

    /// [`Length`] of the [`Cable`].
    pub length: Length,

    /// [`Power`] drawn by this [`Circuit`].
    pub power: Power,

    /// Rating of the breaker protecting this [`Circuit`].
    pub fuse_type: FuseType,

    /// [`Phase`] this [`Circuit`] is wired to.
    pub phase: Phase,
}

impl Circuit {
    /// Creates a new [`Circuit`] with default values and an empty
    /// [`Description`].
    #[must_use]
    pub fn blank(id: Id, number: Number) -> Self {
        Self {
            id,
            number,
            description: Description::default(),
            socket_switch_count: SocketSwitchCount::default(),
            zone: Zone::default(),
            voltage: Voltage::default(),
            cable: Cable::default(),
            length: Length::default(),
            power: Power::default(),
            fuse_type: FuseType::default(),
            phase: Phase::default(),
        }
    }

    /// Creates a new [`Circuit`] prefilled from the provided [`Template`].
    ///
    /// Three-phase [`Template`]s get a `16A` breaker, the others `10A`.
    #[must_use]
    pub fn from_template(id: Id, number: Number, template: &Template) -> Self {
        let fuse_type = match template.phase.kind() {
            PhaseKind::Single => FuseType::default(),
            PhaseKind::Three => FuseType::new(16).unwrap_or_default(),
        };
        Self {
            id,
            number,
            description: template.description(),
            socket_switch_count: SocketSwitchCount::default(),
            zone: template.zone,
            voltage: template.voltage,
            cable: template.cable(),
            length: Length::default(),
            power: template.power,
            fuse_type,
            phase: template.phase,
        }
    }

    /// Returns [`PhaseKind`] of this [`Circuit`], derived from its [`Phase`].
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }
}

/// ID of a [`Circuit`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(u32);

impl Id {
    /// Returns the [`Id`] following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Sequential number of a [`Circuit`] shown to the user.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Number(u32);

/// Free-text description of a [`Circuit`].
///
/// May be empty while the [`Circuit`] is being edited.
#[derive(
    AsRef,
    Clone,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
pub struct Description(String);

impl Description {
    /// Maximum length of a [`Description`], in characters.
    pub const MAX_LEN: usize = 512;

    /// Creates a new [`Description`] out of the provided text, trimming it.
    ///
    /// [`None`] is returned if the text is too long.
    #[must_use]
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let text = text.as_ref().trim();
        (text.chars().count() <= Self::MAX_LEN).then(|| Self(text.to_owned()))
    }

    /// Indicates whether this [`Description`] is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Number of sockets or switches on a [`Circuit`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct SocketSwitchCount(u32);

impl SocketSwitchCount {
    /// Largest [`SocketSwitchCount`] accepted from imported files.
    pub const MAX: u32 = 9999;

    /// Returns the number of breaker poles required by this count.
    ///
    /// Every socket or switch position needs its own pole, and a [`Circuit`]
    /// without any still needs one.
    #[must_use]
    pub const fn breaker_poles(self) -> u32 {
        if self.0 == 0 {
            1
        } else {
            self.0
        }
    }
}

/// Zone of a building a [`Circuit`] is located in.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    strum::Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
pub enum Zone {
    /// Ground floor.
    #[default]
    #[serde(rename = "Parter")]
    #[strum(serialize = "Parter", ascii_case_insensitive)]
    GroundFloor,

    /// Upper floor.
    #[serde(rename = "Piętro")]
    #[strum(to_string = "Piętro", serialize = "Pietro")]
    UpperFloor,
}

/// Nominal voltage of a [`Circuit`], in volts.
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
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Voltage(u16);

impl Default for Voltage {
    fn default() -> Self {
        Self(230)
    }
}

/// Cable type of a [`Circuit`], like `YDYpżo 3x1,5`.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str)]
pub struct Cable(String);

impl Cable {
    /// Creates a new [`Cable`] if the provided text is not blank.
    #[must_use]
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let text = text.as_ref().trim();
        (!text.is_empty() && text.chars().count() <= 128)
            .then(|| Self(text.to_owned()))
    }
}

impl Default for Cable {
    fn default() -> Self {
        Self("YDYpżo 3x1,5".to_owned())
    }
}

impl FromStr for Cable {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Cable`")
    }
}

/// Length of a [`Circuit`] cable, in meters.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Length(Decimal);

impl Length {
    /// Creates a new [`Length`] if the provided value is not negative.
    #[must_use]
    pub fn new(meters: Decimal) -> Option<Self> {
        (meters >= Decimal::ZERO).then(|| Self(meters.normalize()))
    }
}

impl Default for Length {
    fn default() -> Self {
        Self(Decimal::TEN)
    }
}

/// Power drawn by a [`Circuit`], in kilowatts.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Power(Decimal);

impl Power {
    /// Zero [`Power`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Power`] if the provided value is not negative.
    #[must_use]
    pub fn new(kilowatts: Decimal) -> Option<Self> {
        (kilowatts >= Decimal::ZERO).then(|| Self(kilowatts.normalize()))
    }

    /// Returns this [`Power`] in kilowatts.
    #[must_use]
    pub const fn kilowatts(self) -> Decimal {
        self.0
    }
}

impl Default for Power {
    fn default() -> Self {
        Self(Decimal::new(5, 1))
    }
}

/// Rating of a breaker, like `16A`.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct FuseType {
    /// Rated current, in amperes.
    amps: u16,
}

impl FuseType {
    /// Creates a new [`FuseType`] rated for the provided current.
    #[must_use]
    pub const fn new(amps: u16) -> Option<Self> {
        if amps == 0 {
            None
        } else {
            Some(Self { amps })
        }
    }

    /// Returns the rated current of this [`FuseType`], in amperes.
    #[must_use]
    pub const fn amps(self) -> u16 {
        self.amps
    }

    /// Returns the built-in ladder of [`FuseType`]s for the provided
    /// [`PhaseKind`], ordered by rating.
    #[must_use]
    pub fn ladder(kind: PhaseKind) -> Vec<Self> {
        let amps: &[u16] = match kind {
            PhaseKind::Single => &[6, 10, 13, 16, 20, 25, 32, 40, 50, 63],
            PhaseKind::Three => &[16, 20, 25, 32, 40, 50, 63, 80, 100, 125],
        };
        amps.iter().map(|&amps| Self { amps }).collect()
    }
}

impl Default for FuseType {
    fn default() -> Self {
        Self { amps: 10 }
    }
}

impl fmt::Display for FuseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}A", self.amps)
    }
}

impl FromStr for FuseType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_suffix(['A', 'a'])
            .and_then(|amps| amps.parse().ok())
            .and_then(Self::new)
            .ok_or("invalid `FuseType`")
    }
}

impl TryFrom<String> for FuseType {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FuseType> for String {
    fn from(fuse: FuseType) -> Self {
        fuse.to_string()
    }
}

/// Supply phase a [`Circuit`] is wired to.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    strum::Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
pub enum Phase {
    /// First single phase.
    #[default]
    #[strum(serialize = "L1", ascii_case_insensitive)]
    L1,

    /// Second single phase.
    #[strum(serialize = "L2", ascii_case_insensitive)]
    L2,

    /// Third single phase.
    #[strum(serialize = "L3", ascii_case_insensitive)]
    L3,

    /// All three phases.
    #[serde(rename = "3Φ", alias = "3φ")]
    #[strum(to_string = "3Φ", serialize = "3φ")]
    ThreePhase,
}

impl Phase {
    /// Returns [`PhaseKind`] of this [`Phase`].
    #[must_use]
    pub const fn kind(self) -> PhaseKind {
        match self {
            Self::L1 | Self::L2 | Self::L3 => PhaseKind::Single,
            Self::ThreePhase => PhaseKind::Three,
        }
    }
}

define_kind! {
    #[doc = "Kind of a [`Circuit`] supply, derived from its [`Phase`]."]
    enum PhaseKind {
        #[doc = "Single-phase supply."]
        Single = 1,

        #[doc = "Three-phase supply."]
        Three = 3,
    }
}

impl PhaseKind {
    /// Returns the conventional symbol of this [`PhaseKind`].
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Single => "1φ",
            Self::Three => "3φ",
        }
    }

    /// Parses a [`PhaseKind`] out of its conventional symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "1φ" | "1Φ" => Some(Self::Single),
            "3φ" | "3Φ" => Some(Self::Three),
            _ => None,
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{
        template, Circuit, FuseType, Id, Number, Phase, PhaseKind, Zone,
    };

    #[test]
    fn blank_circuit_has_defaults() {
        let c = Circuit::blank(Id::from(3), Number::from(2));

        assert!(c.description.is_empty());
        assert_eq!(u32::from(c.socket_switch_count), 0);
        assert_eq!(c.zone, Zone::GroundFloor);
        assert_eq!(u16::from(c.voltage), 230);
        assert_eq!(c.cable.as_ref(), "YDYpżo 3x1,5");
        assert_eq!(Decimal::from(c.length), Decimal::TEN);
        assert_eq!(c.power.kilowatts(), Decimal::new(5, 1));
        assert_eq!(c.fuse_type.to_string(), "10A");
        assert_eq!(c.phase, Phase::L1);
        assert_eq!(c.kind(), PhaseKind::Single);
    }

    #[test]
    fn three_phase_template_gets_16a_breaker() {
        let induction = template::all()
            .iter()
            .find(|t| t.description == "Zasilenie płyta indukcyjna")
            .unwrap();

        let c = Circuit::from_template(Id::from(1), Number::from(1), induction);

        assert_eq!(c.phase, Phase::ThreePhase);
        assert_eq!(c.kind(), PhaseKind::Three);
        assert_eq!(c.fuse_type.to_string(), "16A");
        assert_eq!(c.cable.as_ref(), "YDYpżo 5x4");
        assert_eq!(c.power.kilowatts(), Decimal::new(75, 1));
        assert_eq!(Decimal::from(c.length), Decimal::TEN);
    }

    #[test]
    fn fuse_type_parses_rating() {
        assert_eq!("16A".parse::<FuseType>().unwrap().amps(), 16);
        assert_eq!(" 125a ".parse::<FuseType>().unwrap().amps(), 125);
        assert!("0A".parse::<FuseType>().is_err());
        assert!("16".parse::<FuseType>().is_err());
        assert!("C16".parse::<FuseType>().is_err());
    }

    #[test]
    fn phase_parses_both_three_phase_symbols() {
        assert_eq!("3Φ".parse::<Phase>().unwrap(), Phase::ThreePhase);
        assert_eq!("3φ".parse::<Phase>().unwrap(), Phase::ThreePhase);
        assert_eq!("l2".parse::<Phase>().unwrap(), Phase::L2);
        assert_eq!(Phase::ThreePhase.to_string(), "3Φ");
    }

    #[test]
    fn phase_kind_symbols() {
        assert_eq!(PhaseKind::Single.symbol(), "1φ");
        assert_eq!(PhaseKind::from_symbol("3φ"), Some(PhaseKind::Three));
        assert_eq!(PhaseKind::from_symbol("2φ"), None);
    }

    #[test]
    fn circuit_json_uses_display_values() {
        let mut c = Circuit::blank(Id::from(1), Number::from(1));
        c.phase = Phase::ThreePhase;
        c.zone = Zone::UpperFloor;

        let json = serde_json::to_value(&c).unwrap();

        assert_eq!(json["phase"], "3Φ");
        assert_eq!(json["zone"], "Piętro");
        assert_eq!(json["fuseType"], "10A");
        assert_eq!(serde_json::from_value::<Circuit>(json).unwrap(), c);
    }
}
