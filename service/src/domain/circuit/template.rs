//! Built-in [`Template`]s of common [`Circuit`]s.

use std::sync::LazyLock;

use derive_more::{Display, From, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use super::Circuit;
use super::{Cable, Description, Phase, Power, Voltage, Zone};

/// Immutable preset a [`Circuit`] may be created from.
#[derive(Clone, Debug)]
pub struct Template {
    /// ID of this [`Template`].
    pub id: Id,

    /// Description of the created [`Circuit`].
    pub description: &'static str,

    /// [`Zone`] of the created [`Circuit`].
    pub zone: Zone,

    /// [`Voltage`] of the created [`Circuit`].
    pub voltage: Voltage,

    /// Cable of the created [`Circuit`].
    pub cable: &'static str,

    /// [`Power`] of the created [`Circuit`].
    pub power: Power,

    /// [`Phase`] of the created [`Circuit`].
    pub phase: Phase,
}

impl Template {
    /// Returns [`Description`] of the [`Circuit`] created from this
    /// [`Template`].
    #[must_use]
    pub fn description(&self) -> Description {
        Description::new(self.description).unwrap_or_default()
    }

    /// Returns [`Cable`] of the [`Circuit`] created from this [`Template`].
    #[must_use]
    pub fn cable(&self) -> Cable {
        Cable::new(self.cable).unwrap_or_default()
    }
}

/// ID of a [`Template`], being its position in the catalog.
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
pub struct Id(u16);

/// Returns all the built-in [`Template`]s.
#[must_use]
pub fn all() -> &'static [Template] {
    &TEMPLATES
}

/// Returns the built-in [`Template`] with the provided [`Id`], if any.
#[must_use]
pub fn get(id: Id) -> Option<&'static Template> {
    TEMPLATES.get(usize::from(id.0))
}

/// Catalog of [`Template`]s, built once on first access.
static TEMPLATES: LazyLock<Vec<Template>> = LazyLock::new(|| {
    use Phase::{ThreePhase as P3, L1, L2, L3};
    use Zone::{GroundFloor as Down, UpperFloor as Up};

    #[rustfmt::skip]
    let presets: [(&str, Zone, u16, &str, i64, u32, Phase); 34] = [
        ("Gniazda kuchnia piekarnik", Down, 230, "YDYpżo 3x2,5", 2, 0, L1),
        ("Gniazda kuchnia zmywarka", Down, 230, "YDYpżo 3x2,5", 2, 0, L1),
        ("Gniazda kuchnia lodówka", Down, 230, "YDYpżo 3x2,5", 2, 0, L2),
        ("Zasilenie płyta indukcyjna", Down, 230, "YDYpżo 5x4", 75, 1, P3),
        ("Gniazda garaż", Down, 230, "YDYpżo 3x2,5", 2, 0, L3),
        ("Gniazda kotłownia", Down, 230, "YDYpżo 3x2,5", 2, 0, L1),
        ("Kotłownia – bojler", Down, 230, "YDYpżo 3x2,5", 2, 0, L2),
        ("Oświetlenie zewnętrzne", Down, 230, "YDYpżo 3x1,5", 5, 1, L3),
        ("Brama wjazdowa", Down, 230, "YDYpżo 3x2,5", 1, 0, L1),
        ("Gniazda hol / strych", Up, 230, "YDYpżo 3x2,5", 2, 0, L1),
        ("Gniazda strych", Up, 230, "YDYpżo 3x2,5", 2, 0, L2),
        ("Rekuperator", Up, 230, "YDYpżo 3x2,5", 15, 1, L3),
        ("Zasilanie alarm", Up, 230, "YDYpżo 3x1,5", 5, 1, L1),
        ("Zasilanie tablica multimedialna", Up, 230, "YDYpżo 3x2,5", 1, 0, L2),
        ("Gniazdo 400V", Down, 400, "YDYpżo 5x4", 5, 0, P3),
        ("Rolety parter", Down, 230, "YDYpżo 3x1,5", 5, 1, L3),
        ("Oświetlenie LED", Down, 230, "OMY 2x0,5", 1, 1, L1),
        ("Oświetlenie LED", Up, 230, "OMY 2x0,5", 1, 1, L2),
        ("Oświetlenie punktowe", Down, 230, "OMY 2x0,75", 2, 1, L1),
        ("Oświetlenie punktowe", Up, 230, "OMY 2x0,75", 2, 1, L2),
        ("Włącznik światła", Down, 230, "OMY 2x1", 1, 1, L1),
        ("Włącznik światła", Up, 230, "OMY 2x1", 1, 1, L2),
        ("Gniazdo słabe prądy", Down, 230, "OMY 3x1", 5, 1, L1),
        ("Gniazdo słabe prądy", Up, 230, "OMY 3x1", 5, 1, L2),
        ("Zasilanie czujniki", Down, 230, "OMY 2x0,5", 5, 2, L3),
        ("Zasilanie czujniki", Up, 230, "OMY 2x0,5", 5, 2, L1),
        ("Instalacja alarmowa", Down, 230, "OMY 4x0,75", 3, 1, L1),
        ("Instalacja alarmowa", Up, 230, "OMY 4x0,75", 3, 1, L2),
        ("Sterowanie roletami", Down, 230, "OMYp 3x0,75", 2, 1, L3),
        ("Sterowanie roletami", Up, 230, "OMYp 3x0,75", 2, 1, L1),
        ("Gniazdo słabe prądy 1,5mm²", Down, 230, "OMY 3x1,5", 1, 0, L1),
        ("Gniazdo słabe prądy 1,5mm²", Up, 230, "OMY 3x1,5", 1, 0, L2),
        ("Instalacja multimedialna", Down, 230, "OMYp 4x0,75", 2, 1, L2),
        ("Instalacja multimedialna", Up, 230, "OMYp 4x0,75", 2, 1, L3),
    ];

    presets
        .into_iter()
        .zip(0..)
        .map(|((description, zone, volts, cable, kw, scale, phase), id)| {
            Template {
                id: Id(id),
                description,
                zone,
                voltage: Voltage::from(volts),
                cable,
                power: Power::new(Decimal::new(kw, scale))
                    .unwrap_or(Power::ZERO),
                phase,
            }
        })
        .collect()
});

#[cfg(test)]
mod spec {
    use super::{all, get, Id};

    #[test]
    fn ids_match_positions() {
        for (pos, t) in all().iter().enumerate() {
            assert_eq!(usize::from(u16::from(t.id)), pos);
            assert_eq!(get(t.id).unwrap().description, t.description);
        }
        assert!(get(Id::from(u16::MAX)).is_none());
    }

    #[test]
    fn presets_are_valid_circuits() {
        for t in all() {
            assert_eq!(t.description().as_ref(), t.description);
            assert_eq!(t.cable().as_ref(), t.cable);
        }
    }
}
