//! Electrical [`Summary`] of a [`CircuitList`].

use rust_decimal::Decimal;

use super::circuit::{CircuitList, Phase, PhaseKind};

/// Simultaneity factor applied to the total connected power.
const SIMULTANEITY: Decimal = Decimal::from_parts(6, 0, 0, false, 1);

/// Nominal single-phase voltage, in volts.
const NOMINAL_VOLTAGE: Decimal = Decimal::from_parts(230, 0, 0, false, 0);

/// Protection ratings, in amperes, a [`Summary`] may suggest.
const PROTECTION_LADDER: [u32; 9] = [6, 10, 16, 20, 25, 32, 40, 50, 63];

/// Minimal pre-meter protection rating, in amperes.
const MIN_PRE_METER_PROTECTION: u32 = 32;

/// Power and protection figures computed out of a [`CircuitList`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Summary {
    /// Total power on the `L1` phase, in kW.
    pub sum_l1: Decimal,

    /// Total power on the `L2` phase, in kW.
    pub sum_l2: Decimal,

    /// Total power on the `L3` phase, in kW.
    pub sum_l3: Decimal,

    /// Total power of three-phase circuits, in kW.
    pub sum_three_phase: Decimal,

    /// Total power of all circuits, in kW.
    pub total_power: Decimal,

    /// Maximum power of a single circuit, in kW.
    pub max_phase_power: Decimal,

    /// Current of the [`Summary::max_phase_power`], in amperes.
    pub nominal_current: Decimal,

    /// Total power after applying the simultaneity factor, in kW.
    pub calculated_power: Decimal,

    /// Number of single-phase circuits.
    pub count_single_phase: u32,

    /// Number of three-phase circuits.
    pub count_three_phase: u32,

    /// Protection current required by the
    /// [`Summary::calculated_power`], in amperes.
    pub recommended_protection: u32,

    /// Standard protection rating covering the
    /// [`Summary::recommended_protection`], in amperes.
    pub suggested_protection: u32,

    /// Cable cross-section matching the [`Summary::suggested_protection`].
    pub suggested_cable: &'static str,

    /// Protection rating before the electricity meter, in amperes.
    pub pre_meter_protection: u32,
}

impl Summary {
    /// Computes the [`Summary`] of the provided [`CircuitList`].
    #[must_use]
    pub fn of(list: &CircuitList) -> Self {
        let mut sums = [Decimal::ZERO; 4];
        let (mut total_power, mut max_phase_power) =
            (Decimal::ZERO, Decimal::ZERO);
        let (mut count_single_phase, mut count_three_phase) = (0, 0);

        for c in list.circuits() {
            let power = c.power.kilowatts();
            let slot = match c.phase {
                Phase::L1 => 0,
                Phase::L2 => 1,
                Phase::L3 => 2,
                Phase::ThreePhase => 3,
            };
            sums[slot] += power;
            total_power += power;
            max_phase_power = max_phase_power.max(power);
            match c.kind() {
                PhaseKind::Single => count_single_phase += 1,
                PhaseKind::Three => count_three_phase += 1,
            }
        }

        let kilo = Decimal::ONE_THOUSAND;
        let calculated_power = total_power * SIMULTANEITY;
        let recommended_protection = (calculated_power * kilo / NOMINAL_VOLTAGE)
            .ceil()
            .try_into()
            .unwrap_or(u32::MAX);
        let suggested_protection = PROTECTION_LADDER
            .into_iter()
            .find(|&amps| amps >= recommended_protection)
            .unwrap_or(63);

        Self {
            sum_l1: sums[0],
            sum_l2: sums[1],
            sum_l3: sums[2],
            sum_three_phase: sums[3],
            total_power,
            max_phase_power,
            nominal_current: max_phase_power * kilo / NOMINAL_VOLTAGE,
            calculated_power,
            count_single_phase,
            count_three_phase,
            recommended_protection,
            suggested_protection,
            suggested_cable: cable_for(suggested_protection),
            pre_meter_protection: suggested_protection
                .max(MIN_PRE_METER_PROTECTION),
        }
    }
}

/// Returns the cable cross-section suitable for the provided protection
/// rating.
fn cable_for(amps: u32) -> &'static str {
    match amps {
        0..=10 => "1.5mm²",
        11..=16 => "2.5mm²",
        17..=25 => "4mm²",
        26..=32 => "6mm²",
        33..=40 => "10mm²",
        _ => "16mm²",
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{
        super::circuit::{
            Circuit, CircuitList, Description, Id, Number, Phase, Power,
        },
        Summary,
    };

    fn list(rows: &[(i64, Phase)]) -> CircuitList {
        CircuitList::new(
            rows.iter()
                .zip(1..)
                .map(|(&(kw, phase), n)| {
                    let mut c = Circuit::blank(Id::from(n), Number::from(n));
                    c.description = Description::new("x").unwrap();
                    c.power = Power::new(Decimal::from(kw)).unwrap();
                    c.phase = phase;
                    c
                })
                .collect(),
        )
    }

    #[test]
    fn empty_list() {
        let s = Summary::of(&CircuitList::default());

        assert_eq!(s.total_power, Decimal::ZERO);
        assert_eq!(s.max_phase_power, Decimal::ZERO);
        assert_eq!(s.recommended_protection, 0);
        assert_eq!(s.suggested_protection, 6);
        assert_eq!(s.suggested_cable, "1.5mm²");
        assert_eq!(s.pre_meter_protection, 32);
    }

    #[test]
    fn three_phase_has_own_accumulator() {
        let s = Summary::of(&list(&[(2, Phase::L1), (3, Phase::ThreePhase)]));

        assert_eq!(s.sum_l1, Decimal::from(2));
        assert_eq!(s.sum_l2, Decimal::ZERO);
        assert_eq!(s.sum_l3, Decimal::ZERO);
        assert_eq!(s.sum_three_phase, Decimal::from(3));
        assert_eq!(s.total_power, Decimal::from(5));
        assert_eq!(s.max_phase_power, Decimal::from(3));
        assert_eq!(s.count_single_phase, 1);
        assert_eq!(s.count_three_phase, 1);
    }

    #[test]
    fn suggests_protection_from_ladder() {
        // 10 kW * 0.6 = 6 kW -> 26.09 A -> 27 A -> 32 A
        let s = Summary::of(&list(&[(4, Phase::L1), (6, Phase::L2)]));

        assert_eq!(s.calculated_power, Decimal::from(6));
        assert_eq!(s.recommended_protection, 27);
        assert_eq!(s.suggested_protection, 32);
        assert_eq!(s.suggested_cable, "6mm²");
        assert_eq!(s.pre_meter_protection, 32);
    }

    #[test]
    fn caps_protection_at_63a() {
        let s = Summary::of(&list(&[(40, Phase::ThreePhase)]));

        assert_eq!(s.suggested_protection, 63);
        assert_eq!(s.suggested_cable, "16mm²");
        assert_eq!(s.pre_meter_protection, 63);
    }

    #[test]
    fn total_matches_sum_of_circuits() {
        let l = list(&[(1, Phase::L1), (2, Phase::L2), (3, Phase::L3)]);
        let s = Summary::of(&l);

        assert_eq!(s.total_power, s.sum_l1 + s.sum_l2 + s.sum_l3);
        assert_eq!(s.nominal_current, Decimal::from(3000) / Decimal::from(230));
    }
}
