//! [`Offer`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money, Percent};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    board::Board,
    circuit::{self, CircuitList},
    component::required::RequiredComponents,
};

/// Quotation for the electrical installation of a property.
#[derive(Clone, Debug)]
pub struct Offer {
    /// ID of this [`Offer`].
    pub id: Id,

    /// [`Client`] this [`Offer`] is made for.
    pub client: Client,

    /// [`Property`] being wired.
    pub property: Property,

    /// [`Room`]s of the [`Property`].
    pub rooms: Vec<Room>,

    /// Circuits of the installation.
    pub circuits: CircuitList,

    /// Components required by the installation.
    pub required_components: RequiredComponents,

    /// Layout of the distribution [`Board`], once it has been started.
    pub board: Option<Board>,

    /// [`PricingInputs`] of this [`Offer`].
    pub pricing: PricingInputs,

    /// Extra [`CustomItem`]s charged.
    pub custom_items: Vec<CustomItem>,

    /// [`DateTime`] when this [`Offer`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Offer`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Offer {
    /// Computes the [`Pricing`] of this [`Offer`].
    ///
    /// `per_protection` is the connection cost charged per circuit, used
    /// unless the [`PricingInputs`] override the connection cost.
    #[must_use]
    pub fn price(&self, per_protection: Money) -> Pricing {
        Pricing::of(self, per_protection)
    }
}

/// ID of an [`Offer`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Client of an [`Offer`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Name of the investment, if given.
    pub investment_name: Option<String>,

    /// [`Email`] of the client.
    pub email: Email,

    /// [`Phone`] of the client, if given.
    pub phone: Option<Phone>,
}

/// Email address of a [`Client`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Option<Self> {
        let address = address.as_ref().trim();
        Self::check(address).then(|| Self(address.to_owned()))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: &str) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl std::str::FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number of a [`Client`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(str)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl AsRef<str>) -> Option<Self> {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(\+?\d{1,3}[-\s]?)?\d{3}[-\s]?\d{3}[-\s]?\d{3,4}$")
                .expect("valid regex")
        });

        let number = number.as_ref().trim();
        REGEX.is_match(number).then(|| Self(number.to_owned()))
    }
}

impl std::str::FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Property an [`Offer`] is made for.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Free-text information about the property.
    pub info: String,

    /// [`Area`] of the property.
    pub area: Area,
}

/// Floor area of a [`Property`], in square meters.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Area(Decimal);

impl Area {
    /// Creates a new [`Area`] if the given value is positive.
    #[must_use]
    pub fn new(square_meters: Decimal) -> Option<Self> {
        (square_meters > Decimal::ZERO).then_some(Self(square_meters))
    }
}

/// Room of a [`Property`] along with the circuits serving it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Name of this [`Room`].
    pub name: String,

    /// Numbers of the circuits serving this [`Room`].
    pub circuit_numbers: Vec<circuit::Number>,
}

/// User-provided pricing parameters of an [`Offer`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInputs {
    /// Price charged per circuit point.
    pub price_per_point: Money,

    /// Value of the wiring material.
    pub wire_value: Money,

    /// Fixed connection cost overriding the per-circuit one, if set.
    pub connection_cost: Option<Money>,

    /// [`VatRate`] applied.
    pub vat_rate: VatRate,
}

/// VAT rate applied to an [`Offer`].
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VatRate {
    /// Reduced rate of 8%, applicable to residential construction.
    #[default]
    Reduced,

    /// Standard rate of 23%.
    Standard,
}

impl VatRate {
    /// Returns the [`Percent`] of this [`VatRate`].
    #[must_use]
    pub fn percent(self) -> Percent {
        let value = match self {
            Self::Reduced => 8,
            Self::Standard => 23,
        };
        Percent::new(Decimal::from(value)).expect("within 0..=100")
    }
}

/// Extra line item charged in an [`Offer`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CustomItem {
    /// Name of this [`CustomItem`].
    pub name: String,

    /// Price of this [`CustomItem`].
    pub price: Money,
}

/// Price breakdown of an [`Offer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pricing {
    /// Number of circuit points.
    pub total_points: u32,

    /// Price charged per circuit point.
    pub price_per_point: Money,

    /// Value of all the circuit points.
    pub points_value: Money,

    /// Value of the wiring material.
    pub wire_value: Money,

    /// Cost of connecting the protections.
    pub connection_cost: Money,

    /// Cost of the required components.
    pub component_cost: Money,

    /// Total of the [`CustomItem`]s.
    pub custom_items_total: Money,

    /// Total without VAT.
    pub net_total: Money,

    /// [`VatRate`] applied.
    pub vat_rate: VatRate,

    /// VAT amount.
    pub vat_amount: Money,

    /// Total including VAT.
    pub gross_total: Money,
}

impl Pricing {
    /// Computes the [`Pricing`] of the provided [`Offer`].
    fn of(offer: &Offer, per_protection: Money) -> Self {
        let inputs = &offer.pricing;
        let total_points =
            u32::try_from(offer.circuits.len()).unwrap_or(u32::MAX);
        let points = Decimal::from(total_points);

        let points_value = Money::pln(inputs.price_per_point.amount * points);
        let connection_cost = inputs
            .connection_cost
            .unwrap_or_else(|| Money::pln(per_protection.amount * points));
        let component_cost = offer.required_components.total();
        let custom_items_total = Money::pln(
            offer.custom_items.iter().map(|i| i.price.amount).sum(),
        );

        let net_total = Money::pln(
            points_value.amount
                + inputs.wire_value.amount
                + connection_cost.amount
                + component_cost.amount
                + custom_items_total.amount,
        );
        let vat_amount =
            Money::pln(inputs.vat_rate.percent().of(net_total.amount));

        Self {
            total_points,
            price_per_point: inputs.price_per_point.round(),
            points_value: points_value.round(),
            wire_value: inputs.wire_value.round(),
            connection_cost: connection_cost.round(),
            component_cost: component_cost.round(),
            custom_items_total: custom_items_total.round(),
            net_total: net_total.round(),
            vat_rate: inputs.vat_rate,
            vat_amount: vat_amount.round(),
            gross_total: Money::pln(net_total.amount + vat_amount.amount)
                .round(),
        }
    }
}

/// [`DateTime`] when an [`Offer`] was created.
pub type CreationDateTime = DateTimeOf<(Offer, unit::Creation)>;

/// [`DateTime`] when an [`Offer`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Offer, unit::Modification)>;

#[cfg(test)]
pub(crate) mod spec {
    use common::{DateTime, Money};
    use rust_decimal::Decimal;

    use super::{
        Area, Client, CustomItem, Email, Id, Offer, Phone, PricingInputs,
        Property, VatRate,
    };
    use crate::domain::{circuit::template, component::required};

    pub(crate) fn offer() -> Offer {
        Offer {
            id: Id::new(),
            client: Client {
                investment_name: Some("Dom jednorodzinny".into()),
                email: Email::new("jan@example.com").unwrap(),
                phone: None,
            },
            property: Property {
                info: String::new(),
                area: Area::new(Decimal::from(120)).unwrap(),
            },
            rooms: Vec::new(),
            circuits: super::CircuitList::default(),
            required_components: required::RequiredComponents::default(),
            board: None,
            pricing: PricingInputs {
                price_per_point: Money::pln(Decimal::from(120)),
                wire_value: Money::pln(Decimal::ZERO),
                connection_cost: None,
                vat_rate: VatRate::Reduced,
            },
            custom_items: Vec::new(),
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    fn pln(n: i64) -> Money {
        Money::pln(Decimal::from(n))
    }

    #[test]
    fn validates_contacts() {
        assert!(Email::new(" jan@example.com ").is_some());
        assert!(Email::new("jan@example").is_none());
        assert!(Email::new("").is_none());
        assert!(Phone::new("+48 600 700 800").is_some());
        assert!(Phone::new("600-700-800").is_some());
        assert!(Phone::new("12345").is_none());
    }

    #[test]
    fn requires_positive_area() {
        assert!(Area::new(Decimal::ZERO).is_none());
        assert!(Area::new(Decimal::from(-5)).is_none());
        assert!(Area::new(Decimal::new(5, 1)).is_some());
    }

    #[test]
    fn prices_offer() {
        let mut o = offer();
        for t in &template::all()[..3] {
            let _ = o.circuits.toggle_template(t);
        }
        o.pricing.wire_value = pln(500);
        o.custom_items.push(CustomItem {
            name: "Dojazd".into(),
            price: pln(80),
        });
        o.required_components.rederive(&o.circuits, &[]);

        let p = o.price(pln(10));

        assert_eq!(p.total_points, 3);
        assert_eq!(p.points_value, pln(360));
        assert_eq!(p.connection_cost, pln(30));
        // three single-pole 10A breakers
        assert_eq!(p.component_cost, pln(84));
        assert_eq!(p.net_total, pln(360 + 500 + 30 + 84 + 80));
        assert_eq!(p.vat_amount, Money::pln(Decimal::new(8432, 2)));
        assert_eq!(p.gross_total, Money::pln(Decimal::new(113832, 2)));
    }

    #[test]
    fn fixed_connection_cost_and_standard_vat() {
        let mut o = offer();
        o.pricing.connection_cost = Some(pln(200));
        o.pricing.vat_rate = VatRate::Standard;

        let p = o.price(pln(10));

        assert_eq!(p.connection_cost, pln(200));
        assert_eq!(p.net_total, pln(200));
        assert_eq!(p.vat_amount, pln(46));
        assert_eq!(p.gross_total, pln(246));
    }
}
