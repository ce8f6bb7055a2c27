//! [`RequiredComponent`]s derived from a [`CircuitList`].

use std::{collections::BTreeMap, sync::LazyLock};

use common::Money;
use derive_more::{Display, Error, From, Into};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, Component, Id, ImagePath, Modules, Name};
use crate::domain::circuit::{CircuitList, FuseType};

/// Prefix of [`Id`]s of breakers derived from circuits.
const BREAKER_ID_PREFIX: &str = "mcb_b";

/// [`Component`] required by an offer, along with its quantity.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RequiredComponent {
    /// Required [`Component`].
    #[serde(flatten)]
    pub component: Component,

    /// Required [`Quantity`] of the [`Component`].
    pub quantity: Quantity,
}

impl RequiredComponent {
    /// Indicates whether this [`RequiredComponent`] is a breaker derived from
    /// circuits, and so is rebuilt on every [`CircuitList`] change.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        /// [`Regex`] of a derived breaker name, like `B16A`.
        static BREAKER_NAME: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^B\d+A$").expect("valid regex")
        });

        self.component.id.as_ref().starts_with(BREAKER_ID_PREFIX)
            || BREAKER_NAME.is_match(self.component.name.as_ref())
    }

    /// Returns the total price of this [`RequiredComponent`].
    #[must_use]
    pub fn total(&self) -> Money {
        Money {
            amount: self.component.price.amount
                * Decimal::from(self.quantity.0),
            currency: self.component.price.currency,
        }
    }
}

/// Quantity of a [`RequiredComponent`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub struct Quantity(u32);

impl Quantity {
    /// Maximum allowed [`Quantity`].
    pub const MAX: u32 = 9999;

    /// Creates a new [`Quantity`] if it doesn't exceed [`Quantity::MAX`].
    #[must_use]
    pub const fn new(n: u32) -> Option<Self> {
        if n <= Self::MAX {
            Some(Self(n))
        } else {
            None
        }
    }

    /// Creates a new [`Quantity`], capping it at [`Quantity::MAX`].
    #[must_use]
    pub const fn saturating(n: u32) -> Self {
        if n <= Self::MAX {
            Self(n)
        } else {
            Self(Self::MAX)
        }
    }
}

/// List of [`RequiredComponent`]s of an offer.
#[derive(
    Clone, Debug, Default, Deserialize, Eq, From, Into, PartialEq, Serialize,
)]
#[serde(transparent)]
pub struct RequiredComponents(Vec<RequiredComponent>);

impl RequiredComponents {
    /// Returns all the [`RequiredComponent`]s.
    #[must_use]
    pub fn as_slice(&self) -> &[RequiredComponent] {
        &self.0
    }

    /// Rebuilds these [`RequiredComponents`] after the provided
    /// [`CircuitList`] has changed.
    ///
    /// Breakers are derived from the circuits, discarding any manual
    /// quantities. Other entries keep their quantities, and [`Component`]s of
    /// the `catalog` missing so far are added with zero quantity.
    pub fn rederive(&mut self, circuits: &CircuitList, catalog: &[Component]) {
        let mut poles = BTreeMap::<FuseType, u32>::new();
        for c in circuits.circuits() {
            let count = poles.entry(c.fuse_type).or_default();
            *count =
                count.saturating_add(c.socket_switch_count.breaker_poles());
        }

        self.0.retain(|c| !c.is_derived());
        self.0.extend(poles.into_iter().map(|(fuse, count)| {
            RequiredComponent {
                component: breaker(fuse, catalog),
                quantity: Quantity::saturating(count),
            }
        }));

        let mut missing = catalog
            .iter()
            .filter(|c| !c.id.as_ref().starts_with(BREAKER_ID_PREFIX))
            .filter(|c| !self.0.iter().any(|r| r.component.id == c.id))
            .collect::<Vec<_>>();
        missing.sort_by_cached_key(|c| c.name.as_ref().to_lowercase());
        self.0.extend(missing.into_iter().map(|c| RequiredComponent {
            component: c.clone(),
            quantity: Quantity::default(),
        }));
    }

    /// Sets the [`Quantity`] of the [`RequiredComponent`] with the provided
    /// [`Id`].
    ///
    /// # Errors
    ///
    /// If there is no such [`RequiredComponent`].
    pub fn set_quantity(
        &mut self,
        id: &Id,
        quantity: Quantity,
    ) -> Result<(), NotRequired> {
        let entry = self
            .0
            .iter_mut()
            .find(|c| &c.component.id == id)
            .ok_or_else(|| NotRequired(id.clone()))?;
        entry.quantity = quantity;
        Ok(())
    }

    /// Returns the total price of all the [`RequiredComponent`]s.
    #[must_use]
    pub fn total(&self) -> Money {
        Money::pln(self.0.iter().map(|c| c.total().amount).sum())
    }
}

/// Error of a [`Component`] not being among [`RequiredComponents`].
#[derive(Clone, Debug, Display, Error)]
#[display("`Component(id: {_0})` is not required")]
pub struct NotRequired(#[error(not(source))] pub Id);

/// Builds the breaker [`Component`] for the provided [`FuseType`], preferring
/// the `catalog` entry if there is one.
fn breaker(fuse: FuseType, catalog: &[Component]) -> Component {
    let id = format!("{BREAKER_ID_PREFIX}{}", fuse.amps());
    let name = format!("B{fuse}");
    let name = Name::new(name.clone()).unwrap_or(Name(name));
    let id = Id::new(id.clone()).unwrap_or(Id(id));

    if let Some(c) = catalog.iter().find(|c| c.id == id) {
        return Component {
            id,
            name,
            ..c.clone()
        };
    }

    let fallback = Id(format!(
        "{BREAKER_ID_PREFIX}{}",
        fuse.to_string().to_lowercase(),
    ));
    Component {
        image: ImagePath::of(&fallback),
        id,
        name,
        modules: Modules::ONE,
        description: format!(
            "Wyłącznik nadprądowy modułowy MCB B{fuse} {fuse} - zabezpieczenie \
             nadprądowe charakterystyki B do rozdzielnicy elektrycznej",
        ),
        price: Money::pln(Decimal::from(breaker_price(fuse))),
        category: Category::from("Zabezpieczenia".to_owned()),
        subcategory: None,
    }
}

/// Returns the list price of a breaker missing from the catalog, in PLN.
const fn breaker_price(fuse: FuseType) -> u32 {
    match fuse.amps() {
        6 => 25,
        10 => 28,
        13 => 30,
        16 => 32,
        20 => 35,
        25 => 38,
        32 => 42,
        40 => 48,
        50 => 55,
        63 => 65,
        80 => 85,
        100 => 120,
        125 => 145,
        _ => 30,
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use super::{
        super::{Category, Component, Id, ImagePath, Modules, Name},
        Quantity, RequiredComponents,
    };
    use crate::domain::circuit::{
        Circuit, CircuitList, Description, FuseType, Id as CircuitId, Number,
        SocketSwitchCount,
    };

    pub(crate) fn component(
        id: &str,
        name: &str,
        modules: u8,
        price: i64,
    ) -> Component {
        let id = Id::new(id).unwrap();
        Component {
            image: ImagePath::of(&id),
            id,
            name: Name::new(name).unwrap(),
            modules: Modules::from(modules),
            description: String::new(),
            price: Money::pln(Decimal::from(price)),
            category: Category::from("Rozdzielnica".to_owned()),
            subcategory: None,
        }
    }

    fn circuits(rows: &[(u16, u32)]) -> CircuitList {
        CircuitList::new(
            rows.iter()
                .zip(1..)
                .map(|(&(amps, sockets), n)| {
                    let mut c =
                        Circuit::blank(CircuitId::from(n), Number::from(n));
                    c.description = Description::new("x").unwrap();
                    c.fuse_type = FuseType::new(amps).unwrap();
                    c.socket_switch_count = SocketSwitchCount::from(sockets);
                    c
                })
                .collect(),
        )
    }

    fn quantity(list: &RequiredComponents, id: &str) -> Option<u32> {
        list.as_slice()
            .iter()
            .find(|c| c.component.id.as_ref() == id)
            .map(|c| c.quantity.into())
    }

    #[test]
    fn counts_breaker_poles_per_rating() {
        let mut list = RequiredComponents::default();

        list.rederive(&circuits(&[(16, 3), (16, 0), (10, 2)]), &[]);

        assert_eq!(quantity(&list, "mcb_b16"), Some(4));
        assert_eq!(quantity(&list, "mcb_b10"), Some(2));
        let b16 = &list.as_slice()[1].component;
        assert_eq!(b16.name.as_ref(), "B16A");
        assert_eq!(b16.price, Money::pln(Decimal::from(32)));
        assert_eq!(
            b16.image.as_ref(),
            "/pictures/electricComponents/mcb_b16a.jpg",
        );
    }

    #[test]
    fn caps_breaker_quantity() {
        let mut list = RequiredComponents::default();

        list.rederive(
            &circuits(&[(10, 4_000_000_000), (10, 4_000_000_000), (16, 1)]),
            &[],
        );

        assert_eq!(quantity(&list, "mcb_b10"), Some(Quantity::MAX));
        assert_eq!(quantity(&list, "mcb_b16"), Some(1));
    }

    #[test]
    fn prefers_catalog_breaker() {
        let catalog = [component("mcb_b16", "Wyłącznik B16", 1, 40)];
        let mut list = RequiredComponents::default();

        list.rederive(&circuits(&[(16, 1)]), &catalog);

        let entry = &list.as_slice()[0];
        assert_eq!(entry.component.name.as_ref(), "B16A");
        assert_eq!(entry.component.price, Money::pln(Decimal::from(40)));
        assert_eq!(list.as_slice().len(), 1);
    }

    #[test]
    fn discards_manual_breaker_edits_but_keeps_others() {
        let catalog = [component("isolator", "Rozłącznik izolacyjny", 3, 90)];
        let mut list = RequiredComponents::default();
        list.rederive(&circuits(&[(10, 1)]), &catalog);
        assert_eq!(quantity(&list, "isolator"), Some(0));

        let isolator = Id::new("isolator").unwrap();
        let breaker = Id::new("mcb_b10").unwrap();
        list.set_quantity(&isolator, Quantity::new(2).unwrap()).unwrap();
        list.set_quantity(&breaker, Quantity::new(7).unwrap()).unwrap();
        list.rederive(&circuits(&[(10, 1)]), &catalog);

        assert_eq!(quantity(&list, "isolator"), Some(2));
        assert_eq!(quantity(&list, "mcb_b10"), Some(1));
    }

    #[test]
    fn totals_prices() {
        let catalog = [component("isolator", "Rozłącznik izolacyjny", 3, 90)];
        let mut list = RequiredComponents::default();
        list.rederive(&circuits(&[(6, 2)]), &catalog);
        list.set_quantity(
            &Id::new("isolator").unwrap(),
            Quantity::new(1).unwrap(),
        )
        .unwrap();

        assert_eq!(list.total(), Money::pln(Decimal::from(2 * 25 + 90)));
    }

    #[test]
    fn rejects_unknown_component() {
        let mut list = RequiredComponents::default();

        assert!(list
            .set_quantity(&Id::new("nope").unwrap(), Quantity::default())
            .is_err());
        assert!(Quantity::new(10_000).is_none());
    }
}
