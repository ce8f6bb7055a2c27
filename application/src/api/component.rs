//! [`Component`]-related definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use juniper::{GraphQLObject, GraphQLScalar};
use service::{domain, read};

use crate::{
    api::{int, scalar},
    Context,
};

/// Electric component of the catalog.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Component {
    /// Unique identifier of this `Component`.
    pub id: Id,

    /// Name of this `Component`.
    pub name: String,

    /// Width of this `Component` in DIN rail modules.
    pub modules: i32,

    /// Description of this `Component`.
    pub description: String,

    /// Unit price of this `Component`.
    pub price: Money,

    /// Public path of this `Component` image.
    pub image: String,

    /// Path to try when the `image` is missing.
    pub image_fallback: Option<String>,

    /// Category of this `Component`.
    pub category: String,

    /// Subcategory of this `Component`, if any.
    pub subcategory: Option<String>,
}

impl From<domain::Component> for Component {
    fn from(c: domain::Component) -> Self {
        Self {
            image_fallback: c.image.fallback().map(|p| p.to_string()),
            image: c.image.to_string(),
            id: c.id.into(),
            name: c.name.to_string(),
            modules: int(c.modules.cells()),
            description: c.description,
            price: c.price,
            category: c.category.to_string(),
            subcategory: c.subcategory.map(|s| s.to_string()),
        }
    }
}

/// Unique identifier of a `Component`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ComponentId",
    with = scalar::Via::<domain::component::Id>,
)]
pub struct Id(domain::component::Id);

/// `Component` required by the circuits of an `Offer`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct RequiredComponent {
    /// Required `Component`.
    pub component: Component,

    /// Required quantity.
    pub quantity: i32,

    /// Price of the whole `quantity`.
    pub total: Money,

    /// Indicator whether the `quantity` is derived from the circuits and
    /// gets overwritten on their every change.
    pub is_derived: bool,
}

impl From<domain::RequiredComponent> for RequiredComponent {
    fn from(r: domain::RequiredComponent) -> Self {
        Self {
            quantity: int(u32::from(r.quantity)),
            total: r.total(),
            is_derived: r.is_derived(),
            component: r.component.into(),
        }
    }
}

/// `Component` category along with its size.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ComponentCategory", context = Context)]
pub struct Category {
    /// Name of this `ComponentCategory`.
    pub name: String,

    /// Number of `Component`s in this `ComponentCategory`.
    pub count: i32,

    /// Subcategories of this `ComponentCategory`.
    pub subcategories: Vec<Subcategory>,
}

/// Subcategory of a `ComponentCategory` along with its size.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ComponentSubcategory", context = Context)]
pub struct Subcategory {
    /// Name of this `ComponentSubcategory`.
    pub name: String,

    /// Number of `Component`s in this `ComponentSubcategory`.
    pub count: i32,
}

impl From<read::component::CategoryCount> for Category {
    fn from(c: read::component::CategoryCount) -> Self {
        Self {
            name: c.category.to_string(),
            count: c.count,
            subcategories: c
                .subcategories
                .into_iter()
                .map(|(name, count)| Subcategory {
                    name: name.to_string(),
                    count,
                })
                .collect(),
        }
    }
}
