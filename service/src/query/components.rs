//! [`Query`] collection related to the [`Component`] catalog.

use common::operations::By;

use crate::{
    domain::{component, Component},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the whole [`Component`] catalog, ordered by name.
pub type All = DatabaseQuery<By<Vec<Component>, ()>>;

/// Queries [`Component`]s of a [`component::Category`], ordered by name.
pub type ByCategory = DatabaseQuery<By<Vec<Component>, component::Category>>;

/// Queries [`Component`]s matching a [`component::SearchQuery`], ordered by
/// name.
pub type Search = DatabaseQuery<By<Vec<Component>, component::SearchQuery>>;

/// Queries [`component::Category`]s along with their sizes.
pub type Categories =
    DatabaseQuery<By<Vec<read::component::CategoryCount>, ()>>;
