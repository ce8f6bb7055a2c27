//! [`Query`] collection related to a single [`Component`].

use common::operations::By;

use crate::domain::{component, Component};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Component`] by its [`component::Id`].
pub type ById = DatabaseQuery<By<Option<Component>, component::Id>>;
