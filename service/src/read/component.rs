//! [`Component`]-related read definitions.

#[cfg(doc)]
use crate::domain::Component;
use crate::domain::{
    circuit::{FuseType, PhaseKind},
    component,
};

/// [`component::Category`] along with the number of [`Component`]s in it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CategoryCount {
    /// Counted [`component::Category`].
    pub category: component::Category,

    /// Number of [`Component`]s in the [`component::Category`].
    pub count: i32,

    /// Subcategories of the [`component::Category`] along with the number of
    /// [`Component`]s in them.
    pub subcategories: Vec<(component::Category, i32)>,
}

/// Breaker ratings offered for circuits of a [`PhaseKind`], ascending.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FuseLadder {
    /// [`PhaseKind`] of the circuits.
    pub kind: PhaseKind,

    /// Offered [`FuseType`]s.
    pub fuse_types: Vec<FuseType>,
}

impl FuseLadder {
    /// Returns the built-in [`FuseLadder`] of the provided [`PhaseKind`].
    #[must_use]
    pub fn builtin(kind: PhaseKind) -> Self {
        Self {
            kind,
            fuse_types: FuseType::ladder(kind),
        }
    }
}
