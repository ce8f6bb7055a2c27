//! [`Offer`]-related read definitions.

#[cfg(doc)]
use crate::domain::Offer;

pub mod list {
    //! [`Offer`] list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::offer;
    #[cfg(doc)]
    use crate::domain::Offer;

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = offer::Id;

    /// Cursor pointing to a specific [`Offer`] in a list.
    pub type Cursor = offer::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Words, any of which the client e-mail or investment name must
        /// contain, case-insensitively.
        pub client: Option<String>,
    }

    /// Total count of [`Offer`] list items.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
