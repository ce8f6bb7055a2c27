//! Relay-style cursor pagination.
//!
//! Backends fetch one node more than the [`Arguments::limit()`] to find out
//! whether there are more nodes in the requested [`Direction`], and build a
//! [`Page`] out of them.

use std::fmt;

/// Page of nodes along with their cursors, ordered by the cursor
/// ascending regardless of the [`Direction`] it was requested in.
#[derive(Clone, Debug)]
pub struct Page<C, N> {
    /// [`Edge`]s of this [`Page`].
    pub edges: Vec<Edge<C, N>>,

    /// [`Kind`] of the pagination this [`Page`] was requested with.
    pub kind: Kind,

    /// Whether there are more nodes beyond this [`Page`] in its
    /// [`Direction`].
    pub has_more: bool,
}

/// Alias of a [`Page`] in terms of the Relay specification.
pub type Connection<C, N> = Page<C, N>;

impl<C, N> Page<C, N> {
    /// Creates a new [`Page`] out of the `edges` fetched in the order of the
    /// [`Kind::order()`] requested by the provided [`Arguments`].
    #[must_use]
    pub fn new(
        args: &Arguments<C>,
        edges: impl IntoIterator<Item = impl Into<Edge<C, N>>>,
        has_more: bool,
    ) -> Self {
        let mut edges = edges.into_iter().map(Into::into).collect::<Vec<_>>();
        if args.kind().direction == Direction::Backward {
            edges.reverse();
        }
        Self {
            edges,
            kind: args.kind(),
            has_more,
        }
    }

    /// Returns [`PageInfo`] of this [`Page`].
    #[must_use]
    pub fn page_info(&self) -> PageInfo<C>
    where
        C: Clone,
    {
        let more = |d: Direction| self.has_more && self.kind.direction == d;
        PageInfo {
            end_cursor: self.edges.last().map(|e| e.cursor.clone()),
            has_next_page: more(Direction::Forward),
            has_previous_page: more(Direction::Backward),
        }
    }
}

/// Information about a [`Page`].
#[derive(Clone, Copy, Debug)]
pub struct PageInfo<C> {
    /// Cursor of the last node on the [`Page`].
    pub end_cursor: Option<C>,

    /// Whether there are nodes after the [`Page`].
    pub has_next_page: bool,

    /// Whether there are nodes before the [`Page`].
    pub has_previous_page: bool,
}

/// Node on a [`Page`] along with its cursor.
#[derive(Clone, Copy, Debug)]
pub struct Edge<C, N> {
    /// Cursor of the `node`.
    pub cursor: C,

    /// The node itself.
    pub node: N,
}

impl<C, N> From<(C, N)> for Edge<C, N> {
    fn from((cursor, node): (C, N)) -> Self {
        Self { cursor, node }
    }
}

/// Validated pagination arguments.
#[derive(Clone, Copy, Debug)]
pub struct Arguments<C> {
    /// [`Kind`] of the pagination.
    kind: Kind,

    /// Maximum number of nodes to return.
    limit: usize,

    /// Cursor to start from, if any.
    cursor: Option<C>,
}

impl<C> Arguments<C> {
    /// Validates the Relay pagination arguments.
    ///
    /// Equal `after` and `before` cursors request the page starting at that
    /// cursor inclusively, which is how a single node is fetched by its
    /// cursor.
    ///
    /// [`None`] if the arguments are ambiguous, or a count is negative.
    pub fn new<Num>(
        first: Option<Num>,
        after: Option<C>,
        last: Option<Num>,
        before: Option<C>,
        default: Num,
    ) -> Option<Self>
    where
        C: PartialEq + fmt::Debug,
        Num: TryInto<usize> + fmt::Debug,
    {
        use Direction as D;

        let (direction, limit, cursor, inclusive) =
            match (first, after, last, before) {
                (first, after, None, None) => {
                    (D::Forward, first.unwrap_or(default), after, false)
                }
                (None, None, last, before) => {
                    (D::Backward, last.unwrap_or(default), before, false)
                }
                (Some(first), Some(a), None, Some(b)) if a == b => {
                    (D::Forward, first, Some(a), true)
                }
                (None, Some(a), Some(last), Some(b)) if a == b => {
                    (D::Backward, last, Some(b), true)
                }
                (None, Some(a), None, Some(b)) if a == b => {
                    return Some(Self {
                        kind: Kind {
                            direction: D::Forward,
                            inclusive: true,
                        },
                        limit: 1,
                        cursor: Some(a),
                    });
                }
                _ => return None,
            };

        Some(Self {
            kind: Kind {
                direction,
                inclusive,
            },
            limit: limit.try_into().ok()?,
            cursor,
        })
    }

    /// Returns the cursor to start from, if any.
    #[must_use]
    pub fn cursor(&self) -> Option<&C> {
        self.cursor.as_ref()
    }

    /// Returns [`Kind`] of the requested pagination.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the maximum number of nodes to return.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// [`Arguments`] along with a backend-specific filter of nodes.
#[derive(Clone, Copy, Debug)]
pub struct Selector<C, F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments<C>,

    /// Filter of the paginated nodes.
    pub filter: F,
}

/// Direction of pagination.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    /// Towards greater cursors.
    Forward,

    /// Towards lesser cursors.
    Backward,
}

/// Kind of pagination.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Kind {
    /// [`Direction`] of the pagination.
    pub direction: Direction,

    /// Whether the node at the cursor itself is included.
    pub inclusive: bool,
}

impl Kind {
    /// Returns the comparison operator filtering cursors of this [`Kind`].
    #[must_use]
    pub const fn operator(&self) -> &'static str {
        match (self.direction, self.inclusive) {
            (Direction::Forward, false) => ">",
            (Direction::Forward, true) => ">=",
            (Direction::Backward, false) => "<",
            (Direction::Backward, true) => "<=",
        }
    }

    /// Returns the [`Order`] cursors of this [`Kind`] are fetched in.
    #[must_use]
    pub const fn order(&self) -> Order {
        match self.direction {
            Direction::Forward => Order::Ascending,
            Direction::Backward => Order::Descending,
        }
    }
}

/// Order of fetching cursors.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Order {
    /// Ascending order.
    Ascending,

    /// Descending order.
    Descending,
}

impl Order {
    /// Returns SQL keyword of this [`Order`].
    #[cfg(feature = "postgres")]
    #[must_use]
    pub const fn sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Defines pagination aliases for the provided cursor, node and filter
/// types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($cursor:ty, $node:ty, $filter:ty) => {
        #[doc = "Node on a [`Page`] along with its cursor."]
        pub type Edge = $crate::pagination::Edge<$cursor, $node>;

        #[doc = "Alias of a [`Page`]."]
        pub type Connection = $crate::pagination::Connection<$cursor, $node>;

        #[doc = "Page of nodes."]
        pub type Page = $crate::pagination::Page<$cursor, $node>;

        #[doc = "Information about a [`Page`]."]
        pub type PageInfo = $crate::pagination::PageInfo<$cursor>;

        #[doc = "Arguments of selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments<$cursor>;

        #[doc = "Filtered [`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$cursor, $filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Direction, Page};

    #[test]
    fn defaults_to_forward_page() {
        let args = Arguments::<u32>::new(None, None, None, None, 10).unwrap();

        assert_eq!(args.kind().direction, Direction::Forward);
        assert_eq!(args.kind().operator(), ">");
        assert_eq!(args.limit(), 10);
        assert_eq!(args.cursor(), None);
    }

    #[test]
    fn backward_page_uses_before_cursor() {
        let args =
            Arguments::new(None, None, Some(5), Some(7_u32), 10).unwrap();

        assert_eq!(args.kind().direction, Direction::Backward);
        assert_eq!(args.kind().operator(), "<");
        assert_eq!(args.cursor(), Some(&7));
        assert_eq!(args.limit(), 5);
    }

    #[test]
    fn equal_cursors_select_single_node() {
        let args =
            Arguments::new(None, Some(3_u32), None, Some(3), 10).unwrap();

        assert_eq!(args.kind().operator(), ">=");
        assert_eq!(args.limit(), 1);
        assert_eq!(args.cursor(), Some(&3));
    }

    #[test]
    fn rejects_mixed_directions() {
        assert!(
            Arguments::<u32>::new(Some(1), None, Some(1), None, 10).is_none()
        );
        assert!(
            Arguments::new(Some(1), Some(1_u32), None, Some(2), 10).is_none()
        );
        assert!(
            Arguments::<u32>::new(Some(-1), None, None, None, 10).is_none()
        );
    }

    #[test]
    fn backward_page_is_ascending() {
        let args = Arguments::new(None, None, Some(2), Some(9_u32), 10)
            .unwrap();
        let page: Page<u32, char> =
            Page::new(&args, [(8_u32, 'b'), (7, 'a')], true);

        assert_eq!(
            page.edges.iter().map(|e| e.node).collect::<String>(),
            "ab",
        );
        let info = page.page_info();
        assert_eq!(info.end_cursor, Some(8));
        assert!(info.has_previous_page);
        assert!(!info.has_next_page);
    }
}
