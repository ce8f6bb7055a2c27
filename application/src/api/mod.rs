//! GraphQL API definitions.

pub mod board;
pub mod circuit;
pub mod component;
mod mutation;
pub mod offer;
mod query;
pub mod scalar;

use juniper::EmptySubscription;

use crate::{define_error, Context, Error};

pub use self::{
    board::Board,
    circuit::Circuit,
    component::Component,
    mutation::Mutation,
    offer::Offer,
    query::Query,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

define_error! {
    enum PaginationError {
        #[code = "AMBIGUOUS_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Ambiguous pagination arguments"]
        Ambiguous,
    }
}

define_error! {
    enum InputError {
        #[code = "NEGATIVE_NUMBER"]
        #[status = BAD_REQUEST]
        #[message = "Number must not be negative"]
        Negative,

        #[code = "NUMBER_OUT_OF_RANGE"]
        #[status = BAD_REQUEST]
        #[message = "Number is out of the allowed range"]
        OutOfRange,

        #[code = "NON_POSITIVE_AREA"]
        #[status = BAD_REQUEST]
        #[message = "Property area must be positive"]
        NonPositiveArea,

        #[code = "TEXT_TOO_LONG"]
        #[status = BAD_REQUEST]
        #[message = "Text exceeds the allowed length"]
        TooLong,

        #[code = "BLANK_TEXT"]
        #[status = BAD_REQUEST]
        #[message = "Text must not be blank"]
        Blank,

        #[code = "INVALID_BOARD_SIZE"]
        #[status = BAD_REQUEST]
        #[message = "Board size must be one of the standard ones"]
        BoardSize,
    }
}

/// Converts a GraphQL `Int` into an unsigned number.
///
/// # Errors
///
/// Errors if the `Int` is negative or doesn't fit into `T`.
pub(crate) fn natural<T: TryFrom<u32>>(n: i32) -> Result<T, Error> {
    let n = u32::try_from(n).map_err(|_| InputError::Negative)?;
    T::try_from(n).map_err(|_| InputError::OutOfRange.into())
}

/// Converts a number into a GraphQL `Int`, saturating on overflow.
pub(crate) fn int<N: TryInto<i32>>(n: N) -> i32 {
    n.try_into().unwrap_or(i32::MAX)
}

#[cfg(test)]
mod spec {
    use super::{int, natural};

    #[test]
    fn converts_ints() {
        assert_eq!(natural::<u16>(36).unwrap(), 36);
        assert_eq!(
            natural::<u16>(-1).unwrap_err().code,
            "NEGATIVE_NUMBER",
        );
        assert_eq!(
            natural::<u16>(70_000).unwrap_err().code,
            "NUMBER_OUT_OF_RANGE",
        );
        assert_eq!(int(u32::MAX), i32::MAX);
        assert_eq!(int(12_usize), 12);
    }
}
