//! [`Database`] backends of the offer [`Service`].
//!
//! [`Service`]: crate::Service

#[cfg(test)]
pub(crate) mod mock;
#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Operation over the stored offers or the component catalog.
pub use common::Handler as Database;

/// Error of a [`Database`] backend.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "postgres")]
    /// [`Postgres`] error.
    Postgres(postgres::Error),
}
