//! Postgres [`Database`] implementation.

mod client;
pub mod connection;
mod impls;
mod search;

use deadpool_postgres::Runtime;
use derive_more::{Deref, Display, Error as StdError, From};
use tokio_postgres::NoTls;
use tracerr::Traced;

use crate::infra::database;
#[cfg(doc)]
use crate::infra::Database;

pub use refinery::embed_migrations;

pub use self::{
    client::{NonTx, Tx},
    connection::Connection,
    search::SearchPatterns,
};

pub use deadpool_postgres::{Config, PoolConfig};

/// Postgres [`Database`] client, either [`NonTx`] or [`Tx`] one.
#[derive(Clone, Copy, Debug, Deref)]
pub struct Postgres<T = NonTx>(T);

impl Postgres {
    /// Creates a new [`Postgres`] client connecting to the offers database
    /// described by the provided [`Config`].
    ///
    /// No connection is established until the first statement.
    ///
    /// # Errors
    ///
    /// If the [`Config`] is invalid.
    pub fn new(conf: &Config) -> Result<Self, Traced<database::Error>> {
        let pool = conf
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self(NonTx::from_pool(pool)))
    }
}

/// Postgres database [`Error`].
#[derive(Debug, Display, StdError, From)]
pub enum Error {
    /// SQL statement failed.
    #[display("SQL statement failed: {_0}")]
    Connection(connection::Error),

    /// [`connection::Pool`] cannot be built from the provided [`Config`].
    #[display("Invalid Postgres config: {_0}")]
    PoolCreationError(connection::PoolCreationError),

    /// No connection could be checked out of the [`connection::Pool`].
    #[display("Failed to get a Postgres connection: {_0}")]
    PoolError(connection::PoolError),
}
