//! Lazily connecting Postgres clients.
//!
//! Clones of a client share the same pooled connection, which is only
//! checked out of the [`connection::Pool`] on the first statement.

use std::{future::Future, sync::Arc};

use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

/// Connection slot filled on demand.
#[derive(Debug)]
struct Slot<C>(RwLock<Option<C>>);

impl<C> Slot<C> {
    /// Creates a new empty [`Slot`].
    fn empty() -> Arc<Self> {
        Arc::new(Self(RwLock::new(None)))
    }

    /// Returns the connection of this [`Slot`], establishing it with the
    /// provided function if the [`Slot`] is empty.
    async fn get_or_try_init<F, Fut>(
        &self,
        init: F,
    ) -> Result<RwLockReadGuard<'_, C>, Traced<database::Error>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, Traced<database::Error>>>,
    {
        let read = self.0.read().await;
        let guard = if read.is_some() {
            read
        } else {
            drop(read);

            let mut write = self.0.write().await;
            if write.is_none() {
                *write = Some(init().await.map_err(tracerr::wrap!())?);
            }
            write.downgrade()
        };

        Ok(RwLockReadGuard::map(guard, |conn| {
            conn.as_ref()
                .expect("connection cannot be dropped while guard is alive")
        }))
    }

    /// Empties this [`Slot`], returning its connection, if any.
    async fn take(&self) -> Option<C> {
        self.0.write().await.take()
    }
}

/// Non-transactional Postgres client.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] to check the connection out of.
    pub(crate) pool: connection::Pool,

    /// Shared connection of this client.
    slot: Arc<Slot<connection::NonTx>>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client on top of the provided
    /// [`connection::Pool`].
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self {
            pool,
            slot: Slot::empty(),
        }
    }

    /// Returns the connection of this client, checking it out if needed.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::NonTx>, Traced<database::Error>>
    {
        self.slot
            .get_or_try_init(|| checkout(&self.pool))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Transactional Postgres client.
///
/// The transaction is opened on the first statement and lasts until
/// [`Tx::commit()`]. Dropping all the clones without committing rolls it
/// back.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`connection::Pool`] to check the connection out of.
    pool: connection::Pool,

    /// Shared transaction of this client.
    slot: Arc<Slot<connection::Tx>>,
}

impl Tx {
    /// Creates a new [`Tx`] client on top of the provided
    /// [`connection::Pool`].
    #[must_use]
    pub fn begin(pool: connection::Pool) -> Self {
        Self {
            pool,
            slot: Slot::empty(),
        }
    }

    /// Returns the transaction of this client, opening it if needed.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::Tx>, Traced<database::Error>>
    {
        self.slot
            .get_or_try_init(|| async {
                let client =
                    checkout(&self.pool).await.map_err(tracerr::wrap!())?;
                connection::Tx::begin(client)
                    .await
                    .map_err(tracerr::wrap!())
            })
            .await
            .map_err(tracerr::wrap!())
    }

    /// Commits the transaction of this client.
    ///
    /// Next statement opens a new transaction.
    ///
    /// # Errors
    ///
    /// If the `COMMIT` statement fails.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        match self.slot.take().await {
            Some(tx) => tx.commit().await.map_err(tracerr::wrap!()),
            None => Ok(()),
        }
    }
}

/// Checks a connection out of the provided [`connection::Pool`].
async fn checkout(
    pool: &connection::Pool,
) -> Result<connection::NonTx, Traced<database::Error>> {
    pool.get()
        .await
        .map_err(tracerr::from_and_wrap!(=> postgres::Error))
        .map_err(tracerr::map_from)
}

/// Implements [`Connection`] for a client by running the statements on its
/// lazily established connection.
macro_rules! run_on_slot {
    ($ty:ty) => {
        impl Connection for $ty {
            async fn query<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<Vec<Row>, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                self.connection()
                    .await
                    .map_err(tracerr::wrap!())?
                    .query(stmt, params)
                    .await
                    .map_err(tracerr::wrap!())
            }

            async fn query_opt<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<Option<Row>, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                self.connection()
                    .await
                    .map_err(tracerr::wrap!())?
                    .query_opt(stmt, params)
                    .await
                    .map_err(tracerr::wrap!())
            }

            async fn exec<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<u64, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                self.connection()
                    .await
                    .map_err(tracerr::wrap!())?
                    .exec(stmt, params)
                    .await
                    .map_err(tracerr::wrap!())
            }
        }
    };
}

run_on_slot!(NonTx);
run_on_slot!(Tx);
