//! Abstract storage operations.

use std::marker::PhantomData;

use crate::Handler;

/// Operation inserting a value.
#[derive(Clone, Copy, Debug)]
pub struct Insert<T>(pub T);

/// Operation updating (or upserting) a value.
#[derive(Clone, Copy, Debug)]
pub struct Update<T>(pub T);

/// Operation deleting a value.
#[derive(Clone, Copy, Debug)]
pub struct Delete<T>(pub T);

/// Operation selecting a value.
#[derive(Clone, Copy, Debug)]
pub struct Select<T>(pub T);

/// Operation locking a value until the end of a transaction.
#[derive(Clone, Copy, Debug)]
pub struct Lock<T>(pub T);

/// Operation starting a transaction.
#[derive(Clone, Copy, Debug)]
pub struct Transact;

/// Result of [`Transact`]ing.
pub type Transacted<T> = <T as Handler<Transact>>::Ok;

/// Operation committing a transaction.
#[derive(Clone, Copy, Debug)]
pub struct Commit;

/// Selector of a `W` by a `B`.
#[derive(Clone, Copy, Debug)]
pub struct By<W, B> {
    /// Type of the selected value.
    _what: PhantomData<W>,

    /// Value to select by.
    by: B,
}

impl<W, B> By<W, B> {
    /// Creates a new [`By`] selector out of the provided value.
    #[must_use]
    pub fn new(by: B) -> Self {
        Self {
            _what: PhantomData,
            by,
        }
    }

    /// Returns the value to select by.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.by
    }
}
