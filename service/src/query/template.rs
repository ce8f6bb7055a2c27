//! [`Templates`] definition.

use std::convert::Infallible;

#[cfg(doc)]
use crate::domain::Circuit;
use crate::{
    domain::circuit::template::{self, Template},
    Query, Service,
};

/// [`Query`] of all the [`Circuit`] [`Template`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Templates;

impl<Db> Query<Templates> for Service<Db> {
    type Ok = &'static [Template];
    type Err = Infallible;

    async fn execute(&self, _: Templates) -> Result<Self::Ok, Self::Err> {
        Ok(template::all())
    }
}
