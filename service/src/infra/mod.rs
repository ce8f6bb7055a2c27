//! Infrastructure layer: storage backends of offers and the component
//! catalog.

pub mod database;

pub use self::database::Database;
#[cfg(feature = "postgres")]
pub use self::database::{postgres, Postgres};
