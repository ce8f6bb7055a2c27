//! [`Component`]-related [`Database`] implementations.

use common::{
    operations::{By, Select},
    Money,
};
use itertools::Itertools as _;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        circuit::{FuseType, PhaseKind},
        component, Component,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::component::{CategoryCount, FuseLadder},
};

/// Columns of the `electric_components` table forming a [`Component`].
const COLUMNS: &str = "\
    id, name, fields, description, \
    price, price_currency, \
    image, category, subcategory";

/// Builds a [`Component`] out of the provided `electric_components` table
/// [`Row`].
fn component_from_row(row: &Row) -> Component {
    Component {
        id: row.get("id"),
        name: row.get("name"),
        modules: u8::try_from(row.get::<_, i16>("fields"))
            .expect("`fields` overflow")
            .into(),
        description: row.get("description"),
        price: Money {
            amount: row.get("price"),
            currency: row.get("price_currency"),
        },
        image: row.get("image"),
        category: row.get("category"),
        subcategory: row.get("subcategory"),
    }
}

impl<C> Database<Select<By<Vec<Component>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Component>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Component>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!(
            "SELECT {COLUMNS} \
             FROM electric_components \
             ORDER BY name, id"
        );
        Ok(self
            .query(&sql, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(component_from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Component>, component::Category>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Component>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Component>, component::Category>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let category: component::Category = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM electric_components \
             WHERE category = $1::VARCHAR \
             ORDER BY name, id"
        );
        Ok(self
            .query(&sql, &[&category])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(component_from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Component>, component::SearchQuery>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Component>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Component>, component::SearchQuery>>,
    ) -> Result<Self::Ok, Self::Err> {
        let query = by.into_inner();
        let text: &str = query.as_ref();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM electric_components \
             WHERE STRPOS(LOWER(name), $1::VARCHAR) > 0 \
                OR STRPOS(LOWER(description), $1::VARCHAR) > 0 \
                OR STRPOS(LOWER(category), $1::VARCHAR) > 0 \
             ORDER BY name, id"
        );
        Ok(self
            .query(&sql, &[&text])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(component_from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Component>, component::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Component>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Component>, component::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: component::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM electric_components \
             WHERE id = $1::VARCHAR \
             LIMIT 1"
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(component_from_row))
    }
}

impl<C> Database<Select<By<Vec<CategoryCount>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<CategoryCount>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<CategoryCount>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT category, subcategory, COUNT(*)::INT4 AS count \
            FROM electric_components \
            WHERE category <> '' \
            GROUP BY category, subcategory \
            ORDER BY category, subcategory";
        let rows = self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.get::<_, component::Category>("category"),
                    row.get::<_, Option<component::Category>>("subcategory"),
                    row.get::<_, i32>("count"),
                )
            })
            .chunk_by(|(category, ..)| category.clone())
            .into_iter()
            .map(|(category, rows)| {
                let mut total = CategoryCount {
                    category,
                    count: 0,
                    subcategories: Vec::new(),
                };
                for (_, sub, count) in rows {
                    total.count += count;
                    if let Some(sub) = sub.filter(|s| !s.as_ref().is_empty())
                    {
                        total.subcategories.push((sub, count));
                    }
                }
                total
            })
            .collect())
    }
}

impl<C> Database<Select<By<Vec<FuseLadder>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<FuseLadder>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<FuseLadder>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT phase_kind, amps \
            FROM fuse_types \
            ORDER BY phase_kind, amps";
        let rows = self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let kind: PhaseKind = row.get("phase_kind");
                let fuse = u16::try_from(row.get::<_, i16>("amps"))
                    .ok()
                    .and_then(FuseType::new)?;
                Some((kind, fuse))
            })
            .chunk_by(|(kind, _)| *kind)
            .into_iter()
            .map(|(kind, fuses)| FuseLadder {
                kind,
                fuse_types: fuses.map(|(_, f)| f).collect(),
            })
            .collect())
    }
}
