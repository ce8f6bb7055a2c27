//! [`Offer`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::{Json, ToSql};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{offer, Offer},
    infra::{
        database::{
            self,
            postgres::{Connection, SearchPatterns},
            Postgres,
        },
        Database,
    },
    read,
};

/// Builds an [`Offer`] out of the provided `offers` table [`Row`].
fn offer_from_row(row: &Row) -> Offer {
    Offer {
        id: row.get("id"),
        client: row.get::<_, Json<_>>("client").0,
        property: row.get::<_, Json<_>>("property").0,
        rooms: row.get::<_, Json<_>>("rooms").0,
        circuits: row.get::<_, Json<_>>("circuits").0,
        required_components: row
            .get::<_, Json<_>>("required_components")
            .0,
        board: row.get::<_, Option<Json<_>>>("board").map(|b| b.0),
        pricing: row.get::<_, Json<_>>("pricing").0,
        custom_items: row.get::<_, Json<_>>("custom_items").0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Option<Offer>, offer::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Offer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Offer>, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: offer::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, client, property, rooms, \
                   circuits, required_components, board, \
                   pricing, custom_items, \
                   created_at, updated_at \
            FROM offers \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(offer_from_row))
    }
}

impl<C> Database<Insert<Offer>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Offer>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(offer): Insert<Offer>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(offer)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Offer>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(offer): Update<Offer>,
    ) -> Result<Self::Ok, Self::Err> {
        let Offer {
            id,
            client,
            property,
            rooms,
            circuits,
            required_components,
            board,
            pricing,
            custom_items,
            created_at,
            updated_at,
        } = offer;

        const SQL: &str = "\
            INSERT INTO offers (\
                id, client, property, rooms, \
                circuits, required_components, board, \
                pricing, custom_items, \
                created_at, updated_at \
            ) VALUES (\
                $1::UUID, $2::JSONB, $3::JSONB, $4::JSONB, \
                $5::JSONB, $6::JSONB, $7::JSONB, \
                $8::JSONB, $9::JSONB, \
                $10::TIMESTAMPTZ, $11::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET client = EXCLUDED.client, \
                property = EXCLUDED.property, \
                rooms = EXCLUDED.rooms, \
                circuits = EXCLUDED.circuits, \
                required_components = EXCLUDED.required_components, \
                board = EXCLUDED.board, \
                pricing = EXCLUDED.pricing, \
                custom_items = EXCLUDED.custom_items, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &Json(client),
                &Json(property),
                &Json(rooms),
                &Json(circuits),
                &Json(required_components),
                &board.map(Json),
                &Json(pricing),
                &Json(custom_items),
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Offer, offer::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Offer, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: offer::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM offers \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Offer, offer::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Offer, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: offer::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO offers_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<Select<By<read::offer::list::Page, read::offer::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::offer::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::offer::list::Page, read::offer::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::offer::list::Selector {
            arguments,
            filter: read::offer::list::Filter { client },
        } = by.into_inner();

        let limit = i32::try_from(arguments.limit())
            .unwrap_or(i32::MAX - 1)
            + 1;

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });
        let client_patterns = client.as_deref().and_then(SearchPatterns::new);
        let client_idx = client_patterns.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });

        let sql = format!(
            "SELECT id \
             FROM offers \
             WHERE true \
                   {cursor} \
                   {client_filtering} \
             ORDER BY id {order} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!("AND id {op} ${idx}::UUID"))
            }),
            order = arguments.kind().order().sql(),
            client_filtering =
                client_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!(
                        "AND CONCAT_WS(' ', \
                                       client->>'email', \
                                       client->>'investmentName') \
                             ILIKE ANY(${idx}::VARCHAR[])"
                    ))
                }),
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        let has_more = rows.len() > arguments.limit();
        let edges = rows
            .into_iter()
            .take(arguments.limit())
            .map(|row| {
                let id = row.get("id");
                (id, id)
            })
            .collect::<Vec<_>>();

        Ok(read::offer::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C>
    Database<
        Select<By<read::offer::list::TotalCount, read::offer::list::Filter>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::offer::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::offer::list::TotalCount, read::offer::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM offers \
            WHERE $1::VARCHAR[] IS NULL \
               OR CONCAT_WS(' ', \
                            client->>'email', \
                            client->>'investmentName') \
                  ILIKE ANY($1::VARCHAR[])";

        let read::offer::list::Filter { client } = by.into_inner();
        let patterns = client.as_deref().and_then(SearchPatterns::new);
        self.query_opt(SQL, &[&patterns])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.map_or(0, |r| r.get::<_, i32>(0)).into())
    }
}
