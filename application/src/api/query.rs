//! GraphQL [`Query`]s definitions.

use itertools::Itertools as _;
use juniper::graphql_object;
use service::{domain, query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Offer` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "offer",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn offer(
        id: api::offer::Id,
        ctx: &Context,
    ) -> Result<api::offer::list::Edge, Error> {
        Self::offers(None, Some(id.into()), None, Some(id.into()), None, ctx)
            .await?
            .edges()
            .into_iter()
            .exactly_one()
            .map_err(|_| OfferError::NotExists.into())
            .map_err(ctx.error())
    }

    /// Fetches the page of `Offer`s, optionally filtered by their client.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            client = ?client,
            first = ?first,
            gql.name = "offers",
            last = ?last,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn offers(
        first: Option<i32>,
        after: Option<api::offer::list::Cursor>,
        last: Option<i32>,
        before: Option<api::offer::list::Cursor>,
        client: Option<String>,
        ctx: &Context,
    ) -> Result<api::offer::list::Connection, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 10;

        let filter = read::offer::list::Filter {
            client: client
                .map(|c| c.trim().to_owned())
                .filter(|c| !c.is_empty()),
        };
        ctx.service()
            .execute(query::offers::List::by(read::offer::list::Selector {
                arguments: read::offer::list::Arguments::new(
                    first,
                    after.map(Into::into),
                    last,
                    before.map(Into::into),
                    DEFAULT_PAGE_SIZE,
                )
                .ok_or_else(|| api::PaginationError::Ambiguous.into())
                .map_err(ctx.error())?,
                filter: filter.clone(),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| api::offer::list::Connection::new(page, filter))
    }

    /// Returns the `Component` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMPONENT_NOT_EXISTS` - the `Component` with the specified ID does
    ///                            not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "component",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn component(
        id: api::component::Id,
        ctx: &Context,
    ) -> Result<api::Component, Error> {
        ctx.service()
            .execute(query::component::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ComponentError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches the `Component` catalog.
    ///
    /// A non-blank `search` takes precedence over the `category`.
    #[tracing::instrument(
        skip_all,
        fields(
            category = ?category,
            gql.name = "components",
            otel.name = Self::SPAN_NAME,
            search = ?search,
        ),
    )]
    pub async fn components(
        category: Option<String>,
        search: Option<String>,
        ctx: &Context,
    ) -> Result<Vec<api::Component>, Error> {
        let search = search.and_then(domain::component::SearchQuery::new);
        let category = category
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty());

        let components = if let Some(search) = search {
            ctx.service()
                .execute(query::components::Search::by(search))
                .await
        } else if let Some(category) = category {
            ctx.service()
                .execute(query::components::ByCategory::by(category.into()))
                .await
        } else {
            ctx.service().execute(query::components::All::by(())).await
        };
        components
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|cs| cs.into_iter().map(Into::into).collect())
    }

    /// Fetches the `Component` categories along with their sizes.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "componentCategories",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn component_categories(
        ctx: &Context,
    ) -> Result<Vec<api::component::Category>, Error> {
        ctx.service()
            .execute(query::components::Categories::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|cs| cs.into_iter().map(Into::into).collect())
    }

    /// Fetches the breaker ratings offered for each supply kind, or only
    /// for the specified one.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "fuseTypes",
            kind = ?kind,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn fuse_types(
        kind: Option<api::circuit::PhaseKind>,
        ctx: &Context,
    ) -> Result<Vec<api::circuit::FuseLadder>, Error> {
        ctx.service()
            .execute(query::FuseTypes {
                kind: kind.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ls| ls.into_iter().map(Into::into).collect())
    }

    /// Lists the built-in `CircuitTemplate`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "circuitTemplates",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn circuit_templates(
        ctx: &Context,
    ) -> Result<Vec<api::circuit::Template>, Error> {
        ctx.service()
            .execute(query::Templates)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ts| ts.iter().map(Into::into).collect())
    }

    /// Lists the available `Board` sizes, in modules.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "boardSizes",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub fn board_sizes() -> Vec<i32> {
        domain::board::Size::ALL
            .into_iter()
            .map(i32::from)
            .collect()
    }
}

define_error! {
    enum OfferError {
        #[code = "OFFER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Offer` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ComponentError {
        #[code = "COMPONENT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Component` with the specified ID does not exist"]
        NotExists,
    }
}
