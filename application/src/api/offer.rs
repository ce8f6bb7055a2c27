//! [`Offer`]-related definitions.

use std::future;

use common::{DateTime, Handler as _, Money, Percent};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLObject,
    GraphQLScalar,
};
use rust_decimal::Decimal;
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, circuit, int, natural, scalar},
    AsError, Context, Error,
};

/// Quotation for the electrical installation of a property.
#[derive(Clone, Debug)]
pub struct Offer {
    /// ID of this [`Offer`].
    id: Id,

    /// Underlying [`domain::Offer`].
    offer: OnceCell<domain::Offer>,
}

impl From<domain::Offer> for Offer {
    fn from(offer: domain::Offer) -> Self {
        Self {
            id: offer.id.into(),
            offer: OnceCell::new_with(Some(offer)),
        }
    }
}

impl Offer {
    /// Creates a new [`Offer`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Offer`] with the provided ID exists,
    /// otherwise accessing this [`Offer`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            offer: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Offer`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Offer`] doesn't exist.
    async fn offer(&self, ctx: &Context) -> Result<&domain::Offer, Error> {
        let id = self.id.into();
        self.offer
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::offer::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|o| {
                        future::ready(o.ok_or_else(|| {
                            api::query::OfferError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// Quotation for the electrical installation of a property.
#[graphql_object(context = Context)]
impl Offer {
    /// Unique identifier of this `Offer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Client this `Offer` is made for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.client",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn client(&self, ctx: &Context) -> Result<Client, Error> {
        Ok(self.offer(ctx).await?.client.clone().into())
    }

    /// Property being wired.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.property",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn property(&self, ctx: &Context) -> Result<Property, Error> {
        Ok((&self.offer(ctx).await?.property).into())
    }

    /// Rooms of the property along with their circuits.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.rooms",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn rooms(&self, ctx: &Context) -> Result<Vec<Room>, Error> {
        Ok(self.offer(ctx).await?.rooms.iter().map(Into::into).collect())
    }

    /// `Circuit`s of this `Offer`, optionally filtered and sorted.
    ///
    /// Insertion order is kept when no `sort` is provided.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.circuits",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn circuits(
        &self,
        filter: Option<circuit::CircuitFilter>,
        sort: Option<circuit::CircuitSort>,
        ctx: &Context,
    ) -> Result<Vec<api::Circuit>, Error> {
        let filter = filter
            .unwrap_or_default()
            .into_domain()
            .map_err(ctx.error())?;
        let offer = self.offer(ctx).await?;
        Ok(offer
            .circuits
            .view(&filter, sort.map(Into::into))
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Identifier of the `Circuit` currently open for editing, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.editingCircuitId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn editing_circuit_id(
        &self,
        ctx: &Context,
    ) -> Result<Option<i32>, Error> {
        let offer = self.offer(ctx).await?;
        Ok(offer.circuits.editing().map(|id| int(u32::from(id))))
    }

    /// Power and protection figures of the `Circuit`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.summary",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn summary(
        &self,
        ctx: &Context,
    ) -> Result<circuit::Summary, Error> {
        let offer = self.offer(ctx).await?;
        Ok(domain::Summary::of(&offer.circuits).into())
    }

    /// `Component`s required by the `Circuit`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.requiredComponents",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn required_components(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::component::RequiredComponent>, Error> {
        let offer = self.offer(ctx).await?;
        Ok(offer
            .required_components
            .as_slice()
            .iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    /// Layout of the distribution `Board`, once it has been started.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.board",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn board(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Board>, Error> {
        Ok(self.offer(ctx).await?.board.clone().map(Into::into))
    }

    /// User-provided pricing parameters.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.pricingInputs",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn pricing_inputs(
        &self,
        ctx: &Context,
    ) -> Result<PricingInputs, Error> {
        Ok((&self.offer(ctx).await?.pricing).into())
    }

    /// Price breakdown of this `Offer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.pricing",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn pricing(&self, ctx: &Context) -> Result<Pricing, Error> {
        let per_protection =
            ctx.service().config().connection_cost_per_protection;
        Ok(self.offer(ctx).await?.price(per_protection).into())
    }

    /// Extra items charged.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.customItems",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn custom_items(
        &self,
        ctx: &Context,
    ) -> Result<Vec<CustomItem>, Error> {
        let offer = self.offer(ctx).await?;
        Ok(offer.custom_items.iter().map(Into::into).collect())
    }

    /// `Circuit`s of this `Offer` exported into a CSV file, in the same
    /// order and with the same rows as `Offer.circuits` returns for the
    /// provided `filter` and `sort`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.circuitsCsv",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn circuits_csv(
        &self,
        filter: Option<circuit::CircuitFilter>,
        sort: Option<circuit::CircuitSort>,
        ctx: &Context,
    ) -> Result<circuit::CsvExport, Error> {
        let filter = filter
            .unwrap_or_default()
            .into_domain()
            .map_err(ctx.error())?;
        let offer = self.offer(ctx).await?;
        Ok(circuit::CsvExport::of(
            &offer.circuits,
            &filter,
            sort.map(Into::into),
        ))
    }

    /// `DateTime` when this `Offer` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.offer(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `Offer` was last modified.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Offer.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.offer(ctx).await?.updated_at.coerce())
    }
}

/// Unique identifier of an `Offer`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::offer::Id)]
#[into(domain::offer::Id)]
#[graphql(name = "OfferId", transparent)]
pub struct Id(Uuid);

/// Email address of an `OfferClient`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OfferClientEmail",
    with = scalar::Via::<domain::offer::Email>,
)]
pub struct Email(domain::offer::Email);

/// Phone number of an `OfferClient`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OfferClientPhone",
    with = scalar::Via::<domain::offer::Phone>,
)]
pub struct Phone(domain::offer::Phone);

/// Client an `Offer` is made for.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "OfferClient", context = Context)]
pub struct Client {
    /// Name of the investment.
    pub investment_name: Option<String>,

    /// Email address of the client.
    pub email: Email,

    /// Phone number of the client.
    pub phone: Option<Phone>,
}

impl From<domain::offer::Client> for Client {
    fn from(c: domain::offer::Client) -> Self {
        Self {
            investment_name: c.investment_name,
            email: c.email.into(),
            phone: c.phone.map(Into::into),
        }
    }
}

/// Client an `Offer` is made for.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "OfferClientInput")]
pub struct ClientInput {
    /// Name of the investment.
    pub investment_name: Option<String>,

    /// Email address of the client.
    pub email: Email,

    /// Phone number of the client.
    pub phone: Option<Phone>,
}

impl From<ClientInput> for domain::offer::Client {
    fn from(c: ClientInput) -> Self {
        Self {
            investment_name: c
                .investment_name
                .map(|n| n.trim().to_owned())
                .filter(|n| !n.is_empty()),
            email: c.email.into(),
            phone: c.phone.map(Into::into),
        }
    }
}

/// Property an `Offer` is made for.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "OfferProperty", context = Context)]
pub struct Property {
    /// Free-text information about the property.
    pub info: String,

    /// Area of the property, in square meters.
    pub area: scalar::Decimal,
}

impl From<&domain::offer::Property> for Property {
    fn from(p: &domain::offer::Property) -> Self {
        Self {
            info: p.info.clone(),
            area: Decimal::from(p.area).into(),
        }
    }
}

/// Property an `Offer` is made for.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "OfferPropertyInput")]
pub struct PropertyInput {
    /// Free-text information about the property.
    pub info: String,

    /// Area of the property, in square meters.
    pub area: scalar::Decimal,
}

impl PropertyInput {
    /// Validates this [`PropertyInput`] into a [`domain::offer::Property`].
    ///
    /// # Errors
    ///
    /// Errors if the area is not positive.
    pub fn into_domain(self) -> Result<domain::offer::Property, Error> {
        Ok(domain::offer::Property {
            info: self.info,
            area: domain::offer::Area::new(self.area.into())
                .ok_or(api::InputError::NonPositiveArea)?,
        })
    }
}

/// Room of an `OfferProperty`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "OfferRoom", context = Context)]
pub struct Room {
    /// Name of this `OfferRoom`.
    pub name: String,

    /// Numbers of the `Circuit`s serving this `OfferRoom`.
    pub circuit_numbers: Vec<i32>,
}

impl From<&domain::offer::Room> for Room {
    fn from(r: &domain::offer::Room) -> Self {
        Self {
            name: r.name.clone(),
            circuit_numbers: r
                .circuit_numbers
                .iter()
                .map(|n| int(u32::from(*n)))
                .collect(),
        }
    }
}

/// Room of an `OfferProperty`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "OfferRoomInput")]
pub struct RoomInput {
    /// Name of the room.
    pub name: String,

    /// Numbers of the `Circuit`s serving the room.
    pub circuit_numbers: Vec<i32>,
}

impl RoomInput {
    /// Validates this [`RoomInput`] into a [`domain::offer::Room`].
    ///
    /// # Errors
    ///
    /// Errors if the name is blank or any of the numbers is negative.
    pub fn into_domain(self) -> Result<domain::offer::Room, Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(api::InputError::Blank.into());
        }
        Ok(domain::offer::Room {
            name: name.to_owned(),
            circuit_numbers: self
                .circuit_numbers
                .into_iter()
                .map(|n| natural::<u32>(n).map(Into::into))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// VAT rate applied to an `Offer`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum VatRate {
    /// Reduced rate of 8%.
    Reduced,

    /// Standard rate of 23%.
    Standard,
}

impl From<domain::offer::VatRate> for VatRate {
    fn from(rate: domain::offer::VatRate) -> Self {
        use domain::offer::VatRate as V;
        match rate {
            V::Reduced => Self::Reduced,
            V::Standard => Self::Standard,
        }
    }
}

impl From<VatRate> for domain::offer::VatRate {
    fn from(rate: VatRate) -> Self {
        match rate {
            VatRate::Reduced => Self::Reduced,
            VatRate::Standard => Self::Standard,
        }
    }
}

/// User-provided pricing parameters of an `Offer`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "OfferPricingInputs", context = Context)]
pub struct PricingInputs {
    /// Price charged per circuit point.
    pub price_per_point: Money,

    /// Value of the wiring material.
    pub wire_value: Money,

    /// Fixed connection cost, if it overrides the per-circuit one.
    pub connection_cost: Option<Money>,

    /// VAT rate applied.
    pub vat_rate: VatRate,
}

impl From<&domain::offer::PricingInputs> for PricingInputs {
    fn from(p: &domain::offer::PricingInputs) -> Self {
        Self {
            price_per_point: p.price_per_point,
            wire_value: p.wire_value,
            connection_cost: p.connection_cost,
            vat_rate: p.vat_rate.into(),
        }
    }
}

/// User-provided pricing parameters of an `Offer`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "OfferPricingInput")]
pub struct PricingInput {
    /// Price charged per circuit point.
    pub price_per_point: Money,

    /// Value of the wiring material.
    pub wire_value: Money,

    /// Fixed connection cost overriding the per-circuit one.
    pub connection_cost: Option<Money>,

    /// VAT rate to apply.
    pub vat_rate: VatRate,
}

impl PricingInput {
    /// Validates this [`PricingInput`] into the
    /// [`domain::offer::PricingInputs`].
    ///
    /// # Errors
    ///
    /// Errors if any of the amounts is negative.
    pub fn into_domain(self) -> Result<domain::offer::PricingInputs, Error> {
        let amounts = [
            Some(self.price_per_point),
            Some(self.wire_value),
            self.connection_cost,
        ];
        if amounts.into_iter().flatten().any(|m| m.amount < Decimal::ZERO) {
            return Err(api::InputError::Negative.into());
        }
        Ok(domain::offer::PricingInputs {
            price_per_point: self.price_per_point,
            wire_value: self.wire_value,
            connection_cost: self.connection_cost,
            vat_rate: self.vat_rate.into(),
        })
    }
}

/// Extra item charged in an `Offer`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "OfferCustomItem", context = Context)]
pub struct CustomItem {
    /// Name of this `OfferCustomItem`.
    pub name: String,

    /// Price of this `OfferCustomItem`.
    pub price: Money,
}

impl From<&domain::offer::CustomItem> for CustomItem {
    fn from(i: &domain::offer::CustomItem) -> Self {
        Self {
            name: i.name.clone(),
            price: i.price,
        }
    }
}

/// Extra item charged in an `Offer`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "OfferCustomItemInput")]
pub struct CustomItemInput {
    /// Name of the item.
    pub name: String,

    /// Price of the item.
    pub price: Money,
}

impl From<CustomItemInput> for domain::offer::CustomItem {
    fn from(i: CustomItemInput) -> Self {
        Self {
            name: i.name.trim().to_owned(),
            price: i.price,
        }
    }
}

/// Price breakdown of an `Offer`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "OfferPricing", context = Context)]
pub struct Pricing {
    /// Total number of circuit points.
    pub total_points: i32,

    /// Price charged per circuit point.
    pub price_per_point: Money,

    /// Value of all the circuit points.
    pub points_value: Money,

    /// Value of the wiring material.
    pub wire_value: Money,

    /// Connection cost charged.
    pub connection_cost: Money,

    /// Cost of the required `Component`s.
    pub component_cost: Money,

    /// Total of the `OfferCustomItem`s.
    pub custom_items_total: Money,

    /// Total before VAT.
    pub net_total: Money,

    /// VAT rate applied.
    pub vat_rate: VatRate,

    /// Percentage of the `vatRate`.
    pub vat_percent: Percent,

    /// VAT amount.
    pub vat_amount: Money,

    /// Total including VAT.
    pub gross_total: Money,
}

impl From<domain::offer::Pricing> for Pricing {
    fn from(p: domain::offer::Pricing) -> Self {
        Self {
            total_points: int(p.total_points),
            price_per_point: p.price_per_point,
            points_value: p.points_value,
            wire_value: p.wire_value,
            connection_cost: p.connection_cost,
            component_cost: p.component_cost,
            custom_items_total: p.custom_items_total,
            net_total: p.net_total,
            vat_rate: p.vat_rate.into(),
            vat_percent: p.vat_rate.percent(),
            vat_amount: p.vat_amount,
            gross_total: p.gross_total,
        }
    }
}

pub mod list {
    //! Definitions related to the [`Offer`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::{query, read, Query as _};

    use super::{Id, Offer};
    use crate::{api::scalar, AsError, Context, Error};

    /// Cursor for the `Offer` list.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[from(Id, read::offer::list::Cursor)]
    #[graphql(
        name = "OfferListCursor",
        with = scalar::Via::<read::offer::list::Cursor>,
    )]
    pub struct Cursor(pub read::offer::list::Cursor);

    /// Edge in the [`Offer`] list.
    #[derive(Clone, Copy, Debug, From, Into)]
    pub struct Edge(read::offer::list::Edge);

    /// Edge in the `Offer` list.
    #[graphql_object(name = "OfferListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `OfferListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `OfferListEdge`.
        #[must_use]
        pub fn node(&self) -> Offer {
            #[expect(
                unsafe_code,
                reason = "`Edge` loaded from repository guarantees `Offer` \
                          existence"
            )]
            unsafe {
                Offer::new_unchecked(self.0.node)
            }
        }
    }

    /// Connection of the [`Offer`] list.
    #[derive(Clone, Debug)]
    pub struct Connection {
        /// Fetched [`read::offer::list::Page`].
        page: read::offer::list::Page,

        /// Filter the `page` was fetched with.
        filter: read::offer::list::Filter,
    }

    impl Connection {
        /// Wraps the provided [`read::offer::list::Page`] fetched with the
        /// provided [`read::offer::list::Filter`].
        #[must_use]
        pub fn new(
            page: read::offer::list::Page,
            filter: read::offer::list::Filter,
        ) -> Self {
            Self { page, filter }
        }
    }

    /// Connection of the `Offer` list.
    #[graphql_object(name = "OfferListConnection", context = Context)]
    impl Connection {
        /// Edges of this `OfferListConnection`.
        #[must_use]
        pub fn edges(&self) -> Vec<Edge> {
            self.page.edges.iter().copied().map(Into::into).collect()
        }

        /// Information about the page.
        #[must_use]
        pub fn page_info(&self) -> PageInfo {
            PageInfo {
                info: self.page.page_info(),
                start_cursor: self.page.edges.first().map(|e| e.cursor.into()),
                end_cursor: self.page.edges.last().map(|e| e.cursor.into()),
                filter: self.filter.clone(),
            }
        }
    }

    /// Information about a [`Connection`] page.
    #[derive(Clone, Debug)]
    pub struct PageInfo {
        /// Underlying [`read::offer::list::PageInfo`].
        info: read::offer::list::PageInfo,

        /// Start cursor of the page.
        start_cursor: Option<Cursor>,

        /// End cursor of the page.
        end_cursor: Option<Cursor>,

        /// Filter the page was fetched with.
        filter: read::offer::list::Filter,
    }

    /// Information about an `OfferListConnection` page.
    #[graphql_object(name = "OfferListPageInfo", context = Context)]
    impl PageInfo {
        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.info.has_next_page
        }

        /// Indicator whether there is a previous page.
        #[must_use]
        pub fn has_previous_page(&self) -> bool {
            self.info.has_previous_page
        }

        /// Start cursor of the page.
        #[must_use]
        pub fn start_cursor(&self) -> &Option<Cursor> {
            &self.start_cursor
        }

        /// End cursor of the page.
        #[must_use]
        pub fn end_cursor(&self) -> &Option<Cursor> {
            &self.end_cursor
        }

        /// Total count of the `Offer`s matching the list filter.
        pub async fn total_count(&self, ctx: &Context) -> Result<i32, Error> {
            ctx.service()
                .execute(query::offers::TotalCount::by(self.filter.clone()))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .map(Into::into)
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use super::{PricingInput, PropertyInput, RoomInput, VatRate};

    #[test]
    fn rejects_non_positive_area() {
        let input = PropertyInput {
            info: "Dom jednorodzinny".into(),
            area: Decimal::ZERO.into(),
        };

        assert_eq!(input.into_domain().unwrap_err().code, "NON_POSITIVE_AREA");
    }

    #[test]
    fn trims_room_name() {
        let room = RoomInput {
            name: " Salon ".into(),
            circuit_numbers: vec![1, 3],
        }
        .into_domain()
        .unwrap();

        assert_eq!(room.name, "Salon");
        assert_eq!(room.circuit_numbers.len(), 2);
        assert!(RoomInput {
            name: "  ".into(),
            circuit_numbers: vec![],
        }
        .into_domain()
        .is_err());
    }

    #[test]
    fn rejects_negative_pricing() {
        let input = PricingInput {
            price_per_point: Money::pln(Decimal::from(120)),
            wire_value: Money::pln(Decimal::ZERO),
            connection_cost: Some(Money::pln(Decimal::NEGATIVE_ONE)),
            vat_rate: VatRate::Standard,
        };

        assert_eq!(input.into_domain().unwrap_err().code, "NEGATIVE_NUMBER");
    }
}
