//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{
    command::{self, edit_board, edit_circuits},
    domain::{board, component::required::Quantity},
    Command as _,
};

use crate::{
    api::{self, query::OfferError},
    define_error, AsError, Context, Error,
};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";

    /// Executes the provided [`edit_circuits::Action`] upon the `Offer`.
    async fn edit_circuits(
        offer_id: api::offer::Id,
        action: edit_circuits::Action,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        ctx.service()
            .execute(command::EditCircuits {
                offer_id: offer_id.into(),
                action,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Executes the provided [`edit_board::Action`] upon the `Offer`.
    async fn edit_board(
        offer_id: api::offer::Id,
        action: edit_board::Action,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        ctx.service()
            .execute(command::EditBoard {
                offer_id: offer_id.into(),
                action,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `Offer` for the provided client and property.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NON_POSITIVE_AREA` - the property area is not positive;
    /// - `BLANK_TEXT` - a room name is blank.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %client.email,
            gql.name = "createOffer",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_offer(
        client: api::offer::ClientInput,
        property: api::offer::PropertyInput,
        rooms: Option<Vec<api::offer::RoomInput>>,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let property = property.into_domain().map_err(ctx.error())?;
        let rooms = rooms
            .unwrap_or_default()
            .into_iter()
            .map(api::offer::RoomInput::into_domain)
            .collect::<Result<_, _>>()
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateOffer {
                client: client.into(),
                property,
                rooms,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the general data of the `Offer`.
    ///
    /// Omitted arguments are left untouched.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `NON_POSITIVE_AREA` - the property area is not positive;
    /// - `NEGATIVE_NUMBER` - a pricing amount is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateOffer",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_offer(
        id: api::offer::Id,
        client: Option<api::offer::ClientInput>,
        property: Option<api::offer::PropertyInput>,
        rooms: Option<Vec<api::offer::RoomInput>>,
        pricing: Option<api::offer::PricingInput>,
        custom_items: Option<Vec<api::offer::CustomItemInput>>,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let cmd = command::UpdateOffer {
            offer_id: id.into(),
            client: client.map(Into::into),
            property: property
                .map(api::offer::PropertyInput::into_domain)
                .transpose()
                .map_err(ctx.error())?,
            rooms: rooms
                .map(|rs| {
                    rs.into_iter()
                        .map(api::offer::RoomInput::into_domain)
                        .collect::<Result<_, _>>()
                })
                .transpose()
                .map_err(ctx.error())?,
            pricing: pricing
                .map(api::offer::PricingInput::into_domain)
                .transpose()
                .map_err(ctx.error())?,
            custom_items: custom_items
                .map(|is| is.into_iter().map(Into::into).collect()),
        };

        ctx.service()
            .execute(cmd)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Offer`, returning its last state.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteOffer",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_offer(
        id: api::offer::Id,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        ctx.service()
            .execute(command::DeleteOffer {
                offer_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Appends a blank `Circuit` to the `Offer` and opens it for editing.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `CIRCUIT_DESCRIPTION_REQUIRED` - the `Circuit` open for editing has
    ///                                    no description.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "addCircuit",
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn add_circuit(
        offer_id: api::offer::Id,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        Self::edit_circuits(offer_id, edit_circuits::Action::Add, ctx).await
    }

    /// Opens the `Circuit` for editing, committing the previously open one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `CIRCUIT_NOT_EXISTS` - the `Circuit` with the specified ID does not
    ///                          exist;
    /// - `CIRCUIT_DESCRIPTION_REQUIRED` - the previously open `Circuit` has
    ///                                    no description.
    #[tracing::instrument(
        skip_all,
        fields(
            circuit_id = %circuit_id,
            gql.name = "openCircuit",
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn open_circuit(
        offer_id: api::offer::Id,
        circuit_id: i32,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let id = api::natural::<u32>(circuit_id).map_err(ctx.error())?;
        let action = edit_circuits::Action::Open(id.into());
        Self::edit_circuits(offer_id, action, ctx).await
    }

    /// Closes the `Circuit` open for editing.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `CIRCUIT_DESCRIPTION_REQUIRED` - the open `Circuit` has no
    ///                                    description.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "commitCircuit",
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn commit_circuit(
        offer_id: api::offer::Id,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        Self::edit_circuits(offer_id, edit_circuits::Action::Commit, ctx).await
    }

    /// Closes the `Circuit` open for editing without validating it.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "cancelCircuitEdit",
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn cancel_circuit_edit(
        offer_id: api::offer::Id,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        Self::edit_circuits(offer_id, edit_circuits::Action::Cancel, ctx).await
    }

    /// Replaces the `Circuit` having the same ID with the provided one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `CIRCUIT_NOT_EXISTS` - the `Circuit` with the specified ID does not
    ///                          exist;
    /// - `NEGATIVE_NUMBER` - a numeric value is negative;
    /// - `BLANK_TEXT` - the cable is blank.
    #[tracing::instrument(
        skip_all,
        fields(
            circuit_id = %circuit.id,
            gql.name = "updateCircuit",
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_circuit(
        offer_id: api::offer::Id,
        circuit: api::circuit::CircuitInput,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let circuit = circuit.into_domain().map_err(ctx.error())?;
        let action = edit_circuits::Action::Update(circuit);
        Self::edit_circuits(offer_id, action, ctx).await
    }

    /// Deletes the `Circuit` from the `Offer`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `CIRCUIT_NOT_EXISTS` - the `Circuit` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            circuit_id = %circuit_id,
            gql.name = "deleteCircuit",
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_circuit(
        offer_id: api::offer::Id,
        circuit_id: i32,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let id = api::natural::<u32>(circuit_id).map_err(ctx.error())?;
        let action = edit_circuits::Action::Delete(id.into());
        Self::edit_circuits(offer_id, action, ctx).await
    }

    /// Adds a `Circuit` out of the `CircuitTemplate`, or removes the one
    /// previously added out of it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `TEMPLATE_NOT_EXISTS` - the `CircuitTemplate` with the specified ID
    ///                           does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "toggleCircuitTemplate",
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
            template_id = %template_id,
        ),
    )]
    pub async fn toggle_circuit_template(
        offer_id: api::offer::Id,
        template_id: i32,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let id = api::natural::<u16>(template_id).map_err(ctx.error())?;
        let action = edit_circuits::Action::ToggleTemplate(id.into());
        Self::edit_circuits(offer_id, action, ctx).await
    }

    /// Appends the `Circuit`s parsed out of the CSV content to the `Offer`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `CSV_EMPTY` - the CSV content is empty;
    /// - `CSV_INVALID_HEADER` - the CSV header has a wrong number of columns.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "importCircuits",
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn import_circuits(
        offer_id: api::offer::Id,
        csv: String,
        ctx: &Context,
    ) -> Result<api::circuit::ImportResult, Error> {
        ctx.service()
            .execute(command::ImportCircuits {
                offer_id: offer_id.into(),
                csv,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Overrides the quantity of the `RequiredComponent` until the next
    /// change of the `Circuit`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `COMPONENT_NOT_REQUIRED` - the `Component` is not required by the
    ///                              `Offer`;
    /// - `NUMBER_OUT_OF_RANGE` - the quantity exceeds 9999.
    #[tracing::instrument(
        skip_all,
        fields(
            component_id = %component_id,
            gql.name = "setComponentQuantity",
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
            quantity = quantity,
        ),
    )]
    pub async fn set_component_quantity(
        offer_id: api::offer::Id,
        component_id: api::component::Id,
        quantity: i32,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let quantity = api::natural::<u32>(quantity)
            .and_then(|n| {
                Quantity::new(n)
                    .ok_or_else(|| api::InputError::OutOfRange.into())
            })
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::SetComponentQuantity {
                offer_id: offer_id.into(),
                component_id: component_id.into(),
                quantity,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Starts the `Board` of the `Offer` over with the specified size,
    /// putting all the required pieces back into the pool.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `INVALID_BOARD_SIZE` - the size is not one of the `boardSizes`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "resetBoard",
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
            size = size,
        ),
    )]
    pub async fn reset_board(
        offer_id: api::offer::Id,
        size: i32,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let size = api::board::size(size).map_err(ctx.error())?;
        Self::edit_board(offer_id, edit_board::Action::Reset(size), ctx).await
    }

    /// Mounts a piece from the pool onto the `Board`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `BOARD_PLACEMENT_REJECTED` - the piece cannot be mounted there.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "placeBoardComponent",
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
            piece_id = %piece_id,
        ),
    )]
    pub async fn place_board_component(
        offer_id: api::offer::Id,
        piece_id: String,
        position: api::board::PositionInput,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let at = position.into_domain().map_err(ctx.error())?;
        let action = edit_board::Action::Place {
            piece: board::PieceId::from(piece_id),
            at,
        };
        Self::edit_board(offer_id, action, ctx).await
    }

    /// Moves a mounted piece to another position of the `Board`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `BOARD_PLACEMENT_REJECTED` - the piece cannot be moved there.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "moveBoardComponent",
            instance_id = %instance_id,
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn move_board_component(
        offer_id: api::offer::Id,
        instance_id: i32,
        position: api::board::PositionInput,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let instance = api::natural::<u32>(instance_id).map_err(ctx.error())?;
        let to = position.into_domain().map_err(ctx.error())?;
        let action = edit_board::Action::Move {
            instance: instance.into(),
            to,
        };
        Self::edit_board(offer_id, action, ctx).await
    }

    /// Puts a mounted piece back into the pool.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the specified ID does not
    ///                        exist;
    /// - `BOARD_PLACEMENT_REJECTED` - the piece is not on the `Board`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "removeBoardComponent",
            instance_id = %instance_id,
            offer_id = %offer_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn remove_board_component(
        offer_id: api::offer::Id,
        instance_id: i32,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let instance = api::natural::<u32>(instance_id).map_err(ctx.error())?;
        let action = edit_board::Action::Remove(instance.into());
        Self::edit_board(offer_id, action, ctx).await
    }
}

define_error! {
    enum CircuitError {
        #[code = "CIRCUIT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Circuit` with the specified ID does not exist"]
        NotExists,

        #[code = "CIRCUIT_DESCRIPTION_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "`Circuit` is required to have a description"]
        DescriptionRequired,

        #[code = "TEMPLATE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`CircuitTemplate` with the specified ID does not exist"]
        TemplateNotExists,
    }
}

impl AsError for command::update_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OfferNotExists(_) => Some(OfferError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OfferNotExists(_) => Some(OfferError::NotExists.into()),
        }
    }
}

impl AsError for command::edit_circuits::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use service::domain::circuit::list;

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OfferNotExists(_) => Some(OfferError::NotExists.into()),
            Self::TemplateNotExists(_) => {
                Some(CircuitError::TemplateNotExists.into())
            }
            Self::Circuit(list::Error::NotFound(_)) => {
                Some(CircuitError::NotExists.into())
            }
            Self::Circuit(list::Error::MissingDescription) => {
                Some(CircuitError::DescriptionRequired.into())
            }
        }
    }
}

impl AsError for command::import_circuits::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use service::domain::circuit::csv;

        match self {
            Self::Csv(e @ csv::Error::Empty) => Some(Error {
                code: "CSV_EMPTY",
                status_code: http::StatusCode::BAD_REQUEST,
                message: e.to_string(),
                backtrace: None,
            }),
            Self::Csv(e @ csv::Error::InvalidHeader(_)) => Some(Error {
                code: "CSV_INVALID_HEADER",
                status_code: http::StatusCode::BAD_REQUEST,
                message: e.to_string(),
                backtrace: None,
            }),
            Self::Edit(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::set_component_quantity::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "COMPONENT_NOT_REQUIRED"]
                #[status = CONFLICT]
                #[message = "`Component` is not required by the `Offer`"]
                NotRequired,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OfferNotExists(_) => Some(OfferError::NotExists.into()),
            Self::NotRequired(_) => Some(Error::NotRequired.into()),
        }
    }
}

impl AsError for command::edit_board::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OfferNotExists(_) => Some(OfferError::NotExists.into()),
            Self::Rejected(reason) => Some(Error {
                code: "BOARD_PLACEMENT_REJECTED",
                status_code: http::StatusCode::CONFLICT,
                message: reason.to_string(),
                backtrace: None,
            }),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{
        command::{edit_board, edit_circuits, import_circuits},
        domain::{board, circuit},
    };

    use crate::AsError as _;

    #[test]
    fn maps_circuit_errors_to_codes() {
        let missing = edit_circuits::ExecutionError::Circuit(
            circuit::list::Error::MissingDescription,
        );
        let not_found = edit_circuits::ExecutionError::Circuit(
            circuit::list::Error::NotFound(circuit::Id::from(7)),
        );

        assert_eq!(
            missing.try_as_error().unwrap().code,
            "CIRCUIT_DESCRIPTION_REQUIRED",
        );
        assert_eq!(
            not_found.try_as_error().unwrap().code,
            "CIRCUIT_NOT_EXISTS",
        );
    }

    #[test]
    fn keeps_csv_message() {
        let err = import_circuits::ExecutionError::Csv(
            circuit::csv::Error::InvalidHeader(4),
        )
        .try_as_error()
        .unwrap();

        assert_eq!(err.code, "CSV_INVALID_HEADER");
        assert!(err.message.contains("znaleziono 4"));
    }

    #[test]
    fn maps_board_rejection() {
        let err = edit_board::ExecutionError::Rejected(
            board::Rejection::Occupied,
        )
        .try_as_error()
        .unwrap();

        assert_eq!(err.code, "BOARD_PLACEMENT_REJECTED");
        assert_eq!(err.status_code, http::StatusCode::CONFLICT);
    }
}
