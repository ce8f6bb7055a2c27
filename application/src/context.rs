//! Per-request [`Context`] of the GraphQL API.

use std::sync::OnceLock;

use axum::{async_trait, extract::FromRequestParts};
use juniper::{
    http::{GraphQLBatchResponse, GraphQLResponse},
    IntoFieldError as _,
};

use crate::{Error, JuniperResponse, Service};

/// Context of a single GraphQL request.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] resolving the request.
    service: Service,

    /// Status code of the first [`Error`] the request resolved with.
    error_status: OnceLock<http::StatusCode>,
}

impl Context {
    /// Creates a new [`Context`] around the provided [`Service`].
    #[must_use]
    pub fn new(service: Service) -> Self {
        Self {
            service,
            error_status: OnceLock::new(),
        }
    }

    /// Returns the [`Service`] resolving the request.
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the status code of an unsuccessful response.
    ///
    /// Responses failed before any resolver reported an [`Error`] are the
    /// ones rejected by the GraphQL validation, hence `400 Bad Request`.
    #[must_use]
    pub fn error_status_code(&self) -> http::StatusCode {
        self.error_status
            .get()
            .copied()
            .unwrap_or(http::StatusCode::BAD_REQUEST)
    }

    /// Returns a [`Result::map_err()`] closure remembering the status code
    /// of the [`Error`] passing through.
    ///
    /// Only the first [`Error`] of a request defines its status code.
    pub fn error(&self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            _ = self.error_status.set(err.status_code);
            err
        }
    }
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = JuniperResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let Some(service) = parts.extensions.get::<Service>().cloned() else {
            let err = Error::internal(&"`Service` is not provided");
            return Err(JuniperResponse {
                status_code: err.status_code,
                response: GraphQLBatchResponse::Single(GraphQLResponse::error(
                    err.into_field_error(),
                )),
            });
        };
        Ok(Self::new(service))
    }
}

#[cfg(test)]
mod spec {
    use std::sync::OnceLock;

    use crate::Error;

    #[test]
    fn first_error_defines_status() {
        let status = OnceLock::new();
        let remember = |err: Error| {
            _ = status.set(err.status_code);
            err
        };

        _ = remember(Error::internal(&"boom"));
        _ = remember(Error {
            status_code: http::StatusCode::NOT_FOUND,
            ..Error::internal(&"missing")
        });

        assert_eq!(
            status.get().copied(),
            Some(http::StatusCode::INTERNAL_SERVER_ERROR),
        );
    }
}
