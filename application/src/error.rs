//! [`Error`]s reported to GraphQL API clients.

use std::{convert::Infallible, fmt};

use derive_more::Error as StdError;
use juniper::IntoFieldError;
use service::infra::database;
use tracerr::{Trace, Traced};

/// Defines a fieldless error enum convertible into an [`Error`], where
/// every variant declares its client-facing code, HTTP status and message.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        #[doc = ::core::concat!(
            "Client-facing `", ::core::stringify!($name), "`.",
        )]
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Error reported to GraphQL API clients.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// Machine-readable code, in `SCREAMING_SNAKE_CASE`.
    pub code: Code,

    /// [`http::StatusCode`] of the response carrying this [`Error`].
    pub status_code: http::StatusCode,

    /// [`Trace`] of the place this [`Error`] originated from, if known.
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// Human-readable message.
    pub message: String,
}

impl Error {
    /// Creates a new `INTERNAL_SERVER_ERROR` [`Error`] out of the provided
    /// message.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        write!(f, "[{code}]: {message}")?;
        for trace in backtrace {
            write!(f, "\n{trace}")?;
        }
        Ok(())
    }
}

impl<S> IntoFieldError<S> for Error
where
    S: From<String>,
{
    fn into_field_error(self) -> juniper::FieldError<S> {
        let mut ext = juniper::Object::with_capacity(1);
        drop(
            ext.add_field("code", juniper::Value::scalar(self.code.to_owned())),
        );
        drop(
            ext.add_field(
                "backtrace",
                juniper::Value::list(
                    self.backtrace
                        .iter()
                        .flat_map(|trace| trace.iter())
                        .map(|frame| juniper::Value::scalar(frame.to_string()))
                        .collect(),
                ),
            ),
        );
        juniper::FieldError::new(self.message, juniper::Value::object(ext))
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Conversion of [`Service`] errors into client-facing [`Error`]s.
///
/// [`Service`]: service::Service
pub trait AsError {
    /// Converts this error into a client-facing [`Error`].
    ///
    /// [`None`] if clients have no business knowing the details, so this
    /// error is an internal one.
    fn try_as_error(&self) -> Option<Error>;

    /// Converts this error into an [`Error`], logging the internal ones.
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error().unwrap_or_else(|| {
            tracing::error!("internal error: {self}");
            Error::internal(&self)
        })
    }

    /// Converts this error into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for Infallible {
    fn try_as_error(&self) -> Option<Error> {
        match *self {}
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, IntoFieldError};

    use super::Error;

    crate::define_error! {
        enum TestError {
            #[code = "TEST_CONFLICT"]
            #[status = CONFLICT]
            #[message = "Conflicting test state"]
            Conflict,
        }
    }

    #[test]
    fn defined_error_carries_code_and_status() {
        let err = Error::from(TestError::Conflict);

        assert_eq!(err.code, "TEST_CONFLICT");
        assert_eq!(err.status_code, http::StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "[TEST_CONFLICT]: Conflicting test state");
    }

    #[test]
    fn field_error_has_code_extension() {
        let field = IntoFieldError::<DefaultScalarValue>::into_field_error(
            Error::internal(&"boom"),
        );

        assert_eq!(field.message(), "boom");
        assert!(field
            .extensions()
            .as_object_value()
            .is_some_and(|o| o.get_field_value("code").is_some()));
    }
}
