//! [`Error`]-related definitions.

use std::fmt;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use common::DateTime;
use derive_more::Error as StdError;
use serde::Serialize;
use service::{command, infra::database, query, read};
use tracerr::{Trace, Traced};

/// Defines a new error type.
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
        /// Error type.
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

/// REST API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "exception.internal",
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
        if let Some(trace) = backtrace {
            write!(f, "\n{trace}")?;
        }
        Ok(())
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
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

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for query::listings::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use query::listings::ExecutionError as E;
        use read::listing::list::ParseError;

        match self {
            E::Filter(e) => {
                let code = match e {
                    ParseError::InvalidMinPrice
                    | ParseError::InvalidMaxPrice => "validation.error",
                    ParseError::MinExceedsMax { .. } => "exception.business",
                };
                Some(Error {
                    code,
                    status_code: http::StatusCode::BAD_REQUEST,
                    message: e.to_string(),
                    backtrace: None,
                })
            }
            E::Db(_) => None,
        }
    }
}

impl AsError for command::update_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::update_listing::ExecutionError as E;

        match self {
            E::ListingNotExists(id) => Some(Error {
                code: "exception.notFound",
                status_code: http::StatusCode::NOT_FOUND,
                message: format!("Listing with id `{id}` does not exist"),
                backtrace: None,
            }),
            E::Db(_) => None,
        }
    }
}

/// Body of an erroneous REST API response.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorResponse {
    /// Moment when this [`ErrorResponse`] was produced.
    pub timestamp: String,

    /// Human-readable description of the problem.
    pub message: String,

    /// Machine-readable [`Code`] of the problem.
    pub code: Code,

    /// HTTP status of the response.
    pub status: u16,

    /// Path of the request the problem occurred on.
    pub path: String,
}

/// [`Error`] rejecting an API request on the provided path.
#[derive(Clone, Debug)]
pub struct Rejection {
    /// [`Error`] this [`Rejection`] is about.
    pub error: Error,

    /// Path of the rejected request.
    pub path: String,
}

impl Rejection {
    /// Creates a new [`Rejection`] of a request on the provided `path`.
    #[must_use]
    pub fn new(error: Error, path: impl Into<String>) -> Self {
        Self {
            error,
            path: path.into(),
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let Self { error, path } = self;

        let message = if error.status_code.is_server_error() {
            tracing::error!("{error}");
            "Internal server error".to_owned()
        } else {
            error.message
        };

        let body = ErrorResponse {
            timestamp: DateTime::now().to_rfc3339(),
            message,
            code: error.code,
            status: error.status_code.as_u16(),
            path,
        };

        (error.status_code, Json(body)).into_response()
    }
}
