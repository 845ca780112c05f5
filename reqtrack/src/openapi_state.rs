use crate::{ApiError, Lifecycle, NetworkFailure, OpenApiRequestStatus, RequestArgs, Timestamp};
use thiserror::Error;

/// Lifecycle of one invocation of an OpenAPI-style client method.
///
/// Unlike [`RequestState`](crate::RequestState), failures are split into
/// [`NetworkError`](OpenApiRequestState::NetworkError) (no response was
/// obtained) and [`ServerError`](OpenApiRequestState::ServerError) (a
/// response with a status code came back). `Complete` keeps only the first
/// argument as its request payload, since such clients take one payload
/// object per call; the other states keep the whole argument tuple.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        tag = "type",
        rename_all_fields = "camelCase",
        bound(
            serialize = "Response: serde::Serialize, Args: serde::Serialize, \
                         Args::First: serde::Serialize, Error: serde::Serialize",
            deserialize = "Response: serde::Deserialize<'de>, Args: serde::Deserialize<'de>, \
                           Args::First: serde::Deserialize<'de>, Error: serde::Deserialize<'de>"
        )
    )
)]
pub enum OpenApiRequestState<Response, Args: RequestArgs, Error> {
    Initial,
    Pending {
        start_time: Timestamp,
        request_payload: Args,
    },
    Complete {
        start_time: Timestamp,
        end_time: Timestamp,
        request_payload: Args::First,
        response_payload: Response,
    },
    NetworkError {
        start_time: Timestamp,
        end_time: Timestamp,
        request_payload: Args,
        error: NetworkFailure,
    },
    ServerError {
        start_time: Timestamp,
        end_time: Timestamp,
        request_payload: Args,
        error: Error,
    },
}

/// Request payload of an [`OpenApiRequestState`]: the whole argument tuple
/// while pending or failed, only its first element once complete.
#[derive(Debug, Eq, PartialEq)]
pub enum OpenApiPayload<'a, Args: RequestArgs> {
    Arguments(&'a Args),
    First(&'a Args::First),
}

impl<Args: RequestArgs> Clone for OpenApiPayload<'_, Args> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Args: RequestArgs> Copy for OpenApiPayload<'_, Args> {}

impl<'a, Args: RequestArgs> OpenApiPayload<'a, Args> {
    /// The first argument, whichever state the payload came from.
    pub fn first(&self) -> Args::First {
        match self {
            OpenApiPayload::Arguments(args) => args.first(),
            OpenApiPayload::First(first) => (**first).clone(),
        }
    }

    pub fn arguments(&self) -> Option<&'a Args> {
        match self {
            OpenApiPayload::Arguments(args) => Some(*args),
            OpenApiPayload::First(_) => None,
        }
    }
}

/// Failure of a settled OpenAPI call.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum OpenApiFailure<E> {
    #[error("network error: {0}")]
    Network(NetworkFailure),
    #[error("server error: {0}")]
    Server(E),
}

/// Borrowed form of [`OpenApiFailure`].
#[derive(Debug, Eq, PartialEq)]
pub enum OpenApiFailureRef<'a, E> {
    Network(&'a NetworkFailure),
    Server(&'a E),
}

impl<E> Clone for OpenApiFailureRef<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for OpenApiFailureRef<'_, E> {}

impl<E: ApiError> OpenApiFailure<E> {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OpenApiFailure::Network(_) => None,
            OpenApiFailure::Server(error) => error.status_code(),
        }
    }
}

impl<E: ApiError> OpenApiFailureRef<'_, E> {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OpenApiFailureRef::Network(_) => None,
            OpenApiFailureRef::Server(error) => error.status_code(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            OpenApiFailureRef::Network(failure) => failure.message.clone(),
            OpenApiFailureRef::Server(error) => error.message(),
        }
    }
}

impl<Response, Args: RequestArgs, Error> OpenApiRequestState<Response, Args, Error> {
    pub fn pending(start_time: Timestamp, request_payload: Args) -> Self {
        OpenApiRequestState::Pending {
            start_time,
            request_payload,
        }
    }

    /// Builds the `Complete` state, keeping only the first argument.
    pub fn complete(
        start_time: Timestamp,
        end_time: Timestamp,
        args: &Args,
        response_payload: Response,
    ) -> Self {
        OpenApiRequestState::Complete {
            start_time,
            end_time,
            request_payload: args.first(),
            response_payload,
        }
    }

    pub fn network_error(
        start_time: Timestamp,
        end_time: Timestamp,
        request_payload: Args,
        error: NetworkFailure,
    ) -> Self {
        OpenApiRequestState::NetworkError {
            start_time,
            end_time,
            request_payload,
            error,
        }
    }

    pub fn server_error(
        start_time: Timestamp,
        end_time: Timestamp,
        request_payload: Args,
        error: Error,
    ) -> Self {
        OpenApiRequestState::ServerError {
            start_time,
            end_time,
            request_payload,
            error,
        }
    }

    pub fn status(&self) -> OpenApiRequestStatus {
        match self {
            OpenApiRequestState::Initial => OpenApiRequestStatus::Initial,
            OpenApiRequestState::Pending { .. } => OpenApiRequestStatus::Pending,
            OpenApiRequestState::Complete { .. } => OpenApiRequestStatus::Complete,
            OpenApiRequestState::NetworkError { .. } => OpenApiRequestStatus::NetworkError,
            OpenApiRequestState::ServerError { .. } => OpenApiRequestStatus::ServerError,
        }
    }

    pub fn is_initial(&self) -> bool {
        matches!(self, OpenApiRequestState::Initial)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, OpenApiRequestState::Pending { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, OpenApiRequestState::Complete { .. })
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self, OpenApiRequestState::NetworkError { .. })
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, OpenApiRequestState::ServerError { .. })
    }

    pub fn is_settled(&self) -> bool {
        self.status().is_settled()
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        match self {
            OpenApiRequestState::Initial => None,
            OpenApiRequestState::Pending { start_time, .. }
            | OpenApiRequestState::Complete { start_time, .. }
            | OpenApiRequestState::NetworkError { start_time, .. }
            | OpenApiRequestState::ServerError { start_time, .. } => Some(*start_time),
        }
    }

    pub fn end_time(&self) -> Option<Timestamp> {
        match self {
            OpenApiRequestState::Initial | OpenApiRequestState::Pending { .. } => None,
            OpenApiRequestState::Complete { end_time, .. }
            | OpenApiRequestState::NetworkError { end_time, .. }
            | OpenApiRequestState::ServerError { end_time, .. } => Some(*end_time),
        }
    }

    /// The arguments of the invocation, visible from `Pending` onward.
    pub fn request_payload(&self) -> Option<OpenApiPayload<'_, Args>> {
        match self {
            OpenApiRequestState::Initial => None,
            OpenApiRequestState::Complete {
                request_payload, ..
            } => Some(OpenApiPayload::First(request_payload)),
            OpenApiRequestState::Pending {
                request_payload, ..
            }
            | OpenApiRequestState::NetworkError {
                request_payload, ..
            }
            | OpenApiRequestState::ServerError {
                request_payload, ..
            } => Some(OpenApiPayload::Arguments(request_payload)),
        }
    }

    pub fn response_payload(&self) -> Option<&Response> {
        match self {
            OpenApiRequestState::Complete {
                response_payload, ..
            } => Some(response_payload),
            _ => None,
        }
    }

    pub fn network_failure(&self) -> Option<&NetworkFailure> {
        match self {
            OpenApiRequestState::NetworkError { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn server_error_ref(&self) -> Option<&Error> {
        match self {
            OpenApiRequestState::ServerError { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn error_ref(&self) -> Option<OpenApiFailureRef<'_, Error>> {
        match self {
            OpenApiRequestState::NetworkError { error, .. } => {
                Some(OpenApiFailureRef::Network(error))
            }
            OpenApiRequestState::ServerError { error, .. } => Some(OpenApiFailureRef::Server(error)),
            _ => None,
        }
    }

    /// Converts a settled state into the outcome of the call.
    pub fn into_result(self) -> Option<Result<Response, OpenApiFailure<Error>>> {
        match self {
            OpenApiRequestState::Complete {
                response_payload, ..
            } => Some(Ok(response_payload)),
            OpenApiRequestState::NetworkError { error, .. } => {
                Some(Err(OpenApiFailure::Network(error)))
            }
            OpenApiRequestState::ServerError { error, .. } => Some(Err(OpenApiFailure::Server(error))),
            _ => None,
        }
    }
}

impl<Response, Args: RequestArgs, Error: ApiError> OpenApiRequestState<Response, Args, Error> {
    /// Status code of the failed response, for `ServerError` states.
    pub fn status_code(&self) -> Option<u16> {
        self.server_error_ref().and_then(|error| error.status_code())
    }
}

impl<Response, Args: RequestArgs, Error> Lifecycle for OpenApiRequestState<Response, Args, Error> {
    fn is_pending(&self) -> bool {
        OpenApiRequestState::is_pending(self)
    }

    fn is_settled(&self) -> bool {
        OpenApiRequestState::is_settled(self)
    }

    fn start_time(&self) -> Option<Timestamp> {
        OpenApiRequestState::start_time(self)
    }

    fn end_time(&self) -> Option<Timestamp> {
        OpenApiRequestState::end_time(self)
    }
}

impl<Response, Args: RequestArgs, Error> Default for OpenApiRequestState<Response, Args, Error> {
    fn default() -> Self {
        OpenApiRequestState::Initial
    }
}
