use crate::{RequestStatus, Timestamp};
use chrono::TimeDelta;

/// Lifecycle of one invocation of a wrapped API method.
///
/// `Request` is the argument tuple the trigger was called with, `Response`
/// the value the method resolved with and `Error` the value it failed with.
/// Each trigger call replaces the whole state; nothing is merged with the
/// previous invocation.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all_fields = "camelCase")
)]
pub enum RequestState<Response, Request, Error> {
    Initial,
    Pending {
        start_time: Timestamp,
        request_payload: Request,
    },
    Complete {
        start_time: Timestamp,
        end_time: Timestamp,
        request_payload: Request,
        response_payload: Response,
    },
    Error {
        start_time: Timestamp,
        end_time: Timestamp,
        request_payload: Request,
        error: Error,
    },
}

/// Common view over the request state types, used by the stream helpers.
pub trait Lifecycle {
    fn is_pending(&self) -> bool;

    /// True once the wrapped method has settled, successfully or not.
    fn is_settled(&self) -> bool;

    fn start_time(&self) -> Option<Timestamp>;

    fn end_time(&self) -> Option<Timestamp>;

    /// Duration between start and settlement, if settled.
    fn elapsed(&self) -> Option<TimeDelta> {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => Some(end.since(&start)),
            _ => None,
        }
    }
}

impl<Response, Request, Error> RequestState<Response, Request, Error> {
    pub fn pending(start_time: Timestamp, request_payload: Request) -> Self {
        RequestState::Pending {
            start_time,
            request_payload,
        }
    }

    pub fn complete(
        start_time: Timestamp,
        end_time: Timestamp,
        request_payload: Request,
        response_payload: Response,
    ) -> Self {
        RequestState::Complete {
            start_time,
            end_time,
            request_payload,
            response_payload,
        }
    }

    pub fn error(
        start_time: Timestamp,
        end_time: Timestamp,
        request_payload: Request,
        error: Error,
    ) -> Self {
        RequestState::Error {
            start_time,
            end_time,
            request_payload,
            error,
        }
    }

    pub fn status(&self) -> RequestStatus {
        match self {
            RequestState::Initial => RequestStatus::Initial,
            RequestState::Pending { .. } => RequestStatus::Pending,
            RequestState::Complete { .. } => RequestStatus::Complete,
            RequestState::Error { .. } => RequestStatus::Error,
        }
    }

    pub fn is_initial(&self) -> bool {
        matches!(self, RequestState::Initial)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, RequestState::Complete { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RequestState::Error { .. })
    }

    pub fn is_settled(&self) -> bool {
        self.status().is_settled()
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        match self {
            RequestState::Initial => None,
            RequestState::Pending { start_time, .. }
            | RequestState::Complete { start_time, .. }
            | RequestState::Error { start_time, .. } => Some(*start_time),
        }
    }

    pub fn end_time(&self) -> Option<Timestamp> {
        match self {
            RequestState::Complete { end_time, .. } | RequestState::Error { end_time, .. } => {
                Some(*end_time)
            }
            _ => None,
        }
    }

    /// The arguments of the invocation, visible from `Pending` onward.
    pub fn request_payload(&self) -> Option<&Request> {
        match self {
            RequestState::Initial => None,
            RequestState::Pending {
                request_payload, ..
            }
            | RequestState::Complete {
                request_payload, ..
            }
            | RequestState::Error {
                request_payload, ..
            } => Some(request_payload),
        }
    }

    pub fn response_payload(&self) -> Option<&Response> {
        match self {
            RequestState::Complete {
                response_payload, ..
            } => Some(response_payload),
            _ => None,
        }
    }

    pub fn error_ref(&self) -> Option<&Error> {
        match self {
            RequestState::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Converts a settled state into the outcome of the call.
    pub fn into_result(self) -> Option<Result<Response, Error>> {
        match self {
            RequestState::Complete {
                response_payload, ..
            } => Some(Ok(response_payload)),
            RequestState::Error { error, .. } => Some(Err(error)),
            _ => None,
        }
    }
}

impl<Response, Request, Error> Lifecycle for RequestState<Response, Request, Error> {
    fn is_pending(&self) -> bool {
        RequestState::is_pending(self)
    }

    fn is_settled(&self) -> bool {
        RequestState::is_settled(self)
    }

    fn start_time(&self) -> Option<Timestamp> {
        RequestState::start_time(self)
    }

    fn end_time(&self) -> Option<Timestamp> {
        RequestState::end_time(self)
    }
}

impl<Response, Request, Error> Default for RequestState<Response, Request, Error> {
    fn default() -> Self {
        RequestState::Initial
    }
}
