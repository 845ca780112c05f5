use std::fmt;

/// Tag of a [`RequestState`](crate::RequestState).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum RequestStatus {
    /// No invocation has happened yet.
    Initial,
    /// An invocation is in flight.
    Pending,
    /// The last invocation succeeded.
    Complete,
    /// The last invocation failed.
    Error,
}

impl RequestStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, RequestStatus::Complete | RequestStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Initial => "Initial",
            RequestStatus::Pending => "Pending",
            RequestStatus::Complete => "Complete",
            RequestStatus::Error => "Error",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag of an [`OpenApiRequestState`](crate::OpenApiRequestState).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum OpenApiRequestStatus {
    /// No invocation has happened yet.
    Initial,
    /// An invocation is in flight.
    Pending,
    /// The last invocation succeeded.
    Complete,
    /// No response was obtained.
    NetworkError,
    /// A response was received, but it reported a failure.
    ServerError,
}

impl OpenApiRequestStatus {
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            OpenApiRequestStatus::Complete
                | OpenApiRequestStatus::NetworkError
                | OpenApiRequestStatus::ServerError
        )
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            OpenApiRequestStatus::NetworkError | OpenApiRequestStatus::ServerError
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OpenApiRequestStatus::Initial => "Initial",
            OpenApiRequestStatus::Pending => "Pending",
            OpenApiRequestStatus::Complete => "Complete",
            OpenApiRequestStatus::NetworkError => "NetworkError",
            OpenApiRequestStatus::ServerError => "ServerError",
        }
    }
}

impl fmt::Display for OpenApiRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
