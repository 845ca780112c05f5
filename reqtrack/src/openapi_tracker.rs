use crate::{
    ApiError, ApiMethod, NetworkFailure, OpenApiRequestState, Payload, RequestArgs, StateCell,
    Timestamp, TrackerOptions,
};
use futures_signals::signal::{MutableSignalCloned, SignalStream};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::DropGuard;
use tracing::debug;

pub type TrackedOpenApiState<F, Args> =
    OpenApiRequestState<<F as ApiMethod<Args>>::Response, Args, <F as ApiMethod<Args>>::Error>;

/// Variant of [`RequestTracker`](crate::RequestTracker) for OpenAPI-style
/// clients, which tells server errors apart from network errors.
///
/// ```
/// use reqtrack::{OpenApiRequestTracker, ResponseError};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let tracker = OpenApiRequestTracker::new(|_id: u32| async move {
///     Err::<String, _>(ResponseError::new(404, "Not Found"))
/// });
///
/// let state = tracker.trigger((7,)).await;
/// assert!(state.is_server_error());
/// assert_eq!(state.status_code(), Some(404));
/// # }
/// ```
pub struct OpenApiRequestTracker<F, Args>
where
    F: ApiMethod<Args>,
    Args: RequestArgs,
{
    handle: OpenApiTrigger<F, Args>,
    _alive: DropGuard,
}

impl<F, Args> OpenApiRequestTracker<F, Args>
where
    F: ApiMethod<Args>,
    Args: RequestArgs,
    F::Response: Payload,
    F::Error: ApiError + Payload,
{
    pub fn new(func: F) -> Self {
        Self::with_options(func, TrackerOptions::default())
    }

    pub fn with_options(func: F, options: TrackerOptions) -> Self {
        let (cell, alive) = StateCell::new(OpenApiRequestState::Initial, options);
        OpenApiRequestTracker {
            handle: OpenApiTrigger {
                func: Arc::new(func),
                cell,
            },
            _alive: alive,
        }
    }

    pub fn state(&self) -> TrackedOpenApiState<F, Args> {
        self.handle.cell.get()
    }

    pub fn to_signal(&self) -> MutableSignalCloned<TrackedOpenApiState<F, Args>> {
        self.handle.cell.signal()
    }

    pub fn to_stream(&self) -> SignalStream<MutableSignalCloned<TrackedOpenApiState<F, Args>>> {
        self.handle.cell.stream()
    }

    /// See [`OpenApiTrigger::trigger`].
    pub fn trigger(
        &self,
        args: Args,
    ) -> impl Future<Output = TrackedOpenApiState<F, Args>> + Send + 'static {
        self.handle.trigger(args)
    }

    /// Puts the state back to `Initial`. A call still in flight may publish
    /// its terminal state afterwards.
    pub fn reset(&self) {
        self.handle.cell.publish(OpenApiRequestState::Initial);
    }

    pub fn handle(&self) -> OpenApiTrigger<F, Args> {
        self.handle.clone()
    }

    pub fn split(&self) -> (TrackedOpenApiState<F, Args>, OpenApiTrigger<F, Args>) {
        (self.state(), self.handle())
    }
}

pub struct OpenApiTrigger<F, Args>
where
    F: ApiMethod<Args>,
    Args: RequestArgs,
{
    func: Arc<F>,
    cell: StateCell<TrackedOpenApiState<F, Args>>,
}

impl<F, Args> Clone for OpenApiTrigger<F, Args>
where
    F: ApiMethod<Args>,
    Args: RequestArgs,
{
    fn clone(&self) -> Self {
        OpenApiTrigger {
            func: self.func.clone(),
            cell: self.cell.clone(),
        }
    }
}

impl<F, Args> OpenApiTrigger<F, Args>
where
    F: ApiMethod<Args>,
    Args: RequestArgs,
    F::Response: Payload,
    F::Error: ApiError + Payload,
{
    /// Invokes the wrapped method with `args`.
    ///
    /// Behaves like [`Trigger::trigger`](crate::Trigger::trigger), except that
    /// a failure reporting a status code settles as `ServerError` and any
    /// other failure as `NetworkError`.
    pub fn trigger(
        &self,
        args: Args,
    ) -> impl Future<Output = TrackedOpenApiState<F, Args>> + Send + 'static {
        let start_time = Timestamp::now();
        let ticket = self
            .cell
            .begin(OpenApiRequestState::pending(start_time, args.clone()));
        debug!(ticket = ticket.sequence(), %start_time, "request started");

        let response = <F as ApiMethod<Args>>::call(&self.func, args.clone());
        let cell = self.cell.clone();
        async move {
            let state = match response.await {
                Ok(response_payload) => OpenApiRequestState::complete(
                    start_time,
                    Timestamp::now(),
                    &args,
                    response_payload,
                ),
                Err(error) => classify(start_time, args, error),
            };
            let published = cell.settle(ticket, state.clone());
            debug!(
                ticket = ticket.sequence(),
                status = %state.status(),
                published,
                "request settled"
            );
            state
        }
    }

    pub fn spawn(&self, args: Args) -> JoinHandle<TrackedOpenApiState<F, Args>> {
        tokio::spawn(self.trigger(args))
    }

    pub fn is_alive(&self) -> bool {
        self.cell.is_alive()
    }
}

// A status code only exists if the endpoint was reached.
fn classify<Response, Args, Error>(
    start_time: Timestamp,
    args: Args,
    error: Error,
) -> OpenApiRequestState<Response, Args, Error>
where
    Args: RequestArgs,
    Error: ApiError,
{
    let end_time = Timestamp::now();
    match error.status_code() {
        Some(status) => {
            debug!(status, "server responded with an error");
            OpenApiRequestState::server_error(start_time, end_time, args, error)
        }
        None => {
            let failure = NetworkFailure::from_error(&error);
            debug!(message = %failure.message, "no response obtained");
            OpenApiRequestState::network_error(start_time, end_time, args, failure)
        }
    }
}
