use crate::{ApiMethod, Payload, RequestState, StateCell, Timestamp, TrackerOptions};
use futures_signals::signal::{MutableSignalCloned, SignalStream};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::DropGuard;
use tracing::debug;

/// State tracked for a wrapped method `F` called with argument tuple `Args`.
pub type TrackedState<F, Args> =
    RequestState<<F as ApiMethod<Args>>::Response, Args, <F as ApiMethod<Args>>::Error>;

/// Wraps an API method and exposes the lifecycle of its latest invocation as
/// observable state.
///
/// The tracker owns the state: dropping it tears the state down, after which
/// pending calls still run to completion but no longer publish anything.
///
/// ```
/// use reqtrack::RequestTracker;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let tracker = RequestTracker::new(|id: u32| async move { Ok::<_, String>(id * 2) });
/// assert!(tracker.state().is_initial());
///
/// let state = tracker.trigger((21,)).await;
/// assert_eq!(state.response_payload(), Some(&42));
/// assert_eq!(tracker.state(), state);
/// # }
/// ```
pub struct RequestTracker<F, Args>
where
    F: ApiMethod<Args>,
{
    handle: Trigger<F, Args>,
    _alive: DropGuard,
}

impl<F, Args> RequestTracker<F, Args>
where
    F: ApiMethod<Args>,
    Args: Payload,
    F::Response: Payload,
    F::Error: Payload,
{
    pub fn new(func: F) -> Self {
        Self::with_options(func, TrackerOptions::default())
    }

    pub fn with_options(func: F, options: TrackerOptions) -> Self {
        let (cell, alive) = StateCell::new(RequestState::Initial, options);
        RequestTracker {
            handle: Trigger {
                func: Arc::new(func),
                cell,
            },
            _alive: alive,
        }
    }

    /// Current state.
    pub fn state(&self) -> TrackedState<F, Args> {
        self.handle.cell.get()
    }

    pub fn to_signal(&self) -> MutableSignalCloned<TrackedState<F, Args>> {
        self.handle.cell.signal()
    }

    pub fn to_stream(&self) -> SignalStream<MutableSignalCloned<TrackedState<F, Args>>> {
        self.handle.cell.stream()
    }

    /// See [`Trigger::trigger`].
    pub fn trigger(
        &self,
        args: Args,
    ) -> impl Future<Output = TrackedState<F, Args>> + Send + 'static {
        self.handle.trigger(args)
    }

    /// Puts the state back to `Initial`. A call still in flight may publish
    /// its terminal state afterwards.
    pub fn reset(&self) {
        self.handle.cell.publish(RequestState::Initial);
    }

    /// A cloneable trigger that can be moved into other tasks.
    pub fn handle(&self) -> Trigger<F, Args> {
        self.handle.clone()
    }

    /// The `(state, trigger)` pair.
    pub fn split(&self) -> (TrackedState<F, Args>, Trigger<F, Args>) {
        (self.state(), self.handle())
    }
}

/// Starts invocations of a tracked method.
pub struct Trigger<F, Args>
where
    F: ApiMethod<Args>,
{
    func: Arc<F>,
    cell: StateCell<TrackedState<F, Args>>,
}

impl<F, Args> Clone for Trigger<F, Args>
where
    F: ApiMethod<Args>,
{
    fn clone(&self) -> Self {
        Trigger {
            func: self.func.clone(),
            cell: self.cell.clone(),
        }
    }
}

impl<F, Args> Trigger<F, Args>
where
    F: ApiMethod<Args>,
    Args: Payload,
    F::Response: Payload,
    F::Error: Payload,
{
    /// Invokes the wrapped method with `args`.
    ///
    /// The start time is recorded, `Pending` is published and the method is
    /// called before this returns. The returned future resolves to the
    /// terminal state once the method settles; failures are returned as
    /// [`RequestState::Error`], never propagated.
    pub fn trigger(
        &self,
        args: Args,
    ) -> impl Future<Output = TrackedState<F, Args>> + Send + 'static {
        let start_time = Timestamp::now();
        let ticket = self
            .cell
            .begin(RequestState::pending(start_time, args.clone()));
        debug!(ticket = ticket.sequence(), %start_time, "request started");

        let response = <F as ApiMethod<Args>>::call(&self.func, args.clone());
        let cell = self.cell.clone();
        async move {
            let state = match response.await {
                Ok(response_payload) => {
                    RequestState::complete(start_time, Timestamp::now(), args, response_payload)
                }
                Err(error) => RequestState::error(start_time, Timestamp::now(), args, error),
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

    /// Runs [`trigger`](Self::trigger) on the tokio runtime.
    pub fn spawn(&self, args: Args) -> JoinHandle<TrackedState<F, Args>> {
        tokio::spawn(self.trigger(args))
    }

    pub fn is_alive(&self) -> bool {
        self.cell.is_alive()
    }
}
