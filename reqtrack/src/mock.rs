use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

/// Scripted stand-in for an API method, for tests.
///
/// Replies are consumed in the order they were scripted, one per call. A
/// call without a scripted reply never settles, like a deferred reply whose
/// responder was dropped.
///
/// ```
/// use reqtrack::{MockApi, RequestTracker};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let api: MockApi<(u32,), String, String> = MockApi::new();
/// api.resolve("first".to_string());
///
/// let mock = api.clone();
/// let tracker = RequestTracker::new(move |id: u32| mock.call((id,)));
/// let state = tracker.trigger((1,)).await;
///
/// assert_eq!(state.response_payload(), Some(&"first".to_string()));
/// assert_eq!(api.calls(), vec![(1,)]);
/// # }
/// ```
pub struct MockApi<Args, Response, Error> {
    inner: Arc<MockInner<Args, Response, Error>>,
}

struct MockInner<Args, Response, Error> {
    calls: Mutex<Vec<Args>>,
    script: Mutex<VecDeque<MockReply<Response, Error>>>,
}

enum MockReply<Response, Error> {
    Ready(Result<Response, Error>),
    Deferred(oneshot::Receiver<Result<Response, Error>>),
}

/// Settles a deferred mock call. Dropping it leaves the call pending forever.
#[derive(Debug)]
pub struct Responder<Response, Error> {
    tx: oneshot::Sender<Result<Response, Error>>,
}

impl<Response, Error> Responder<Response, Error> {
    /// Returns false if the call was dropped before it settled.
    pub fn resolve(self, response: Response) -> bool {
        self.tx.send(Ok(response)).is_ok()
    }

    pub fn reject(self, error: Error) -> bool {
        self.tx.send(Err(error)).is_ok()
    }
}

impl<Args, Response, Error> Clone for MockApi<Args, Response, Error> {
    fn clone(&self) -> Self {
        MockApi {
            inner: self.inner.clone(),
        }
    }
}

impl<Args, Response, Error> Default for MockApi<Args, Response, Error> {
    fn default() -> Self {
        MockApi {
            inner: Arc::new(MockInner {
                calls: Mutex::new(Vec::new()),
                script: Mutex::new(VecDeque::new()),
            }),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<Args, Response, Error> MockApi<Args, Response, Error>
where
    Args: Send + 'static,
    Response: Send + 'static,
    Error: Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, result: Result<Response, Error>) -> &Self {
        lock(&self.inner.script).push_back(MockReply::Ready(result));
        self
    }

    pub fn resolve(&self, response: Response) -> &Self {
        self.reply(Ok(response))
    }

    pub fn reject(&self, error: Error) -> &Self {
        self.reply(Err(error))
    }

    /// Queues a reply that is settled later through the returned responder.
    pub fn defer(&self) -> Responder<Response, Error> {
        let (tx, rx) = oneshot::channel();
        lock(&self.inner.script).push_back(MockReply::Deferred(rx));
        Responder { tx }
    }

    pub fn calls(&self) -> Vec<Args>
    where
        Args: Clone,
    {
        lock(&self.inner.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.inner.calls).len()
    }

    pub fn remaining_replies(&self) -> usize {
        lock(&self.inner.script).len()
    }

    /// Records `args` and takes the next scripted reply. Without one the
    /// returned future stays pending forever.
    pub fn call(&self, args: Args) -> impl Future<Output = Result<Response, Error>> + Send + 'static {
        lock(&self.inner.calls).push(args);
        let reply = lock(&self.inner.script).pop_front();
        async move {
            match reply {
                Some(MockReply::Ready(result)) => result,
                Some(MockReply::Deferred(rx)) => match rx.await {
                    Ok(result) => result,
                    Err(_) => std::future::pending().await,
                },
                None => std::future::pending().await,
            }
        }
    }
}
