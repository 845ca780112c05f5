use std::future::Future;

/// Bound shared by everything a tracker stores in its observable state.
pub trait Payload: Clone + Send + Sync + 'static {}

impl<T> Payload for T where T: Clone + Send + Sync + 'static {}

/// Argument tuple of a wrapped API method.
///
/// Implemented for tuples of up to eight [`Payload`] values. A trigger is
/// always called with the whole tuple; parameterless methods take `()`.
pub trait RequestArgs: Payload {
    /// The first positional argument, or `()` for parameterless methods.
    type First: Payload;

    fn first(&self) -> Self::First;
}

impl RequestArgs for () {
    type First = ();

    fn first(&self) -> Self::First {}
}

macro_rules! impl_request_args {
    ($head:ident $(, $tail:ident)*) => {
        impl<$head: Payload, $($tail: Payload),*> RequestArgs for ($head, $($tail,)*) {
            type First = $head;

            fn first(&self) -> Self::First {
                self.0.clone()
            }
        }
    };
}

impl_request_args!(A1);
impl_request_args!(A1, A2);
impl_request_args!(A1, A2, A3);
impl_request_args!(A1, A2, A3, A4);
impl_request_args!(A1, A2, A3, A4, A5);
impl_request_args!(A1, A2, A3, A4, A5, A6);
impl_request_args!(A1, A2, A3, A4, A5, A6, A7);
impl_request_args!(A1, A2, A3, A4, A5, A6, A7, A8);

/// An asynchronous function whose invocations can be tracked.
///
/// Every `Fn(A1, .., An) -> Fut` closure or function item with
/// `Fut: Future<Output = Result<Response, Error>>` implements
/// `ApiMethod<(A1, .., An)>`, so trackers stay generic over the parameter
/// list and the resolved type of whatever they wrap.
///
/// ```
/// use reqtrack::ApiMethod;
///
/// async fn add(a: i32, b: i32) -> Result<i32, String> {
///     Ok(a + b)
/// }
///
/// fn assert_method<M: ApiMethod<(i32, i32), Response = i32>>(_: &M) {}
/// assert_method(&add);
/// ```
pub trait ApiMethod<Args>: Send + Sync + 'static {
    type Response;
    type Error;
    type Future: Future<Output = Result<Self::Response, Self::Error>> + Send + 'static;

    fn call(&self, args: Args) -> Self::Future;
}

macro_rules! impl_api_method {
    ($($arg:ident),*) => {
        impl<Func, Fut, Resp, Err, $($arg,)*> ApiMethod<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Fut + Send + Sync + 'static,
            Fut: Future<Output = Result<Resp, Err>> + Send + 'static,
        {
            type Response = Resp;
            type Error = Err;
            type Future = Fut;

            #[allow(non_snake_case)]
            fn call(&self, ($($arg,)*): ($($arg,)*)) -> Self::Future {
                (self)($($arg),*)
            }
        }
    };
}

impl_api_method!();
impl_api_method!(A1);
impl_api_method!(A1, A2);
impl_api_method!(A1, A2, A3);
impl_api_method!(A1, A2, A3, A4);
impl_api_method!(A1, A2, A3, A4, A5);
impl_api_method!(A1, A2, A3, A4, A5, A6);
impl_api_method!(A1, A2, A3, A4, A5, A6, A7);
impl_api_method!(A1, A2, A3, A4, A5, A6, A7, A8);
