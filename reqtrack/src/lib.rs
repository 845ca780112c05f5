//! Observable lifecycle state for asynchronous request/response calls.
//!
//! A tracker wraps an async API method. Triggering it publishes `Pending`,
//! runs the method and publishes the terminal state, which is also returned
//! to the caller. Failures of the wrapped method are data, never errors.

mod api_error;
mod api_method;
mod mock;
mod observable;
mod openapi_state;
mod openapi_tracker;
mod options;
mod request_state;
mod request_status;
mod stream_ext;
mod timestamp;
mod tracker;

pub use api_error::*;
pub use api_method::*;
pub use mock::*;
pub use observable::*;
pub use openapi_state::*;
pub use openapi_tracker::*;
pub use options::*;
pub use request_state::*;
pub use request_status::*;
pub use stream_ext::*;
pub use timestamp::*;
pub use tracker::*;

#[cfg(test)]
mod unit_tests;
