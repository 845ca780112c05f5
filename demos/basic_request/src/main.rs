use crate::tracing_setup::tracing_init;
use futures::StreamExt;
use reqtrack::{
    Lifecycle, OpenApiRequestState, OpenApiRequestTracker, RequestState, RequestStreamExt,
    RequestTracker, ResponseError,
};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

mod tracing_setup;

#[derive(Debug, Clone)]
struct Point {
    x: i32,
    y: i32,
}

async fn fetch_point(point: Point) -> Result<Point, String> {
    sleep(Duration::from_millis(200)).await;
    Ok(Point {
        x: point.x * 10,
        y: point.y * 10,
    })
}

async fn fetch_user(id: u32) -> Result<String, ResponseError> {
    sleep(Duration::from_millis(100)).await;
    match id {
        1 => Ok("ada".to_string()),
        _ => Err(ResponseError::new(404, "Not Found").with_body(format!("no user {id}"))),
    }
}

#[tokio::main]
async fn main() {
    tracing_init();

    info!("==========================================");
    warn!("example: request tracker");

    let tracker = RequestTracker::new(fetch_point);
    let call = tracker.handle().spawn((Point { x: 1, y: 2 },));
    tracker
        .to_stream()
        .until_settled()
        .for_each(|state| async move {
            match state {
                RequestState::Initial => info!("  Main thread | nothing requested yet"),
                RequestState::Pending { start_time, .. } => {
                    info!("  Main thread | pending since {start_time}")
                }
                RequestState::Complete {
                    response_payload, ..
                } => info!("  Main thread | complete: {response_payload:?}"),
                RequestState::Error { error, .. } => warn!("  Main thread | failed: {error}"),
            }
        })
        .await;
    if let Err(e) = call.await {
        warn!("request task failed: {e}");
    }

    info!("==========================================");
    warn!("example: OpenAPI request tracker");

    let tracker = OpenApiRequestTracker::new(fetch_user);
    for id in [1, 2] {
        let state = tracker.trigger((id,)).await;
        match &state {
            OpenApiRequestState::Complete {
                response_payload, ..
            } => info!("  Main thread | user {id}: {response_payload}"),
            OpenApiRequestState::ServerError { error, .. } => {
                warn!("  Main thread | user {id}: server answered {error}")
            }
            OpenApiRequestState::NetworkError { error, .. } => {
                warn!("  Main thread | user {id}: unreachable ({error})")
            }
            _ => {}
        }
        if let Some(elapsed) = state.elapsed() {
            info!("  Main thread | took {} ms", elapsed.num_milliseconds());
        }
    }

    info!("==========================================");
    info!("  Main thread | Finish");
}
