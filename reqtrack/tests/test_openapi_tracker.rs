use crate::common::{open_point_tracker, point, OpenPointApi, Point};
use reqtrack::{
    NetworkFailure, OpenApiRequestState, OpenApiRequestStatus, OpenApiRequestTracker,
    ResponseError,
};

mod common;

#[tokio::test]
async fn test_initial_state() {
    let api = OpenPointApi::new();
    let tracker = open_point_tracker(&api);
    assert!(tracker.state().is_initial());
    assert_eq!(tracker.state().status(), OpenApiRequestStatus::Initial);
}

#[tokio::test]
async fn test_pending_keeps_all_arguments() {
    let api = OpenPointApi::new();
    let responder = api.defer();
    let tracker = open_point_tracker(&api);

    let call = tracker.trigger((point(0, 0),));
    match tracker.state() {
        OpenApiRequestState::Pending {
            request_payload, ..
        } => assert_eq!(request_payload, (point(0, 0),)),
        other => panic!("{} should be Pending", other.status()),
    }

    responder.resolve(point(0, 0));
    assert!(call.await.is_complete());
}

#[tokio::test]
async fn test_complete_keeps_first_argument() {
    let api = OpenPointApi::new();
    api.resolve(point(1, 2));
    let tracker = open_point_tracker(&api);

    let state = tracker.trigger((point(1, 2),)).await;
    match &state {
        OpenApiRequestState::Complete {
            start_time,
            end_time,
            request_payload,
            response_payload,
        } => {
            assert_eq!(request_payload, &point(1, 2));
            assert_eq!(response_payload, &point(1, 2));
            assert!(start_time <= end_time);
        }
        other => panic!("{} should be Complete", other.status()),
    }
    assert_eq!(tracker.state(), state);
}

#[tokio::test]
async fn test_parameterless_method() {
    let tracker = OpenApiRequestTracker::new(|| async { Ok::<_, String>(point(0, 0)) });

    let state = tracker.trigger(()).await;
    match state {
        OpenApiRequestState::Complete {
            request_payload, ..
        } => {
            let () = request_payload;
        }
        other => panic!("{} should be Complete", other.status()),
    }
}

#[tokio::test]
async fn test_multiple_arguments_complete_with_first() {
    let tracker = OpenApiRequestTracker::new(|body: Point, page: u32| async move {
        Ok::<_, String>(vec![body; page as usize])
    });

    let state = tracker.trigger((point(1, 1), 2)).await;
    match state {
        OpenApiRequestState::Complete {
            request_payload,
            response_payload,
            ..
        } => {
            assert_eq!(request_payload, point(1, 1));
            assert_eq!(response_payload.len(), 2);
        }
        other => panic!("{} should be Complete", other.status()),
    }
}

#[tokio::test]
async fn test_error_without_status_is_network_error() {
    let tracker = OpenApiRequestTracker::new(|_p: Point| async move {
        Err::<Point, _>("connection refused".to_string())
    });

    let state = tracker.trigger((point(0, 0),)).await;
    match &state {
        OpenApiRequestState::NetworkError {
            request_payload,
            error,
            ..
        } => {
            assert_eq!(request_payload, &(point(0, 0),));
            assert_eq!(
                error,
                &NetworkFailure::new("connection refused", "\"connection refused\"")
            );
        }
        other => panic!("{} should be NetworkError", other.status()),
    }
    assert_eq!(tracker.state(), state);
}

#[tokio::test]
async fn test_error_with_status_is_server_error() {
    let api = OpenPointApi::new();
    api.reject(ResponseError::new(500, "Internal Server Error"));
    let tracker = open_point_tracker(&api);

    let state = tracker.trigger((point(0, 0),)).await;
    assert_eq!(state.status(), OpenApiRequestStatus::ServerError);
    assert_eq!(
        state.server_error_ref(),
        Some(&ResponseError::new(500, "Internal Server Error"))
    );
    assert_eq!(state.status_code(), Some(500));
    assert_eq!(tracker.state(), state);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_json_error_bodies() {
    use serde_json::{json, Value};

    let tracker = OpenApiRequestTracker::new(|_p: Point| async move {
        Err::<Point, _>(json!({ "status": 500 }))
    });
    let state = tracker.trigger((point(0, 0),)).await;
    assert_eq!(state.server_error_ref(), Some(&json!({ "status": 500 })));

    let tracker = OpenApiRequestTracker::new(|_p: Point| async move {
        Err::<Point, _>(json!({ "status": 500.0 }))
    });
    let state = tracker.trigger((point(0, 0),)).await;
    assert_eq!(state.status(), OpenApiRequestStatus::ServerError);
    assert_eq!(state.status_code(), Some(500));

    let tracker = OpenApiRequestTracker::new(|_p: Point| async move {
        Err::<Point, Value>(json!({ "message": "network error", "stack": "..." }))
    });
    let state = tracker.trigger((point(0, 0),)).await;
    assert_eq!(
        state.network_failure(),
        Some(&NetworkFailure::new("network error", "..."))
    );
}

#[tokio::test]
async fn test_reset_returns_to_initial() {
    let api = OpenPointApi::new();
    api.reject(ResponseError::new(502, "Bad Gateway"));
    let tracker = open_point_tracker(&api);

    assert!(tracker.trigger((point(0, 0),)).await.is_server_error());
    tracker.reset();
    assert!(tracker.state().is_initial());
}
