use crate::common::{point, point_tracker, Point, PointApi};
use reqtrack::{RequestState, RequestStatus, RequestTracker};

mod common;

#[tokio::test]
async fn test_initial_state() {
    let tracker = RequestTracker::new(|p: Point| async move { Ok::<_, String>(p) });
    assert_eq!(tracker.state(), RequestState::Initial);
    assert_eq!(tracker.state().status(), RequestStatus::Initial);
}

#[tokio::test]
async fn test_pending_before_settlement() {
    let api = PointApi::new();
    let responder = api.defer();
    let tracker = point_tracker(&api);

    let call = tracker.trigger((point(1, 2),));
    match tracker.state() {
        RequestState::Pending {
            start_time,
            request_payload,
        } => {
            assert!(!start_time.to_iso_string().is_empty());
            assert_eq!(request_payload, (point(1, 2),));
        }
        other => panic!("{} should be Pending", other.status()),
    }
    assert_eq!(api.calls(), vec![(point(1, 2),)]);

    responder.resolve(point(1, 2));
    assert!(call.await.is_complete());
}

#[tokio::test]
async fn test_complete_echoes_payload() {
    let tracker = RequestTracker::new(|p: Point| async move { Ok::<_, String>(p) });

    let state = tracker.trigger((point(1, 2),)).await;
    match &state {
        RequestState::Complete {
            start_time,
            end_time,
            request_payload,
            response_payload,
        } => {
            assert_eq!(request_payload, &(point(1, 2),));
            assert_eq!(response_payload, &point(1, 2));
            assert!(start_time <= end_time);
            assert!(!end_time.to_string().is_empty());
        }
        other => panic!("{} should be Complete", other.status()),
    }
    assert_eq!(tracker.state(), state);
}

#[tokio::test]
async fn test_failure_becomes_error_state() {
    let tracker = RequestTracker::new(|| async { Err::<Point, _>("no reason") });

    let state = tracker.trigger(()).await;
    assert_eq!(state.status(), RequestStatus::Error);
    assert_eq!(state.error_ref(), Some(&"no reason"));
    assert_eq!(state.request_payload(), Some(&()));
    assert!(state.start_time() <= state.end_time());
    assert_eq!(tracker.state(), state);
}

#[tokio::test]
async fn test_parameterless_method() {
    let tracker = RequestTracker::new(|| async { Ok::<_, String>("parameterless") });

    let state = tracker.trigger(()).await;
    assert!(state.is_complete());
    assert_eq!(state.response_payload(), Some(&"parameterless"));
}

#[tokio::test]
async fn test_multiple_parameters() {
    let tracker = RequestTracker::new(|a: Point, b: Point, c: Point| async move {
        Ok::<_, String>(vec![a, b, c])
    });

    let args = (point(1, 1), point(2, 2), point(3, 3));
    let state = tracker.trigger(args.clone()).await;
    assert_eq!(state.request_payload(), Some(&args));
    assert_eq!(
        state.response_payload(),
        Some(&vec![point(1, 1), point(2, 2), point(3, 3)])
    );
}

#[tokio::test]
async fn test_new_call_replaces_previous_state() {
    let api = PointApi::new();
    api.resolve(point(1, 1));
    let responder = api.defer();
    let tracker = point_tracker(&api);

    assert!(tracker.trigger((point(0, 0),)).await.is_complete());

    let call = tracker.trigger((point(5, 5),));
    let state = tracker.state();
    assert!(state.is_pending());
    assert_eq!(state.request_payload(), Some(&(point(5, 5),)));
    assert!(state.response_payload().is_none());

    responder.reject("gone".to_string());
    let state = call.await;
    assert_eq!(state.error_ref(), Some(&"gone".to_string()));
    assert_eq!(tracker.state(), state);
}

#[tokio::test]
async fn test_split_and_handle() {
    let api = PointApi::new();
    api.resolve(point(4, 4));
    let tracker = point_tracker(&api);

    let (state, trigger) = tracker.split();
    assert!(state.is_initial());
    assert!(trigger.is_alive());

    let state = trigger.spawn((point(4, 4),)).await.unwrap();
    assert!(state.is_complete());
    assert_eq!(tracker.state(), state);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_trigger_from_other_task() {
    let tracker = RequestTracker::new(|n: u64| async move {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        Ok::<_, String>(n * 2)
    });

    let trigger = tracker.handle();
    let state = tokio::spawn(async move { trigger.trigger((21,)).await })
        .await
        .unwrap();
    assert_eq!(state.response_payload(), Some(&42));
    assert_eq!(tracker.state(), state);
}

#[tokio::test]
async fn test_settlement_after_teardown_is_ignored() {
    let api = PointApi::new();
    let responder = api.defer();
    let tracker = point_tracker(&api);
    let trigger = tracker.handle();

    let call = tracker.trigger((point(1, 2),));
    drop(tracker);
    assert!(!trigger.is_alive());

    responder.resolve(point(1, 2));
    let state = call.await;
    assert!(state.is_complete());

    api.resolve(point(3, 3));
    assert!(trigger.trigger((point(3, 3),)).await.is_complete());
    assert_eq!(api.call_count(), 2);
}

#[tokio::test]
async fn test_reset_returns_to_initial() {
    let api = PointApi::new();
    api.resolve(point(1, 1));
    let tracker = point_tracker(&api);

    assert!(tracker.trigger((point(1, 1),)).await.is_complete());
    tracker.reset();
    assert_eq!(tracker.state(), RequestState::Initial);
}
