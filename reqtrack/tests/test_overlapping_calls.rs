use crate::common::{point, point_tracker, Point, PointApi};
use reqtrack::{OverlapPolicy, RequestTracker, TrackerOptions};

mod common;

#[tokio::test]
async fn test_stale_result_is_not_published() {
    let api = PointApi::new();
    let first = api.defer();
    let second = api.defer();
    let tracker = point_tracker(&api);

    let first_call = tracker.trigger((point(1, 1),));
    let second_call = tracker.trigger((point(2, 2),));

    second.resolve(point(2, 2));
    let latest = second_call.await;
    assert_eq!(tracker.state(), latest);

    first.resolve(point(1, 1));
    let stale = first_call.await;
    assert_eq!(stale.response_payload(), Some(&point(1, 1)));
    assert_eq!(tracker.state(), latest);
}

#[tokio::test]
async fn test_superseded_call_does_not_end_pending_state() {
    let api = PointApi::new();
    let first = api.defer();
    let second = api.defer();
    let tracker = point_tracker(&api);

    let first_call = tracker.trigger((point(1, 1),));
    let second_call = tracker.trigger((point(2, 2),));

    first.reject("too late".to_string());
    assert!(first_call.await.is_error());
    let state = tracker.state();
    assert!(state.is_pending());
    assert_eq!(state.request_payload(), Some(&(point(2, 2),)));

    second.resolve(point(2, 2));
    assert!(second_call.await.is_complete());
    assert!(tracker.state().is_complete());
}

#[tokio::test]
async fn test_last_write_wins_policy() {
    let api = PointApi::new();
    let first = api.defer();
    let second = api.defer();
    let mock = api.clone();
    let options = TrackerOptions::new().with_overlap(OverlapPolicy::LastWriteWins);
    let tracker = RequestTracker::with_options(move |p: Point| mock.call((p,)), options);

    let first_call = tracker.trigger((point(1, 1),));
    let second_call = tracker.trigger((point(2, 2),));

    second.resolve(point(2, 2));
    second_call.await;
    first.resolve(point(1, 1));
    let stale = first_call.await;

    assert_eq!(tracker.state(), stale);
    assert_eq!(tracker.state().response_payload(), Some(&point(1, 1)));
}
