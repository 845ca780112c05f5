#![allow(dead_code)]

use reqtrack::{ApiMethod, MockApi, OpenApiRequestTracker, RequestTracker, ResponseError};

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

pub fn point(x: i32, y: i32) -> Point {
    Point { x, y }
}

pub type PointApi = MockApi<(Point,), Point, String>;

pub fn point_tracker(
    api: &PointApi,
) -> RequestTracker<impl ApiMethod<(Point,), Response = Point, Error = String>, (Point,)> {
    let mock = api.clone();
    RequestTracker::new(move |p: Point| mock.call((p,)))
}

pub type OpenPointApi = MockApi<(Point,), Point, ResponseError>;

pub fn open_point_tracker(
    api: &OpenPointApi,
) -> OpenApiRequestTracker<impl ApiMethod<(Point,), Response = Point, Error = ResponseError>, (Point,)>
{
    let mock = api.clone();
    OpenApiRequestTracker::new(move |p: Point| mock.call((p,)))
}
