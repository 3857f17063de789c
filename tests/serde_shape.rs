//! Wire shape of the data model: lowercase field names, identifier excluded.

use rectpack::{Point, Rect, Size};
use serde_json::json;

#[test]
fn point_round_trips() {
    let point = Point::new(3, -7);
    let value = serde_json::to_value(point).unwrap();
    assert_eq!(value, json!({"x": 3, "y": -7}));
    let back: Point = serde_json::from_value(value).unwrap();
    assert_eq!(back, point);
}

#[test]
fn size_omits_the_identifier() {
    let size = Size::with_id(99, 12, 34);
    let value = serde_json::to_value(size).unwrap();
    assert_eq!(value, json!({"width": 12, "height": 34}));

    let back: Size = serde_json::from_value(value).unwrap();
    assert_eq!(back.id, 0);
    assert_eq!(back, size);
}

#[test]
fn rect_flattens_point_and_size() {
    let mut rect = Rect::new(1, 2, 3, 4);
    rect.size.id = 77;
    rect.flipped = true;

    let value = serde_json::to_value(rect).unwrap();
    assert_eq!(
        value,
        json!({"x": 1, "y": 2, "width": 3, "height": 4, "flipped": true})
    );

    let back: Rect = serde_json::from_value(value).unwrap();
    assert_eq!(back.size.id, 0);
    assert_eq!(back, rect);
}

#[test]
fn rect_flipped_defaults_to_false() {
    let back: Rect = serde_json::from_str(r#"{"x":0,"y":0,"width":5,"height":6}"#).unwrap();
    assert!(!back.flipped);
    assert_eq!(back, Rect::new(0, 0, 5, 6));
}
