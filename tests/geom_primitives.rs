use rectpack::{Point, Rect, Size};

#[test]
fn point_moves_relatively() {
    let mut point = Point::new(3, 4);
    point.offset(-1, 2);
    assert_eq!(point, Point::new(2, 6));
}

#[test]
fn size_measures() {
    let size = Size::new(6, 4);
    assert_eq!(size.area(), 24);
    assert_eq!(size.perimeter(), 20);
    assert_eq!(size.max_side(), 6);
    assert_eq!(size.min_side(), 4);
    assert_eq!(size.ratio(), 1.5);
    assert_eq!(size.flipped(), Size::new(4, 6));
}

#[test]
fn size_equality_ignores_identifier() {
    assert_eq!(Size::with_id(1, 8, 8), Size::with_id(2, 8, 8));
    assert_ne!(Size::new(8, 8), Size::new(8, 9));
}

#[test]
fn rect_edges_and_emptiness() {
    let rect = Rect::new(2, 3, 10, 20);
    assert_eq!(rect.left(), 2);
    assert_eq!(rect.top(), 3);
    assert_eq!(rect.right(), 12);
    assert_eq!(rect.bottom(), 23);
    assert!(!rect.is_empty());
    assert!(Rect::new(0, 0, 0, 5).is_empty());
}

#[test]
fn rect_containment() {
    let outer = Rect::new(0, 0, 10, 10);
    let inner = Rect::new(2, 2, 4, 4);
    assert!(outer.contains_rect(&inner));
    assert!(!inner.contains_rect(&outer));
    assert!(outer.contains_rect(&outer));

    assert!(outer.contains(0, 0));
    assert!(outer.contains(9, 9));
    assert!(!outer.contains(10, 10), "right/bottom edges are exclusive");
}

#[test]
fn rect_intersection() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(5, 5, 10, 10);
    let c = Rect::new(10, 0, 5, 5);

    assert!(a.intersects(&b));
    assert!(!a.intersects(&c), "abutting rectangles do not intersect");

    assert_eq!(a.intersect(&b), Rect::new(5, 5, 5, 5));
    assert!(a.intersect(&Rect::new(20, 20, 5, 5)).is_empty());
}

#[test]
fn rect_union() {
    let a = Rect::new(0, 0, 4, 4);
    let b = Rect::new(6, 2, 4, 4);
    assert_eq!(a.union(&b), Rect::new(0, 0, 10, 6));
}

#[test]
fn display_formatting() {
    assert_eq!(Point::new(1, 2).to_string(), "<1, 2>");
    assert_eq!(Size::new(3, 4).to_string(), "<3, 4>");
    assert_eq!(Rect::new(1, 2, 3, 4).to_string(), "<1, 2, 3, 4>");
}
