//! Skyline behavior driven through the algorithm directly: bottom-left
//! placement, profile growth, and waste-map recovery of buried pockets.

use rectpack::algorithm::{PackAlgorithm, SkylinePacker};
use rectpack::{Heuristic, Point, Rect, Size};

fn disjoint(rects: &[Rect]) -> bool {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].intersects(&rects[j]) {
                return false;
            }
        }
    }
    true
}

#[test]
fn bottom_left_fills_rows() {
    let mut packer = SkylinePacker::new(30, 10, Heuristic::SKYLINE_BL);
    let failed = packer.insert(vec![
        Size::with_id(1, 10, 10),
        Size::with_id(2, 10, 10),
        Size::with_id(3, 10, 10),
    ]);
    assert!(failed.is_empty());

    let rects = packer.rects();
    assert_eq!(rects[0].point, Point::new(0, 0));
    assert_eq!(rects[1].point, Point::new(10, 0));
    assert_eq!(rects[2].point, Point::new(20, 0));
}

#[test]
fn bottom_left_prefers_lower_resting_spot() {
    let mut packer = SkylinePacker::new(30, 30, Heuristic::SKYLINE_BL);
    assert!(packer.insert(vec![Size::with_id(1, 10, 20)]).is_empty());
    // The 20-wide gap to the right rests at y=0, below the raised column.
    assert!(packer.insert(vec![Size::with_id(2, 15, 5)]).is_empty());

    let rects = packer.rects();
    assert_eq!(rects[1].point, Point::new(10, 0));
}

#[test]
fn min_waste_recovers_buried_pocket() {
    let mut packer = SkylinePacker::new(30, 20, Heuristic::SKYLINE_MIN_WASTE);

    // Raise a 10-high column on the left.
    assert!(packer.insert(vec![Size::with_id(1, 10, 10)]).is_empty());
    // A full-width shelf rests on the column and buries a 15x10 pocket to
    // its right.
    assert!(packer.insert(vec![Size::with_id(2, 25, 5)]).is_empty());
    assert_eq!(packer.rects()[1].point, Point::new(0, 10));

    // The next rectangle fits the buried pocket and must land inside it
    // rather than on the raised surface.
    assert!(packer.insert(vec![Size::with_id(3, 12, 8)]).is_empty());
    let recovered = packer.rects()[2];
    assert_eq!(recovered.point, Point::new(10, 0));

    // The surface is unchanged by the pocket placement: a fourth rectangle
    // still rests in the open column on the far right.
    assert!(packer.insert(vec![Size::with_id(4, 5, 5)]).is_empty());
    assert_eq!(packer.rects()[3].point, Point::new(25, 0));

    assert!(disjoint(packer.rects()));
}

#[test]
fn min_waste_random_fixture_stays_consistent() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xDEAD_BEEF);

    let mut sizes: Vec<Size> = Vec::new();
    for i in 0..400 {
        sizes.push(Size::with_id(i, rng.gen_range(4..=48), rng.gen_range(4..=48)));
    }

    let mut packer = SkylinePacker::new(256, 256, Heuristic::SKYLINE_MIN_WASTE);
    let failed = packer.insert(sizes.clone());

    let rects = packer.rects();
    assert!(disjoint(rects));
    assert_eq!(rects.len() + failed.len(), sizes.len());

    let total: i64 = rects.iter().map(|r| r.area()).sum();
    assert_eq!(packer.used_area(), total);
    assert!(packer.used() > 0.0 && packer.used() <= 1.0);
}

#[test]
fn reset_restores_a_fresh_profile() {
    let mut packer = SkylinePacker::new(50, 50, Heuristic::SKYLINE_MIN_WASTE);
    assert!(packer
        .insert(vec![Size::with_id(1, 20, 20), Size::with_id(2, 30, 10)])
        .is_empty());
    assert!(packer.used_area() > 0);

    packer.reset(50, 50);
    assert!(packer.rects().is_empty());
    assert_eq!(packer.used_area(), 0);

    // Same inserts land identically after a reset.
    assert!(packer
        .insert(vec![Size::with_id(1, 20, 20), Size::with_id(2, 30, 10)])
        .is_empty());
    assert_eq!(packer.rects().len(), 2);
}
