//! MaxRects behavior driven through the algorithm directly: determinism,
//! per-heuristic soundness and contact-point adjacency.

use rand::{Rng, SeedableRng};
use rectpack::algorithm::{MaxRectsPacker, PackAlgorithm};
use rectpack::{Heuristic, Rect, Size};

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

fn random_sizes(seed: u64, count: i32) -> Vec<Size> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| Size::with_id(i, rng.gen_range(4..=64), rng.gen_range(4..=64)))
        .collect()
}

#[test]
fn repeatable_and_disjoint() {
    let sizes = random_sizes(42, 120);

    let run = |sizes: Vec<Size>| -> Vec<Rect> {
        let mut packer = MaxRectsPacker::new(512, 512, Heuristic::MAX_RECTS_BAF);
        packer.allow_flip(true);
        packer.insert(sizes);
        packer.rects().to_vec()
    };

    let first = run(sizes.clone());
    let second = run(sizes);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a, b);
        assert_eq!(a.flipped, b.flipped);
        assert_eq!(a.id(), b.id());
    }
    assert!(disjoint(&first));
}

#[test]
fn every_heuristic_stays_sound() {
    let heuristics = [
        Heuristic::MAX_RECTS_BSSF,
        Heuristic::MAX_RECTS_BLSF,
        Heuristic::MAX_RECTS_BAF,
        Heuristic::MAX_RECTS_BL,
        Heuristic::MAX_RECTS_CP,
    ];

    for heuristic in heuristics {
        let sizes = random_sizes(7, 100);
        let mut packer = MaxRectsPacker::new(512, 512, heuristic);
        let failed = packer.insert(sizes.clone());

        let rects = packer.rects();
        assert_eq!(rects.len() + failed.len(), sizes.len());
        assert!(disjoint(rects), "{heuristic}: overlapping output");
        for rect in rects {
            assert!(
                rect.point.x >= 0
                    && rect.point.y >= 0
                    && rect.right() <= 512
                    && rect.bottom() <= 512,
                "{heuristic}: {rect} out of bounds"
            );
        }
    }
}

#[test]
fn bottom_left_stacks_rows() {
    let mut packer = MaxRectsPacker::new(20, 30, Heuristic::MAX_RECTS_BL);
    let failed = packer.insert(vec![
        Size::with_id(1, 10, 10),
        Size::with_id(2, 10, 10),
        Size::with_id(3, 10, 10),
    ]);
    assert!(failed.is_empty());

    let rects = packer.rects();
    // Two fill the first row, the third starts the next.
    assert_eq!(rects[0].point.y, 0);
    assert_eq!(rects[1].point.y, 0);
    assert_eq!(rects[2].point.y, 10);
}

#[test]
fn contact_point_placements_touch() {
    let mut packer = MaxRectsPacker::new(100, 100, Heuristic::MAX_RECTS_CP);
    let failed = packer.insert(vec![Size::with_id(1, 50, 50), Size::with_id(2, 50, 50)]);
    assert!(failed.is_empty());

    let rects = packer.rects();
    assert!(disjoint(rects));
    // The second placement shares a full edge with the first.
    let a = rects[0];
    let b = rects[1];
    let share_vertical = (a.right() == b.point.x || b.right() == a.point.x)
        && a.point.y < b.bottom()
        && b.point.y < a.bottom();
    let share_horizontal = (a.bottom() == b.point.y || b.bottom() == a.point.y)
        && a.point.x < b.right()
        && b.point.x < a.right();
    assert!(share_vertical || share_horizontal);
}

#[test]
fn free_list_starts_and_resets_to_one() {
    let mut packer = MaxRectsPacker::new(64, 64, Heuristic::MAX_RECTS_BSSF);
    assert_eq!(packer.free_list_len(), 1);

    packer.insert(vec![Size::with_id(1, 32, 32)]);
    assert!(packer.free_list_len() > 1);

    packer.reset(64, 64);
    assert_eq!(packer.free_list_len(), 1);
    assert!(packer.rects().is_empty());
}
