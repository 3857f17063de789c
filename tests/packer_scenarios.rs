use rectpack::{Heuristic, Packer, Rect, Size};

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
fn empty_pack_succeeds() {
    let mut packer = Packer::new(64, 64, Heuristic::MAX_RECTS_BSSF);
    assert!(packer.pack());
    assert_eq!(packer.size(), Size::new(0, 0));
    assert!(packer.rects().is_empty());
    assert!(packer.unpacked().is_empty());
}

#[test]
fn exact_fit_fills_bin() {
    let mut packer = Packer::new(100, 100, Heuristic::MAX_RECTS_BSSF);
    packer.insert_size(1, 100, 100);
    assert!(packer.pack());

    let rects = packer.rects();
    assert_eq!(rects.len(), 1);
    assert_eq!(rects[0], Rect::new(0, 0, 100, 100));
    assert_eq!(rects[0].id(), 1);
    assert_eq!(packer.used(false), 1.0);
}

#[test]
fn three_squares_in_a_row() {
    let mut packer = Packer::new(30, 10, Heuristic::SKYLINE_BL);
    packer.insert([
        Size::with_id(1, 10, 10),
        Size::with_id(2, 10, 10),
        Size::with_id(3, 10, 10),
    ]);
    assert!(packer.pack());

    let map = packer.map();
    assert_eq!(map.len(), 3);
    assert_eq!(map[&1].point, rectpack::Point::new(0, 0));
    assert_eq!(map[&2].point, rectpack::Point::new(10, 0));
    assert_eq!(map[&3].point, rectpack::Point::new(20, 0));
    assert_eq!(packer.used(false), 1.0);
}

#[test]
fn overflow_reports_unpacked_remainder() {
    let mut packer = Packer::new(10, 10, Heuristic::MAX_RECTS_BSSF);
    packer.insert([Size::with_id(1, 8, 8), Size::with_id(2, 8, 8)]);

    assert!(!packer.pack());
    assert_eq!(packer.rects().len(), 1);
    assert_eq!(packer.unpacked().len(), 1);
}

#[test]
fn flip_recovers_rotated_fit() {
    // Upright 20x10 cannot fit a 10x20 bin.
    let mut packer = Packer::new(10, 20, Heuristic::MAX_RECTS_BSSF);
    packer.insert([Size::with_id(1, 20, 10)]);
    assert!(!packer.pack());

    let mut packer = Packer::new(10, 20, Heuristic::MAX_RECTS_BSSF);
    packer.allow_flip(true);
    packer.insert([Size::with_id(1, 20, 10)]);
    assert!(packer.pack());

    let rect = packer.rects()[0];
    assert!(rect.flipped);
    assert_eq!(rect.size.width, 10);
    assert_eq!(rect.size.height, 20);
}

#[test]
fn padding_keeps_rectangles_apart() {
    let mut packer = Packer::new(100, 100, Heuristic::MAX_RECTS_BSSF);
    packer.padding = 2;
    packer.insert([Size::with_id(1, 40, 40), Size::with_id(2, 40, 40)]);
    assert!(packer.pack());

    let rects = packer.rects().to_vec();
    assert_eq!(rects.len(), 2);

    // Caller-facing dimensions are unchanged by padding.
    for rect in &rects {
        assert_eq!(rect.size, Size::new(40, 40));
        assert!(rect.point.x >= 1 && rect.point.y >= 1, "{rect} touches the bin edge");
    }

    // Footprints grown by half the padding per side stay disjoint, so the
    // gap between neighbours is at least the full padding.
    let mut grown = rects.clone();
    for rect in &mut grown {
        rect.point.x -= 1;
        rect.point.y -= 1;
        rect.size.width += 2;
        rect.size.height += 2;
    }
    assert!(disjoint(&grown));

    let size = packer.size();
    assert!(size.width <= 100 && size.height <= 100);
}

#[test]
fn repeated_packs_are_deterministic() {
    use rand::{Rng, SeedableRng};

    let mut rng = rand::rngs::StdRng::seed_from_u64(256);
    let mut sizes: Vec<Size> = Vec::new();
    for i in 0..256 {
        let w = rng.gen_range(8..=64);
        let h = rng.gen_range(8..=64);
        sizes.push(Size::with_id(i, w, h));
    }

    let run = |sizes: &[Size]| -> Vec<(i32, Rect)> {
        let mut packer = Packer::new(1024, 1024, Heuristic::MAX_RECTS_BAF);
        packer.insert(sizes.to_vec());
        packer.pack();
        packer.rects().iter().map(|r| (r.id(), *r)).collect()
    };

    let first = run(&sizes);
    let second = run(&sizes);
    assert_eq!(first, second);
    assert!(disjoint(&first.iter().map(|(_, r)| *r).collect::<Vec<_>>()));
}

#[test]
fn online_mode_packs_immediately() {
    let mut packer = Packer::new(10, 10, Heuristic::MAX_RECTS_BSSF);
    packer.online = true;

    assert!(packer.insert_size(1, 8, 8));
    assert!(!packer.insert_size(2, 8, 8), "second 8x8 cannot fit online");
    assert_eq!(packer.rects().len(), 1);
    assert!(packer.unpacked().is_empty());
}

#[test]
fn offline_insert_returns_staging_snapshot() {
    let mut packer = Packer::new(100, 100, Heuristic::MAX_RECTS_BSSF);
    let staged = packer.insert([Size::with_id(1, 10, 10)]);
    assert_eq!(staged.len(), 1);
    let staged = packer.insert([Size::with_id(2, 20, 20)]);
    assert_eq!(staged.len(), 2);
    assert!(packer.rects().is_empty());
}
