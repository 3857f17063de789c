//! MaxRects keeps a list of *maximal* free rectangles, which may overlap
//! each other. Placement decomposes every intersected free rectangle into up
//! to four maximal strips, then prunes any strip contained in another.

use super::{pad_size, unpad_rect, AlgorithmBase, PackAlgorithm};
use crate::geom::{Rect, Size};
use crate::heuristic::{BinFit, Heuristic};

pub struct MaxRectsPacker {
    base: AlgorithmBase,
    bin_fit: BinFit,
    free: Vec<Rect>,
    /// Strips produced while splitting a single placement, kept apart from
    /// the main list so containment pruning stays well-defined.
    new_free: Vec<Rect>,
}

impl MaxRectsPacker {
    pub fn new(width: i32, height: i32, heuristic: Heuristic) -> Self {
        let bin_fit = match heuristic.bin_fit() {
            Some(
                fit @ (BinFit::BestShortSideFit
                | BinFit::BestLongSideFit
                | BinFit::BestAreaFit
                | BinFit::BottomLeft
                | BinFit::ContactPoint),
            ) => fit,
            _ => BinFit::BestShortSideFit,
        };

        let mut packer = Self {
            base: AlgorithmBase::default(),
            bin_fit,
            free: Vec::new(),
            new_free: Vec::new(),
        };
        packer.reset(width, height);
        packer
    }

    /// Scores placing a `width` by `height` rectangle at the origin of
    /// `free`. Lower is better on both components.
    fn score(&self, free: &Rect, width: i32, height: i32) -> (i64, i64) {
        let leftover_h = (free.size.width - width).abs() as i64;
        let leftover_v = (free.size.height - height).abs() as i64;
        let short_fit = leftover_h.min(leftover_v);
        let long_fit = leftover_h.max(leftover_v);

        match self.bin_fit {
            BinFit::BestShortSideFit => (short_fit, long_fit),
            BinFit::BestLongSideFit => (long_fit, short_fit),
            BinFit::BestAreaFit => (
                free.size.area() - width as i64 * height as i64,
                short_fit,
            ),
            BinFit::BottomLeft => ((free.point.y + height) as i64, free.point.x as i64),
            BinFit::ContactPoint => (
                -self.contact_point_score(free.point.x, free.point.y, width, height),
                i64::MAX,
            ),
            _ => (short_fit, long_fit),
        }
    }

    /// Finds the best-scoring position for a rectangle of the given size
    /// across all free rectangles, evaluating the flipped orientation as
    /// well when enabled. Ties are broken by first encounter.
    fn find_position(&self, width: i32, height: i32) -> Option<(Rect, i64, i64)> {
        let mut best: Option<Rect> = None;
        let mut best_score1 = i64::MAX;
        let mut best_score2 = i64::MAX;

        for free in &self.free {
            if free.size.width >= width && free.size.height >= height {
                let (score1, score2) = self.score(free, width, height);
                if score1 < best_score1 || (score1 == best_score1 && score2 < best_score2) {
                    best_score1 = score1;
                    best_score2 = score2;
                    best = Some(Rect::new(free.point.x, free.point.y, width, height));
                }
            }
            if self.base.allow_flip && free.size.width >= height && free.size.height >= width {
                let (score1, score2) = self.score(free, height, width);
                if score1 < best_score1 || (score1 == best_score1 && score2 < best_score2) {
                    best_score1 = score1;
                    best_score2 = score2;
                    let mut node = Rect::new(free.point.x, free.point.y, height, width);
                    node.flipped = true;
                    best = Some(node);
                }
            }
        }

        best.map(|node| (node, best_score1, best_score2))
    }

    /// Total length of edges the candidate placement would share with the
    /// bin walls and the already-packed rectangles.
    fn contact_point_score(&self, x: i32, y: i32, width: i32, height: i32) -> i64 {
        let mut score = 0i64;

        if x == 0 || x + width == self.base.max_width {
            score += height as i64;
        }
        if y == 0 || y + height == self.base.max_height {
            score += width as i64;
        }

        for used in &self.base.packed {
            if used.point.x == x + width || used.right() == x {
                score += common_interval_length(used.point.y, used.bottom(), y, y + height);
            }
            if used.point.y == y + height || used.bottom() == y {
                score += common_interval_length(used.point.x, used.right(), x, x + width);
            }
        }
        score
    }

    fn place(&mut self, node: &Rect) {
        let mut i = 0;
        while i < self.free.len() {
            let free = self.free[i];
            if free.intersects(node) {
                self.free.swap_remove(i);
                self.split_free_node(free, node);
            } else {
                i += 1;
            }
        }
        self.prune_free_list();
        self.base.used_area += node.area();
    }

    /// Decomposes `free` into the maximal strips left over around `used`.
    /// The strips keep the full extent of `free` on the untouched axis.
    fn split_free_node(&mut self, free: Rect, used: &Rect) {
        if used.point.x < free.right() && used.right() > free.point.x {
            // Strip above the used rectangle.
            if used.point.y > free.point.y && used.point.y < free.bottom() {
                let mut node = free;
                node.size.height = used.point.y - node.point.y;
                self.insert_new_free(node);
            }
            // Strip below the used rectangle.
            if used.bottom() < free.bottom() {
                let mut node = free;
                node.point.y = used.bottom();
                node.size.height = free.bottom() - used.bottom();
                self.insert_new_free(node);
            }
        }

        if used.point.y < free.bottom() && used.bottom() > free.point.y {
            // Strip left of the used rectangle.
            if used.point.x > free.point.x && used.point.x < free.right() {
                let mut node = free;
                node.size.width = used.point.x - node.point.x;
                self.insert_new_free(node);
            }
            // Strip right of the used rectangle.
            if used.right() < free.right() {
                let mut node = free;
                node.point.x = used.right();
                node.size.width = free.right() - used.right();
                self.insert_new_free(node);
            }
        }
    }

    /// Adds a freshly split strip, dropping it when a prior new strip
    /// already covers it and evicting prior new strips it covers.
    fn insert_new_free(&mut self, rect: Rect) {
        let mut i = 0;
        while i < self.new_free.len() {
            if self.new_free[i].contains_rect(&rect) {
                return;
            }
            if rect.contains_rect(&self.new_free[i]) {
                self.new_free.swap_remove(i);
                continue;
            }
            i += 1;
        }
        self.new_free.push(rect);
    }

    /// Drops new strips contained in an old free rectangle, then merges the
    /// remainder into the free list. Afterwards no free rectangle is
    /// contained in any other.
    fn prune_free_list(&mut self) {
        for free in &self.free {
            let mut j = 0;
            while j < self.new_free.len() {
                if free.contains_rect(&self.new_free[j]) {
                    self.new_free.swap_remove(j);
                } else {
                    j += 1;
                }
            }
        }
        self.free.append(&mut self.new_free);
    }

    /// Number of free rectangles currently tracked.
    pub fn free_list_len(&self) -> usize {
        self.free.len()
    }
}

impl PackAlgorithm for MaxRectsPacker {
    fn base(&self) -> &AlgorithmBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase {
        &mut self.base
    }

    fn reset(&mut self, width: i32, height: i32) {
        self.base.reset(width, height);
        self.free.clear();
        self.new_free.clear();
        self.free.push(Rect::new(0, 0, width, height));
    }

    fn insert(&mut self, mut sizes: Vec<Size>) -> Vec<Size> {
        loop {
            let mut best: Option<(usize, Rect)> = None;
            let mut best_score1 = i64::MAX;
            let mut best_score2 = i64::MAX;

            for (i, &size) in sizes.iter().enumerate() {
                let mut padded = size;
                pad_size(&mut padded, self.base.padding);

                if let Some((node, score1, score2)) =
                    self.find_position(padded.width, padded.height)
                {
                    if score1 < best_score1 || (score1 == best_score1 && score2 < best_score2) {
                        best_score1 = score1;
                        best_score2 = score2;
                        let mut node = node;
                        node.size.id = size.id;
                        best = Some((i, node));
                    }
                }
            }

            let Some((index, node)) = best else {
                break;
            };

            self.place(&node);
            let mut placed = node;
            unpad_rect(&mut placed, self.base.padding);
            self.base.packed.push(placed);

            sizes.swap_remove(index);
        }

        sizes
    }
}

/// Length of the overlap of intervals `[a1, a2]` and `[b1, b2]`, or 0 when
/// they are disjoint.
fn common_interval_length(a1: i32, a2: i32, b1: i32, b2: i32) -> i64 {
    if a2 < b1 || b2 < a1 {
        return 0;
    }
    (a2.min(b2) - a1.max(b1)) as i64
}
