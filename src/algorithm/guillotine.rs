//! Guillotine keeps a list of pairwise *disjoint* free rectangles. Each
//! placement removes the chosen free rectangle and splits the L-shaped
//! leftover into exactly two children with a single edge-to-edge cut.
//!
//! The same type doubles as the waste map of the Skyline MinWaste variant,
//! recording pockets of space abandoned beneath the skyline surface.

use super::{pad_size, unpad_rect, AlgorithmBase, PackAlgorithm};
use crate::geom::{Rect, Size};
use crate::heuristic::{BinFit, Heuristic, SplitMethod};

pub struct GuillotinePacker {
    base: AlgorithmBase,
    bin_fit: BinFit,
    split_method: SplitMethod,
    /// When enabled, free rectangles sharing a full edge are coalesced after
    /// each placement. The pass catches pairs only, not triples; callers
    /// needing complete merging should repack.
    pub merge: bool,
    free: Vec<Rect>,
}

impl GuillotinePacker {
    pub fn new(width: i32, height: i32, heuristic: Heuristic) -> Self {
        let bin_fit = match heuristic.bin_fit() {
            Some(
                fit @ (BinFit::BestShortSideFit
                | BinFit::BestLongSideFit
                | BinFit::BestAreaFit
                | BinFit::WorstAreaFit
                | BinFit::WorstShortSideFit
                | BinFit::WorstLongSideFit),
            ) => fit,
            _ => BinFit::BestAreaFit,
        };
        let split_method = heuristic
            .split_method()
            .unwrap_or(SplitMethod::ShorterLeftoverAxis);

        let mut packer = Self {
            base: AlgorithmBase::default(),
            bin_fit,
            split_method,
            merge: true,
            free: Vec::new(),
        };
        packer.reset(width, height);
        packer
    }

    /// A guillotine instance starting with no free space, used as the
    /// Skyline waste map. Free rectangles arrive through [`Self::add_waste`].
    pub(crate) fn new_waste_map(width: i32, height: i32) -> Self {
        let mut packer = Self::new(width, height, Heuristic::GUILLOTINE_BAF);
        packer.free.clear();
        packer
    }

    /// Resets and leaves the free list empty (waste-map use).
    pub(crate) fn reset_empty(&mut self, width: i32, height: i32) {
        self.reset(width, height);
        self.free.clear();
    }

    /// Records a pocket of abandoned space. Degenerate rectangles are
    /// dropped.
    pub(crate) fn add_waste(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.free.push(rect);
        }
    }

    fn score(&self, width: i32, height: i32, free: &Rect) -> i64 {
        let area_fit = free.size.area() - width as i64 * height as i64;
        let leftover_h = (free.size.width - width).abs() as i64;
        let leftover_v = (free.size.height - height).abs() as i64;
        let short_fit = leftover_h.min(leftover_v);
        let long_fit = leftover_h.max(leftover_v);

        match self.bin_fit {
            BinFit::BestAreaFit => area_fit,
            BinFit::BestShortSideFit => short_fit,
            BinFit::BestLongSideFit => long_fit,
            BinFit::WorstAreaFit => -area_fit,
            BinFit::WorstShortSideFit => -short_fit,
            BinFit::WorstLongSideFit => -long_fit,
            _ => area_fit,
        }
    }

    /// Finds the best free rectangle for a single size, trying both
    /// orientations. A perfect fit short-circuits with `i64::MIN`.
    pub(crate) fn choose(
        &self,
        width: i32,
        height: i32,
        allow_flip: bool,
    ) -> Option<(usize, Rect, i64)> {
        let mut best: Option<(usize, Rect)> = None;
        let mut best_score = i64::MAX;

        for (i, free) in self.free.iter().enumerate() {
            if width == free.size.width && height == free.size.height {
                return Some((i, Rect::new(free.point.x, free.point.y, width, height), i64::MIN));
            }
            if allow_flip && height == free.size.width && width == free.size.height {
                let mut node = Rect::new(free.point.x, free.point.y, height, width);
                node.flipped = true;
                return Some((i, node, i64::MIN));
            }
            if width <= free.size.width && height <= free.size.height {
                let score = self.score(width, height, free);
                if score < best_score {
                    best_score = score;
                    best = Some((i, Rect::new(free.point.x, free.point.y, width, height)));
                }
            }
            if allow_flip && height <= free.size.width && width <= free.size.height {
                let score = self.score(height, width, free);
                if score < best_score {
                    best_score = score;
                    let mut node = Rect::new(free.point.x, free.point.y, height, width);
                    node.flipped = true;
                    best = Some((i, node));
                }
            }
        }

        best.map(|(i, node)| (i, node, best_score))
    }

    /// Removes the free rectangle at `index` and splits its leftover space
    /// around `placed` into two disjoint children.
    pub(crate) fn place_in_free(&mut self, index: usize, placed: &Rect) {
        let free = self.free.remove(index);
        self.split_by_heuristic(&free, placed);
        if self.merge {
            self.merge_free_list();
        }
    }

    fn split_by_heuristic(&mut self, free: &Rect, placed: &Rect) {
        let leftover_w = free.size.width - placed.size.width;
        let leftover_h = free.size.height - placed.size.height;

        let horizontal = match self.split_method {
            SplitMethod::ShorterLeftoverAxis => leftover_w <= leftover_h,
            SplitMethod::LongerLeftoverAxis => leftover_w > leftover_h,
            SplitMethod::MinimizeArea => {
                placed.size.width as i64 * leftover_h as i64
                    > leftover_w as i64 * placed.size.height as i64
            }
            SplitMethod::MaximizeArea => {
                placed.size.width as i64 * leftover_h as i64
                    <= leftover_w as i64 * placed.size.height as i64
            }
            SplitMethod::ShorterAxis => free.size.width <= free.size.height,
            SplitMethod::LongerAxis => free.size.width > free.size.height,
        };

        self.split_along_axis(free, placed, horizontal);
    }

    fn split_along_axis(&mut self, free: &Rect, placed: &Rect, horizontal: bool) {
        let mut bottom = Rect::new(
            free.point.x,
            free.point.y + placed.size.height,
            0,
            free.size.height - placed.size.height,
        );
        let mut right = Rect::new(
            free.point.x + placed.size.width,
            free.point.y,
            free.size.width - placed.size.width,
            0,
        );

        if horizontal {
            bottom.size.width = free.size.width;
            right.size.height = placed.size.height;
        } else {
            bottom.size.width = placed.size.width;
            right.size.height = free.size.height;
        }

        if !bottom.is_empty() {
            self.free.push(bottom);
        }
        if !right.is_empty() {
            self.free.push(right);
        }
    }

    /// Pairwise pass coalescing free rectangles that share a full edge.
    fn merge_free_list(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let mut j = i + 1;
            while j < self.free.len() {
                let a = self.free[i];
                let b = self.free[j];

                if a.size.width == b.size.width && a.point.x == b.point.x {
                    if a.point.y == b.bottom() {
                        self.free[i].point.y -= b.size.height;
                        self.free[i].size.height += b.size.height;
                        self.free.remove(j);
                        continue;
                    } else if a.bottom() == b.point.y {
                        self.free[i].size.height += b.size.height;
                        self.free.remove(j);
                        continue;
                    }
                } else if a.size.height == b.size.height && a.point.y == b.point.y {
                    if a.point.x == b.right() {
                        self.free[i].point.x -= b.size.width;
                        self.free[i].size.width += b.size.width;
                        self.free.remove(j);
                        continue;
                    } else if a.right() == b.point.x {
                        self.free[i].size.width += b.size.width;
                        self.free.remove(j);
                        continue;
                    }
                }

                j += 1;
            }
            i += 1;
        }
    }

    /// Number of free rectangles currently tracked.
    pub fn free_list_len(&self) -> usize {
        self.free.len()
    }
}

impl PackAlgorithm for GuillotinePacker {
    fn base(&self) -> &AlgorithmBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase {
        &mut self.base
    }

    fn reset(&mut self, width: i32, height: i32) {
        self.base.reset(width, height);
        self.free.clear();
        self.free.push(Rect::new(0, 0, width, height));
    }

    fn insert(&mut self, mut sizes: Vec<Size>) -> Vec<Size> {
        while !sizes.is_empty() {
            let mut best_free = 0usize;
            let mut best_size = 0usize;
            let mut best_flipped = false;
            let mut best_score = i64::MAX;

            'search: for (i, free) in self.free.iter().enumerate() {
                for (j, &size) in sizes.iter().enumerate() {
                    let mut padded = size;
                    pad_size(&mut padded, self.base.padding);

                    // A perfect match is picked instantly.
                    if padded.width == free.size.width && padded.height == free.size.height {
                        best_free = i;
                        best_size = j;
                        best_flipped = false;
                        best_score = i64::MIN;
                        break 'search;
                    }
                    if self.base.allow_flip
                        && padded.height == free.size.width
                        && padded.width == free.size.height
                    {
                        best_free = i;
                        best_size = j;
                        best_flipped = true;
                        best_score = i64::MIN;
                        break 'search;
                    }
                    if padded.width <= free.size.width && padded.height <= free.size.height {
                        let score = self.score(padded.width, padded.height, free);
                        if score < best_score {
                            best_free = i;
                            best_size = j;
                            best_flipped = false;
                            best_score = score;
                        }
                    }
                    if self.base.allow_flip
                        && padded.height <= free.size.width
                        && padded.width <= free.size.height
                    {
                        let score = self.score(padded.height, padded.width, free);
                        if score < best_score {
                            best_free = i;
                            best_size = j;
                            best_flipped = true;
                            best_score = score;
                        }
                    }
                }
            }

            if best_score == i64::MAX {
                break;
            }

            let mut padded = sizes[best_size];
            pad_size(&mut padded, self.base.padding);

            let mut node = Rect {
                point: self.free[best_free].point,
                size: padded,
                flipped: false,
            };
            if best_flipped {
                std::mem::swap(&mut node.size.width, &mut node.size.height);
                node.flipped = true;
            }

            self.place_in_free(best_free, &node);
            self.base.used_area += node.area();

            let mut placed = node;
            unpad_rect(&mut placed, self.base.padding);
            self.base.packed.push(placed);

            sizes.remove(best_size);
        }

        sizes
    }
}
