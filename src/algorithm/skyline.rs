//! Skyline models occupied space as a horizontal profile: an ordered run of
//! segments covering the full bin width, each recording the top of the
//! occupied area below it. Placements rest on the profile and raise it.
//!
//! The MinWaste variant additionally keeps a waste map (a guillotine free
//! list) of pockets buried beneath the surface, and consults it before the
//! surface so abandoned space can still be recovered.

use super::{guillotine::GuillotinePacker, pad_size, unpad_rect, AlgorithmBase, PackAlgorithm};
use crate::geom::{Rect, Size};
use crate::heuristic::{BinFit, Heuristic};

#[derive(Debug, Clone, Copy)]
struct SkylineNode {
    x: i32,
    y: i32,
    width: i32,
}

pub struct SkylinePacker {
    base: AlgorithmBase,
    bin_fit: BinFit,
    skyline: Vec<SkylineNode>,
    waste_map: Option<GuillotinePacker>,
}

impl SkylinePacker {
    pub fn new(width: i32, height: i32, heuristic: Heuristic) -> Self {
        let bin_fit = match heuristic.bin_fit() {
            Some(BinFit::MinWaste) => BinFit::MinWaste,
            _ => BinFit::BottomLeft,
        };
        let waste_map = match bin_fit {
            BinFit::MinWaste => Some(GuillotinePacker::new_waste_map(width, height)),
            _ => None,
        };

        let mut packer = Self {
            base: AlgorithmBase::default(),
            bin_fit,
            skyline: Vec::new(),
            waste_map,
        };
        packer.reset(width, height);
        packer
    }

    /// Lowest y at which a `width` by `height` rectangle can rest starting
    /// at segment `index`, or `None` when it would exceed the bin.
    fn test_fit(&self, index: usize, width: i32, height: i32) -> Option<i32> {
        let x = self.skyline[index].x;
        if x + width > self.base.max_width {
            return None;
        }

        let mut width_left = width;
        let mut i = index;
        let mut y = self.skyline[index].y;
        while width_left > 0 {
            y = y.max(self.skyline[i].y);
            if y + height > self.base.max_height {
                return None;
            }
            width_left -= self.skyline[i].width;
            i += 1;
            if width_left > 0 && i >= self.skyline.len() {
                return None;
            }
        }
        Some(y)
    }

    /// Area between the resting level and the segments spanned by a
    /// placement at segment `index`: the space the placement would bury.
    fn compute_waste(&self, index: usize, width: i32, y: i32) -> i64 {
        let mut wasted = 0i64;
        let rect_left = self.skyline[index].x;
        let rect_right = rect_left + width;

        let mut i = index;
        while i < self.skyline.len() && self.skyline[i].x < rect_right {
            let seg = self.skyline[i];
            if seg.x >= rect_right || seg.x + seg.width <= rect_left {
                break;
            }
            let left_side = seg.x;
            let right_side = rect_right.min(left_side + seg.width);
            wasted += (right_side - left_side) as i64 * (y - seg.y) as i64;
            i += 1;
        }

        wasted
    }

    /// Bottom-left: smallest top edge wins, narrower starting segment breaks
    /// ties. Returns (segment index, placement, score1, score2).
    fn find_bottom_left(&self, width: i32, height: i32) -> Option<(usize, Rect, i64, i64)> {
        let mut best: Option<(usize, Rect)> = None;
        let mut best_top = i64::MAX;
        let mut best_width = i64::MAX;

        for i in 0..self.skyline.len() {
            if let Some(y) = self.test_fit(i, width, height) {
                let top = (y + height) as i64;
                if top < best_top || (top == best_top && (self.skyline[i].width as i64) < best_width)
                {
                    best_top = top;
                    best_width = self.skyline[i].width as i64;
                    best = Some((i, Rect::new(self.skyline[i].x, y, width, height)));
                }
            }
            if self.base.allow_flip {
                if let Some(y) = self.test_fit(i, height, width) {
                    let top = (y + width) as i64;
                    if top < best_top
                        || (top == best_top && (self.skyline[i].width as i64) < best_width)
                    {
                        best_top = top;
                        best_width = self.skyline[i].width as i64;
                        let mut node = Rect::new(self.skyline[i].x, y, height, width);
                        node.flipped = true;
                        best = Some((i, node));
                    }
                }
            }
        }

        best.map(|(i, node)| (i, node, best_top, best_width))
    }

    /// Min-waste: least buried area wins, smaller top edge breaks ties.
    fn find_min_waste(&self, width: i32, height: i32) -> Option<(usize, Rect, i64, i64)> {
        let mut best: Option<(usize, Rect)> = None;
        let mut best_waste = i64::MAX;
        let mut best_top = i64::MAX;

        for i in 0..self.skyline.len() {
            if let Some(y) = self.test_fit(i, width, height) {
                let waste = self.compute_waste(i, width, y);
                let top = (y + height) as i64;
                if waste < best_waste || (waste == best_waste && top < best_top) {
                    best_waste = waste;
                    best_top = top;
                    best = Some((i, Rect::new(self.skyline[i].x, y, width, height)));
                }
            }
            if self.base.allow_flip {
                if let Some(y) = self.test_fit(i, height, width) {
                    let waste = self.compute_waste(i, height, y);
                    let top = (y + width) as i64;
                    if waste < best_waste || (waste == best_waste && top < best_top) {
                        best_waste = waste;
                        best_top = top;
                        let mut node = Rect::new(self.skyline[i].x, y, height, width);
                        node.flipped = true;
                        best = Some((i, node));
                    }
                }
            }
        }

        best.map(|(i, node)| (i, node, best_waste, best_top))
    }

    /// Deposits every pocket buried under the new placement into the waste
    /// map: for each spanned segment below the resting level, the area
    /// between the segment top and the placement top.
    fn add_waste(&mut self, index: usize, rect: &Rect) {
        let rect_left = rect.point.x;
        let rect_right = rect.right();

        let mut pockets: Vec<Rect> = Vec::new();
        let mut i = index;
        while i < self.skyline.len() && self.skyline[i].x < rect_right {
            let seg = self.skyline[i];
            if seg.x >= rect_right || seg.x + seg.width <= rect_left {
                break;
            }
            let left_side = seg.x.max(rect_left);
            let right_side = (seg.x + seg.width).min(rect_right);
            if seg.y < rect.point.y {
                pockets.push(Rect::new(
                    left_side,
                    seg.y,
                    right_side - left_side,
                    rect.point.y - seg.y,
                ));
            }
            i += 1;
        }

        if let Some(waste_map) = self.waste_map.as_mut() {
            for pocket in pockets {
                waste_map.add_waste(pocket);
            }
        }
    }

    /// Commits a placement found at segment `index`: records buried pockets,
    /// inserts the raised segment, trims overlapped segments and coalesces
    /// equal levels.
    fn add_level(&mut self, index: usize, rect: &Rect) {
        if self.waste_map.is_some() {
            self.add_waste(index, rect);
        }

        let node = SkylineNode {
            x: rect.point.x,
            y: rect.bottom(),
            width: rect.size.width,
        };
        self.skyline.insert(index, node);

        let i = index + 1;
        while i < self.skyline.len() {
            let prev_right = self.skyline[i - 1].x + self.skyline[i - 1].width;
            if self.skyline[i].x >= prev_right {
                break;
            }
            let shrink = prev_right - self.skyline[i].x;
            self.skyline[i].x += shrink;
            self.skyline[i].width -= shrink;
            if self.skyline[i].width <= 0 {
                self.skyline.remove(i);
            } else {
                break;
            }
        }

        self.merge_skylines();
    }

    fn merge_skylines(&mut self) {
        let mut i = 1;
        while i < self.skyline.len() {
            if self.skyline[i - 1].y == self.skyline[i].y {
                self.skyline[i - 1].width += self.skyline[i].width;
                self.skyline.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Places the best-fitting staged size into the waste map, if any size
    /// fits a buried pocket. Returns whether a placement happened.
    fn place_from_waste(&mut self, sizes: &mut Vec<Size>) -> bool {
        let mut best: Option<(usize, usize, Rect)> = None;
        let mut best_score = i64::MAX;

        {
            let Some(waste_map) = self.waste_map.as_ref() else {
                return false;
            };
            for (i, &size) in sizes.iter().enumerate() {
                let mut padded = size;
                pad_size(&mut padded, self.base.padding);
                if let Some((free_index, node, score)) =
                    waste_map.choose(padded.width, padded.height, self.base.allow_flip)
                {
                    if score < best_score {
                        best_score = score;
                        best = Some((i, free_index, node));
                    }
                }
            }
        }

        let Some((index, free_index, mut node)) = best else {
            return false;
        };

        self.waste_map
            .as_mut()
            .expect("waste map checked above")
            .place_in_free(free_index, &node);
        self.base.used_area += node.area();

        node.size.id = sizes[index].id;
        unpad_rect(&mut node, self.base.padding);
        self.base.packed.push(node);

        sizes.remove(index);
        true
    }

    /// Places the best-scoring staged size onto the skyline surface.
    /// Returns whether a placement happened.
    fn place_on_skyline(&mut self, sizes: &mut Vec<Size>) -> bool {
        let mut best: Option<(usize, usize, Rect)> = None;
        let mut best_score1 = i64::MAX;
        let mut best_score2 = i64::MAX;

        for (i, &size) in sizes.iter().enumerate() {
            let mut padded = size;
            pad_size(&mut padded, self.base.padding);

            let found = match self.bin_fit {
                BinFit::MinWaste => self.find_min_waste(padded.width, padded.height),
                _ => self.find_bottom_left(padded.width, padded.height),
            };

            if let Some((seg_index, node, score1, score2)) = found {
                if score1 < best_score1 || (score1 == best_score1 && score2 < best_score2) {
                    best_score1 = score1;
                    best_score2 = score2;
                    best = Some((i, seg_index, node));
                }
            }
        }

        let Some((index, seg_index, node)) = best else {
            return false;
        };

        self.add_level(seg_index, &node);
        self.base.used_area += node.area();

        let mut placed = node;
        placed.size.id = sizes[index].id;
        unpad_rect(&mut placed, self.base.padding);
        self.base.packed.push(placed);

        sizes.remove(index);
        true
    }
}

impl PackAlgorithm for SkylinePacker {
    fn base(&self) -> &AlgorithmBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase {
        &mut self.base
    }

    fn reset(&mut self, width: i32, height: i32) {
        self.base.reset(width, height);
        self.skyline.clear();
        self.skyline.push(SkylineNode {
            x: 0,
            y: 0,
            width,
        });
        if let Some(waste_map) = self.waste_map.as_mut() {
            waste_map.reset_empty(width, height);
        }
    }

    fn insert(&mut self, mut sizes: Vec<Size>) -> Vec<Size> {
        while !sizes.is_empty() {
            // Buried pockets are tried first so the profile only grows when
            // no abandoned space can take a rectangle.
            if self.place_from_waste(&mut sizes) {
                continue;
            }
            if !self.place_on_skyline(&mut sizes) {
                break;
            }
        }
        sizes
    }
}
