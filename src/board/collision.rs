//! Geometric hit-testing for drag gestures.
//!
//! The gesture interpreter only depends on the [`CollisionDetector`] trait. The
//! board ships [`RectIntersection`], which scores each droppable region by how
//! much it overlaps the dragged region (intersection over union) and picks the
//! best one. Ties go to the droppable registered first.
//!
//! Coordinates are terminal cells: `x` is the column, `y` the row, both 0-based.
//! They are signed because a dragged card can be pushed past the pane edge.

use crate::domain::{ContainerId, ItemId};

/// An axis-aligned rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: isize,
    pub y: isize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    #[must_use]
    pub const fn new(x: isize, y: isize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    #[allow(clippy::cast_possible_wrap)]
    const fn right(&self) -> isize {
        self.x + self.width as isize
    }

    #[allow(clippy::cast_possible_wrap)]
    const fn bottom(&self) -> isize {
        self.y + self.height as isize
    }

    /// Whether the cell at (`col`, `row`) lies inside the region.
    #[must_use]
    pub const fn contains(&self, col: isize, row: isize) -> bool {
        col >= self.x && col < self.right() && row >= self.y && row < self.bottom()
    }

    /// Area shared with `other`, zero if they do not overlap.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn intersection_area(&self, other: &Self) -> usize {
        let left = self.x.max(other.x);
        let right = self.right().min(other.right());
        let top = self.y.max(other.y);
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return 0;
        }
        (right - left) as usize * (bottom - top) as usize
    }

    /// The same region shifted by (`dx`, `dy`) cells.
    #[must_use]
    pub const fn translate(&self, dx: isize, dy: isize) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }
}

/// Raw identifier of whatever lies under a dragged card.
///
/// It either names a container drop zone directly or an item card inside one;
/// [`crate::board::resolver`] turns it into a concrete container and index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DropTargetId {
    Container(ContainerId),
    Item(ItemId),
}

/// A region that accepts drops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Droppable {
    pub target: DropTargetId,
    pub region: Region,
}

impl Droppable {
    #[must_use]
    pub const fn new(target: DropTargetId, region: Region) -> Self {
        Self { target, region }
    }
}

/// Resolves the droppable a dragged region is currently over.
pub trait CollisionDetector: std::fmt::Debug {
    /// Returns the best candidate for `dragged` among `droppables`, if any overlaps.
    fn detect(&self, dragged: &Region, droppables: &[Droppable]) -> Option<DropTargetId>;
}

/// Picks the droppable with the highest intersection-over-union ratio.
///
/// Using the ratio rather than the raw area lets a small card inside a row win
/// over the row that contains it when the dragged card sits on top of the card.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectIntersection;

impl CollisionDetector for RectIntersection {
    fn detect(&self, dragged: &Region, droppables: &[Droppable]) -> Option<DropTargetId> {
        let mut best: Option<(&Droppable, u128, u128)> = None;

        for droppable in droppables {
            let overlap = dragged.intersection_area(&droppable.region) as u128;
            if overlap == 0 {
                continue;
            }
            let union = (dragged.area() + droppable.region.area()) as u128 - overlap;

            // overlap/union > best_overlap/best_union, compared without floats
            let better = best.map_or(true, |(_, best_overlap, best_union)| {
                overlap * best_union > best_overlap * union
            });
            if better {
                best = Some((droppable, overlap, union));
            }
        }

        best.map(|(droppable, _, _)| droppable.target.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_area_handles_partial_and_disjoint_regions() {
        let a = Region::new(0, 0, 10, 3);
        assert_eq!(a.intersection_area(&Region::new(5, 1, 10, 3)), 5 * 2);
        assert_eq!(a.intersection_area(&Region::new(10, 0, 4, 3)), 0);
        assert_eq!(a.intersection_area(&Region::new(-3, -1, 4, 2)), 1);
    }

    #[test]
    fn contains_is_half_open() {
        let r = Region::new(2, 2, 3, 1);
        assert!(r.contains(2, 2));
        assert!(r.contains(4, 2));
        assert!(!r.contains(5, 2));
        assert!(!r.contains(2, 3));
    }

    #[test]
    fn card_inside_a_row_beats_the_row() {
        let row = Droppable::new(DropTargetId::Container(ContainerId::tier("S")), Region::new(0, 0, 80, 3));
        let card = Droppable::new(DropTargetId::Item(ItemId(7)), Region::new(10, 1, 16, 1));
        let dragged = Region::new(12, 1, 16, 1);

        let hit = RectIntersection.detect(&dragged, &[row, card]);
        assert_eq!(hit, Some(DropTargetId::Item(ItemId(7))));
    }

    #[test]
    fn largest_overlap_wins_between_rows() {
        let s = Droppable::new(DropTargetId::Container(ContainerId::tier("S")), Region::new(0, 0, 40, 3));
        let a = Droppable::new(DropTargetId::Container(ContainerId::tier("A")), Region::new(0, 3, 40, 3));
        let dragged = Region::new(5, 2, 16, 3);

        let hit = RectIntersection.detect(&dragged, &[s, a]);
        assert_eq!(hit, Some(DropTargetId::Container(ContainerId::tier("A"))));
    }

    #[test]
    fn ties_go_to_first_registered() {
        let s = Droppable::new(DropTargetId::Container(ContainerId::tier("S")), Region::new(0, 0, 40, 2));
        let a = Droppable::new(DropTargetId::Container(ContainerId::tier("A")), Region::new(0, 2, 40, 2));
        let dragged = Region::new(5, 1, 16, 2);

        assert_eq!(
            RectIntersection.detect(&dragged, &[s.clone(), a.clone()]),
            Some(DropTargetId::Container(ContainerId::tier("S")))
        );
        assert_eq!(
            RectIntersection.detect(&dragged, &[a, s]),
            Some(DropTargetId::Container(ContainerId::tier("A")))
        );
    }

    #[test]
    fn nothing_overlapping_means_no_candidate() {
        let s = Droppable::new(DropTargetId::Container(ContainerId::tier("S")), Region::new(0, 0, 40, 2));
        assert_eq!(RectIntersection.detect(&Region::new(0, 10, 5, 1), &[s]), None);
        assert_eq!(RectIntersection.detect(&Region::new(0, 0, 5, 1), &[]), None);
    }
}
