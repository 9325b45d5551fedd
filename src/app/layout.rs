//! Board geometry in terminal cells.
//!
//! The same [`BoardLayout`] drives rendering, pointer hit-testing and the
//! droppable list handed to the collision detector, so what the user sees is
//! exactly what a drag can hit.
//!
//! ```text
//! row 0      header
//! row 1      border
//! rows 2-4   catalog bar (search box / category)
//! row 5      results strip       [label][card][card]...
//! row 6      border
//! rows 7..   one band per tier   [label][card][card]...   (wraps)
//!            border
//!            pool band
//! rows-2     border
//! rows-1     footer
//! ```

use crate::board::{DragOrigin, DragSnapshot, DropTargetId, Droppable, Partition, Point, Region};
use crate::domain::{ContainerId, Item};

pub const LABEL_WIDTH: usize = 8;
pub const CARD_WIDTH: usize = 16;
pub const CARD_GAP: usize = 2;
/// Horizontal distance between two neighbouring cards.
pub const CARD_STEP: usize = CARD_WIDTH + CARD_GAP;

pub const HEADER_ROW: usize = 0;
pub const CATALOG_BAR_ROW: usize = 2;
pub const RESULTS_ROW: usize = 5;
pub const BOARD_TOP: usize = 7;
const FOOTER_LINES: usize = 2;
/// Narrowest pane that still shows one card per band.
pub const MIN_COLS: usize = LABEL_WIDTH + CARD_WIDTH;

/// Shortest pane that gives every tier and the pool one line each.
#[must_use]
pub const fn min_rows(tier_count: usize) -> usize {
    // tiers, separator, pool
    BOARD_TOP + tier_count + 2 + FOOTER_LINES
}

/// A row of cards the selection cursor can sit on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Results,
    Container(ContainerId),
}

/// One visible card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSlot {
    pub item: Item,
    pub origin: DragOrigin,
    /// Index in the results list or in the container sequence.
    pub index: usize,
    pub region: Region,
}

impl CardSlot {
    /// Snapshot taken when this card is picked up.
    #[must_use]
    pub fn snapshot(&self) -> DragSnapshot {
        DragSnapshot {
            item: self.item.clone(),
            origin: self.origin.clone(),
            region: self.region,
        }
    }
}

/// A container drop zone with its visible cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    pub container: ContainerId,
    pub label: String,
    /// Tier color; the pool has none.
    pub color: Option<String>,
    pub region: Region,
    pub cards: Vec<CardSlot>,
    /// Cards that did not fit on screen.
    pub hidden: usize,
}

/// Cell geometry of the board view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    pub results: Vec<CardSlot>,
    /// Index of the first visible result.
    pub results_offset: usize,
    pub results_total: usize,
    /// Tier bands in tier order, then the pool band.
    pub bands: Vec<Band>,
    pub cards_per_row: usize,
    pub rows: usize,
    pub cols: usize,
}

#[allow(clippy::cast_possible_wrap)]
const fn cell(value: usize) -> isize {
    value as isize
}

fn card_region(index_in_band: usize, top: usize, per_row: usize) -> Region {
    let col = LABEL_WIDTH + (index_in_band % per_row) * CARD_STEP;
    let row = top + index_in_band / per_row;
    Region::new(cell(col), cell(row), CARD_WIDTH, 1)
}

/// Shrinks the tallest containers first until everything fits in `available` lines.
fn fit_lines(desired: &mut [usize], available: usize) {
    while desired.iter().sum::<usize>() > available {
        let Some(tallest) = desired
            .iter_mut()
            .filter(|lines| **lines > 1)
            .max_by_key(|lines| **lines)
        else {
            break;
        };
        *tallest -= 1;
    }
}

impl BoardLayout {
    /// Lays out the board for a `rows` x `cols` pane.
    ///
    /// `result_cursor` is the selected result; the strip pages so that it stays
    /// visible.
    #[must_use]
    pub fn compute(partition: &Partition, results: &[Item], result_cursor: usize, rows: usize, cols: usize) -> Self {
        let per_row = (cols.saturating_sub(LABEL_WIDTH) / CARD_STEP).max(1);

        let results_offset = if results.is_empty() {
            0
        } else {
            (result_cursor.min(results.len() - 1) / per_row) * per_row
        };
        let result_slots = results
            .iter()
            .enumerate()
            .skip(results_offset)
            .take(per_row)
            .map(|(index, item)| CardSlot {
                item: item.clone(),
                origin: partition
                    .locate(item.id)
                    .map_or(DragOrigin::Catalog, |(container, _)| DragOrigin::Container(container)),
                index,
                region: card_region(index - results_offset, RESULTS_ROW, per_row),
            })
            .collect();

        let mut containers: Vec<(ContainerId, String, Option<String>, &[Item])> = partition
            .tiers()
            .iter()
            .map(|tier| {
                (
                    ContainerId::Tier(tier.id().clone()),
                    tier.label().to_string(),
                    Some(tier.color().to_string()),
                    tier.items(),
                )
            })
            .collect();
        containers.push((ContainerId::Pool, "Pool".to_string(), None, partition.pool()));

        let mut lines: Vec<usize> = containers
            .iter()
            .map(|(_, _, _, items)| ((items.len() + per_row - 1) / per_row).max(1))
            .collect();
        // one separator row between the last tier and the pool
        let available = rows.saturating_sub(BOARD_TOP + 1 + FOOTER_LINES);
        fit_lines(&mut lines, available);

        let mut top = BOARD_TOP;
        let last = containers.len() - 1;
        let bands = containers
            .into_iter()
            .zip(lines)
            .enumerate()
            .map(|(position, ((container, label, color, items), lines))| {
                if position == last {
                    top += 1;
                }
                let band_top = top;
                let visible = items.len().min(lines * per_row);
                let origin = DragOrigin::Container(container.clone());
                let cards = items
                    .iter()
                    .take(visible)
                    .enumerate()
                    .map(|(index, item)| CardSlot {
                        item: item.clone(),
                        origin: origin.clone(),
                        index,
                        region: card_region(index, band_top, per_row),
                    })
                    .collect();
                let band = Band {
                    container,
                    label,
                    color,
                    region: Region::new(0, cell(band_top), cols, lines),
                    cards,
                    hidden: items.len() - visible,
                };
                top += lines;
                band
            })
            .collect();

        Self {
            results: result_slots,
            results_offset,
            results_total: results.len(),
            bands,
            cards_per_row: per_row,
            rows,
            cols,
        }
    }

    /// Drop zones in registration order: each band, followed by its cards.
    #[must_use]
    pub fn droppables(&self) -> Vec<Droppable> {
        self.bands
            .iter()
            .flat_map(|band| {
                std::iter::once(Droppable::new(DropTargetId::Container(band.container.clone()), band.region)).chain(
                    band.cards
                        .iter()
                        .map(|card| Droppable::new(DropTargetId::Item(card.item.id), card.region)),
                )
            })
            .collect()
    }

    /// The card under a pointer position.
    #[must_use]
    pub fn card_at(&self, point: Point) -> Option<&CardSlot> {
        self.results
            .iter()
            .chain(self.bands.iter().flat_map(|band| band.cards.iter()))
            .find(|card| card.region.contains(point.col, point.row))
    }

    /// The visible card at `index` of a focus row.
    #[must_use]
    pub fn slot(&self, focus: &Focus, index: usize) -> Option<&CardSlot> {
        match focus {
            Focus::Results => self.results.iter().find(|card| card.index == index),
            Focus::Container(container) => self
                .band(container)
                .and_then(|band| band.cards.get(index)),
        }
    }

    #[must_use]
    pub fn band(&self, container: &ContainerId) -> Option<&Band> {
        self.bands.iter().find(|band| &band.container == container)
    }

    /// Whether every band got a line inside the pane.
    #[must_use]
    pub fn fits(&self) -> bool {
        let tiers = self.bands.len().saturating_sub(1);
        self.rows >= min_rows(tiers) && self.cols >= MIN_COLS
    }

    /// Row of the footer line.
    #[must_use]
    pub const fn footer_row(&self) -> usize {
        self.rows.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{RectIntersection, CollisionDetector, Tier};
    use crate::domain::{ItemId, TierId};

    fn item(id: u64) -> Item {
        Item::new(id, format!("Movie {id}"), "img")
    }

    fn partition() -> Partition {
        let mut p = Partition::new(vec![Tier::new("S", "S", "#ef4444"), Tier::new("A", "A", "#f97316")]);
        for id in 1..=5 {
            p.assign_to_tier(item(id), &TierId::from("S"));
        }
        p.add_to_pool(item(9));
        p
    }

    #[test]
    fn cards_wrap_inside_their_band() {
        // (80 - 8) / 18 = 4 cards per row
        let layout = BoardLayout::compute(&partition(), &[], 0, 40, 80);
        assert_eq!(layout.cards_per_row, 4);

        let s = layout.band(&ContainerId::tier("S")).unwrap();
        assert_eq!(s.region, Region::new(0, 7, 80, 2));
        assert_eq!(s.cards[4].region, Region::new(8, 8, 16, 1));

        let a = layout.band(&ContainerId::tier("A")).unwrap();
        assert_eq!(a.region.y, 9);

        let pool = layout.band(&ContainerId::Pool).unwrap();
        assert_eq!(pool.region.y, 11);
        assert_eq!(pool.cards[0].origin, DragOrigin::Container(ContainerId::Pool));
    }

    #[test]
    fn small_panes_hide_overflowing_cards() {
        // available lines: 13 - 7 - 1 - 2 = 3 → one line per container
        let layout = BoardLayout::compute(&partition(), &[], 0, 13, 80);
        let s = layout.band(&ContainerId::tier("S")).unwrap();
        assert_eq!(s.region.height, 1);
        assert_eq!(s.cards.len(), 4);
        assert_eq!(s.hidden, 1);
    }

    #[test]
    fn short_panes_do_not_fit_every_tier() {
        let tiers = crate::default_tiers();
        assert_eq!(min_rows(tiers.len()), 16);

        let partition = Partition::new(tiers);
        let short = BoardLayout::compute(&partition, &[], 0, 12, 80);
        assert!(!short.fits());

        let layout = BoardLayout::compute(&partition, &[], 0, 16, 80);
        assert!(layout.fits());
        let pool = layout.band(&ContainerId::Pool).unwrap();
        assert_eq!(pool.region.y, 13);
        assert!(layout.bands.iter().all(|band| band.region.y < 16 - 2));
        assert!(!BoardLayout::compute(&partition, &[], 0, 40, MIN_COLS - 1).fits());
    }

    #[test]
    fn results_page_to_keep_the_cursor_visible() {
        let results: Vec<Item> = (100..110).map(item).collect();
        let layout = BoardLayout::compute(&partition(), &results, 5, 40, 80);
        assert_eq!(layout.results_offset, 4);
        assert_eq!(layout.results.len(), 4);
        assert_eq!(layout.results[1].index, 5);
        assert_eq!(layout.slot(&Focus::Results, 5).map(|c| c.item.id), Some(ItemId(105)));
        assert_eq!(layout.results[0].region, Region::new(8, 5, 16, 1));
    }

    #[test]
    fn results_already_on_the_board_are_dragged_from_their_container() {
        let results = vec![item(3), item(9), item(100)];
        let layout = BoardLayout::compute(&partition(), &results, 0, 40, 80);
        assert_eq!(layout.results[0].origin, DragOrigin::Container(ContainerId::tier("S")));
        assert_eq!(layout.results[1].origin, DragOrigin::Container(ContainerId::Pool));
        assert_eq!(layout.results[2].origin, DragOrigin::Catalog);
    }

    #[test]
    fn pointer_hits_cards_not_gaps() {
        let layout = BoardLayout::compute(&partition(), &[], 0, 40, 80);
        assert_eq!(layout.card_at(Point::new(10, 7)).map(|c| c.item.id), Some(ItemId(1)));
        assert_eq!(layout.card_at(Point::new(25, 7)), None);
        assert_eq!(layout.card_at(Point::new(2, 7)), None);
    }

    #[test]
    fn droppables_put_each_band_before_its_cards() {
        let layout = BoardLayout::compute(&partition(), &[], 0, 40, 80);
        let zones = layout.droppables();
        assert_eq!(zones[0].target, DropTargetId::Container(ContainerId::tier("S")));
        assert_eq!(zones[1].target, DropTargetId::Item(ItemId(1)));
        assert_eq!(zones.len(), 3 + 6);

        // a card dragged over the empty A band lands on A
        let hit = RectIntersection.detect(&Region::new(30, 9, 16, 1), &zones);
        assert_eq!(hit, Some(DropTargetId::Container(ContainerId::tier("A"))));
    }
}
