//! Gesture interpreter: turns a drag gesture into at most one board action.
//!
//! A gesture is a two-state machine, `Idle → Dragging → Idle`. Entering
//! `Dragging` captures a [`DragSnapshot`] (the dragged item, where it came from
//! and the card region it was picked up from). While dragging, the interpreter
//! only tracks the current candidate drop target for visual feedback; the board
//! is never touched mid-gesture. On release the candidate is resolved against the
//! partition and translated into a single [`BoardAction`]. Cancelling discards
//! the intent, leaving the board exactly as it was.
//!
//! [`PointerSensor`] sits in front of the interpreter for mouse input and only
//! activates a drag once the pointer has moved past a threshold, so a plain
//! click never starts a gesture.

use super::collision::{CollisionDetector, DropTargetId, Droppable, Region};
use super::partition::{BoardAction, Partition};
use super::resolver::{resolve_target, ResolvedTarget};
use crate::domain::{ContainerId, Item};

/// A pointer position in cell coordinates (0-based).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub col: isize,
    pub row: isize,
}

impl Point {
    #[must_use]
    pub const fn new(col: isize, row: isize) -> Self {
        Self { col, row }
    }

    /// Chebyshev distance, the number of cell steps between two points.
    #[must_use]
    pub fn distance(&self, other: &Self) -> usize {
        (self.col - other.col).unsigned_abs().max((self.row - other.row).unsigned_abs())
    }
}

/// Where the dragged item came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOrigin {
    /// The item is listed in a board container.
    Container(ContainerId),
    /// A catalog result that is not on the board yet.
    Catalog,
}

/// State captured when a gesture enters `Dragging`; fixed for the whole gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSnapshot {
    pub item: Item,
    pub origin: DragOrigin,
    /// Card region the item was picked up from.
    pub region: Region,
}

/// An in-progress drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    snapshot: DragSnapshot,
    dx: isize,
    dy: isize,
    candidate: Option<DropTargetId>,
}

impl DragSession {
    #[must_use]
    pub const fn snapshot(&self) -> &DragSnapshot {
        &self.snapshot
    }

    /// Current region of the dragged card.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.snapshot.region.translate(self.dx, self.dy)
    }

    #[must_use]
    pub const fn candidate(&self) -> Option<&DropTargetId> {
        self.candidate.as_ref()
    }
}

/// Gesture state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Drives one gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    state: GestureState,
}

impl GestureInterpreter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &GestureState {
        &self.state
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        match &self.state {
            GestureState::Dragging(session) => Some(session),
            GestureState::Idle => None,
        }
    }

    /// Enters `Dragging` with `snapshot`. Gestures do not nest: returns `false`
    /// and keeps the running gesture if one is already in progress.
    pub fn begin(&mut self, snapshot: DragSnapshot) -> bool {
        if self.is_dragging() {
            tracing::debug!("drag already in progress, ignoring new gesture");
            return false;
        }
        tracing::debug!(item = %snapshot.item.id, origin = ?snapshot.origin, "drag started");
        self.state = GestureState::Dragging(DragSession {
            snapshot,
            dx: 0,
            dy: 0,
            candidate: None,
        });
        true
    }

    /// Places the dragged card at an absolute offset from its pick-up region and
    /// recomputes the candidate. Returns `true` if the candidate changed.
    pub fn drag_to(
        &mut self,
        dx: isize,
        dy: isize,
        droppables: &[Droppable],
        detector: &dyn CollisionDetector,
    ) -> bool {
        let GestureState::Dragging(session) = &mut self.state else {
            return false;
        };
        session.dx = dx;
        session.dy = dy;
        let candidate = detector.detect(&session.region(), droppables);
        if candidate == session.candidate {
            return false;
        }
        tracing::trace!(candidate = ?candidate, "drag candidate changed");
        session.candidate = candidate;
        true
    }

    /// Shifts the dragged card by a relative amount (keyboard dragging).
    pub fn nudge(
        &mut self,
        dx: isize,
        dy: isize,
        droppables: &[Droppable],
        detector: &dyn CollisionDetector,
    ) -> bool {
        let Some((cur_dx, cur_dy)) = self.session().map(|s| (s.dx, s.dy)) else {
            return false;
        };
        self.drag_to(cur_dx + dx, cur_dy + dy, droppables, detector)
    }

    /// Ends the gesture and returns the action the drop calls for, if any.
    ///
    /// Returns `None` (and still returns to `Idle`) when nothing was under the
    /// card, the target no longer exists, or the drop would not change anything.
    pub fn release(&mut self, partition: &Partition) -> Option<BoardAction> {
        let GestureState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        let Some(candidate) = session.candidate else {
            tracing::debug!(item = %session.snapshot.item.id, "released outside any drop zone");
            return None;
        };
        let Some(target) = resolve_target(partition, &candidate) else {
            tracing::debug!(candidate = ?candidate, "drop target no longer exists");
            return None;
        };

        let action = intent_for(&session.snapshot, &target, partition);
        tracing::debug!(target = %target.container, action = ?action, "drag released");
        action
    }

    /// Discards the gesture in progress. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        if was_dragging {
            tracing::debug!("drag cancelled");
        }
        self.state = GestureState::Idle;
        was_dragging
    }
}

/// Chooses the board action for dropping `snapshot` onto `target`.
fn intent_for(snapshot: &DragSnapshot, target: &ResolvedTarget, partition: &Partition) -> Option<BoardAction> {
    let item = &snapshot.item;

    let located;
    let source = match &snapshot.origin {
        DragOrigin::Catalog => {
            // a result that is already on the board moves like one of its cards
            if let Some((container, _)) = partition.locate(item.id) {
                located = container;
                &located
            } else {
                return Some(match &target.container {
                    ContainerId::Tier(tier) => BoardAction::AssignToTier {
                        item: item.clone(),
                        tier: tier.clone(),
                    },
                    ContainerId::Pool => BoardAction::AddToPool(item.clone()),
                });
            }
        }
        DragOrigin::Container(source) => source,
    };

    let current = partition
        .items(source)
        .and_then(|items| items.iter().position(|i| i.id == item.id))?;

    if source == &target.container {
        let len = partition.items(source).map_or(0, <[Item]>::len);
        let to = target.index.unwrap_or_else(|| len.saturating_sub(1));
        return (to != current).then(|| BoardAction::Reorder {
            container: source.clone(),
            from: current,
            to,
        });
    }

    match (source, &target.container) {
        (ContainerId::Pool, ContainerId::Tier(tier)) => Some(BoardAction::AssignToTier {
            item: item.clone(),
            tier: tier.clone(),
        }),
        (ContainerId::Tier(_), _) => {
            let end = partition.items(&target.container).map_or(0, <[Item]>::len);
            Some(BoardAction::MoveAcross {
                item: item.id,
                source: source.clone(),
                target: target.container.clone(),
                index: target.index.unwrap_or(end),
            })
        }
        (ContainerId::Pool, ContainerId::Pool) => None,
    }
}

/// Activation filter for pointer input.
///
/// A press over a card arms the sensor; the drag only starts once the pointer
/// has moved `threshold` cells away from the press point.
#[derive(Debug, Clone)]
pub struct PointerSensor {
    threshold: usize,
    armed: Option<(Point, DragSnapshot)>,
}

/// What a pointer release meant to the sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorRelease {
    /// The pointer never left the threshold: treat as a click on this card.
    Click(DragSnapshot),
    /// Nothing was armed.
    Nothing,
}

impl PointerSensor {
    #[must_use]
    pub const fn new(threshold: usize) -> Self {
        Self {
            threshold,
            armed: None,
        }
    }

    /// Records a press. `card` is the draggable under the pointer, if any.
    pub fn press(&mut self, at: Point, card: Option<DragSnapshot>) {
        self.armed = card.map(|snapshot| (at, snapshot));
    }

    /// Reports pointer movement. Returns the snapshot and press point once the
    /// activation threshold is crossed; the sensor disarms at that moment.
    pub fn moved(&mut self, at: Point) -> Option<(DragSnapshot, Point)> {
        let (origin, _) = self.armed.as_ref()?;
        if origin.distance(&at) < self.threshold.max(1) {
            return None;
        }
        self.armed.take().map(|(origin, snapshot)| (snapshot, origin))
    }

    /// Reports a release.
    pub fn release(&mut self) -> SensorRelease {
        self.armed
            .take()
            .map_or(SensorRelease::Nothing, |(_, snapshot)| SensorRelease::Click(snapshot))
    }

    pub fn reset(&mut self) {
        self.armed = None;
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::collision::RectIntersection;
    use crate::board::Tier;
    use crate::domain::{ItemId, TierId};

    fn item(id: u64) -> Item {
        Item::new(id, format!("Movie {id}"), "img")
    }

    fn partition() -> Partition {
        let mut p = Partition::new(vec![Tier::new("S", "S", "#f00"), Tier::new("A", "A", "#0f0")]);
        p.add_to_pool(item(1));
        p.add_to_pool(item(2));
        for id in [10, 11, 12] {
            p.assign_to_tier(item(id), &TierId::from("S"));
        }
        p.assign_to_tier(item(20), &TierId::from("A"));
        p
    }

    fn zones() -> Vec<Droppable> {
        vec![
            Droppable::new(DropTargetId::Container(ContainerId::tier("S")), Region::new(0, 0, 80, 3)),
            Droppable::new(DropTargetId::Item(ItemId(10)), Region::new(8, 1, 16, 1)),
            Droppable::new(DropTargetId::Item(ItemId(11)), Region::new(26, 1, 16, 1)),
            Droppable::new(DropTargetId::Item(ItemId(12)), Region::new(44, 1, 16, 1)),
            Droppable::new(DropTargetId::Container(ContainerId::tier("A")), Region::new(0, 3, 80, 3)),
            Droppable::new(DropTargetId::Item(ItemId(20)), Region::new(8, 4, 16, 1)),
            Droppable::new(DropTargetId::Container(ContainerId::Pool), Region::new(0, 7, 80, 3)),
        ]
    }

    fn snapshot(id: u64, origin: DragOrigin, region: Region) -> DragSnapshot {
        DragSnapshot {
            item: item(id),
            origin,
            region,
        }
    }

    fn drop_at(origin: DragOrigin, id: u64, from: Region, to: Region) -> Option<BoardAction> {
        drop_among(&zones(), origin, id, from, to)
    }

    fn drop_among(zones: &[Droppable], origin: DragOrigin, id: u64, from: Region, to: Region) -> Option<BoardAction> {
        let mut g = GestureInterpreter::new();
        assert!(g.begin(snapshot(id, origin, from)));
        g.drag_to(to.x - from.x, to.y - from.y, zones, &RectIntersection);
        g.release(&partition())
    }

    #[test]
    fn pool_item_onto_tier_assigns() {
        let action = drop_at(
            DragOrigin::Container(ContainerId::Pool),
            1,
            Region::new(8, 8, 16, 1),
            Region::new(62, 4, 16, 1),
        );
        assert_eq!(action, Some(BoardAction::AssignToTier { item: item(1), tier: TierId::from("A") }));
    }

    #[test]
    fn catalog_item_onto_tier_card_assigns_to_that_tier() {
        let action = drop_at(DragOrigin::Catalog, 99, Region::new(8, 12, 16, 1), Region::new(9, 4, 16, 1));
        assert_eq!(action, Some(BoardAction::AssignToTier { item: item(99), tier: TierId::from("A") }));
    }

    #[test]
    fn catalog_item_onto_pool_adds_it() {
        let action = drop_at(DragOrigin::Catalog, 99, Region::new(8, 12, 16, 1), Region::new(8, 8, 16, 1));
        assert_eq!(action, Some(BoardAction::AddToPool(item(99))));
    }

    #[test]
    fn catalog_drag_of_a_ranked_item_onto_pool_unranks_it() {
        let action = drop_at(DragOrigin::Catalog, 10, Region::new(8, 12, 16, 1), Region::new(8, 8, 16, 1));
        assert_eq!(
            action,
            Some(BoardAction::MoveAcross {
                item: ItemId(10),
                source: ContainerId::tier("S"),
                target: ContainerId::Pool,
                index: 2,
            })
        );
    }

    #[test]
    fn catalog_drag_of_a_ranked_item_onto_another_tier_moves_it() {
        let action = drop_at(DragOrigin::Catalog, 10, Region::new(8, 12, 16, 1), Region::new(62, 4, 16, 1));
        assert_eq!(
            action,
            Some(BoardAction::MoveAcross {
                item: ItemId(10),
                source: ContainerId::tier("S"),
                target: ContainerId::tier("A"),
                index: 1,
            })
        );

        let mut p = partition();
        assert!(p.apply(&action.unwrap()));
        assert_eq!(p.locate(ItemId(10)), Some((ContainerId::tier("A"), 1)));
    }

    #[test]
    fn catalog_drag_of_a_pooled_item_onto_its_own_pool_does_not_duplicate_it() {
        let action = drop_at(DragOrigin::Catalog, 2, Region::new(8, 12, 16, 1), Region::new(60, 8, 16, 1));
        assert_eq!(action, None);
    }

    #[test]
    fn pool_card_onto_pool_sibling_reorders_the_pool() {
        let mut zones = zones();
        zones.push(Droppable::new(DropTargetId::Item(ItemId(1)), Region::new(8, 8, 16, 1)));
        zones.push(Droppable::new(DropTargetId::Item(ItemId(2)), Region::new(26, 8, 16, 1)));

        let action = drop_among(
            &zones,
            DragOrigin::Container(ContainerId::Pool),
            1,
            Region::new(8, 8, 16, 1),
            Region::new(26, 8, 16, 1),
        );
        assert_eq!(action, Some(BoardAction::Reorder { container: ContainerId::Pool, from: 0, to: 1 }));

        let mut p = partition();
        assert!(p.apply(&action.unwrap()));
        let pool: Vec<ItemId> = p.pool().iter().map(|i| i.id).collect();
        assert_eq!(pool, vec![ItemId(2), ItemId(1)]);
    }

    #[test]
    fn same_tier_sibling_reorders() {
        let action = drop_at(
            DragOrigin::Container(ContainerId::tier("S")),
            10,
            Region::new(8, 1, 16, 1),
            Region::new(45, 1, 16, 1),
        );
        assert_eq!(
            action,
            Some(BoardAction::Reorder { container: ContainerId::tier("S"), from: 0, to: 2 })
        );
    }

    #[test]
    fn same_tier_empty_area_moves_to_end() {
        let action = drop_at(
            DragOrigin::Container(ContainerId::tier("S")),
            10,
            Region::new(8, 1, 16, 1),
            Region::new(62, 0, 16, 1),
        );
        assert_eq!(
            action,
            Some(BoardAction::Reorder { container: ContainerId::tier("S"), from: 0, to: 2 })
        );
    }

    #[test]
    fn dropping_on_itself_does_nothing() {
        let action = drop_at(
            DragOrigin::Container(ContainerId::tier("S")),
            11,
            Region::new(26, 1, 16, 1),
            Region::new(27, 1, 16, 1),
        );
        assert_eq!(action, None);
    }

    #[test]
    fn cross_tier_onto_sibling_uses_sibling_index() {
        let action = drop_at(
            DragOrigin::Container(ContainerId::tier("S")),
            11,
            Region::new(26, 1, 16, 1),
            Region::new(8, 4, 16, 1),
        );
        assert_eq!(
            action,
            Some(BoardAction::MoveAcross {
                item: ItemId(11),
                source: ContainerId::tier("S"),
                target: ContainerId::tier("A"),
                index: 0,
            })
        );
    }

    #[test]
    fn cross_tier_onto_row_appends() {
        let action = drop_at(
            DragOrigin::Container(ContainerId::tier("A")),
            20,
            Region::new(8, 4, 16, 1),
            Region::new(62, 1, 16, 1),
        );
        assert_eq!(
            action,
            Some(BoardAction::MoveAcross {
                item: ItemId(20),
                source: ContainerId::tier("A"),
                target: ContainerId::tier("S"),
                index: 3,
            })
        );
    }

    #[test]
    fn tier_item_onto_pool_unranks_to_end() {
        let action = drop_at(
            DragOrigin::Container(ContainerId::tier("A")),
            20,
            Region::new(8, 4, 16, 1),
            Region::new(40, 8, 16, 1),
        );
        assert_eq!(
            action,
            Some(BoardAction::MoveAcross {
                item: ItemId(20),
                source: ContainerId::tier("A"),
                target: ContainerId::Pool,
                index: 2,
            })
        );
    }

    #[test]
    fn release_outside_every_zone_is_a_no_op() {
        let action = drop_at(
            DragOrigin::Container(ContainerId::Pool),
            1,
            Region::new(8, 8, 16, 1),
            Region::new(8, 30, 16, 1),
        );
        assert_eq!(action, None);
    }

    #[test]
    fn stale_origin_yields_nothing() {
        let action = drop_at(
            DragOrigin::Container(ContainerId::tier("A")),
            10,
            Region::new(8, 1, 16, 1),
            Region::new(40, 8, 16, 1),
        );
        assert_eq!(action, None);
    }

    #[test]
    fn gestures_do_not_nest_and_cancel_discards() {
        let mut g = GestureInterpreter::new();
        assert!(g.begin(snapshot(1, DragOrigin::Container(ContainerId::Pool), Region::new(0, 8, 16, 1))));
        assert!(!g.begin(snapshot(2, DragOrigin::Catalog, Region::new(0, 8, 16, 1))));
        assert_eq!(g.session().map(|s| s.snapshot().item.id), Some(ItemId(1)));

        g.drag_to(0, -8, &zones(), &RectIntersection);
        assert!(g.session().and_then(DragSession::candidate).is_some());
        assert!(g.cancel());
        assert!(!g.is_dragging());
        assert_eq!(g.release(&partition()), None);
    }

    #[test]
    fn nudge_moves_relative_to_current_offset() {
        let mut g = GestureInterpreter::new();
        g.begin(snapshot(1, DragOrigin::Container(ContainerId::Pool), Region::new(8, 8, 16, 1)));
        g.nudge(0, -4, &zones(), &RectIntersection);
        g.nudge(0, 0, &zones(), &RectIntersection);
        assert_eq!(g.session().map(DragSession::region), Some(Region::new(8, 4, 16, 1)));
        assert_eq!(
            g.session().and_then(DragSession::candidate),
            Some(&DropTargetId::Item(ItemId(20)))
        );
    }

    #[test]
    fn sensor_requires_threshold_before_activation() {
        let mut sensor = PointerSensor::new(2);
        let card = snapshot(1, DragOrigin::Container(ContainerId::Pool), Region::new(8, 8, 16, 1));
        sensor.press(Point::new(10, 8), Some(card.clone()));

        assert!(sensor.moved(Point::new(11, 8)).is_none());
        let (started, origin) = sensor.moved(Point::new(12, 9)).expect("activation");
        assert_eq!(started, card);
        assert_eq!(origin, Point::new(10, 8));
        assert!(!sensor.is_armed());
        assert_eq!(sensor.release(), SensorRelease::Nothing);
    }

    #[test]
    fn sensor_reports_clicks_below_threshold() {
        let mut sensor = PointerSensor::new(1);
        let card = snapshot(1, DragOrigin::Catalog, Region::new(0, 0, 16, 1));
        sensor.press(Point::new(3, 0), Some(card.clone()));
        assert_eq!(sensor.release(), SensorRelease::Click(card));

        sensor.press(Point::new(3, 0), None);
        assert!(sensor.moved(Point::new(9, 9)).is_none());
    }
}
