//! The partition: one Pool plus a fixed, ordered list of Tiers.
//!
//! Every mutation is a total function over the current partition. Arguments that
//! reference a container, item or index that no longer exists are treated as
//! no-ops, because gesture intents may be replayed against a newer state than the
//! one they were captured from.
//!
//! Three invariants hold after every call:
//!
//! - each item id appears in at most one container (items are always removed
//!   from their old container before they are inserted anywhere else);
//! - container sequences are dense `Vec`s;
//! - the tier set is fixed at construction. `Tier` exposes no constructor for
//!   pre-filled content and `Partition` exposes no way to add or drop tiers.

use crate::domain::{ContainerId, Item, ItemId, TierId};

/// One ranked container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    id: TierId,
    label: String,
    color: String,
    items: Vec<Item>,
}

impl Tier {
    /// Creates an empty tier.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: TierId::new(id),
            label: label.into(),
            color: color.into(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &TierId {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Hex display color, e.g. `#ef4444`.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Items in rank order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

/// A single mutation of the partition.
///
/// The store applies these one at a time; see [`Partition::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    /// Accept a resolved item into the Pool.
    AddToPool(Item),
    /// Move (or create) an item at the end of a tier.
    AssignToTier { item: Item, tier: TierId },
    /// Single-element move inside one container.
    Reorder {
        container: ContainerId,
        from: usize,
        to: usize,
    },
    /// Move an item from one container into another at an index.
    MoveAcross {
        item: ItemId,
        source: ContainerId,
        target: ContainerId,
        index: usize,
    },
    /// Destroy an item that currently sits in the Pool.
    RemoveFromPool(ItemId),
    /// Return a ranked item to the end of the Pool.
    Unrank { item: ItemId, tier: TierId },
    /// Send every ranked item back to the Pool.
    ResetTierContents,
    /// Destroy every item.
    ResetAll,
}

/// Counts shown in the board header and used to gate bulk actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardSummary {
    pub ranked: usize,
    pub unranked: usize,
}

impl BoardSummary {
    #[must_use]
    pub const fn has_ranked(&self) -> bool {
        self.ranked > 0
    }

    #[must_use]
    pub const fn has_any(&self) -> bool {
        self.ranked + self.unranked > 0
    }
}

/// The complete assignment of items to containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pool: Vec<Item>,
    tiers: Vec<Tier>,
}

impl Partition {
    /// Creates a partition with an empty pool and the given tiers.
    ///
    /// Tiers sharing an id with an earlier tier are dropped so that tier ids
    /// stay unique.
    ///
    /// # Examples
    ///
    /// ```
    /// use tierboard::board::{Partition, Tier};
    ///
    /// let partition = Partition::new(vec![Tier::new("S", "S", "#ef4444"), Tier::new("A", "A", "#f97316")]);
    /// assert_eq!(partition.tiers().len(), 2);
    /// assert!(partition.pool().is_empty());
    /// ```
    #[must_use]
    pub fn new(tiers: impl IntoIterator<Item = Tier>) -> Self {
        let mut unique: Vec<Tier> = Vec::new();
        for tier in tiers {
            if unique.iter().any(|t| t.id == tier.id) {
                tracing::warn!(tier = %tier.id, "duplicate tier id ignored");
                continue;
            }
            unique.push(tier);
        }
        Self {
            pool: Vec::new(),
            tiers: unique,
        }
    }

    #[must_use]
    pub fn pool(&self) -> &[Item] {
        &self.pool
    }

    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    #[must_use]
    pub fn tier(&self, id: &TierId) -> Option<&Tier> {
        self.tiers.iter().find(|t| &t.id == id)
    }

    /// Returns the sequence of a container, `None` for an unknown tier.
    #[must_use]
    pub fn items(&self, container: &ContainerId) -> Option<&[Item]> {
        match container {
            ContainerId::Pool => Some(&self.pool),
            ContainerId::Tier(id) => self.tier(id).map(Tier::items),
        }
    }

    /// Finds the container currently listing `item` and the item's index in it.
    #[must_use]
    pub fn locate(&self, item: ItemId) -> Option<(ContainerId, usize)> {
        if let Some(index) = self.pool.iter().position(|i| i.id == item) {
            return Some((ContainerId::Pool, index));
        }
        self.tiers.iter().find_map(|tier| {
            tier.items
                .iter()
                .position(|i| i.id == item)
                .map(|index| (ContainerId::Tier(tier.id.clone()), index))
        })
    }

    #[must_use]
    pub fn contains(&self, item: ItemId) -> bool {
        self.locate(item).is_some()
    }

    /// Looks up an item anywhere in the partition.
    #[must_use]
    pub fn item(&self, item: ItemId) -> Option<&Item> {
        let (container, index) = self.locate(item)?;
        self.items(&container).and_then(|items| items.get(index))
    }

    #[must_use]
    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            ranked: self.tiers.iter().map(|t| t.items.len()).sum(),
            unranked: self.pool.len(),
        }
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        let summary = self.summary();
        summary.ranked + summary.unranked
    }

    fn sequence_mut(&mut self, container: &ContainerId) -> Option<&mut Vec<Item>> {
        match container {
            ContainerId::Pool => Some(&mut self.pool),
            ContainerId::Tier(id) => self
                .tiers
                .iter_mut()
                .find(|t| &t.id == id)
                .map(|t| &mut t.items),
        }
    }

    /// Removes an item from whichever container holds it.
    fn take(&mut self, item: ItemId) -> Option<Item> {
        let (container, index) = self.locate(item)?;
        self.sequence_mut(&container).map(|items| items.remove(index))
    }

    /// Applies one action and reports whether the partition changed.
    pub fn apply(&mut self, action: &BoardAction) -> bool {
        match action {
            BoardAction::AddToPool(item) => self.add_to_pool(item.clone()),
            BoardAction::AssignToTier { item, tier } => self.assign_to_tier(item.clone(), tier),
            BoardAction::Reorder { container, from, to } => {
                self.reorder_within_container(container, *from, *to)
            }
            BoardAction::MoveAcross {
                item,
                source,
                target,
                index,
            } => self.move_across_containers(*item, source, target, *index),
            BoardAction::RemoveFromPool(item) => self.remove_from_pool(*item),
            BoardAction::Unrank { item, tier } => self.unrank(*item, tier),
            BoardAction::ResetTierContents => self.reset_tier_contents(),
            BoardAction::ResetAll => self.reset_all(),
        }
    }

    /// Appends a new item to the pool unless its id is already on the board.
    pub fn add_to_pool(&mut self, item: Item) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.pool.push(item);
        true
    }

    /// Moves `item` to the end of `tier`, creating it if it is not on the board yet.
    ///
    /// No-op when the tier is unknown or the item already sits in it.
    pub fn assign_to_tier(&mut self, item: Item, tier: &TierId) -> bool {
        let Some(target) = self.tier(tier) else {
            return false;
        };
        if target.items.iter().any(|i| i.id == item.id) {
            return false;
        }

        let item = self.take(item.id).unwrap_or(item);
        match self.sequence_mut(&ContainerId::Tier(tier.clone())) {
            Some(items) => {
                items.push(item);
                true
            }
            None => false,
        }
    }

    /// Removes the element at `from` and reinserts it at `to`, shifting the
    /// elements in between by one.
    pub fn reorder_within_container(&mut self, container: &ContainerId, from: usize, to: usize) -> bool {
        let Some(items) = self.sequence_mut(container) else {
            return false;
        };
        if from == to || from >= items.len() || to >= items.len() {
            return false;
        }
        let item = items.remove(from);
        items.insert(to, item);
        true
    }

    /// Removes `item` from `source` and inserts it into `target` at `index`,
    /// clamped to the target's length.
    pub fn move_across_containers(
        &mut self,
        item: ItemId,
        source: &ContainerId,
        target: &ContainerId,
        index: usize,
    ) -> bool {
        if self.items(target).is_none() {
            return false;
        }
        let Some(from) = self
            .items(source)
            .and_then(|items| items.iter().position(|i| i.id == item))
        else {
            return false;
        };

        if source == target {
            let len = self.items(source).map_or(0, <[Item]>::len);
            return self.reorder_within_container(source, from, index.min(len.saturating_sub(1)));
        }

        let Some(moved) = self.sequence_mut(source).map(|items| items.remove(from)) else {
            return false;
        };
        match self.sequence_mut(target) {
            Some(items) => {
                let at = index.min(items.len());
                items.insert(at, moved);
                true
            }
            None => false,
        }
    }

    /// Destroys `item` if, and only if, it currently sits in the pool.
    pub fn remove_from_pool(&mut self, item: ItemId) -> bool {
        match self.pool.iter().position(|i| i.id == item) {
            Some(index) => {
                self.pool.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns a ranked item to the end of the pool.
    pub fn unrank(&mut self, item: ItemId, tier: &TierId) -> bool {
        let end = self.pool.len();
        self.move_across_containers(item, &ContainerId::Tier(tier.clone()), &ContainerId::Pool, end)
    }

    /// Moves every ranked item back to the pool, tier order first, then rank order.
    pub fn reset_tier_contents(&mut self) -> bool {
        let mut changed = false;
        for tier in &mut self.tiers {
            if !tier.items.is_empty() {
                changed = true;
                self.pool.append(&mut tier.items);
            }
        }
        changed
    }

    /// Empties every container.
    pub fn reset_all(&mut self) -> bool {
        let changed = self.total_items() > 0;
        self.pool.clear();
        for tier in &mut self.tiers {
            tier.items.clear();
        }
        changed
    }
}

/// Pure reducer: returns the partition produced by applying `action` to `partition`.
///
/// # Examples
///
/// ```
/// use tierboard::board::{reduce, BoardAction, Partition, Tier};
/// use tierboard::domain::Item;
///
/// let empty = Partition::new(vec![Tier::new("S", "S", "#ef4444")]);
/// let next = reduce(empty, &BoardAction::AddToPool(Item::new(1, "Alien", "a.jpg")));
/// assert_eq!(next.pool().len(), 1);
/// ```
#[must_use]
pub fn reduce(mut partition: Partition, action: &BoardAction) -> Partition {
    partition.apply(action);
    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn item(id: u64) -> Item {
        Item::new(id, format!("Movie {id}"), format!("/p/{id}.jpg"))
    }

    fn board() -> Partition {
        Partition::new(vec![
            Tier::new("S", "S", "#ef4444"),
            Tier::new("A", "A", "#f97316"),
            Tier::new("B", "B", "#eab308"),
        ])
    }

    fn ids(items: &[Item]) -> Vec<u64> {
        items.iter().map(|i| i.id.0).collect()
    }

    fn tier_ids(p: &Partition, tier: &str) -> Vec<u64> {
        ids(p.items(&ContainerId::tier(tier)).unwrap_or_default())
    }

    fn assert_unique(p: &Partition) {
        let mut seen = HashSet::new();
        for i in p.pool().iter().chain(p.tiers().iter().flat_map(Tier::items)) {
            assert!(seen.insert(i.id), "item {} listed twice", i.id);
        }
    }

    fn fill_tier(p: &mut Partition, tier: &str, members: &[u64]) {
        for &id in members {
            p.assign_to_tier(item(id), &TierId::from(tier));
        }
    }

    #[test]
    fn duplicate_tier_ids_are_dropped() {
        let p = Partition::new(vec![Tier::new("S", "S", "#f00"), Tier::new("S", "S2", "#0f0")]);
        assert_eq!(p.tiers().len(), 1);
        assert_eq!(p.tiers()[0].label(), "S");
    }

    #[test]
    fn add_to_pool_rejects_ids_already_on_board() {
        let mut p = board();
        assert!(p.add_to_pool(item(1)));
        assert!(!p.add_to_pool(item(1)));
        fill_tier(&mut p, "S", &[2]);
        assert!(!p.add_to_pool(item(2)));
        assert_eq!(ids(p.pool()), vec![1]);
    }

    #[test]
    fn assign_moves_out_of_pool_and_appends() {
        let mut p = board();
        p.add_to_pool(item(1));
        p.add_to_pool(item(2));
        fill_tier(&mut p, "S", &[3]);

        assert!(p.assign_to_tier(item(1), &TierId::from("S")));
        assert_eq!(ids(p.pool()), vec![2]);
        assert_eq!(tier_ids(&p, "S"), vec![3, 1]);
        assert_unique(&p);
    }

    #[test]
    fn assign_is_idempotent_for_the_same_tier() {
        let mut p = board();
        fill_tier(&mut p, "A", &[1, 2]);
        let before = p.clone();
        assert!(!p.assign_to_tier(item(1), &TierId::from("A")));
        assert_eq!(p, before);
    }

    #[test]
    fn assign_to_unknown_tier_leaves_partition_equal() {
        let mut p = board();
        p.add_to_pool(item(1));
        let before = p.clone();
        assert!(!p.assign_to_tier(item(1), &TierId::from("unknown-tier")));
        assert_eq!(p, before);
    }

    #[test]
    fn assign_keeps_the_board_owned_instance() {
        let mut p = board();
        p.add_to_pool(item(5));
        let stale = Item::new(5, "Renamed", "other.jpg");
        p.assign_to_tier(stale, &TierId::from("B"));
        assert_eq!(p.tier(&TierId::from("B")).map(|t| t.items()[0].title.as_str()), Some("Movie 5"));
    }

    #[test]
    fn reorder_removes_then_reinserts() {
        let mut p = board();
        fill_tier(&mut p, "S", &[1, 2, 3, 4]);
        assert!(p.reorder_within_container(&ContainerId::tier("S"), 0, 2));
        assert_eq!(tier_ids(&p, "S"), vec![2, 3, 1, 4]);

        assert!(p.reorder_within_container(&ContainerId::tier("S"), 3, 0));
        assert_eq!(tier_ids(&p, "S"), vec![4, 2, 3, 1]);
    }

    #[test]
    fn reorder_ignores_same_and_out_of_bounds_indices() {
        let mut p = board();
        fill_tier(&mut p, "S", &[1, 2]);
        let before = p.clone();
        assert!(!p.reorder_within_container(&ContainerId::tier("S"), 1, 1));
        assert!(!p.reorder_within_container(&ContainerId::tier("S"), 0, 2));
        assert!(!p.reorder_within_container(&ContainerId::tier("S"), 9, 0));
        assert!(!p.reorder_within_container(&ContainerId::tier("Z"), 0, 1));
        assert_eq!(p, before);
    }

    #[test]
    fn move_across_inserts_at_index() {
        let mut p = board();
        fill_tier(&mut p, "S", &[9]);
        fill_tier(&mut p, "A", &[1, 2, 3]);
        assert!(p.move_across_containers(ItemId(9), &ContainerId::tier("S"), &ContainerId::tier("A"), 1));
        assert!(tier_ids(&p, "S").is_empty());
        assert_eq!(tier_ids(&p, "A"), vec![1, 9, 2, 3]);
        assert_unique(&p);
    }

    #[test]
    fn move_across_clamps_index_to_target_length() {
        let mut p = board();
        fill_tier(&mut p, "S", &[9]);
        fill_tier(&mut p, "A", &[1]);
        assert!(p.move_across_containers(ItemId(9), &ContainerId::tier("S"), &ContainerId::tier("A"), 40));
        assert_eq!(tier_ids(&p, "A"), vec![1, 9]);
    }

    #[test]
    fn move_across_with_stale_arguments_is_a_no_op() {
        let mut p = board();
        fill_tier(&mut p, "S", &[1]);
        let before = p.clone();
        // item not in source
        assert!(!p.move_across_containers(ItemId(1), &ContainerId::tier("A"), &ContainerId::tier("B"), 0));
        // unknown target
        assert!(!p.move_across_containers(ItemId(1), &ContainerId::tier("S"), &ContainerId::tier("Q"), 0));
        // unknown item
        assert!(!p.move_across_containers(ItemId(77), &ContainerId::tier("S"), &ContainerId::Pool, 0));
        assert_eq!(p, before);
    }

    #[test]
    fn move_across_within_one_container_behaves_like_reorder() {
        let mut p = board();
        fill_tier(&mut p, "B", &[1, 2, 3]);
        assert!(p.move_across_containers(ItemId(1), &ContainerId::tier("B"), &ContainerId::tier("B"), 99));
        assert_eq!(tier_ids(&p, "B"), vec![2, 3, 1]);
    }

    #[test]
    fn remove_from_pool_only_touches_pool_items() {
        let mut p = board();
        p.add_to_pool(item(1));
        fill_tier(&mut p, "S", &[2]);
        assert!(!p.remove_from_pool(ItemId(2)));
        assert!(p.remove_from_pool(ItemId(1)));
        assert!(p.pool().is_empty());
        assert_eq!(tier_ids(&p, "S"), vec![2]);
    }

    #[test]
    fn unrank_appends_to_pool_end() {
        let mut p = board();
        p.add_to_pool(item(2));
        fill_tier(&mut p, "A", &[1]);
        assert!(p.unrank(ItemId(1), &TierId::from("A")));
        assert_eq!(ids(p.pool()), vec![2, 1]);
        assert!(!p.unrank(ItemId(1), &TierId::from("A")));
    }

    #[test]
    fn reset_tier_contents_preserves_tier_then_rank_order() {
        let mut p = board();
        p.add_to_pool(item(10));
        fill_tier(&mut p, "S", &[1]);
        fill_tier(&mut p, "A", &[2, 3]);
        let total = p.total_items();

        assert!(p.reset_tier_contents());
        assert_eq!(ids(p.pool()), vec![10, 1, 2, 3]);
        assert!(p.tiers().iter().all(|t| t.items().is_empty()));
        assert_eq!(p.total_items(), total);
        assert!(!p.reset_tier_contents());
    }

    #[test]
    fn reset_all_destroys_everything() {
        let mut p = board();
        p.add_to_pool(item(1));
        fill_tier(&mut p, "B", &[2]);
        assert!(p.reset_all());
        assert_eq!(p.total_items(), 0);
        assert_eq!(p.tiers().len(), 3);
        assert!(!p.reset_all());
    }

    #[test]
    fn summary_counts_ranked_and_unranked() {
        let mut p = board();
        assert!(!p.summary().has_any());
        p.add_to_pool(item(1));
        fill_tier(&mut p, "S", &[2, 3]);
        let summary = p.summary();
        assert_eq!(summary, BoardSummary { ranked: 2, unranked: 1 });
        assert!(summary.has_ranked());
    }

    #[test]
    fn uniqueness_holds_across_an_operation_mix() {
        let mut p = board();
        let actions = vec![
            BoardAction::AddToPool(item(1)),
            BoardAction::AddToPool(item(2)),
            BoardAction::AddToPool(item(3)),
            BoardAction::AssignToTier { item: item(1), tier: TierId::from("S") },
            BoardAction::AssignToTier { item: item(4), tier: TierId::from("S") },
            BoardAction::AssignToTier { item: item(1), tier: TierId::from("A") },
            BoardAction::MoveAcross {
                item: ItemId(4),
                source: ContainerId::tier("S"),
                target: ContainerId::tier("A"),
                index: 0,
            },
            BoardAction::AddToPool(item(4)),
            BoardAction::Reorder { container: ContainerId::Pool, from: 0, to: 1 },
            BoardAction::Unrank { item: ItemId(1), tier: TierId::from("A") },
            BoardAction::AssignToTier { item: item(2), tier: TierId::from("B") },
            BoardAction::RemoveFromPool(ItemId(2)),
        ];
        for action in &actions {
            p.apply(action);
            assert_unique(&p);
        }
        assert_eq!(tier_ids(&p, "A"), vec![4]);
        assert_eq!(tier_ids(&p, "B"), vec![2]);
        assert_eq!(ids(p.pool()), vec![3, 1]);
    }

    #[test]
    fn reduce_returns_the_next_state() {
        let p = reduce(board(), &BoardAction::AddToPool(item(1)));
        let p = reduce(p, &BoardAction::AssignToTier { item: item(1), tier: TierId::from("S") });
        assert_eq!(p.locate(ItemId(1)), Some((ContainerId::tier("S"), 0)));
    }
}
