//! Container resolver.
//!
//! Turns the raw drop target captured mid-gesture into the container that will
//! receive the item and, when the target was an item card, that card's index.
//! Container ids are checked first (which covers dropping onto an empty tier);
//! only then are the tier sequences scanned for a matching item. The scan is
//! linear in the number of items on the board.

use super::collision::DropTargetId;
use super::partition::Partition;
use crate::domain::ContainerId;

/// A drop target resolved against the current partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub container: ContainerId,
    /// Index of the sibling card that was hit, `None` for the container itself.
    pub index: Option<usize>,
}

/// Resolves `target` against `partition`.
///
/// Returns `None` when the target names a tier or item that is no longer on the
/// board.
///
/// # Examples
///
/// ```
/// use tierboard::board::{resolve_target, DropTargetId, Partition, Tier};
/// use tierboard::domain::{ContainerId, Item, ItemId, TierId};
///
/// let mut partition = Partition::new(vec![Tier::new("S", "S", "#ef4444")]);
/// partition.assign_to_tier(Item::new(3, "Alien", "a.jpg"), &TierId::from("S"));
///
/// let hit = resolve_target(&partition, &DropTargetId::Item(ItemId(3))).unwrap();
/// assert_eq!(hit.container, ContainerId::tier("S"));
/// assert_eq!(hit.index, Some(0));
/// ```
#[must_use]
pub fn resolve_target(partition: &Partition, target: &DropTargetId) -> Option<ResolvedTarget> {
    match target {
        DropTargetId::Container(ContainerId::Pool) => Some(ResolvedTarget {
            container: ContainerId::Pool,
            index: None,
        }),
        DropTargetId::Container(ContainerId::Tier(id)) => partition.tier(id).map(|tier| ResolvedTarget {
            container: ContainerId::Tier(tier.id().clone()),
            index: None,
        }),
        DropTargetId::Item(item) => {
            let in_tier = partition.tiers().iter().find_map(|tier| {
                tier.items()
                    .iter()
                    .position(|i| i.id == *item)
                    .map(|index| ResolvedTarget {
                        container: ContainerId::Tier(tier.id().clone()),
                        index: Some(index),
                    })
            });
            in_tier.or_else(|| {
                partition
                    .pool()
                    .iter()
                    .position(|i| i.id == *item)
                    .map(|index| ResolvedTarget {
                        container: ContainerId::Pool,
                        index: Some(index),
                    })
            })
        }
    }
}
