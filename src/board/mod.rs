//! The tier board: partition state, its store, and drag-and-drop interpretation.
//!
//! - [`partition`]: the pool/tier partition and its total mutation operations
//! - [`store`]: single owner of the partition, notifies observers on change
//! - [`resolver`]: maps a raw drop target to a container and index
//! - [`collision`]: region hit-testing behind the [`CollisionDetector`] seam
//! - [`gesture`]: drag state machine turning a gesture into one [`BoardAction`]

pub mod collision;
pub mod gesture;
pub mod partition;
pub mod resolver;
pub mod store;

pub use collision::{CollisionDetector, DropTargetId, Droppable, RectIntersection, Region};
pub use gesture::{
    DragOrigin, DragSession, DragSnapshot, GestureInterpreter, GestureState, Point, PointerSensor, SensorRelease,
};
pub use partition::{reduce, BoardAction, BoardSummary, Partition, Tier};
pub use resolver::{resolve_target, ResolvedTarget};
pub use store::{PartitionStore, SubscriptionId};
