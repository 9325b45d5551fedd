//! Domain layer for the Tierboard plugin.
//!
//! Core value types shared by the board engine, the catalog client and the UI,
//! independent of Zellij APIs.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Items (movies) and their catalog detail
//! - [`container`]: Pool/Tier identifiers
//!
//! # Examples
//!
//! ```
//! use tierboard::domain::{ContainerId, Item};
//!
//! let item = Item::new(1, "Alien", "poster.jpg");
//! let target = ContainerId::tier("S");
//! assert_eq!(target.as_tier().map(|t| t.as_str()), Some("S"));
//! # let _ = item;
//! ```

pub mod container;
pub mod error;
pub mod item;

pub use container::{ContainerId, TierId};
pub use error::{Result, TierboardError};
pub use item::{Genre, Item, ItemDetail, ItemId};
