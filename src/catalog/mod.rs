//! Item catalog client (TMDB).
//!
//! Only the pure halves of the client live here: building request URLs,
//! decoding responses and deciding which responses are still wanted. The
//! transport is Zellij's `web_request`, driven by the plugin shim.
//!
//! Lookups never touch the board. Results are shown in the results strip and
//! only become board items through an explicit drag or add.

pub mod request;
pub mod response;
pub mod tracker;

pub use request::{CatalogRequest, CatalogSettings, API_BASE};
pub use response::{decode_detail, decode_listing, ensure_success, image_url};
pub use tracker::{Channel, QueryTracker, RequestTag};

/// Base URL prepended to poster paths.
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// A browsable listing shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    /// TMDB genre id; `None` means the trending list.
    pub genre: Option<u32>,
}

impl Category {
    /// The request that lists this category.
    #[must_use]
    pub const fn request(&self) -> CatalogRequest {
        match self.genre {
            Some(genre) => CatalogRequest::ByCategory(genre),
            None => CatalogRequest::Trending,
        }
    }
}

/// Listing shortcuts cycled with `Tab`, trending first.
pub const CATEGORIES: [Category; 8] = [
    Category { name: "Trending", genre: None },
    Category { name: "Action", genre: Some(28) },
    Category { name: "Comedy", genre: Some(35) },
    Category { name: "Horror", genre: Some(27) },
    Category { name: "Anime", genre: Some(16) },
    Category { name: "Sci-Fi", genre: Some(878) },
    Category { name: "Drama", genre: Some(18) },
    Category { name: "Thriller", genre: Some(53) },
];
