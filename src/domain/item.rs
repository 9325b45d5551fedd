//! Item domain model.
//!
//! An [`Item`] is the rankable unit of the board (a movie). Items are immutable
//! once created: the board only changes which container lists them. The richer
//! [`ItemDetail`] is only ever shown in the detail view and never stored in the
//! partition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable unique identifier of an item (the catalog's numeric id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rankable movie with a stable id, a display title and an image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub image: String,
}

impl Item {
    /// Creates a new item.
    ///
    /// # Examples
    ///
    /// ```
    /// use tierboard::domain::{Item, ItemId};
    ///
    /// let item = Item::new(603, "The Matrix", "https://image.tmdb.org/t/p/w500/m.jpg");
    /// assert_eq!(item.id, ItemId(603));
    /// ```
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            image: image.into(),
        }
    }
}

/// A named category attached to a detailed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Detail superset of [`Item`] shown by the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub item: Item,
    pub synopsis: String,
    pub rating: f64,
    /// Raw `YYYY-MM-DD` release date as reported by the catalog.
    pub release_date: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    pub genres: Vec<Genre>,
    pub backdrop: Option<String>,
}

impl ItemDetail {
    /// Returns the release year, if the release date parses as a calendar date.
    ///
    /// # Examples
    ///
    /// ```
    /// use tierboard::domain::{Item, ItemDetail};
    ///
    /// let detail = ItemDetail {
    ///     item: Item::new(1, "Alien", "poster"),
    ///     synopsis: String::new(),
    ///     rating: 8.2,
    ///     release_date: Some("1979-05-25".to_string()),
    ///     runtime: Some(117),
    ///     genres: vec![],
    ///     backdrop: None,
    /// };
    /// assert_eq!(detail.release_year(), Some(1979));
    /// ```
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;

        self.release_date
            .as_deref()
            .and_then(|date| chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .map(|date| date.year())
    }

    /// Formats the rating with one decimal, the way the detail badge shows it.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(date: Option<&str>) -> ItemDetail {
        ItemDetail {
            item: Item::new(7, "Heat", "img"),
            synopsis: "Cops and robbers".to_string(),
            rating: 7.94,
            release_date: date.map(String::from),
            runtime: Some(170),
            genres: vec![Genre { id: 80, name: "Crime".to_string() }],
            backdrop: None,
        }
    }

    #[test]
    fn release_year_parses_iso_dates() {
        assert_eq!(detail(Some("1995-12-15")).release_year(), Some(1995));
    }

    #[test]
    fn release_year_is_none_for_empty_or_garbage() {
        assert_eq!(detail(None).release_year(), None);
        assert_eq!(detail(Some("")).release_year(), None);
        assert_eq!(detail(Some("soon")).release_year(), None);
    }

    #[test]
    fn rating_label_rounds_to_one_decimal() {
        assert_eq!(detail(None).rating_label(), "7.9");
    }
}
