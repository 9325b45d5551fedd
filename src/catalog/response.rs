//! Catalog response decoding.
//!
//! TMDB payloads are decoded with `serde` into private wire structs and then
//! mapped to domain types. Listing entries without a poster are dropped, the
//! board has nothing to show for them.

use super::IMAGE_BASE;
use crate::domain::{Genre, Item, ItemDetail, ItemId, Result, TierboardError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ListingPayload {
    #[serde(default)]
    results: Vec<ListingEntry>,
}

#[derive(Debug, Deserialize)]
struct ListingEntry {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    // trending lists mix in TV entries that only carry `name`
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailPayload {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<Genre>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    backdrop_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    status_message: Option<String>,
}

/// Full image URL for a catalog image path.
#[must_use]
pub fn image_url(path: &str) -> String {
    format!("{IMAGE_BASE}{path}")
}

fn non_empty(path: Option<String>) -> Option<String> {
    path.filter(|p| !p.trim().is_empty())
}

/// Rejects non-2xx responses, preferring the service's own error message.
///
/// # Errors
///
/// Returns [`TierboardError::Catalog`] for any status outside `200..300`.
pub fn ensure_success(status: u16, body: &[u8]) -> Result<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let message = serde_json::from_slice::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.status_message)
        .unwrap_or_else(|| String::from_utf8_lossy(body).chars().take(120).collect());
    Err(TierboardError::Catalog(format!("status {status}: {message}")))
}

/// Decodes a search/trending/discover listing into items.
///
/// # Errors
///
/// Returns [`TierboardError::Decode`] if the body is not a listing payload.
///
/// # Examples
///
/// ```
/// use tierboard::catalog::decode_listing;
///
/// let body = br#"{"results":[{"id":1,"title":"Alien","poster_path":"/a.jpg"},{"id":2,"title":"No poster"}]}"#;
/// let items = decode_listing(body).unwrap();
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].image, "https://image.tmdb.org/t/p/w500/a.jpg");
/// ```
pub fn decode_listing(body: &[u8]) -> Result<Vec<Item>> {
    let payload: ListingPayload = serde_json::from_slice(body)?;
    let total = payload.results.len();

    let items: Vec<Item> = payload
        .results
        .into_iter()
        .filter_map(|entry| {
            let poster = non_empty(entry.poster_path)?;
            let title = entry.title.or(entry.name).unwrap_or_default();
            Some(Item {
                id: ItemId(entry.id),
                title,
                image: image_url(&poster),
            })
        })
        .collect();

    tracing::debug!(total, kept = items.len(), "decoded catalog listing");
    Ok(items)
}

/// Decodes a single-movie detail payload.
///
/// # Errors
///
/// Returns [`TierboardError::Decode`] if the body is not a detail payload.
pub fn decode_detail(body: &[u8]) -> Result<ItemDetail> {
    let payload: DetailPayload = serde_json::from_slice(body)?;

    Ok(ItemDetail {
        item: Item {
            id: ItemId(payload.id),
            title: payload.title,
            image: non_empty(payload.poster_path)
                .map(|p| image_url(&p))
                .unwrap_or_default(),
        },
        synopsis: payload.overview.unwrap_or_default(),
        rating: payload.vote_average,
        release_date: non_empty(payload.release_date),
        runtime: payload.runtime.filter(|minutes| *minutes > 0),
        genres: payload.genres,
        backdrop: non_empty(payload.backdrop_path).map(|p| image_url(&p)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_keeps_order_and_prefers_title() {
        let body = br#"{"page":1,"results":[
            {"id":3,"title":"Heat","poster_path":"/h.jpg"},
            {"id":4,"name":"Some Show","poster_path":"/s.jpg"},
            {"id":5,"title":"Blank","poster_path":""},
            {"id":6,"title":"Null","poster_path":null}
        ]}"#;
        let items = decode_listing(body).unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Heat", "Some Show"]);
        assert_eq!(items[0].id, ItemId(3));
    }

    #[test]
    fn listing_without_results_is_empty() {
        assert!(decode_listing(b"{}").unwrap().is_empty());
    }

    #[test]
    fn malformed_listing_is_a_decode_error() {
        assert!(matches!(decode_listing(b"<html>"), Err(TierboardError::Decode(_))));
    }

    #[test]
    fn detail_maps_all_fields() {
        let body = br#"{
            "id": 603, "title": "The Matrix", "overview": "Wake up.",
            "vote_average": 8.217, "release_date": "1999-03-30", "runtime": 136,
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
            "poster_path": "/m.jpg", "backdrop_path": ""
        }"#;
        let detail = decode_detail(body).unwrap();
        assert_eq!(detail.item.id, ItemId(603));
        assert_eq!(detail.item.image, "https://image.tmdb.org/t/p/w500/m.jpg");
        assert_eq!(detail.release_year(), Some(1999));
        assert_eq!(detail.rating_label(), "8.2");
        assert_eq!(detail.runtime, Some(136));
        assert_eq!(detail.genres.len(), 2);
        assert_eq!(detail.backdrop, None);
    }

    #[test]
    fn error_status_surfaces_service_message() {
        let body = br#"{"status_code":7,"status_message":"Invalid API key"}"#;
        let err = ensure_success(401, body).unwrap_err();
        assert_eq!(err.to_string(), "Catalog error: status 401: Invalid API key");
        assert!(ensure_success(200, b"").is_ok());
    }
}
