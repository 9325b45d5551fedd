//! Catalog request building.
//!
//! Every lookup the plugin can issue is a [`CatalogRequest`]. Requests are turned
//! into TMDB v3 URLs with [`CatalogRequest::url`]; the plugin shim hands the URL
//! to Zellij's `web_request` together with the request tag context.

use super::tracker::Channel;
use crate::domain::{ItemId, Result, TierboardError};
use url::Url;

/// Default API root.
pub const API_BASE: &str = "https://api.themoviedb.org/3/";

/// Connection settings for the catalog service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub api_key: Option<String>,
    pub language: String,
    pub base_url: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            language: "en-US".to_string(),
            base_url: API_BASE.to_string(),
        }
    }
}

impl CatalogSettings {
    /// The catalog can only be queried with an API key.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

/// One catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    /// Free-text title search.
    Search(String),
    /// This week's trending movies.
    Trending,
    /// Popular movies of one genre.
    ByCategory(u32),
    /// Full detail of one movie.
    ById(ItemId),
}

impl CatalogRequest {
    /// Which result channel the response belongs to.
    #[must_use]
    pub const fn channel(&self) -> Channel {
        match self {
            Self::Search(_) => Channel::Search,
            Self::Trending | Self::ByCategory(_) => Channel::Browse,
            Self::ById(_) => Channel::Detail,
        }
    }

    fn path(&self) -> String {
        match self {
            Self::Search(_) => "search/movie".to_string(),
            Self::Trending => "trending/movie/week".to_string(),
            Self::ByCategory(_) => "discover/movie".to_string(),
            Self::ById(id) => format!("movie/{id}"),
        }
    }

    /// Builds the request URL.
    ///
    /// # Errors
    ///
    /// Returns [`TierboardError::Config`] when no API key is configured or the
    /// base URL does not parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use tierboard::catalog::{CatalogRequest, CatalogSettings};
    ///
    /// let settings = CatalogSettings {
    ///     api_key: Some("k".to_string()),
    ///     ..CatalogSettings::default()
    /// };
    /// let url = CatalogRequest::Search("blade runner".to_string()).url(&settings).unwrap();
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://api.themoviedb.org/3/search/movie?api_key=k&language=en-US&query=blade+runner"
    /// );
    /// ```
    pub fn url(&self, settings: &CatalogSettings) -> Result<Url> {
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| TierboardError::Config("catalog api_key is not set".to_string()))?;

        let base = Url::parse(&settings.base_url)
            .map_err(|e| TierboardError::Config(format!("invalid catalog base url: {e}")))?;
        let mut url = base
            .join(&self.path())
            .map_err(|e| TierboardError::Config(format!("invalid catalog path: {e}")))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", api_key);
            query.append_pair("language", &settings.language);
            match self {
                Self::Search(text) => {
                    query.append_pair("query", text.trim());
                }
                Self::ByCategory(genre) => {
                    query.append_pair("with_genres", &genre.to_string());
                    query.append_pair("sort_by", "popularity.desc");
                }
                Self::Trending | Self::ById(_) => {}
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CatalogSettings {
        CatalogSettings {
            api_key: Some("secret".to_string()),
            language: "de-DE".to_string(),
            ..CatalogSettings::default()
        }
    }

    #[test]
    fn category_requests_use_discover() {
        let url = CatalogRequest::ByCategory(878).url(&settings()).unwrap();
        assert_eq!(url.path(), "/3/discover/movie");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("with_genres".to_string(), "878".to_string())));
        assert!(pairs.contains(&("language".to_string(), "de-DE".to_string())));
    }

    #[test]
    fn detail_and_trending_paths() {
        let s = settings();
        assert_eq!(CatalogRequest::ById(ItemId(603)).url(&s).unwrap().path(), "/3/movie/603");
        assert_eq!(CatalogRequest::Trending.url(&s).unwrap().path(), "/3/trending/movie/week");
    }

    #[test]
    fn search_text_is_encoded() {
        let url = CatalogRequest::Search(" Amélie & co ".to_string()).url(&settings()).unwrap();
        let query = url.query_pairs().find(|(k, _)| k == "query").map(|(_, v)| v.into_owned());
        assert_eq!(query.as_deref(), Some("Amélie & co"));
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let s = CatalogSettings::default();
        assert!(!s.is_enabled());
        assert!(matches!(CatalogRequest::Trending.url(&s), Err(TierboardError::Config(_))));
    }

    #[test]
    fn channels_split_search_browse_and_detail() {
        assert_eq!(CatalogRequest::Trending.channel(), Channel::Browse);
        assert_eq!(CatalogRequest::ByCategory(27).channel(), Channel::Browse);
        assert_eq!(CatalogRequest::Search("x".into()).channel(), Channel::Search);
        assert_eq!(CatalogRequest::ById(ItemId(1)).channel(), Channel::Detail);
    }
}
