//! Google Programmable Search (Custom Search JSON API) client.

use std::time::Duration;

use async_trait::async_trait;
use kiroku_config::SearchConfig;
use kiroku_core::{SearchHit, SearchService};

use crate::error::RemoteError;
use crate::http::{build_client, check_response, decode_json};

const ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(serde::Deserialize)]
struct SearchResponse {
    /// Absent when the query matched nothing.
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(serde::Deserialize)]
struct SearchItem {
    link: String,
    title: Option<String>,
}

/// HTTP client for one configured search engine.
pub struct GoogleSearchClient {
    http: reqwest::Client,
    api_key: String,
    engine_id: String,
}

impl GoogleSearchClient {
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            http: build_client(Duration::from_secs(config.timeout_secs)),
            api_key: config.api_key.clone(),
            engine_id: config.engine_id.clone(),
        }
    }

    fn query_url(&self, query: &str) -> String {
        format!(
            "{ENDPOINT}?key={}&cx={}&q={}",
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.engine_id),
            urlencoding::encode(query)
        )
    }

    /// Run one query and return the ranked links.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the HTTP request fails, the daily quota is
    /// exhausted (429), or the response cannot be parsed.
    pub async fn query(&self, query: &str) -> Result<Vec<SearchHit>, RemoteError> {
        tracing::debug!(query, "running web search");
        let resp = check_response(self.http.get(self.query_url(query)).send().await?).await?;
        let data: SearchResponse = decode_json(resp).await?;
        Ok(data.items.into_iter().map(SearchItem::into_hit).collect())
    }
}

impl SearchItem {
    fn into_hit(self) -> SearchHit {
        SearchHit {
            url: self.link,
            title: self.title,
        }
    }
}

#[async_trait]
impl SearchService for GoogleSearchClient {
    type Error = RemoteError;

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, RemoteError> {
        self.query(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "kind": "customsearch#search",
        "items": [
            {
                "kind": "customsearch#result",
                "title": "Fullmetal Alchemist: Brotherhood - MyAnimeList.net",
                "link": "https://myanimelist.net/anime/5114/Fullmetal_Alchemist__Brotherhood"
            },
            {
                "kind": "customsearch#result",
                "link": "https://en.wikipedia.org/wiki/Fullmetal_Alchemist:_Brotherhood"
            }
        ]
    }"#;

    #[test]
    fn parse_search_response() {
        let data: SearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let hits: Vec<SearchHit> = data.items.into_iter().map(SearchItem::into_hit).collect();
        assert_eq!(hits.len(), 2);
        assert_eq!(
            hits[0].url,
            "https://myanimelist.net/anime/5114/Fullmetal_Alchemist__Brotherhood"
        );
        assert!(hits[1].title.is_none());
    }

    #[test]
    fn missing_items_means_no_results() {
        let data: SearchResponse =
            serde_json::from_str(r#"{"kind": "customsearch#search"}"#).unwrap();
        assert!(data.items.is_empty());
    }

    #[test]
    fn query_is_url_encoded() {
        let client = GoogleSearchClient::new(&SearchConfig {
            api_key: "key".into(),
            engine_id: "engine:1".into(),
            ..SearchConfig::default()
        });
        assert_eq!(
            client.query_url("Mob Psycho 100 Anime MyAnimeList"),
            "https://www.googleapis.com/customsearch/v1?key=key&cx=engine%3A1&q=Mob%20Psycho%20100%20Anime%20MyAnimeList"
        );
    }
}
