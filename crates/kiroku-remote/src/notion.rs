//! Notion database adapter for the catalog store.
//!
//! Each catalog record is a page in one Notion database. Page properties are
//! read by name, so the database needs these columns:
//!
//! | Property | Notion type | Direction |
//! |---|---|---|
//! | Name | title | read |
//! | Type | select (`Anime` / `Manga`) | read |
//! | MyAnimeList ID | number | read + write |
//! | Sequel Titles | rich text | read + write |
//! | Skip, Cleaned, Skip Sequel Traverse | checkbox | read (Skip also written) |
//! | Total, Duration, Web Rating | number | write |
//! | Airing Status | select | write |
//! | Genre | multi-select | write |

use std::time::Duration;

use async_trait::async_trait;
use kiroku_config::NotionConfig;
use kiroku_core::{CatalogRecord, CatalogStore, CatalogUpdate};
use serde_json::{Value, json};

use crate::error::RemoteError;
use crate::http::{build_client, check_response, decode_json};

const API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// Notion rejects rich text segments longer than this.
const RICH_TEXT_LIMIT: usize = 2000;

#[derive(serde::Deserialize)]
struct QueryResponse {
    results: Vec<Page>,
    next_cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

#[derive(serde::Deserialize)]
struct Page {
    id: String,
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
}

impl Page {
    fn prop(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    fn title(&self, name: &str) -> Option<String> {
        self.prop(name)?["title"]
            .get(0)?
            .get("plain_text")?
            .as_str()
            .map(str::to_string)
            .filter(|s| !s.is_empty())
    }

    fn rich_text(&self, name: &str) -> Option<String> {
        self.prop(name)?["rich_text"]
            .get(0)?
            .get("plain_text")?
            .as_str()
            .map(str::to_string)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn number(&self, name: &str) -> Option<u32> {
        let n = self.prop(name)?.get("number")?.as_f64()?;
        (n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX)).then_some(n as u32)
    }

    fn select(&self, name: &str) -> Option<&str> {
        self.prop(name)?.get("select")?.get("name")?.as_str()
    }

    fn checkbox(&self, name: &str) -> bool {
        self.prop(name)
            .and_then(|p| p.get("checkbox"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn into_record(self) -> CatalogRecord {
        let kind = self.select("Type").and_then(|label| match label.parse() {
            Ok(kind) => Some(kind),
            Err(error) => {
                tracing::debug!(page = %self.id, %error, "ignoring catalog type");
                None
            }
        });
        CatalogRecord {
            external_id: self.number("MyAnimeList ID"),
            kind,
            name: self.title("Name"),
            successor_titles: self.rich_text("Sequel Titles"),
            skip: self.checkbox("Skip"),
            cleaned: self.checkbox("Cleaned"),
            skip_chain_traverse: self.checkbox("Skip Sequel Traverse"),
            key: self.id,
        }
    }
}

/// Render a catalog update as a Notion `properties` object.
#[must_use]
pub fn update_properties(update: &CatalogUpdate) -> Value {
    let sequel_titles: String = update.sequel_titles.chars().take(RICH_TEXT_LIMIT).collect();
    json!({
        "Total": { "number": update.total },
        "Duration": { "number": update.duration },
        "Airing Status": { "select": { "name": update.airing_status } },
        "Web Rating": { "number": update.web_rating },
        "MyAnimeList ID": { "number": update.external_id },
        "Genre": {
            "multi_select": update
                .genres
                .iter()
                .map(|name| json!({ "name": name }))
                .collect::<Vec<_>>()
        },
        "Sequel Titles": {
            "rich_text": [{ "text": { "content": sequel_titles } }]
        },
        "Skip": { "checkbox": update.skip },
    })
}

/// Catalog store backed by a Notion database.
pub struct NotionCatalog {
    http: reqwest::Client,
    token: String,
    database_id: String,
    page_size: u32,
}

impl NotionCatalog {
    #[must_use]
    pub fn new(config: &NotionConfig) -> Self {
        Self {
            http: build_client(Duration::from_secs(config.timeout_secs)),
            token: config.token.clone(),
            database_id: config.database_id.clone(),
            page_size: config.page_size.clamp(1, 100),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{API_BASE}{path}"))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
    }

    /// Query every page of the database, following pagination cursors.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if any page of the query fails.
    pub async fn query_all(&self) -> Result<Vec<CatalogRecord>, RemoteError> {
        let path = format!("/databases/{}/query", self.database_id);
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({ "page_size": self.page_size });
            if let Some(cursor) = &cursor {
                body["start_cursor"] = json!(cursor);
            }
            let resp = self
                .request(reqwest::Method::POST, &path)
                .json(&body)
                .send()
                .await?;
            let page: QueryResponse = decode_json(check_response(resp).await?).await?;
            records.extend(page.results.into_iter().map(Page::into_record));

            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        tracing::info!(count = records.len(), "catalog records fetched");
        Ok(records)
    }

    /// Overwrite the synchronized properties of one page.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if Notion rejects the update.
    pub async fn update_page(
        &self,
        page_id: &str,
        update: &CatalogUpdate,
    ) -> Result<(), RemoteError> {
        let body = json!({ "properties": update_properties(update) });
        let resp = self
            .request(reqwest::Method::PATCH, &format!("/pages/{page_id}"))
            .json(&body)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for NotionCatalog {
    type Error = RemoteError;

    async fn list_records(&self) -> Result<Vec<CatalogRecord>, RemoteError> {
        self.query_all().await
    }

    async fn write_record(&self, key: &str, update: &CatalogUpdate) -> Result<(), RemoteError> {
        self.update_page(key, update).await
    }
}
