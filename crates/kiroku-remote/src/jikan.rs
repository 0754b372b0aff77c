//! Jikan (unofficial MyAnimeList REST API) media database client.

use std::time::Duration;

use async_trait::async_trait;
use kiroku_config::JikanConfig;
use kiroku_core::{
    AiringStatus, MediaDatabase, MediaFormat, MediaKind, MediaRecord, SuccessorRef,
};

use crate::error::RemoteError;
use crate::http::{build_client, check_response, decode_json};

/// Relation label Jikan uses for the entry that continues a story.
const SEQUEL_RELATION: &str = "Sequel";

#[derive(serde::Deserialize)]
struct JikanResponse {
    data: JikanEntry,
}

#[derive(serde::Deserialize)]
struct JikanEntry {
    mal_id: u32,
    title: String,
    #[serde(rename = "type")]
    format: Option<String>,
    episodes: Option<u32>,
    volumes: Option<u32>,
    duration: Option<String>,
    status: Option<String>,
    score: Option<f64>,
    genres: Option<Vec<Named>>,
    demographics: Option<Vec<Named>>,
    relations: Option<Vec<Relation>>,
}

#[derive(serde::Deserialize)]
struct Named {
    name: String,
}

#[derive(serde::Deserialize)]
struct Relation {
    relation: String,
    #[serde(default)]
    entry: Vec<RelationEntry>,
}

#[derive(serde::Deserialize)]
struct RelationEntry {
    mal_id: u32,
    name: String,
}

impl JikanEntry {
    fn into_record(self, kind: MediaKind) -> MediaRecord {
        let units = match kind {
            MediaKind::Series => self.episodes,
            MediaKind::Print => self.volumes,
        };
        let names = |list: Option<Vec<Named>>| -> Vec<String> {
            list.unwrap_or_default().into_iter().map(|n| n.name).collect()
        };
        let successors = self
            .relations
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.relation == SEQUEL_RELATION)
            .flat_map(|r| r.entry)
            .map(|e| SuccessorRef {
                id: e.mal_id,
                title: e.name,
            })
            .collect();

        MediaRecord {
            id: self.mal_id,
            title: self.title,
            kind,
            format: self
                .format
                .as_deref()
                .map_or(MediaFormat::Unknown, MediaFormat::from_label),
            genres: names(self.genres),
            demographics: names(self.demographics),
            units,
            duration: self.duration,
            status: self
                .status
                .as_deref()
                .map_or(AiringStatus::Unknown, AiringStatus::from_label),
            score: self.score,
            successors,
        }
    }
}

/// HTTP client for the Jikan v4 API.
pub struct JikanClient {
    http: reqwest::Client,
    base_url: String,
}

impl JikanClient {
    #[must_use]
    pub fn new(config: &JikanConfig) -> Self {
        Self {
            http: build_client(Duration::from_secs(config.timeout_secs)),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn entry_url(&self, id: u32, kind: MediaKind) -> String {
        format!("{}/{}/{id}/full", self.base_url, kind.path_segment())
    }

    /// Fetch the full record for one anime or manga.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if the HTTP request fails, Jikan returns a
    /// non-success status (404 for unknown ids, 429 when throttled), or the
    /// response cannot be parsed.
    pub async fn fetch_entry(&self, id: u32, kind: MediaKind) -> Result<MediaRecord, RemoteError> {
        let url = self.entry_url(id, kind);
        tracing::debug!(%url, "fetching media entry");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let data: JikanResponse = decode_json(resp).await?;
        Ok(data.data.into_record(kind))
    }
}

#[async_trait]
impl MediaDatabase for JikanClient {
    type Error = RemoteError;

    async fn fetch(&self, id: u32, kind: MediaKind) -> Result<MediaRecord, RemoteError> {
        self.fetch_entry(id, kind).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ANIME_FIXTURE: &str = r#"{
        "data": {
            "mal_id": 16498,
            "url": "https://myanimelist.net/anime/16498/Shingeki_no_Kyojin",
            "title": "Shingeki no Kyojin",
            "type": "TV",
            "episodes": 25,
            "status": "Finished Airing",
            "duration": "24 min per ep",
            "score": 8.54,
            "genres": [
                {"mal_id": 1, "type": "anime", "name": "Action"},
                {"mal_id": 8, "type": "anime", "name": "Drama"}
            ],
            "demographics": [{"mal_id": 27, "type": "anime", "name": "Shounen"}],
            "relations": [
                {
                    "relation": "Adaptation",
                    "entry": [{"mal_id": 23390, "type": "manga", "name": "Shingeki no Kyojin"}]
                },
                {
                    "relation": "Sequel",
                    "entry": [{"mal_id": 25777, "type": "anime", "name": "Shingeki no Kyojin Season 2"}]
                },
                {
                    "relation": "Side Story",
                    "entry": [{"mal_id": 18397, "type": "anime", "name": "Shingeki no Kyojin OVA"}]
                }
            ]
        }
    }"#;

    const MANGA_FIXTURE: &str = r#"{
        "data": {
            "mal_id": 2,
            "title": "Berserk",
            "type": "Manga",
            "chapters": null,
            "volumes": null,
            "status": "Publishing",
            "score": 9.47,
            "genres": [{"mal_id": 1, "type": "manga", "name": "Action"}],
            "demographics": [{"mal_id": 42, "type": "manga", "name": "Seinen"}],
            "relations": null
        }
    }"#;

    #[test]
    fn parse_anime_response() {
        let data: JikanResponse = serde_json::from_str(ANIME_FIXTURE).unwrap();
        let record = data.data.into_record(MediaKind::Series);

        assert_eq!(record.id, 16498);
        assert_eq!(record.format, MediaFormat::Tv);
        assert_eq!(record.units, Some(25));
        assert_eq!(record.duration.as_deref(), Some("24 min per ep"));
        assert_eq!(record.status, AiringStatus::Finished);
        assert_eq!(record.score, Some(8.54));
        assert_eq!(record.genres, vec!["Action", "Drama"]);
        assert_eq!(record.demographics, vec!["Shounen"]);
    }

    #[test]
    fn only_sequel_relations_become_successors() {
        let data: JikanResponse = serde_json::from_str(ANIME_FIXTURE).unwrap();
        let record = data.data.into_record(MediaKind::Series);
        assert_eq!(
            record.successors,
            vec![SuccessorRef {
                id: 25777,
                title: "Shingeki no Kyojin Season 2".to_string(),
            }]
        );
    }

    #[test]
    fn parse_manga_response_with_nulls() {
        let data: JikanResponse = serde_json::from_str(MANGA_FIXTURE).unwrap();
        let record = data.data.into_record(MediaKind::Print);

        assert_eq!(record.kind, MediaKind::Print);
        assert_eq!(record.format, MediaFormat::Manga);
        assert_eq!(record.units, None);
        assert_eq!(record.duration, None);
        assert_eq!(record.status, AiringStatus::Airing);
        assert!(record.successors.is_empty());
    }

    #[test]
    fn entry_url_uses_kind_segment() {
        let client = JikanClient::new(&JikanConfig {
            base_url: "https://api.jikan.moe/v4/".to_string(),
            timeout_secs: 1,
        });
        assert_eq!(
            client.entry_url(5114, MediaKind::Series),
            "https://api.jikan.moe/v4/anime/5114/full"
        );
        assert_eq!(
            client.entry_url(2, MediaKind::Print),
            "https://api.jikan.moe/v4/manga/2/full"
        );
    }
}
