//! Media kind, format, and airing status enums.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Parsing from media database labels is lenient: unrecognized labels map to an
//! `Unknown` variant instead of failing, since the upstream vocabulary grows
//! without notice.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// MediaKind
// ---------------------------------------------------------------------------

/// Which side of the media database a catalog entry lives on.
///
/// `Series` entries are anime (episodes with a per-episode duration),
/// `Print` entries are manga (volumes, no duration).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Series,
    Print,
}

impl MediaKind {
    /// Label used by the catalog "Type" select and in search queries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Series => "Anime",
            Self::Print => "Manga",
        }
    }

    /// Path segment used by the media database REST API.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Series => "anime",
            Self::Print => "manga",
        }
    }

    /// The only format whose entries take part in chain totals for this kind.
    /// Movies, OVAs, specials, light novels and the like are side stories.
    #[must_use]
    pub const fn main_format(self) -> MediaFormat {
        match self {
            Self::Series => MediaFormat::Tv,
            Self::Print => MediaFormat::Manga,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anime" | "series" => Ok(Self::Series),
            "manga" | "print" => Ok(Self::Print),
            _ => Err(CoreError::UnknownMediaKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// MediaFormat
// ---------------------------------------------------------------------------

/// Publication format of a single media database entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaFormat {
    Tv,
    Ova,
    Ona,
    Movie,
    Special,
    Music,
    Manga,
    LightNovel,
    Novel,
    OneShot,
    Manhwa,
    Manhua,
    Doujinshi,
    Unknown,
}

impl MediaFormat {
    /// Map a media database `type` label (e.g. `"TV"`, `"Light Novel"`).
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "tv" => Self::Tv,
            "ova" => Self::Ova,
            "ona" => Self::Ona,
            "movie" => Self::Movie,
            "special" | "tv special" => Self::Special,
            "music" | "cm" | "pv" => Self::Music,
            "manga" => Self::Manga,
            "light novel" => Self::LightNovel,
            "novel" => Self::Novel,
            "one-shot" | "one shot" => Self::OneShot,
            "manhwa" => Self::Manhwa,
            "manhua" => Self::Manhua,
            "doujinshi" | "doujin" => Self::Doujinshi,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tv => "TV",
            Self::Ova => "OVA",
            Self::Ona => "ONA",
            Self::Movie => "Movie",
            Self::Special => "Special",
            Self::Music => "Music",
            Self::Manga => "Manga",
            Self::LightNovel => "Light Novel",
            Self::Novel => "Novel",
            Self::OneShot => "One-shot",
            Self::Manhwa => "Manhwa",
            Self::Manhua => "Manhua",
            Self::Doujinshi => "Doujinshi",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AiringStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an entry.
///
/// ```text
/// not_yet_aired → airing → finished
///                        → on_hiatus → airing
///                        → discontinued
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiringStatus {
    Airing,
    Finished,
    NotYetAired,
    OnHiatus,
    Discontinued,
    #[default]
    Unknown,
}

impl AiringStatus {
    /// Map a media database `status` label for either kind.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "currently airing" | "publishing" => Self::Airing,
            "finished airing" | "finished" => Self::Finished,
            "not yet aired" | "not yet published" => Self::NotYetAired,
            "on hiatus" => Self::OnHiatus,
            "discontinued" => Self::Discontinued,
            _ => Self::Unknown,
        }
    }

    /// The media database wording for this status, which is also the set of
    /// options the catalog's "Airing Status" select uses.
    #[must_use]
    pub const fn label(self, kind: MediaKind) -> &'static str {
        match (self, kind) {
            (Self::Airing, MediaKind::Series) => "Currently Airing",
            (Self::Airing, MediaKind::Print) => "Publishing",
            (Self::Finished, MediaKind::Series) => "Finished Airing",
            (Self::Finished, MediaKind::Print) => "Finished",
            (Self::NotYetAired, MediaKind::Series) => "Not yet aired",
            (Self::NotYetAired, MediaKind::Print) => "Not yet published",
            (Self::OnHiatus, _) => "On Hiatus",
            (Self::Discontinued, _) => "Discontinued",
            (Self::Unknown, _) => "Unknown",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Airing => "airing",
            Self::Finished => "finished",
            Self::NotYetAired => "not_yet_aired",
            Self::OnHiatus => "on_hiatus",
            Self::Discontinued => "discontinued",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AiringStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
