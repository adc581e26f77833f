//! Asset records and list parameters shared by the catalog, the store and
//! the coordinator.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable asset identifier, e.g. `asset-v1:demo+type@asset+block@logo.png`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the id a course assigns to an uploaded file.
    pub fn for_course_file(course_id: &str, file_name: &str) -> Self {
        Self(format!("asset-v1:{}+type@asset+block@{}", course_id, file_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// In-flight operation markers carried on an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loading {
    Lock,
}

/// A course media file tracked by the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub display_name: String,
    pub content_type: String,
    pub thumbnail: Option<String>,
    pub locked: bool,
    pub date_added: DateTime<Utc>,
    /// Never persisted: markers only live while an operation is outstanding.
    #[serde(skip)]
    pub loading: BTreeSet<Loading>,
}

impl Asset {
    pub fn is_loading(&self, marker: Loading) -> bool {
        self.loading.contains(&marker)
    }

    pub fn kind(&self) -> AssetKind {
        AssetKind::from_content_type(&self.content_type)
    }
}

/// Sortable list columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[value(name = "name")]
    DisplayName,
    #[value(name = "type")]
    ContentType,
    #[value(name = "date")]
    DateAdded,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::DisplayName => write!(f, "display_name"),
            SortKey::ContentType => write!(f, "content_type"),
            SortKey::DateAdded => write!(f, "date_added"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "asc"),
            Direction::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortParams {
    pub key: SortKey,
    pub direction: Direction,
}

impl Default for SortParams {
    fn default() -> Self {
        Self {
            key: SortKey::DateAdded,
            direction: Direction::Desc,
        }
    }
}

/// Coarse asset category used by the type filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Images,
    Documents,
    Audio,
    Video,
    Code,
    Other,
}

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        AssetKind::Images,
        AssetKind::Documents,
        AssetKind::Audio,
        AssetKind::Video,
        AssetKind::Code,
        AssetKind::Other,
    ];

    pub fn from_content_type(content_type: &str) -> Self {
        let (top, sub) = content_type.split_once('/').unwrap_or((content_type, ""));
        match top {
            "image" => AssetKind::Images,
            "audio" => AssetKind::Audio,
            "video" => AssetKind::Video,
            "text" if matches!(sub, "css" | "javascript" | "html") => AssetKind::Code,
            "application" if matches!(sub, "javascript" | "json" | "xml") => AssetKind::Code,
            "application" if sub == "pdf" || sub.starts_with("vnd.") || sub == "msword" => {
                AssetKind::Documents
            }
            "text" => AssetKind::Documents,
            _ => AssetKind::Other,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::Images => "Images",
            AssetKind::Documents => "Documents",
            AssetKind::Audio => "Audio",
            AssetKind::Video => "Video",
            AssetKind::Code => "Code",
            AssetKind::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Everything that decides which assets are visible and in what order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub sort: SortParams,
    /// Empty means no filtering.
    pub types: BTreeSet<AssetKind>,
}

/// Guess a MIME type from a file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "js" => "application/javascript",
        "json" => "application/json",
        "css" => "text/css",
        "html" | "htm" => "text/html",
        _ => "application/octet-stream",
    }
}
