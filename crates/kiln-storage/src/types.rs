//! Dropbox metadata and request/response shapes.

use serde::{Deserialize, Serialize};

/// Metadata for one entry returned by `list_folder`, `get_metadata`, or an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum Entry {
    File(FileMetadata),
    Folder(FolderMetadata),
    Deleted(DeletedMetadata),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub path_lower: Option<String>,
    #[serde(default)]
    pub path_display: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub client_modified: Option<String>,
    #[serde(default)]
    pub server_modified: Option<String>,
    #[serde(default)]
    pub rev: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMetadata {
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub path_lower: Option<String>,
    #[serde(default)]
    pub path_display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedMetadata {
    pub name: String,
    #[serde(default)]
    pub path_lower: Option<String>,
}

impl Entry {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => &f.name,
            Self::Folder(f) => &f.name,
            Self::Deleted(d) => &d.name,
        }
    }

    #[must_use]
    pub fn path_lower(&self) -> Option<&str> {
        match self {
            Self::File(f) => f.path_lower.as_deref(),
            Self::Folder(f) => f.path_lower.as_deref(),
            Self::Deleted(d) => d.path_lower.as_deref(),
        }
    }

    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }
}

/// Kind tag shown in the file explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Folder,
    File,
}

/// Explorer row: `{name, path_lower, type}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerItem {
    pub name: String,
    pub path_lower: Option<String>,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl ExplorerItem {
    /// Deleted entries are not shown.
    #[must_use]
    pub fn from_entry(entry: &Entry) -> Option<Self> {
        let kind = match entry {
            Entry::Folder(_) => EntryKind::Folder,
            Entry::File(_) => EntryKind::File,
            Entry::Deleted(_) => return None,
        };
        Some(Self {
            name: entry.name().to_string(),
            path_lower: entry.path_lower().map(str::to_string),
            kind,
        })
    }
}

/// One downloadable version of an asset, newest first in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub filename: String,
    pub filepath: String,
    pub thumbnail_url: Option<String>,
}

/// Position inside an open upload session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCursor {
    pub session_id: String,
    pub offset: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListFolderResult {
    pub entries: Vec<Entry>,
    pub cursor: String,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TemporaryLinkResult {
    pub link: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionStartResult {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct PathArg<'a> {
    pub path: &'a str,
}

/// Commit info for `upload` and `upload_session/finish`.
#[derive(Debug, Serialize)]
pub(crate) struct CommitInfo<'a> {
    pub path: &'a str,
    pub mode: &'static str,
    pub autorename: bool,
    pub mute: bool,
}

impl<'a> CommitInfo<'a> {
    /// Never overwrite: versioned names already keep uploads apart.
    pub const fn add(path: &'a str) -> Self {
        Self {
            path,
            mode: "add",
            autorename: false,
            mute: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn entries_parse_by_tag() {
        let raw = r#"[
            {".tag": "folder", "name": "Hero", "id": "id:1", "path_lower": "/game/hero", "path_display": "/Game/Hero"},
            {".tag": "file", "name": "a.png", "id": "id:2", "path_lower": "/game/a.png", "size": 2048, "rev": "015"},
            {".tag": "deleted", "name": "old.png", "path_lower": "/game/old.png"}
        ]"#;
        let entries: Vec<Entry> = serde_json::from_str(raw).unwrap();
        assert!(entries[0].is_folder());
        assert!(entries[1].is_file());
        assert_eq!(entries[1].name(), "a.png");
        assert!(matches!(&entries[1], Entry::File(f) if f.size == 2048));
        assert!(matches!(entries[2], Entry::Deleted(_)));
    }

    #[test]
    fn explorer_item_serializes_type_field() {
        let entry = Entry::Folder(FolderMetadata {
            name: "Hero".into(),
            id: "id:1".into(),
            path_lower: Some("/game/hero".into()),
            path_display: Some("/Game/Hero".into()),
        });
        let item = ExplorerItem::from_entry(&entry).unwrap();
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({"name": "Hero", "path_lower": "/game/hero", "type": "folder"})
        );
    }

    #[test]
    fn deleted_entries_are_not_listed() {
        let entry = Entry::Deleted(DeletedMetadata {
            name: "gone".into(),
            path_lower: None,
        });
        assert!(ExplorerItem::from_entry(&entry).is_none());
    }
}
