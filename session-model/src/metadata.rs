//! Media item metadata record

use serde::{Deserialize, Serialize};

use crate::Extras;

/// Metadata for the item a session is currently playing
///
/// The dispatcher treats this as opaque and forwards it as-is; the named
/// fields cover what controllers commonly report and anything else lives
/// in `extras`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Controller-assigned media id
    pub media_id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Item duration in milliseconds
    pub duration_ms: Option<u64>,
    /// Album or item art URI
    pub art_uri: Option<String>,
    /// Everything else the controller reported
    #[serde(default)]
    pub extras: Extras,
}

impl Metadata {
    /// Create an empty Metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Create Metadata with a title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn media_id(mut self, media_id: impl Into<String>) -> Self {
        self.media_id = Some(media_id.into());
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Check if the record carries anything at all
    pub fn is_empty(&self) -> bool {
        self.media_id.is_none()
            && self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.duration_ms.is_none()
            && self.art_uri.is_none()
            && self.extras.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        assert!(Metadata::new().is_empty());
    }

    #[test]
    fn test_builder() {
        let metadata = Metadata::with_title("Song")
            .artist("Band")
            .album("Record")
            .duration_ms(180_000);

        assert_eq!(metadata.title.as_deref(), Some("Song"));
        assert_eq!(metadata.artist.as_deref(), Some("Band"));
        assert_eq!(metadata.duration_ms, Some(180_000));
        assert!(!metadata.is_empty());
    }

    #[test]
    fn test_extras_alone_make_it_non_empty() {
        let metadata = Metadata {
            extras: Extras::new().with("explicit", true),
            ..Default::default()
        };
        assert!(!metadata.is_empty());
    }

    #[test]
    fn test_missing_extras_deserialize_to_empty() {
        let metadata: Metadata = serde_json::from_str(
            r#"{"media_id":null,"title":"T","artist":null,"album":null,"duration_ms":null,"art_uri":null}"#,
        )
        .unwrap();
        assert_eq!(metadata.title.as_deref(), Some("T"));
        assert!(metadata.extras.is_empty());
    }
}
