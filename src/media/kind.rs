/// Picks how a record's primary asset is rendered
use crate::state::data::ArtRecord;

/// Rendering strategy for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Poster image in the grid, full video on demand
    Video,
    /// Still or animated image; GIFs skip resizing
    Image { animated: bool },
    /// Playback control only
    Audio,
    /// Interactive directory opened in an embedding surface
    EmbeddedDocument,
    /// Unrecognized rendition but a display image exists
    PlainImage,
    /// Nothing we can show
    Unsupported,
}

impl MediaKind {
    /// Classify by the first rendition's MIME type.
    ///
    /// Only the exact literals below are recognized; anything else falls
    /// back to the top-level display image, then to `Unsupported`.
    pub fn classify(record: &ArtRecord) -> Self {
        match record.primary_mime() {
            Some(mime) if mime.starts_with("video/") => MediaKind::Video,
            Some("image/jpeg") | Some("image/png") => MediaKind::Image { animated: false },
            Some("image/gif") => MediaKind::Image { animated: true },
            Some("audio/mpeg") => MediaKind::Audio,
            Some("application/x-directory") => MediaKind::EmbeddedDocument,
            _ if record.display_uri.as_deref().is_some_and(|uri| !uri.is_empty()) => {
                MediaKind::PlainImage
            }
            _ => MediaKind::Unsupported,
        }
    }

    /// Whether clicking the tile opens the detail dialog
    pub fn is_expandable(self) -> bool {
        matches!(
            self,
            MediaKind::Video | MediaKind::Image { .. } | MediaKind::EmbeddedDocument
        )
    }

    /// Whether the tile shows a preview image
    pub fn has_preview(self) -> bool {
        !matches!(self, MediaKind::Audio | MediaKind::Unsupported)
    }

    /// Placeholder text when the preview cannot be loaded
    pub fn unavailable_label(self) -> &'static str {
        match self {
            MediaKind::Video => "Video preview unavailable",
            _ => "Image unavailable",
        }
    }
}
