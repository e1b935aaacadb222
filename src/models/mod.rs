mod identifiers;
pub mod navigation;

pub use identifiers::{ContentId, MediaItemId};
pub use navigation::{Destination, NavigationDecision};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::constants::EXTERNAL_STREAM_PROVIDER_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Movie,
    Episode,
    Video,
    Series,
    Season,
    Recording,
    TvChannel,
    Program,
    Audio,
    #[serde(other)]
    Other,
}

impl MediaKind {
    /// Kinds an external player application can be handed directly.
    pub fn supports_external_player(self) -> bool {
        matches!(
            self,
            MediaKind::Movie
                | MediaKind::Episode
                | MediaKind::Video
                | MediaKind::Series
                | MediaKind::Season
                | MediaKind::Recording
                | MediaKind::TvChannel
                | MediaKind::Program
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: MediaItemId,
    #[serde(default)]
    pub name: Option<String>,
    pub kind: MediaKind,
    #[serde(default)]
    pub provider_ids: HashMap<String, String>,
}

impl MediaItem {
    pub fn new(id: impl Into<MediaItemId>, kind: MediaKind) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind,
            provider_ids: HashMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_provider_id(mut self, provider: impl Into<String>, id: impl Into<String>) -> Self {
        self.provider_ids.insert(provider.into(), id.into());
        self
    }

    pub fn is_audio(&self) -> bool {
        self.kind == MediaKind::Audio
    }

    pub fn supports_external_player(&self) -> bool {
        self.kind.supports_external_player()
    }

    pub fn external_stream_id(&self) -> Option<ContentId> {
        self.provider_ids
            .get(EXTERNAL_STREAM_PROVIDER_KEY)
            .map(|id| ContentId::new(id.as_str()))
    }
}

/// A single "play" action as requested by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRequest {
    pub items: Vec<MediaItem>,
    pub items_position: usize,
    pub start_position: Option<Duration>,
    pub replace: bool,
    pub shuffle: bool,
}

impl PlaybackRequest {
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items,
            items_position: 0,
            start_position: None,
            replace: false,
            shuffle: false,
        }
    }

    pub fn at(mut self, items_position: usize) -> Self {
        self.items_position = items_position;
        self
    }

    pub fn starting_at(mut self, start_position: Duration) -> Self {
        self.start_position = Some(start_position);
        self
    }

    pub fn replacing(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    pub fn shuffled(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}
