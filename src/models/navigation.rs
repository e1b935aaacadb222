use std::time::Duration;

use super::ContentId;

/// Opaque navigation token handed to the navigator.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    NowPlaying,
    ExternalPlayer {
        start_position: Duration,
    },
    ExternalStreamSelector {
        content_id: ContentId,
        item_index: usize,
        start_position: Option<Duration>,
    },
    VideoPlayer {
        item_index: usize,
        start_position: Option<Duration>,
        stream_url: Option<String>,
    },
    LegacyVideoPlayer {
        item_index: usize,
        start_position: Option<Duration>,
        stream_url: Option<String>,
    },
}

/// Outcome of routing one playback request.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationDecision {
    NoOp,
    PlayAudioQueue,
    ExternalPlayerLaunch {
        start_position: Duration,
    },
    StreamSelectorLaunch {
        content_id: ContentId,
        item_index: usize,
        start_position: Option<Duration>,
        replace: bool,
    },
    NewVideoPlayerLaunch {
        item_index: usize,
        start_position: Option<Duration>,
        replace: bool,
        stream_url: Option<String>,
    },
    LegacyVideoPlayerLaunch {
        item_index: usize,
        start_position: Option<Duration>,
        replace: bool,
        stream_url: Option<String>,
    },
}

impl NavigationDecision {
    /// Destination and replace flag to navigate to, if any.
    pub fn destination(&self) -> Option<(Destination, bool)> {
        match self {
            NavigationDecision::NoOp => None,
            NavigationDecision::PlayAudioQueue => Some((Destination::NowPlaying, false)),
            NavigationDecision::ExternalPlayerLaunch { start_position } => Some((
                Destination::ExternalPlayer {
                    start_position: *start_position,
                },
                false,
            )),
            NavigationDecision::StreamSelectorLaunch {
                content_id,
                item_index,
                start_position,
                replace,
            } => Some((
                Destination::ExternalStreamSelector {
                    content_id: content_id.clone(),
                    item_index: *item_index,
                    start_position: *start_position,
                },
                *replace,
            )),
            NavigationDecision::NewVideoPlayerLaunch {
                item_index,
                start_position,
                replace,
                stream_url,
            } => Some((
                Destination::VideoPlayer {
                    item_index: *item_index,
                    start_position: *start_position,
                    stream_url: stream_url.clone(),
                },
                *replace,
            )),
            NavigationDecision::LegacyVideoPlayerLaunch {
                item_index,
                start_position,
                replace,
                stream_url,
            } => Some((
                Destination::LegacyVideoPlayer {
                    item_index: *item_index,
                    start_position: *start_position,
                    stream_url: stream_url.clone(),
                },
                *replace,
            )),
        }
    }
}
