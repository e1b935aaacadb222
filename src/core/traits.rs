use crate::models::{Destination, MediaItem};

/// Queue backing the video players. Receives the normalized item list
/// before any video destination is chosen.
pub trait VideoQueue: Send + Sync {
    fn set_queue(&self, items: Vec<MediaItem>, position: usize);
}

/// Audio playback manager. Owns its own shuffling.
pub trait AudioQueue: Send + Sync {
    fn play_now(&self, items: Vec<MediaItem>, position: usize, shuffle: bool);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: Destination, replace: bool);

    fn go_back(&self);
}
