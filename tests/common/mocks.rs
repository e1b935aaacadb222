use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use stream_launcher::core::{AudioQueue, Navigator, VideoQueue};
use stream_launcher::models::{Destination, MediaItem};

#[derive(Default)]
pub struct RecordingQueue {
    pub video: Mutex<Vec<(Vec<MediaItem>, usize)>>,
    pub audio: Mutex<Vec<(Vec<MediaItem>, usize, bool)>>,
}

impl VideoQueue for RecordingQueue {
    fn set_queue(&self, items: Vec<MediaItem>, position: usize) {
        self.video.lock().unwrap().push((items, position));
    }
}

impl AudioQueue for RecordingQueue {
    fn play_now(&self, items: Vec<MediaItem>, position: usize, shuffle: bool) {
        self.audio.lock().unwrap().push((items, position, shuffle));
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub navigations: Mutex<Vec<(Destination, bool)>>,
    back_count: AtomicUsize,
}

impl RecordingNavigator {
    pub fn navigations(&self) -> Vec<(Destination, bool)> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn back_count(&self) -> usize {
        self.back_count.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: Destination, replace: bool) {
        self.navigations.lock().unwrap().push((destination, replace));
    }

    fn go_back(&self) {
        self.back_count.fetch_add(1, Ordering::SeqCst);
    }
}
