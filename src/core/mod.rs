pub mod property;
pub mod traits;

pub use property::{Property, PropertySubscriber};
pub use traits::{AudioQueue, Navigator, VideoQueue};
