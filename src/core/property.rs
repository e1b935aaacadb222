use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::watch;

/// Single-writer observable value.
///
/// Every subscriber sees the latest value immediately on subscription and is
/// woken on each subsequent change. Intermediate values may be coalesced: a
/// slow subscriber only ever observes the most recent value.
pub struct Property<T: Clone + Send + Sync> {
    sender: Arc<watch::Sender<T>>,
    name: String,
}

pub struct PropertySubscriber<T> {
    receiver: watch::Receiver<T>,
}

// PropertySubscriber intentionally does not implement Clone.
// Each subscriber tracks its own "seen" version; call Property::subscribe() again instead.

impl<T: Clone + Send + Sync> PropertySubscriber<T> {
    /// Latest value, marking it as seen.
    pub fn current(&mut self) -> T {
        self.receiver.borrow_and_update().clone()
    }

    /// Wait until the value changes after the last one seen.
    /// Returns false once the owning property is gone.
    pub async fn wait_for_change(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    pub fn has_changed(&self) -> bool {
        // A closed channel reports no further changes
        self.receiver.has_changed().unwrap_or(false)
    }
}

impl<T: Clone + Send + Sync> Property<T> {
    pub fn new(initial_value: T, name: impl Into<String>) -> Self {
        let (sender, _) = watch::channel(initial_value);
        Self {
            sender: Arc::new(sender),
            name: name.into(),
        }
    }

    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Read the current value in place without cloning it.
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.sender.borrow())
    }

    pub fn set(&self, new_value: T) {
        self.sender.send_replace(new_value);
    }

    /// Apply `updater` in place; subscribers are notified only when it returns true.
    pub fn update_if<F>(&self, updater: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        self.sender.send_if_modified(updater)
    }

    pub fn subscribe(&self) -> PropertySubscriber<T> {
        PropertySubscriber {
            receiver: self.sender.subscribe(),
        }
    }

}

impl<T: Clone + Send + Sync + Debug> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property({}: {:?})", self.name, *self.sender.borrow())
    }
}
