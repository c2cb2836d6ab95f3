//! Value-with-subscribers container.
//!
//! `Observable<T>` holds the latest value of some state behind a
//! `tokio::sync::watch` channel and keeps a version counter, so consumers
//! can read the current value at any time or `await` the next change
//! without polling.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A shared, versioned value with change notification.
///
/// Cloning an `Observable` yields another handle to the same value.
pub struct Observable<T> {
    inner: Arc<ObservableInner<T>>,
}

struct ObservableInner<T> {
    tx: watch::Sender<T>,
    version: AtomicU64,
}

// -- Observable ---------------------------------------------------------

impl<T> Observable<T> {
    /// Create a new `Observable` with the given initial value.
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self {
            inner: Arc::new(ObservableInner {
                tx,
                version: AtomicU64::new(0),
            }),
        }
    }

    /// Replace the stored value and notify all subscribers.
    ///
    /// The version is bumped while the write lock is held, so a subscriber
    /// that sees the new value also sees the new version.
    pub fn set(&self, value: T) {
        self.inner.tx.send_modify(|current| {
            *current = value;
            self.inner.version.fetch_add(1, Ordering::SeqCst);
        });
    }

    /// Replace the stored value only when `apply` returns `Some`.
    ///
    /// `apply` runs while the channel's write lock is held, so decisions it
    /// makes cannot interleave with another `set_if` on the same value.
    /// Returns whether the value was replaced.
    pub fn set_if(&self, apply: impl FnOnce(&T) -> Option<T>) -> bool {
        self.inner.tx.send_if_modified(|current| match apply(&*current) {
            Some(next) => {
                *current = next;
                self.inner.version.fetch_add(1, Ordering::SeqCst);
                true
            }
            None => false,
        })
    }

    /// Number of times the value has been replaced.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::SeqCst)
    }

    /// Subscribe to change notifications.
    ///
    /// The receiver starts out having seen the current value; call
    /// `changed().await` to wait for the next one.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.inner.tx.subscribe()
    }
}

impl<T: Clone> Observable<T> {
    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.inner.tx.borrow().clone()
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// A stream yielding the current value, then every subsequent one.
    pub fn stream(&self) -> WatchStream<T> {
        WatchStream::new(self.subscribe())
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn test_subscriber_sees_latest_value() {
        let value = Observable::new(1);
        let mut rx = value.subscribe();

        value.set(2);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 2);
        assert_eq!(value.get(), 2);
        assert_eq!(value.version(), 1);
    }

    #[test]
    fn test_set_if_skips_when_declined() {
        let value = Observable::new(vec![1, 2]);
        let rx = value.subscribe();

        assert!(!value.set_if(|_| None));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(value.version(), 0);

        assert!(value.set_if(|current| Some(current.iter().map(|v| v * 10).collect())));
        assert!(rx.has_changed().unwrap());
        assert_eq!(value.get(), vec![10, 20]);
        assert_eq!(value.version(), 1);
    }

    #[tokio::test]
    async fn test_stream_starts_with_current_value() {
        let value = Observable::new("a".to_string());
        let mut stream = value.stream();
        assert_eq!(stream.next().await.as_deref(), Some("a"));

        value.set("b".to_string());
        assert_eq!(stream.next().await.as_deref(), Some("b"));
    }

    #[test]
    fn test_clones_share_state() {
        let value = Observable::new(0u8);
        let other = value.clone();
        other.set(7);
        assert_eq!(value.get(), 7);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_version_is_current_when_value_is_seen() {
        let value = Observable::new(0u64);
        let mut rx = value.subscribe();

        let writer = value.clone();
        let task = tokio::spawn(async move {
            for n in 1..=500 {
                writer.set(n);
                tokio::task::yield_now().await;
            }
        });

        while rx.changed().await.is_ok() {
            let seen = *rx.borrow_and_update();
            assert!(value.version() >= seen, "saw value {seen} at an older version");
            if seen == 500 {
                break;
            }
        }
        task.await.unwrap();
        assert_eq!(value.version(), 500);
    }
}
