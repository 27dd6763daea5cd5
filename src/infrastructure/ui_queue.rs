//! Queue that hands work back to the UI task.
//!
//! Background tasks never touch UI state directly: they post to a
//! [`UiHandle`], and the event loop drains the matching [`UiQueue`] between
//! frames.

use tokio::sync::mpsc;
use tracing::trace;

/// Creates a connected handle/queue pair.
#[must_use]
pub fn ui_queue<T>() -> (UiHandle<T>, UiQueue<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UiHandle { tx }, UiQueue { rx })
}

/// Sending side, cloned into background tasks.
#[derive(Debug)]
pub struct UiHandle<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for UiHandle<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> UiHandle<T> {
    /// Posts an item to the UI task. Returns false if the UI is gone, in
    /// which case the item is dropped.
    pub fn post(&self, item: T) -> bool {
        if self.tx.send(item).is_err() {
            trace!("UI queue closed, dropping item");
            return false;
        }
        true
    }

    /// Returns true once the receiving side has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving side, owned by the UI event loop.
#[derive(Debug)]
pub struct UiQueue<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> UiQueue<T> {
    /// Waits for the next item.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Takes every item that is ready without waiting.
    pub fn drain(&mut self) -> Vec<T> {
        let mut items = Vec::new();
        while let Ok(item) = self.rx.try_recv() {
            items.push(item);
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_post_and_receive() {
        let (handle, mut queue) = ui_queue();
        assert!(handle.post(1));
        assert!(handle.clone().post(2));

        assert_eq!(queue.next().await, Some(1));
        assert_eq!(queue.drain(), vec![2]);
    }

    #[test]
    fn test_post_after_queue_dropped() {
        let (handle, queue) = ui_queue::<u8>();
        drop(queue);
        assert!(handle.is_closed());
        assert!(!handle.post(1));
    }
}
