//! Arrival-order stereo frame queue.
//!
//! Uses index-based separation for better performance:
//! - HeapRb stores lightweight metadata (timestamp + slab key)
//! - Slab stores actual StereoFrame data
//!
//! This avoids moving large image payloads during queue operations. Frames
//! come out in the order they were enqueued; a full queue evicts the oldest
//! frame so the stream keeps up with the producer.

use std::fmt;
use std::sync::{Arc, Mutex};

use contracts::{FrameSource, StereoFrame};
use ringbuf::{traits::*, HeapRb};
use slab::Slab;

/// Lightweight metadata stored in the ring buffer
#[derive(Debug, Clone, Copy)]
struct FrameMeta {
    /// Capture timestamp, kept for diagnostics
    timestamp: f64,
    /// Key into the slab storage
    slab_key: usize,
}

/// Bounded arrival-order buffer of stereo frames
pub struct FrameQueue {
    /// Ring buffer of metadata (timestamp + slab key)
    index: HeapRb<FrameMeta>,
    /// Actual frame storage
    storage: Slab<StereoFrame>,
    dropped_count: u64,
    out_of_order_count: u64,
    last_timestamp: Option<f64>,
}

impl fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameQueue")
            .field("len", &self.index.occupied_len())
            .field("dropped", &self.dropped_count)
            .finish()
    }
}

impl FrameQueue {
    /// Create a queue holding at most `capacity` frames
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HeapRb::new(capacity.max(1)),
            storage: Slab::with_capacity(capacity.max(1)),
            dropped_count: 0,
            out_of_order_count: 0,
            last_timestamp: None,
        }
    }

    /// Enqueue a frame
    ///
    /// If the queue is full, the oldest frame is evicted and counted.
    #[inline]
    pub fn push(&mut self, frame: StereoFrame) {
        let timestamp = frame.timestamp;

        // Track out-of-order arrivals
        if let Some(last) = self.last_timestamp {
            if timestamp < last {
                self.out_of_order_count += 1;
            }
        }
        self.last_timestamp = Some(timestamp);

        // If full, remove oldest entry from both index and storage
        if self.index.is_full() {
            if let Some(old_meta) = self.index.try_pop() {
                self.storage.remove(old_meta.slab_key);
            }
            self.dropped_count += 1;
        }

        let slab_key = self.storage.insert(frame);
        let _ = self.index.try_push(FrameMeta {
            timestamp,
            slab_key,
        });
    }

    /// Dequeue the oldest frame by arrival order
    #[inline]
    pub fn pop(&mut self) -> Option<StereoFrame> {
        let meta = self.index.try_pop()?;
        Some(self.storage.remove(meta.slab_key))
    }

    /// Peek at the oldest frame's timestamp without removing it
    #[inline]
    pub fn front_timestamp(&self) -> Option<f64> {
        self.index.iter().next().map(|meta| meta.timestamp)
    }

    /// Number of buffered frames
    #[inline]
    pub fn len(&self) -> usize {
        self.index.occupied_len()
    }

    /// Check if the queue is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Frames evicted because the queue was full
    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count
    }

    /// Frames that arrived with a timestamp behind their predecessor
    #[inline]
    pub fn out_of_order_count(&self) -> u64 {
        self.out_of_order_count
    }
}

/// Cloneable, thread-safe handle over a [`FrameQueue`].
///
/// The camera pipeline pushes from its capture context while the gate pops
/// from the coordinator thread; the mutex is held only for the index/slab
/// bookkeeping, never across a blocking wait.
#[derive(Clone)]
pub struct SharedFrameQueue {
    inner: Arc<Mutex<FrameQueue>>,
}

impl SharedFrameQueue {
    /// Create a shared queue holding at most `capacity` frames
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FrameQueue::new(capacity))),
        }
    }

    /// Enqueue a frame (producer side)
    pub fn push(&self, frame: StereoFrame) {
        self.lock().push(frame);
    }

    /// Frames evicted because the queue was full
    pub fn dropped_count(&self) -> u64 {
        self.lock().dropped_count()
    }

    /// Frames that arrived behind their predecessor
    pub fn out_of_order_count(&self) -> u64 {
        self.lock().out_of_order_count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FrameQueue> {
        // A poisoned queue only means a producer panicked mid-push; the
        // bookkeeping is still consistent
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FrameSource for SharedFrameQueue {
    fn try_next(&mut self) -> Option<StereoFrame> {
        self.lock().pop()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(t: f64) -> StereoFrame {
        StereoFrame::new(t, vec![0u8; 1024], vec![0u8; 1024])
    }

    #[test]
    fn pops_in_arrival_order() {
        let mut queue = FrameQueue::new(8);
        queue.push(frame(1.0));
        queue.push(frame(3.0));
        queue.push(frame(2.0));

        assert_eq!(queue.pop().unwrap().timestamp, 1.0);
        assert_eq!(queue.pop().unwrap().timestamp, 3.0);
        assert_eq!(queue.pop().unwrap().timestamp, 2.0);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn full_queue_evicts_oldest() {
        let mut queue = FrameQueue::new(2);
        queue.push(frame(1.0));
        queue.push(frame(2.0));
        queue.push(frame(3.0));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped_count(), 1);
        assert_eq!(queue.pop().unwrap().timestamp, 2.0);
        assert_eq!(queue.pop().unwrap().timestamp, 3.0);
    }

    #[test]
    fn counts_out_of_order_arrivals() {
        let mut queue = FrameQueue::new(8);
        queue.push(frame(1.0));
        queue.push(frame(3.0));
        queue.push(frame(2.0));

        assert_eq!(queue.out_of_order_count(), 1);
    }

    #[test]
    fn front_timestamp_matches_next_pop() {
        let mut queue = FrameQueue::new(4);
        assert_eq!(queue.front_timestamp(), None);

        queue.push(frame(0.5));
        queue.push(frame(0.6));
        assert_eq!(queue.front_timestamp(), Some(0.5));
        queue.pop();
        assert_eq!(queue.front_timestamp(), Some(0.6));
    }

    #[test]
    fn shared_queue_is_a_frame_source() {
        let queue = SharedFrameQueue::with_capacity(4);
        let producer = queue.clone();
        producer.push(frame(1.0));
        producer.push(frame(2.0));

        let mut source = queue;
        assert_eq!(FrameSource::len(&source), 2);
        assert_eq!(source.try_next().unwrap().timestamp, 1.0);
        assert_eq!(source.try_next().unwrap().timestamp, 2.0);
        assert!(source.try_next().is_none());
    }
}
