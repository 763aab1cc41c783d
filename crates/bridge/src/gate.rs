//! Frame gate - single-slot buffer with a causal release rule.

use contracts::{FrameSource, StereoFrame};
use tracing::trace;

/// Gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No frame buffered
    Empty,
    /// One frame buffered, waiting for a bracketing inertial sample
    Pending,
}

/// Single-slot camera frame buffer.
///
/// Holds at most one frame at any time. While a frame is pending the external
/// queue is not drained, which pushes back-pressure onto the queue rather than
/// the sensor. A pending frame whose timestamp is never exceeded by a later
/// inertial sample stays pending; there is no timeout.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Option<StereoFrame>,
}

impl FrameGate {
    /// Create an empty gate
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Pull at most one frame from the queue into the empty slot.
    ///
    /// No-op while a frame is already pending or the queue is empty.
    pub fn try_acquire(&mut self, source: &mut dyn FrameSource) {
        if self.pending.is_some() {
            return;
        }
        if let Some(frame) = source.try_next() {
            trace!(timestamp = frame.timestamp, "frame buffered in gate");
            self.pending = Some(frame);
        }
    }

    /// Whether the pending frame may be released.
    ///
    /// True iff a frame is pending and its timestamp is strictly less than
    /// `current_inertial_timestamp`. Equality is not ready: the estimator
    /// requires an inertial sample strictly ahead of the frame.
    pub fn is_ready(&self, current_inertial_timestamp: f64) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|frame| frame.timestamp < current_inertial_timestamp)
    }

    /// Return and clear the pending frame.
    ///
    /// Always clears the slot; a frame is attempted at most once regardless of
    /// what the caller does with it afterwards.
    pub fn take(&mut self) -> Option<StereoFrame> {
        self.pending.take()
    }

    /// Current gate state
    pub fn state(&self) -> GateState {
        if self.pending.is_some() {
            GateState::Pending
        } else {
            GateState::Empty
        }
    }

    /// Timestamp of the pending frame, if any
    pub fn pending_timestamp(&self) -> Option<f64> {
        self.pending.as_ref().map(|frame| frame.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct QueueStub {
        frames: VecDeque<StereoFrame>,
    }

    impl QueueStub {
        fn new(timestamps: &[f64]) -> Self {
            Self {
                frames: timestamps
                    .iter()
                    .map(|&t| StereoFrame::new(t, vec![0u8; 4], vec![0u8; 4]))
                    .collect(),
            }
        }
    }

    impl FrameSource for QueueStub {
        fn try_next(&mut self) -> Option<StereoFrame> {
            self.frames.pop_front()
        }

        fn len(&self) -> usize {
            self.frames.len()
        }
    }

    #[test]
    fn acquire_takes_exactly_one_frame() {
        let mut queue = QueueStub::new(&[1.0, 2.0, 3.0]);
        let mut gate = FrameGate::new();

        gate.try_acquire(&mut queue);
        assert_eq!(gate.state(), GateState::Pending);
        assert_eq!(queue.len(), 2);

        // A second acquire while pending must not drain the queue
        gate.try_acquire(&mut queue);
        assert_eq!(queue.len(), 2);
        assert_eq!(gate.pending_timestamp(), Some(1.0));
    }

    #[test]
    fn acquire_on_empty_queue_is_noop() {
        let mut queue = QueueStub::new(&[]);
        let mut gate = FrameGate::new();

        gate.try_acquire(&mut queue);
        assert_eq!(gate.state(), GateState::Empty);
        assert!(!gate.is_ready(10.0));
    }

    #[test]
    fn strict_timestamp_release() {
        let mut queue = QueueStub::new(&[1.0]);
        let mut gate = FrameGate::new();
        gate.try_acquire(&mut queue);

        assert!(!gate.is_ready(0.5));
        // Equality does not release the frame
        assert!(!gate.is_ready(1.0));
        assert!(gate.is_ready(1.0 + f64::EPSILON * 2.0));
        assert!(gate.is_ready(2.0));
    }

    #[test]
    fn take_clears_the_slot() {
        let mut queue = QueueStub::new(&[1.0, 5.0]);
        let mut gate = FrameGate::new();
        gate.try_acquire(&mut queue);

        let frame = gate.take().unwrap();
        assert_eq!(frame.timestamp, 1.0);
        assert_eq!(gate.state(), GateState::Empty);
        assert!(gate.take().is_none());

        // Next acquire moves on to the next queued frame
        gate.try_acquire(&mut queue);
        assert_eq!(gate.pending_timestamp(), Some(5.0));
    }

    #[test]
    fn pending_frame_survives_ineligible_samples() {
        let mut queue = QueueStub::new(&[2.0]);
        let mut gate = FrameGate::new();

        for inertial_t in [0.5, 1.0, 1.5, 2.0] {
            gate.try_acquire(&mut queue);
            assert!(!gate.is_ready(inertial_t));
            assert_eq!(gate.state(), GateState::Pending);
        }

        assert!(gate.is_ready(2.5));
    }
}
