//! Testing utilities for Kedja.
//!
//! This module provides stages that make chain behavior observable:
//!
//! - [`RecordingStage`]: records every frame it sees and returns a fixed verdict
//! - [`CountingStage`]: counts invocations and returns a fixed verdict

use kedja_core::{Frame, Stage, Verdict};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// A stage that records all frames it receives and returns a fixed verdict.
///
/// Useful for verifying which stages the chain actually reached.
///
/// ```
/// use kedja::testing::RecordingStage;
/// use kedja::{DispatcherBuilder, ProceedOn};
/// use kedja::kedja_core::{Xdp, XdpVerdict};
///
/// let recorder = RecordingStage::new(XdpVerdict::Pass);
/// let dispatcher = DispatcherBuilder::<Xdp, Vec<u8>>::new()
///     .stage(recorder.clone(), ProceedOn::new([XdpVerdict::Pass]))
///     .build()
///     .unwrap();
///
/// dispatcher.dispatch(Some(&vec![0xff]));
/// assert_eq!(recorder.frames(), vec![vec![0xff]]);
/// ```
pub struct RecordingStage<E: Clone, V> {
    frames: Arc<Mutex<Vec<E>>>,
    verdict: V,
}

impl<E: Clone, V: Verdict> RecordingStage<E, V> {
    /// Create a recording stage that returns the given verdict.
    pub fn new(verdict: V) -> Self {
        Self {
            frames: Arc::new(Mutex::new(Vec::new())),
            verdict,
        }
    }

    /// Get a clone of the recorded frames.
    pub fn frames(&self) -> Vec<E> {
        self.frames.lock().unwrap().clone()
    }

    /// Get the number of recorded frames.
    pub fn count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    /// Clear all recorded frames.
    pub fn clear(&self) {
        self.frames.lock().unwrap().clear();
    }
}

impl<E: Clone, V: Verdict> Clone for RecordingStage<E, V> {
    fn clone(&self) -> Self {
        Self {
            frames: self.frames.clone(),
            verdict: self.verdict,
        }
    }
}

impl<E: Frame + Clone, V: Verdict> Stage<E> for RecordingStage<E, V> {
    type Verdict = V;

    fn process(&self, frame: &E) -> V {
        self.frames.lock().unwrap().push(frame.clone());
        self.verdict
    }
}

/// A stage that counts invocations and returns a fixed verdict.
pub struct CountingStage<V> {
    count: Arc<AtomicUsize>,
    verdict: V,
}

impl<V: Verdict> CountingStage<V> {
    /// Create a counting stage that returns the given verdict.
    pub fn new(verdict: V) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            verdict,
        }
    }

    /// Get the current invocation count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<V: Verdict> Clone for CountingStage<V> {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
            verdict: self.verdict,
        }
    }
}

impl<E: Frame, V: Verdict> Stage<E> for CountingStage<V> {
    type Verdict = V;

    fn process(&self, _frame: &E) -> V {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.verdict
    }
}
