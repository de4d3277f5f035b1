#![forbid(unsafe_code)]

//! Frame-driven scheduler for self-re-arming tasks.
//!
//! A task is armed for the *next* frame. When a frame runs, every armed task
//! is taken out of the queue and invoked once; a task that wants to keep
//! running answers [`Rearm::Continue`] and is queued again for the following
//! frame. Tasks armed while a frame is running (or between frames) also wait
//! for the next frame.
//!
//! Task identity de-duplicates: arming a task that is already queued is a
//! no-op, so a toggle that is switched off and on again before the task has
//! observed the change cannot start a second copy.

use tracing::trace;

/// The repeating tasks the sketch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskId {
    /// Advance and redraw the particle field.
    ParticleAdvance,
    /// Periodically draw the current pattern at a random point.
    AutoPattern,
}

/// A task's answer after running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rearm {
    /// Run again next frame.
    Continue,
    /// Stop until explicitly armed again.
    Stop,
}

/// Queue of tasks armed for the next frame.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    armed: Vec<TaskId>,
    frame: u64,
}

impl FrameScheduler {
    /// Create a scheduler with nothing armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` for the next frame.
    ///
    /// Returns `false` if it was already queued.
    pub fn arm(&mut self, task: TaskId) -> bool {
        if self.armed.contains(&task) {
            return false;
        }
        self.armed.push(task);
        true
    }

    /// True if `task` will run next frame.
    pub fn is_armed(&self, task: TaskId) -> bool {
        self.armed.contains(&task)
    }

    /// Number of frames run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run one frame.
    ///
    /// Each queued task is invoked once, in arming order, and re-queued when
    /// `run` answers [`Rearm::Continue`].
    pub fn run_frame(&mut self, mut run: impl FnMut(TaskId) -> Rearm) {
        self.frame += 1;
        let due = std::mem::take(&mut self.armed);
        trace!(frame = self.frame, tasks = due.len(), "scheduler frame");
        for task in due {
            if run(task) == Rearm::Continue {
                self.arm(task);
            }
        }
    }
}
