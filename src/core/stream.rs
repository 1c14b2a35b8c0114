//! Streaming output simulator.
//!
//! A [`StreamTask`] reveals a scripted transcript one line per tick. The task
//! itself is a plain state machine; the front end decides how to wait between
//! ticks (`gloo-timers` in the browser, blocking sleeps in the REPL) and feeds
//! the resulting [`StreamEvent`]s back through
//! [`Interpreter::on_stream_event`](crate::core::Interpreter::on_stream_event).

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::models::BlockId;

// =============================================================================
// Cancellation
// =============================================================================

/// Shared flag that stops a stream from emitting further events.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// =============================================================================
// Events and Phases
// =============================================================================

/// Observable progress of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    /// No line revealed yet
    Pending,
    /// `revealed` of `total` lines shown
    Revealing { revealed: usize, total: usize },
    /// Completion event emitted
    Complete,
    /// Stopped before completion
    Cancelled,
}

/// One step of a stream, applied to the owning session.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Line `index` of the script became visible.
    Revealed {
        block: BlockId,
        index: usize,
        chunk: String,
    },
    /// Every line has been revealed; `lines` is the full script.
    Completed { block: BlockId, lines: Vec<String> },
}

impl StreamEvent {
    pub fn block(&self) -> BlockId {
        match self {
            Self::Revealed { block, .. } | Self::Completed { block, .. } => *block,
        }
    }
}

// =============================================================================
// Stream Task
// =============================================================================

/// Reveals `lines` into `block`, one line per interval.
#[derive(Debug)]
pub struct StreamTask {
    block: BlockId,
    lines: Vec<String>,
    next: usize,
    completed: bool,
    interval_ms: u32,
    cancel: CancelToken,
}

impl StreamTask {
    pub fn new(block: BlockId, lines: Vec<String>, interval_ms: u32) -> Self {
        Self {
            block,
            lines,
            next: 0,
            completed: false,
            interval_ms,
            cancel: CancelToken::new(),
        }
    }

    pub fn block(&self) -> BlockId {
        self.block
    }

    /// Delay between two reveals.
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Handle that cancels this task from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn phase(&self) -> StreamPhase {
        if self.completed {
            StreamPhase::Complete
        } else if self.cancel.is_cancelled() {
            StreamPhase::Cancelled
        } else if self.next == 0 {
            StreamPhase::Pending
        } else {
            StreamPhase::Revealing {
                revealed: self.next,
                total: self.lines.len(),
            }
        }
    }

    /// Whether no further events will be produced.
    pub fn is_finished(&self) -> bool {
        self.completed || self.cancel.is_cancelled()
    }

    /// Whether the next tick should wait one interval first.
    ///
    /// Every reveal waits; the completion event follows the last reveal
    /// immediately.
    pub fn needs_delay(&self) -> bool {
        !self.is_finished() && self.next < self.lines.len()
    }

    /// Advance by one step.
    pub fn tick(&mut self) -> Option<StreamEvent> {
        if self.is_finished() {
            return None;
        }

        if let Some(chunk) = self.lines.get(self.next) {
            let index = self.next;
            self.next += 1;
            tracing::trace!(block = %self.block, index, "stream reveal");
            return Some(StreamEvent::Revealed {
                block: self.block,
                index,
                chunk: chunk.clone(),
            });
        }

        self.completed = true;
        Some(StreamEvent::Completed {
            block: self.block,
            lines: self.lines.clone(),
        })
    }
}

/// Run a task to completion.
///
/// `sleep` produces the delay future for one interval. `sink` receives each
/// event and returns `false` once its session is gone, which cancels the task.
pub async fn drive<S, F, K>(mut task: StreamTask, mut sleep: S, mut sink: K)
where
    S: FnMut(u32) -> F,
    F: Future<Output = ()>,
    K: FnMut(StreamEvent) -> bool,
{
    loop {
        if task.needs_delay() {
            sleep(task.interval_ms()).await;
        }
        let Some(event) = task.tick() else {
            break;
        };
        if !sink(event) {
            tracing::debug!(block = %task.block(), "stream sink closed, cancelling");
            task.cancel_token().cancel();
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {}", i)).collect()
    }

    #[test]
    fn test_reveals_then_completes() {
        let mut task = StreamTask::new(BlockId::next(), lines(2), 100);
        assert_eq!(task.phase(), StreamPhase::Pending);
        assert!(task.needs_delay());

        assert!(matches!(
            task.tick(),
            Some(StreamEvent::Revealed { index: 0, ref chunk, .. }) if chunk == "line 0"
        ));
        assert_eq!(
            task.phase(),
            StreamPhase::Revealing {
                revealed: 1,
                total: 2
            }
        );
        assert!(matches!(
            task.tick(),
            Some(StreamEvent::Revealed { index: 1, .. })
        ));
        assert!(!task.needs_delay());
        assert!(matches!(
            task.tick(),
            Some(StreamEvent::Completed { ref lines, .. }) if lines.len() == 2
        ));
        assert_eq!(task.phase(), StreamPhase::Complete);
        assert!(task.tick().is_none());
    }

    #[test]
    fn test_empty_script_completes_immediately() {
        let mut task = StreamTask::new(BlockId::next(), Vec::new(), 100);
        assert!(!task.needs_delay());
        assert!(matches!(task.tick(), Some(StreamEvent::Completed { .. })));
    }

    #[test]
    fn test_cancelled_task_is_silent() {
        let mut task = StreamTask::new(BlockId::next(), lines(3), 100);
        task.tick();
        task.cancel_token().cancel();
        assert_eq!(task.phase(), StreamPhase::Cancelled);
        assert!(task.is_finished());
        assert!(task.tick().is_none());
    }

    #[tokio::test]
    async fn test_drive_delivers_every_event() {
        let block = BlockId::next();
        let task = StreamTask::new(block, lines(3), 1);
        let mut events = Vec::new();
        let mut sleeps = 0;

        drive(
            task,
            |ms| {
                sleeps += 1;
                tokio::time::sleep(std::time::Duration::from_millis(ms.into()))
            },
            |event| {
                events.push(event);
                true
            },
        )
        .await;

        assert_eq!(sleeps, 3);
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.block() == block));
        assert!(matches!(events.last(), Some(StreamEvent::Completed { .. })));
    }

    #[tokio::test]
    async fn test_drive_stops_when_sink_closes() {
        let task = StreamTask::new(BlockId::next(), lines(5), 1);
        let token = task.cancel_token();
        let mut delivered = 0;

        drive(
            task,
            |_| async {},
            |_| {
                delivered += 1;
                delivered < 2
            },
        )
        .await;

        assert_eq!(delivered, 2);
        assert!(token.is_cancelled());
    }
}
