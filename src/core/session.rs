//! Per-window terminal state.

use std::collections::VecDeque;

use crate::core::history::{self, HistoryDirection, HistoryRecall};
use crate::models::{BlockId, CommandBlock};

/// The streaming block currently being revealed.
#[derive(Clone, Debug)]
pub(crate) struct InFlight {
    pub block: BlockId,
    pub command: String,
    pub started_ms: f64,
}

/// State owned by one terminal window.
///
/// Invariants:
/// - `history` never holds a blank line
/// - at most one block is streaming, and it is the newest block
/// - `cwd` is always a directory of the filesystem it was created against
#[derive(Clone, Debug)]
pub struct Session {
    cwd: String,
    history: Vec<String>,
    history_cursor: Option<usize>,
    blocks: VecDeque<CommandBlock>,
    max_blocks: usize,
    in_flight: Option<InFlight>,
    queue: VecDeque<String>,
}

impl Session {
    /// Create a session; the caller guarantees `cwd` is a directory.
    pub(crate) fn new(cwd: impl Into<String>, max_blocks: usize) -> Self {
        Self {
            cwd: cwd.into(),
            history: Vec::new(),
            history_cursor: None,
            blocks: VecDeque::new(),
            max_blocks: max_blocks.max(1),
            in_flight: None,
            queue: VecDeque::new(),
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Submitted command lines, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.history_cursor
    }

    /// Blocks in display order, oldest first.
    pub fn blocks(&self) -> impl Iterator<Item = &CommandBlock> {
        self.blocks.iter()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, id: BlockId) -> Option<&CommandBlock> {
        self.position(id).map(|i| &self.blocks[i])
    }

    pub fn last_block(&self) -> Option<&CommandBlock> {
        self.blocks.back()
    }

    /// Whether a streaming block is open.
    pub fn is_streaming(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Lines waiting for the current stream to finish.
    pub fn queued(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    // =========================================================================
    // History Navigation
    // =========================================================================

    /// Step through history with the arrow keys.
    pub fn navigate_history(&mut self, direction: HistoryDirection) -> HistoryRecall {
        history::navigate(&self.history, &mut self.history_cursor, direction)
    }

    // =========================================================================
    // Mutation (interpreter only)
    // =========================================================================

    pub(crate) fn set_cwd(&mut self, cwd: String) {
        self.cwd = cwd;
    }

    /// Append a submitted line and stop history navigation.
    pub(crate) fn record_history(&mut self, line: &str) {
        let line = line.trim();
        if !line.is_empty() {
            self.history.push(line.to_string());
        }
        self.reset_cursor();
    }

    /// Stop history navigation without recording anything.
    pub(crate) fn reset_cursor(&mut self) {
        self.history_cursor = None;
    }

    /// Append a block, evicting the oldest ones past capacity.
    pub(crate) fn push_block(&mut self, block: CommandBlock) -> BlockId {
        let id = block.id;
        self.blocks.push_back(block);
        while self.blocks.len() > self.max_blocks {
            self.blocks.pop_front();
        }
        id
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> Option<&mut CommandBlock> {
        self.position(id).map(|i| &mut self.blocks[i])
    }

    // Blocks are pushed as they are created, so IDs are sorted
    fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.binary_search_by_key(&id, |b| b.id).ok()
    }

    pub(crate) fn clear_blocks(&mut self) {
        self.blocks.clear();
    }

    pub(crate) fn begin_stream(&mut self, in_flight: InFlight) {
        self.in_flight = Some(in_flight);
    }

    /// Close the stream for `block`, if it is the one in flight.
    pub(crate) fn finish_stream(&mut self, block: BlockId) -> Option<InFlight> {
        self.in_flight.take_if(|f| f.block == block)
    }

    pub(crate) fn enqueue(&mut self, line: String) {
        self.queue.push_back(line);
    }

    pub(crate) fn dequeue(&mut self) -> Option<String> {
        self.queue.pop_front()
    }
}
