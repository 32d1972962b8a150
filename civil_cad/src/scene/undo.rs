//! Bounded undo/redo history of scene commands.

use std::collections::VecDeque;

use super::commands::Command;
use super::registry::Registry;
use crate::error::SceneError;

/// Default number of commands kept.
pub const DEFAULT_UNDO_LIMIT: usize = 200;

#[derive(Debug, Clone)]
pub struct CommandStack {
    /// Maximum number of commands; 0 keeps everything.
    limit: usize,
    commands: VecDeque<Command>,
    /// Number of commands currently applied.
    live_index: usize,
}

impl Default for CommandStack {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl CommandStack {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            commands: VecDeque::new(),
            live_index: 0,
        }
    }

    /// Applies `command` and records it, discarding anything that was
    /// undone. A command that fails to apply is not recorded.
    pub(crate) fn push(&mut self, mut command: Command, registry: &mut Registry) -> Result<(), SceneError> {
        command.redo(registry)?;
        log::debug!("undo command: {}", command.text());
        self.commands.truncate(self.live_index);
        self.commands.push_back(command);
        self.live_index += 1;
        self.trim();
        Ok(())
    }

    /// Reverts the last applied command. Returns `false` when there is none.
    pub(crate) fn undo(&mut self, registry: &mut Registry) -> Result<bool, SceneError> {
        if self.live_index == 0 {
            return Ok(false);
        }
        self.commands[self.live_index - 1].undo(registry)?;
        self.live_index -= 1;
        Ok(true)
    }

    /// Re-applies the next undone command. Returns `false` when there is
    /// none.
    pub(crate) fn redo(&mut self, registry: &mut Registry) -> Result<bool, SceneError> {
        if self.live_index == self.commands.len() {
            return Ok(false);
        }
        self.commands[self.live_index].redo(registry)?;
        self.live_index += 1;
        Ok(true)
    }

    fn trim(&mut self) {
        if self.limit == 0 {
            return;
        }
        while self.commands.len() > self.limit {
            self.commands.pop_front();
            self.live_index = self.live_index.saturating_sub(1);
        }
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.trim();
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        self.live_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.live_index < self.commands.len()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn index(&self) -> usize {
        self.live_index
    }

    pub fn undo_text(&self) -> Option<String> {
        self.live_index
            .checked_sub(1)
            .map(|i| self.commands[i].text())
    }

    pub fn redo_text(&self) -> Option<String> {
        self.commands.get(self.live_index).map(Command::text)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.live_index = 0;
    }
}
