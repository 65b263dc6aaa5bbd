//! Session state: the activity log, command history ring and the
//! per-dispatch lifecycle flags, owned by one struct so the
//! "processing is always cleared" invariant holds structurally.

use crate::agent::AgentKind;
use crate::board::KanbanBoard;
use crate::card::Card;
use crate::metrics::PipelineMetrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Default activity feed cap; oldest entries are evicted silently.
pub const ACTIVITY_LOG_CAP: usize = 50;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("a command is already in flight")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    System,
    User,
    Agent,
    Error,
    File,
}

/// One immutable entry in the activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub kind: MessageKind,
    pub agent: Option<AgentKind>,
    pub text: String,
    pub card: Option<Card>,
    pub timestamp: DateTime<Utc>,
}

/// Append-only, chronological message log with oldest-first eviction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: VecDeque<Message>,
    cap: usize,
    next_id: u64,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_cap(ACTIVITY_LOG_CAP)
    }
}

impl ActivityLog {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cap,
            next_id: 0,
        }
    }

    pub fn push(&mut self, kind: MessageKind, agent: Option<AgentKind>, text: impl Into<String>, card: Option<Card>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_back(Message {
            id,
            kind,
            agent,
            text: text.into(),
            card,
            timestamp: Utc::now(),
        });
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
        id
    }

    pub fn entries(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    /// Entries with an id at or past `id`, for incremental rendering.
    pub fn since(&self, id: u64) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter(move |m| m.id >= id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Bounded-by-memory recall ring for previously submitted commands.
/// `cursor == None` means "not browsing history".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl CommandHistory {
    /// Record a submitted raw command and leave browse mode.
    pub fn push(&mut self, raw: impl Into<String>) {
        self.entries.push(raw.into());
        self.cursor = None;
    }

    /// Step toward older entries (ArrowUp). Saturates at the oldest.
    pub fn previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => self.entries.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// Whether a browse cursor is set. ArrowDown outside browse mode
    /// must leave the input buffer alone.
    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Step toward newer entries (ArrowDown). Past the newest resets
    /// to an empty input with the cursor cleared.
    pub fn next(&mut self) -> Option<&str> {
        let i = self.cursor?;
        if i + 1 >= self.entries.len() {
            self.cursor = None;
            return None;
        }
        self.cursor = Some(i + 1);
        self.entries.get(i + 1).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Structured-input form shown when a command lacks required args.
/// At most one form is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormKind {
    Outreach,
    Schedule,
    Craft,
}

/// All mutable terminal-session state, threaded through dispatch.
#[derive(Debug, Default)]
pub struct SessionState {
    pub log: ActivityLog,
    pub history: CommandHistory,
    pub metrics: PipelineMetrics,
    pub board: KanbanBoard,
    form: Option<FormKind>,
    processing: bool,
    active_agent: Option<AgentKind>,
}

impl SessionState {
    /// Synchronous prologue of every command dispatch: the user entry
    /// lands in the log before any await, history records the raw
    /// input, and any visible form is dismissed.
    pub fn record_submission(&mut self, raw: &str) {
        self.log.push(MessageKind::User, None, raw, None);
        self.history.push(raw);
        self.form = None;
    }

    /// Mark an agent call in flight. Rejects re-entrant dispatch: at
    /// most one call may be outstanding, late submissions are refused.
    pub fn begin(&mut self, agent: Option<AgentKind>) -> Result<(), SessionError> {
        if self.processing {
            return Err(SessionError::Busy);
        }
        self.processing = true;
        self.active_agent = agent;
        Ok(())
    }

    /// Clear the in-flight flags. Called on every completion path,
    /// success or failure.
    pub fn finish(&mut self) {
        self.processing = false;
        self.active_agent = None;
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn active_agent(&self) -> Option<AgentKind> {
        self.active_agent
    }

    pub fn show_form(&mut self, kind: FormKind) {
        self.form = Some(kind);
    }

    pub fn clear_form(&mut self) {
        self.form = None;
    }

    pub fn form(&self) -> Option<FormKind> {
        self.form
    }

    /// Fold a successful classified result into metrics and board.
    pub fn absorb(&mut self, card: &Card) {
        self.metrics.absorb(card);
        if let Card::Coordinator(report) = card {
            self.board.absorb(report);
        }
    }
}
