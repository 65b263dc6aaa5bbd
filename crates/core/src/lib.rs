//! Core domain logic for the AutoHire terminal: command parsing,
//! dispatch rules, response classification, pipeline aggregation and
//! session state. No I/O lives here.

pub mod agent;
pub mod board;
pub mod card;
pub mod command;
pub mod dispatch;
pub mod metrics;
pub mod session;

pub use agent::AgentKind;
pub use board::{JobStage, KanbanBoard, KanbanJob};
pub use card::{classify, Card, CardType};
pub use command::{parse, ParsedInput};
pub use dispatch::{resolve, Dispatch};
pub use metrics::PipelineMetrics;
pub use session::{
    ActivityLog, CommandHistory, FormKind, Message, MessageKind, SessionError, SessionState,
};
