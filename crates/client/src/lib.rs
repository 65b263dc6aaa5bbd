//! External collaborators of the terminal: the remote agent
//! invocation transport, the knowledge-base document store and the
//! schedule manager, each behind an async trait with an HTTP
//! implementation.

pub mod agent;
pub mod error;
pub mod knowledge;
pub mod scheduler;

pub use agent::{AgentInvoker, AgentReply, HttpAgentClient};
pub use error::ClientError;
pub use knowledge::{
    is_accepted_extension, DocumentInfo, HttpKnowledgeBase, KnowledgeBase, ACCEPTED_EXTENSIONS,
};
pub use scheduler::{
    cron_to_human, ExecutionLog, HttpScheduleManager, Schedule, ScheduleManager,
};
