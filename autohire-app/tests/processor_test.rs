//! End-to-end processor tests against mock transports.

use async_trait::async_trait;
use autohire_app::config::Config;
use autohire_app::processor::{Outcome, Processor};
use autohire_client::{
    AgentInvoker, AgentReply, ClientError, DocumentInfo, ExecutionLog, KnowledgeBase, Schedule,
    ScheduleManager,
};
use autohire_core::{FormKind, MessageKind};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockInvoker {
    replies: Mutex<VecDeque<Result<AgentReply, ClientError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockInvoker {
    fn reply_with(self, result: Value) -> Self {
        self.replies.lock().unwrap().push_back(Ok(AgentReply {
            success: true,
            error: None,
            message: None,
            result: Some(result),
        }));
        self
    }

    fn reply_message(self, message: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(AgentReply {
            success: true,
            error: None,
            message: Some(message.to_string()),
            result: None,
        }));
        self
    }

    fn fail_with(self, error: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(ClientError::Api(error.to_string())));
        self
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AgentInvoker for MockInvoker {
    async fn invoke(&self, agent_id: &str, instruction: &str) -> Result<AgentReply, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((agent_id.to_string(), instruction.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AgentReply::default()))
    }
}

#[derive(Default)]
struct MockKnowledge {
    documents: Vec<DocumentInfo>,
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl KnowledgeBase for MockKnowledge {
    async fn upload_document(&self, _kb_id: &str, path: &Path) -> Result<(), ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("upload {}", path.display()));
        Ok(())
    }

    async fn list_documents(&self, _kb_id: &str) -> Result<Vec<DocumentInfo>, ClientError> {
        self.calls.lock().unwrap().push("list".to_string());
        Ok(self.documents.clone())
    }

    async fn remove_documents(&self, _kb_id: &str, names: &[String]) -> Result<(), ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("remove {}", names.join(",")));
        Ok(())
    }
}

#[derive(Default)]
struct MockScheduler {
    schedules: Vec<Schedule>,
    calls: Mutex<Vec<String>>,
}

impl MockScheduler {
    fn with_schedule(agent_id: &str) -> Self {
        let schedule: Schedule = serde_json::from_value(json!({
            "id": "sched-1",
            "agent_id": agent_id,
            "is_active": true,
            "cron_expression": "0 9 * * *"
        }))
        .unwrap();
        Self {
            schedules: vec![schedule],
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ScheduleManager for MockScheduler {
    async fn list_schedules(&self) -> Result<Vec<Schedule>, ClientError> {
        self.calls.lock().unwrap().push("list".to_string());
        Ok(self.schedules.clone())
    }

    async fn pause(&self, schedule_id: &str) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(format!("pause {schedule_id}"));
        Ok(())
    }

    async fn resume(&self, schedule_id: &str) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(format!("resume {schedule_id}"));
        Ok(())
    }

    async fn trigger_now(&self, schedule_id: &str) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(format!("trigger {schedule_id}"));
        Ok(())
    }

    async fn logs(&self, _schedule_id: &str, _limit: usize) -> Result<Vec<ExecutionLog>, ClientError> {
        self.calls.lock().unwrap().push("logs".to_string());
        Ok(Vec::new())
    }
}

fn processor_with(
    invoker: MockInvoker,
    knowledge: MockKnowledge,
    scheduler: MockScheduler,
) -> (Processor, Arc<MockInvoker>, Arc<MockKnowledge>, Arc<MockScheduler>) {
    let invoker = Arc::new(invoker);
    let knowledge = Arc::new(knowledge);
    let scheduler = Arc::new(scheduler);
    let processor = Processor::new(
        Config::default(),
        invoker.clone(),
        knowledge.clone(),
        scheduler.clone(),
    );
    (processor, invoker, knowledge, scheduler)
}

#[tokio::test]
async fn whitespace_input_is_a_full_noop() {
    let (mut processor, invoker, _, _) =
        processor_with(MockInvoker::default(), MockKnowledge::default(), MockScheduler::default());
    assert_eq!(processor.process("   ").await, Outcome::Done);
    assert!(processor.session.log.is_empty());
    assert!(processor.session.history.is_empty());
    assert_eq!(invoker.call_count(), 0);
}

#[tokio::test]
async fn missing_args_show_form_without_invoking() {
    let (mut processor, invoker, _, _) =
        processor_with(MockInvoker::default(), MockKnowledge::default(), MockScheduler::default());
    assert_eq!(processor.process("/craft").await, Outcome::NeedForm(FormKind::Craft));
    assert_eq!(processor.session.form(), Some(FormKind::Craft));
    assert_eq!(invoker.call_count(), 0);
    // The raw submission still lands in log and history.
    assert_eq!(processor.session.log.len(), 1);
    assert_eq!(processor.session.history.len(), 1);
}

#[tokio::test]
async fn pause_without_schedule_makes_no_calls() {
    let (mut processor, _, _, scheduler) =
        processor_with(MockInvoker::default(), MockKnowledge::default(), MockScheduler::default());
    processor.process("/pause").await;
    let last = processor.session.log.entries().last().unwrap();
    assert_eq!(last.kind, MessageKind::Error);
    assert!(last.text.contains("No schedule ID configured"));
    assert_eq!(scheduler.call_count(), 0);
}

#[tokio::test]
async fn pause_targets_discovered_schedule() {
    let scheduler = MockScheduler::with_schedule("job-hunt-coordinator");
    let (mut processor, _, _, scheduler) =
        processor_with(MockInvoker::default(), MockKnowledge::default(), scheduler);
    processor.refresh_schedule().await;
    processor.process("/pause").await;
    let calls = scheduler.calls.lock().unwrap().clone();
    assert!(calls.contains(&"pause sched-1".to_string()));
    let texts: Vec<_> = processor.session.log.entries().map(|m| m.text.clone()).collect();
    assert!(texts.contains(&"Schedule PAUSED successfully.".to_string()));
}

#[tokio::test]
async fn failed_transport_clears_processing_and_reports() {
    let invoker = MockInvoker::default().fail_with("connection refused");
    let (mut processor, _, _, _) =
        processor_with(invoker, MockKnowledge::default(), MockScheduler::default());
    processor.process("/hunt").await;
    assert!(!processor.session.is_processing());
    let last = processor.session.log.entries().last().unwrap();
    assert_eq!(last.kind, MessageKind::Error);
    assert!(last.text.starts_with("Hunt cycle failed:"));
    // A follow-up command dispatches normally.
    assert_eq!(processor.process("/scout").await, Outcome::Done);
}

#[tokio::test]
async fn user_message_precedes_agent_message() {
    let invoker = MockInvoker::default().reply_with(json!({"jobs_found": 2}));
    let (mut processor, _, _, _) =
        processor_with(invoker, MockKnowledge::default(), MockScheduler::default());
    processor.process("/scout").await;
    let kinds: Vec<_> = processor.session.log.entries().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![MessageKind::User, MessageKind::System, MessageKind::Agent]
    );
}

#[tokio::test]
async fn scout_without_emails_field_keeps_prior_emails() {
    let invoker = MockInvoker::default()
        .reply_with(json!({"jobs_found": 12, "emails_sent": 3}))
        .reply_with(json!({"jobs_found": 9}));
    let (mut processor, _, _, _) =
        processor_with(invoker, MockKnowledge::default(), MockScheduler::default());
    processor.process("/hunt").await;
    processor.process("/scout").await;
    assert_eq!(processor.session.metrics.emails_sent, 3);
    assert_eq!(processor.session.metrics.jobs_found, 9);
}

#[tokio::test]
async fn outreach_results_add_emails() {
    let invoker = MockInvoker::default()
        .reply_with(json!({"emails_sent": 1}))
        .reply_with(json!({"emails_sent": 2}));
    let (mut processor, _, _, _) =
        processor_with(invoker, MockKnowledge::default(), MockScheduler::default());
    processor.process("/outreach Jane jane@x.com Stripe").await;
    processor.process("/outreach Bob bob@y.com").await;
    assert_eq!(processor.session.metrics.emails_sent, 3);
}

#[tokio::test]
async fn hunt_results_populate_board() {
    let invoker = MockInvoker::default().reply_with(json!({
        "jobs_found": 1,
        "high_priority_jobs": [
            {"title": "SRE", "company": "Linear", "status": "Applied", "match_score": 91.0},
        ],
    }));
    let (mut processor, _, _, _) =
        processor_with(invoker, MockKnowledge::default(), MockScheduler::default());
    processor.process("/hunt").await;
    assert_eq!(processor.session.board.jobs().len(), 1);
    assert_eq!(processor.session.board.jobs()[0].company, "Linear");
}

#[tokio::test]
async fn free_text_prefers_agent_message() {
    let invoker = MockInvoker::default().reply_message("You have 2 interviews this week.");
    let (mut processor, invoker, _, _) =
        processor_with(invoker, MockKnowledge::default(), MockScheduler::default());
    processor.process("how is my week looking").await;
    let last = processor.session.log.entries().last().unwrap();
    assert_eq!(last.kind, MessageKind::Agent);
    assert_eq!(last.text, "You have 2 interviews this week.");
    // The free text is sent verbatim to the coordinator.
    let calls = invoker.calls.lock().unwrap().clone();
    assert_eq!(calls[0].1, "how is my week looking");
}

#[tokio::test]
async fn free_text_without_jobs_found_leaves_pipeline_alone() {
    let invoker = MockInvoker::default().reply_with(json!({"emails_sent": 5}));
    let (mut processor, _, _, _) =
        processor_with(invoker, MockKnowledge::default(), MockScheduler::default());
    processor.process("did you email anyone today").await;
    // A conversational reply is displayed but never merged.
    assert_eq!(processor.session.metrics.emails_sent, 0);
    assert!(processor.session.board.jobs().is_empty());
}

#[tokio::test]
async fn free_text_with_jobs_found_merges_and_tracks() {
    let invoker = MockInvoker::default().reply_with(json!({
        "jobs_found": 4,
        "emails_sent": 2,
        "high_priority_jobs": [{"title": "SWE", "company": "Stripe", "status": "Applied"}],
    }));
    let (mut processor, _, _, _) =
        processor_with(invoker, MockKnowledge::default(), MockScheduler::default());
    processor.process("run a quick cycle for me").await;
    assert_eq!(processor.session.metrics.jobs_found, 4);
    assert_eq!(processor.session.metrics.emails_sent, 2);
    assert_eq!(processor.session.board.jobs().len(), 1);
}

#[tokio::test]
async fn free_text_falls_back_to_payload_text_field() {
    let invoker = MockInvoker::default().reply_with(json!({"text": "Nothing new today."}));
    let (mut processor, _, _, _) =
        processor_with(invoker, MockKnowledge::default(), MockScheduler::default());
    processor.process("anything new").await;
    let last = processor.session.log.entries().last().unwrap();
    assert_eq!(last.text, "Nothing new today.");
}

#[tokio::test]
async fn unknown_command_reports_error() {
    let (mut processor, invoker, _, _) =
        processor_with(MockInvoker::default(), MockKnowledge::default(), MockScheduler::default());
    processor.process("/frobnicate now").await;
    let last = processor.session.log.entries().last().unwrap();
    assert_eq!(last.kind, MessageKind::Error);
    assert_eq!(
        last.text,
        "Unknown command: /frobnicate. Type /help for available commands."
    );
    assert_eq!(invoker.call_count(), 0);
}

#[tokio::test]
async fn rejected_upload_extension_touches_nothing() {
    let (mut processor, _, knowledge, _) =
        processor_with(MockInvoker::default(), MockKnowledge::default(), MockScheduler::default());
    processor.upload(Path::new("resume.exe")).await;
    let last = processor.session.log.entries().last().unwrap();
    assert_eq!(last.kind, MessageKind::Error);
    assert!(knowledge.calls.lock().unwrap().is_empty());
    assert!(!processor.session.is_processing());
}

#[tokio::test]
async fn upload_triggers_cv_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, b"cv bytes").unwrap();

    let invoker = MockInvoker::default().reply_with(json!({"target_roles": ["SRE"]}));
    let (mut processor, invoker, knowledge, _) =
        processor_with(invoker, MockKnowledge::default(), MockScheduler::default());
    processor.upload(&path).await;

    assert_eq!(knowledge.calls.lock().unwrap().len(), 1);
    assert_eq!(invoker.call_count(), 1);
    let texts: Vec<_> = processor.session.log.entries().map(|m| m.text.clone()).collect();
    assert!(texts.contains(&"resume.pdf uploaded successfully".to_string()));
    assert!(texts.contains(&"CV analysis complete".to_string()));
}
