//! Executes dispatch plans against the remote clients and folds the
//! results back into session state. All user-visible message text is
//! produced here; rendering stays in `render`.

use crate::config::Config;
use crate::forms::{CraftForm, OutreachForm, ScheduleForm};
use crate::render;
use autohire_client::{
    is_accepted_extension, AgentInvoker, KnowledgeBase, Schedule, ScheduleManager,
    ACCEPTED_EXTENSIONS,
};
use autohire_core::card::{classify, stamp_type, CardType};
use autohire_core::dispatch::{help_text, ANALYZE_PROMPT};
use autohire_core::{parse, resolve, AgentKind, Card, Dispatch, FormKind, MessageKind, SessionState};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

const EXECUTION_LOG_LIMIT: usize = 10;

/// What the caller must do after processing one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Collect the form's fields, then call the matching submit method.
    NeedForm(FormKind),
    /// Collect a file path, then call `upload`.
    NeedUpload,
}

pub struct Processor {
    config: Config,
    pub session: SessionState,
    invoker: Arc<dyn AgentInvoker>,
    knowledge: Arc<dyn KnowledgeBase>,
    scheduler: Arc<dyn ScheduleManager>,
    schedule: Option<Schedule>,
}

impl Processor {
    pub fn new(
        config: Config,
        invoker: Arc<dyn AgentInvoker>,
        knowledge: Arc<dyn KnowledgeBase>,
        scheduler: Arc<dyn ScheduleManager>,
    ) -> Self {
        Self {
            config,
            session: SessionState::default(),
            invoker,
            knowledge,
            scheduler,
            schedule: None,
        }
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Adopt the configured schedule, or discover the coordinator's
    /// schedule when none is configured. Quietly tolerates an
    /// unreachable scheduler; `/status` just shows no schedule.
    pub async fn refresh_schedule(&mut self) {
        let schedules = match self.scheduler.list_schedules().await {
            Ok(schedules) => schedules,
            Err(e) => {
                warn!("schedule listing failed: {}", e);
                return;
            }
        };
        let coordinator_id = self.config.agent_id(AgentKind::JobHuntCoordinator);
        self.schedule = match &self.config.schedule_id {
            Some(id) => schedules.into_iter().find(|s| &s.id == id),
            None => schedules.into_iter().find(|s| s.agent_id == coordinator_id),
        };
    }

    /// Process one raw submission end to end.
    pub async fn process(&mut self, raw: &str) -> Outcome {
        let input = parse(raw);
        let Some(dispatch) = resolve(&input) else {
            return Outcome::Done;
        };
        self.session.record_submission(raw.trim());
        self.execute(dispatch).await
    }

    async fn execute(&mut self, dispatch: Dispatch) -> Outcome {
        match dispatch {
            Dispatch::Help => {
                self.system(help_text());
                Outcome::Done
            }
            Dispatch::Upload => Outcome::NeedUpload,
            Dispatch::Invoke {
                agent,
                prompt,
                tag,
                notice,
                done,
                fail,
                freeform,
            } => {
                self.run_invoke(agent, &prompt, tag, &notice, &done, &fail, freeform)
                    .await;
                Outcome::Done
            }
            Dispatch::ShowForm(kind) => {
                self.session.show_form(kind);
                Outcome::NeedForm(kind)
            }
            Dispatch::Status => {
                self.refresh_schedule().await;
                let text = render::status_text(&self.session.metrics, self.schedule.as_ref());
                self.system(text);
                Outcome::Done
            }
            Dispatch::Pause => {
                self.schedule_action(
                    "pause",
                    "Pausing schedule...",
                    "Schedule PAUSED successfully.",
                    "Failed to pause",
                )
                .await;
                Outcome::Done
            }
            Dispatch::Activate => {
                self.schedule_action(
                    "resume",
                    "Activating schedule...",
                    "Schedule ACTIVATED successfully.",
                    "Failed to activate",
                )
                .await;
                Outcome::Done
            }
            Dispatch::RunNow => {
                self.schedule_action(
                    "trigger",
                    "Triggering immediate run...",
                    "Schedule triggered. Executing now...",
                    "Failed to trigger",
                )
                .await;
                Outcome::Done
            }
            Dispatch::Logs => {
                self.show_logs().await;
                Outcome::Done
            }
            Dispatch::Docs => {
                self.show_docs().await;
                Outcome::Done
            }
            Dispatch::RemoveDoc(name) => {
                self.remove_doc(&name).await;
                Outcome::Done
            }
            Dispatch::Agents => {
                self.system(render::agents_text());
                Outcome::Done
            }
            Dispatch::Board => {
                self.system(render::board_text(&self.session.board));
                Outcome::Done
            }
            Dispatch::Unknown(name) => {
                self.error(format!(
                    "Unknown command: {name}. Type /help for available commands."
                ));
                Outcome::Done
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn run_invoke(
        &mut self,
        agent: AgentKind,
        prompt: &str,
        tag: CardType,
        notice: &str,
        done: &str,
        fail: &str,
        freeform: bool,
    ) {
        if !notice.is_empty() {
            self.system(notice.to_string());
        }
        if self.session.begin(Some(agent)).is_err() {
            self.error("A command is already in flight. Wait for it to finish.".to_string());
            return;
        }

        let agent_id = self.config.agent_id(agent).to_string();
        let outcome = self.invoker.invoke(&agent_id, prompt).await;
        self.session.finish();

        match outcome {
            Ok(reply) if reply.success => {
                if freeform {
                    self.finish_freeform(agent, reply.message, reply.result, done);
                } else {
                    self.finish_command(agent, tag, reply.result, done);
                }
            }
            Ok(reply) => {
                let reason = reply.error.unwrap_or_else(|| "Unknown error".to_string());
                self.error(format!("{fail}: {reason}"));
            }
            Err(e) => {
                self.error(format!("{fail}: {e}"));
            }
        }
    }

    /// A command result is stamped with the card type the command
    /// declared, so the classifier shapes it even when the agent omits
    /// its own tag.
    fn finish_command(
        &mut self,
        agent: AgentKind,
        tag: CardType,
        result: Option<serde_json::Value>,
        done: &str,
    ) {
        let card = result.map(|payload| {
            let stamped = stamp_type(payload, tag);
            classify(Some(agent), &stamped)
        });
        if let Some(card) = &card {
            self.session.absorb(card);
        }
        self.session
            .log
            .push(MessageKind::Agent, Some(agent), done, card);
    }

    /// Free text stays conversational: prefer the agent's own message,
    /// then a summary field, and only show a card for a structured
    /// object payload.
    fn finish_freeform(
        &mut self,
        agent: AgentKind,
        message: Option<String>,
        result: Option<serde_json::Value>,
        done: &str,
    ) {
        let card = match &result {
            Some(value) if value.is_object() && !value.as_object().is_some_and(|o| o.is_empty()) => {
                let card = classify(Some(agent), value);
                // Conversational replies only feed the pipeline when
                // they carry cycle data; chatter stays chatter.
                if value.get("jobs_found").is_some() {
                    self.session.absorb(&card);
                }
                Some(card)
            }
            _ => None,
        };
        let text = message
            .filter(|m| !m.is_empty())
            .or_else(|| match &card {
                Some(Card::Coordinator(report)) => report.daily_summary.clone(),
                _ => None,
            })
            .or_else(|| {
                result
                    .as_ref()
                    .and_then(|v| v.get("text"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .or_else(|| result.as_ref().and_then(|v| v.as_str().map(str::to_string)))
            .unwrap_or_else(|| done.to_string());
        self.session
            .log
            .push(MessageKind::Agent, Some(agent), text, card);
    }

    async fn schedule_action(&mut self, action: &str, notice: &str, ok: &str, fail: &str) {
        let Some(id) = self.schedule.as_ref().map(|s| s.id.clone()) else {
            self.error("No schedule ID configured. Run /status to discover one.".to_string());
            return;
        };
        self.system(notice.to_string());
        let result = match action {
            "pause" => self.scheduler.pause(&id).await,
            "resume" => self.scheduler.resume(&id).await,
            _ => self.scheduler.trigger_now(&id).await,
        };
        match result {
            Ok(()) => {
                self.system(ok.to_string());
                self.refresh_schedule().await;
            }
            Err(e) => self.error(format!("{fail}: {e}")),
        }
    }

    async fn show_logs(&mut self) {
        let Some(id) = self.schedule.as_ref().map(|s| s.id.clone()) else {
            self.error("No schedule ID configured. Run /status to discover one.".to_string());
            return;
        };
        self.system("Fetching execution logs...".to_string());
        match self.scheduler.logs(&id, EXECUTION_LOG_LIMIT).await {
            Ok(logs) if logs.is_empty() => {
                self.system("No execution logs found.".to_string());
            }
            Ok(logs) => {
                let mut lines = vec![format!("EXECUTION LOGS ({} total):", logs.len())];
                lines.extend(logs.iter().map(render::execution_log_line));
                self.system(lines.join("\n"));
            }
            Err(e) => self.error(format!("Failed to fetch logs: {e}")),
        }
    }

    async fn show_docs(&mut self) {
        let kb_id = self.config.knowledge_base_id.clone();
        match self.knowledge.list_documents(&kb_id).await {
            Ok(documents) => self.system(render::docs_text(&documents)),
            Err(e) => self.error(format!("Failed to list documents: {e}")),
        }
    }

    async fn remove_doc(&mut self, name: &str) {
        let kb_id = self.config.knowledge_base_id.clone();
        match self
            .knowledge
            .remove_documents(&kb_id, &[name.to_string()])
            .await
        {
            Ok(()) => self.system(format!("Removed {name} from knowledge base.")),
            Err(e) => self.error(format!("Failed to remove {name}: {e}")),
        }
    }

    /// Upload a CV and, on success, kick off a fresh analysis.
    pub async fn upload(&mut self, path: &Path) {
        if !is_accepted_extension(path) {
            self.error(format!(
                "Unsupported file type. Accepted: {}",
                ACCEPTED_EXTENSIONS.join(", ")
            ));
            return;
        }
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        if self.session.begin(None).is_err() {
            self.error("A command is already in flight. Wait for it to finish.".to_string());
            return;
        }
        self.system(format!("Uploading {file_name} to knowledge base..."));

        let kb_id = self.config.knowledge_base_id.clone();
        let outcome = self.knowledge.upload_document(&kb_id, path).await;
        self.session.finish();

        match outcome {
            Ok(()) => {
                self.session.log.push(
                    MessageKind::File,
                    None,
                    format!("{file_name} uploaded successfully"),
                    None,
                );
                self.run_invoke(
                    AgentKind::CvStrategist,
                    ANALYZE_PROMPT,
                    CardType::Cv,
                    "Running CV analysis...",
                    "CV analysis complete",
                    "CV analysis failed",
                    false,
                )
                .await;
            }
            Err(e) => self.error(format!("Upload failed: {e}")),
        }
    }

    /// Form submissions log the equivalent command for the transcript
    /// but never enter command history.
    pub async fn submit_outreach_form(&mut self, form: OutreachForm) {
        let (command, prompt) = (form.synthesized_command(), form.prompt());
        let notice = format!("Sending outreach to {} ({})...", form.recipient, form.email);
        self.session.clear_form();
        self.session.log.push(MessageKind::User, None, command, None);
        self.run_invoke(
            AgentKind::OutreachAgent,
            &prompt,
            CardType::Outreach,
            &notice,
            "Email sent",
            "Outreach failed",
            false,
        )
        .await;
    }

    pub async fn submit_schedule_form(&mut self, form: ScheduleForm) {
        let (command, prompt) = (form.synthesized_command(), form.prompt());
        let notice = format!("Scheduling interview via {}...", form.recruiter_email);
        self.session.clear_form();
        self.session.log.push(MessageKind::User, None, command, None);
        self.run_invoke(
            AgentKind::InterviewScheduler,
            &prompt,
            CardType::Interview,
            &notice,
            "Interview processing complete",
            "Interview scheduling failed",
            false,
        )
        .await;
    }

    pub async fn submit_craft_form(&mut self, form: CraftForm) {
        let (command, prompt) = (form.synthesized_command(), form.prompt());
        let notice = format!("Crafting application for {} at {}...", form.role, form.company);
        self.session.clear_form();
        self.session.log.push(MessageKind::User, None, command, None);
        self.run_invoke(
            AgentKind::ApplicationCrafter,
            &prompt,
            CardType::Application,
            &notice,
            "Application crafted",
            "Craft failed",
            false,
        )
        .await;
    }

    fn system(&mut self, text: String) {
        self.session.log.push(MessageKind::System, None, text, None);
    }

    fn error(&mut self, text: String) {
        self.session.log.push(MessageKind::Error, None, text, None);
    }
}
