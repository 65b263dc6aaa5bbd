use anyhow::{Context, Result};
use autohire_core::AgentKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_FILE: &str = "autohire.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the agent platform API.
    pub base_url: String,
    /// Env var holding the API key, if the platform requires one.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Knowledge base holding the CV and reference documents.
    pub knowledge_base_id: String,
    /// The one daily-hunt schedule this terminal operates on.
    #[serde(default)]
    pub schedule_id: Option<String>,
    pub agents: AgentIds,
}

/// Deployed agent ids, one per capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentIds {
    pub cv_strategist: String,
    pub job_scout: String,
    pub application_crafter: String,
    pub outreach_agent: String,
    pub job_hunt_coordinator: String,
    pub interview_scheduler: String,
    pub telegram_notifier: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key_env: Some("AUTOHIRE_API_KEY".to_string()),
            knowledge_base_id: "cv-knowledge-base".to_string(),
            schedule_id: None,
            agents: AgentIds {
                cv_strategist: "cv-strategist".to_string(),
                job_scout: "job-scout".to_string(),
                application_crafter: "application-crafter".to_string(),
                outreach_agent: "outreach-agent".to_string(),
                job_hunt_coordinator: "job-hunt-coordinator".to_string(),
                interview_scheduler: "interview-scheduler".to_string(),
                telegram_notifier: "telegram-notifier".to_string(),
            },
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    pub fn exists() -> bool {
        Self::path().exists()
    }

    pub fn load() -> Result<Self> {
        let content = std::fs::read_to_string(Self::path())
            .with_context(|| format!("Failed to read {CONFIG_FILE}"))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {CONFIG_FILE}"))
    }

    pub fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path(), content)
            .with_context(|| format!("Failed to write {CONFIG_FILE}"))?;
        Ok(())
    }

    /// Load the config, writing a default template on first run.
    pub fn load_or_init() -> Result<Self> {
        if Self::exists() {
            Self::load()
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Endpoint, overridable per environment.
    pub fn endpoint(&self) -> String {
        std::env::var("AUTOHIRE_ENDPOINT").unwrap_or_else(|_| self.base_url.clone())
    }

    pub fn api_key(&self) -> Option<String> {
        self.api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
    }

    pub fn agent_id(&self, kind: AgentKind) -> &str {
        match kind {
            AgentKind::CvStrategist => &self.agents.cv_strategist,
            AgentKind::JobScout => &self.agents.job_scout,
            AgentKind::ApplicationCrafter => &self.agents.application_crafter,
            AgentKind::OutreachAgent => &self.agents.outreach_agent,
            AgentKind::JobHuntCoordinator => &self.agents.job_hunt_coordinator,
            AgentKind::InterviewScheduler => &self.agents.interview_scheduler,
            AgentKind::TelegramNotifier => &self.agents.telegram_notifier,
        }
    }
}
