//! Response classification: the heterogeneous JSON an agent returns is
//! normalized into exactly one card shape before display.

use crate::agent::AgentKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of normalized card shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    Cv,
    Coordinator,
    Outreach,
    Scout,
    Interview,
    Application,
    Telegram,
    Raw,
}

impl CardType {
    /// Wire tag carried in a payload's self-declared `type` field.
    pub fn tag(&self) -> &'static str {
        match self {
            CardType::Cv => "cv",
            CardType::Coordinator => "coordinator",
            CardType::Outreach => "outreach",
            CardType::Scout => "scout",
            CardType::Interview => "interview",
            CardType::Application => "application",
            CardType::Telegram => "telegram",
            CardType::Raw => "raw",
        }
    }

    pub fn from_tag(tag: &str) -> Option<CardType> {
        match tag {
            "cv" => Some(CardType::Cv),
            "coordinator" => Some(CardType::Coordinator),
            "outreach" => Some(CardType::Outreach),
            "scout" => Some(CardType::Scout),
            "interview" => Some(CardType::Interview),
            "application" => Some(CardType::Application),
            "telegram" => Some(CardType::Telegram),
            "raw" => Some(CardType::Raw),
            _ => None,
        }
    }
}

/// A classified agent result. Every variant keeps its own loosely
/// typed payload; `Raw` preserves the untouched value for the
/// pretty-printed fallback dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Card {
    Cv(CvReport),
    Coordinator(CoordinatorReport),
    Outreach(OutreachReport),
    Scout(ScoutReport),
    Interview(InterviewReport),
    Application(ApplicationReport),
    Telegram(TelegramReport),
    Text(String),
    Raw(Value),
}

impl Card {
    pub fn card_type(&self) -> CardType {
        match self {
            Card::Cv(_) => CardType::Cv,
            Card::Coordinator(_) => CardType::Coordinator,
            Card::Outreach(_) => CardType::Outreach,
            Card::Scout(_) => CardType::Scout,
            Card::Interview(_) => CardType::Interview,
            Card::Application(_) => CardType::Application,
            Card::Telegram(_) => CardType::Telegram,
            Card::Text(_) | Card::Raw(_) => CardType::Raw,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvReport {
    pub target_roles: Vec<String>,
    pub key_strengths: Vec<String>,
    pub differentiators: Vec<String>,
    pub experience_years: Option<Value>,
    pub top_skills: Vec<String>,
    pub strategy_summary: Option<String>,
    pub recommended_channels: Vec<String>,
    pub salary_positioning: Option<String>,
    pub cv_gaps: Vec<String>,
    pub quick_fixes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighPriorityJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub match_score: Option<f64>,
    pub status: Option<String>,
    pub action_taken: Option<String>,
    pub channel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorReport {
    pub jobs_found: Option<u64>,
    pub applications_sent: Option<u64>,
    pub emails_sent: Option<u64>,
    pub pending_approvals: Option<u64>,
    pub high_priority_jobs: Vec<HighPriorityJob>,
    pub daily_summary: Option<String>,
    pub outreach_summary: Option<String>,
    pub next_actions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub match_score: Option<f64>,
    pub channel: Option<String>,
    pub urgency: Option<String>,
    pub url: Option<String>,
    pub salary_range: Option<String>,
    pub posted_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutReport {
    pub jobs_found: Option<u64>,
    pub high_priority_count: Option<u64>,
    pub jobs: Vec<ScoutJob>,
    pub search_summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutreachTarget {
    pub name: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub email_subject: Option<String>,
    pub email_status: Option<String>,
    pub sequence_stage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutreachReport {
    pub emails_sent: Option<u64>,
    pub outreach_targets: Vec<OutreachTarget>,
    pub follow_ups_scheduled: Option<u64>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewReport {
    pub interview_scheduled: Option<Value>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub interview_date: Option<String>,
    pub interview_time: Option<String>,
    pub interview_format: Option<String>,
    pub interviewer: Option<String>,
    pub calendar_event_created: Option<Value>,
    pub reply_sent: Option<Value>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

impl InterviewReport {
    pub fn scheduled(&self) -> bool {
        self.interview_scheduled.as_ref().is_some_and(truthy)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftedApplication {
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub cover_letter: Option<String>,
    pub application_message: Option<String>,
    pub highlighted_projects: Vec<String>,
    pub key_alignment_points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationReport {
    pub total_crafted: Option<u64>,
    pub applications: Vec<CraftedApplication>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramMetrics {
    pub jobs_found: Option<u64>,
    pub applications_sent: Option<u64>,
    pub responses_received: Option<u64>,
    pub interviews_scheduled: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramReport {
    pub message_title: Option<String>,
    pub message_body: Option<String>,
    pub priority: Option<String>,
    pub notification_type: Option<String>,
    pub action_required: Option<Value>,
    pub action_options: Vec<String>,
    pub metrics: Option<TelegramMetrics>,
}

/// JS-style truthiness, used for flag fields remote agents return as
/// booleans, numbers or strings interchangeably.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Classify a raw result payload. Decision order: the payload's
/// self-declared `type` tag wins over the invoking agent's identity,
/// because a single agent may embed another agent's shape; a plain
/// string renders as text; everything else falls back to a raw dump.
pub fn classify(agent: Option<AgentKind>, payload: &Value) -> Card {
    if let Some(tag) = payload.get("type").and_then(Value::as_str) {
        if let Some(card_type) = CardType::from_tag(tag) {
            return typed_card(card_type, payload);
        }
    }
    if let Some(agent) = agent {
        return typed_card(agent.card_type(), payload);
    }
    if let Some(text) = payload.as_str() {
        return Card::Text(text.to_string());
    }
    Card::Raw(payload.clone())
}

fn typed_card(card_type: CardType, payload: &Value) -> Card {
    // Payload shapes are loose; a shape mismatch degrades to the raw dump.
    let parsed = match card_type {
        CardType::Cv => serde_json::from_value(payload.clone()).map(Card::Cv),
        CardType::Coordinator => serde_json::from_value(payload.clone()).map(Card::Coordinator),
        CardType::Outreach => serde_json::from_value(payload.clone()).map(Card::Outreach),
        CardType::Scout => serde_json::from_value(payload.clone()).map(Card::Scout),
        CardType::Interview => serde_json::from_value(payload.clone()).map(Card::Interview),
        CardType::Application => serde_json::from_value(payload.clone()).map(Card::Application),
        CardType::Telegram => serde_json::from_value(payload.clone()).map(Card::Telegram),
        CardType::Raw => return Card::Raw(payload.clone()),
    };
    match parsed {
        Ok(card) => card,
        Err(e) => {
            tracing::debug!("payload did not fit {:?} shape: {}", card_type, e);
            Card::Raw(payload.clone())
        }
    }
}

/// Stamp the declared card tag onto a payload before classification,
/// mirroring how each command marks the result it expects.
pub fn stamp_type(payload: Value, card_type: CardType) -> Value {
    match payload {
        Value::Object(mut map) => {
            map.insert("type".to_string(), Value::String(card_type.tag().to_string()));
            Value::Object(map)
        }
        other => other,
    }
}
