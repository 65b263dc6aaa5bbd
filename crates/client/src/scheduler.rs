//! External cron-like schedule manager. The core only reads and
//! mutates schedule state through these calls.

use crate::error::ClientError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub agent_id: String,
    pub is_active: bool,
    pub cron_expression: Option<String>,
    #[serde(default)]
    pub next_run_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_run_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionLog {
    pub executed_at: DateTime<Utc>,
    pub success: bool,
    pub attempt: u32,
    pub max_attempts: u32,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[async_trait]
pub trait ScheduleManager: Send + Sync {
    async fn list_schedules(&self) -> Result<Vec<Schedule>, ClientError>;
    async fn pause(&self, schedule_id: &str) -> Result<(), ClientError>;
    async fn resume(&self, schedule_id: &str) -> Result<(), ClientError>;
    async fn trigger_now(&self, schedule_id: &str) -> Result<(), ClientError>;
    async fn logs(&self, schedule_id: &str, limit: usize) -> Result<Vec<ExecutionLog>, ClientError>;
}

pub struct HttpScheduleManager {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpScheduleManager {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    fn url(&self, tail: &str) -> String {
        format!("{}/schedules{}", self.base_url.trim_end_matches('/'), tail)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn post_action(&self, schedule_id: &str, action: &str) -> Result<(), ClientError> {
        let ack: AckEnvelope = self
            .authorized(
                self.client
                    .post(self.url(&format!("/{schedule_id}/{action}"))),
            )
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if !ack.success {
            return Err(ClientError::Api(
                ack.error.unwrap_or_else(|| "Unknown".to_string()),
            ));
        }
        info!("schedule {} {} acknowledged", schedule_id, action);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct AckEnvelope {
    success: bool,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SchedulesEnvelope {
    success: bool,
    error: Option<String>,
    #[serde(default)]
    schedules: Vec<Schedule>,
}

#[derive(Debug, Deserialize)]
struct LogsEnvelope {
    success: bool,
    error: Option<String>,
    #[serde(default)]
    executions: Vec<ExecutionLog>,
}

#[async_trait]
impl ScheduleManager for HttpScheduleManager {
    async fn list_schedules(&self) -> Result<Vec<Schedule>, ClientError> {
        let envelope: SchedulesEnvelope = self
            .authorized(self.client.get(self.url("")))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if !envelope.success {
            return Err(ClientError::Api(
                envelope.error.unwrap_or_else(|| "Unknown".to_string()),
            ));
        }
        Ok(envelope.schedules)
    }

    async fn pause(&self, schedule_id: &str) -> Result<(), ClientError> {
        self.post_action(schedule_id, "pause").await
    }

    async fn resume(&self, schedule_id: &str) -> Result<(), ClientError> {
        self.post_action(schedule_id, "resume").await
    }

    async fn trigger_now(&self, schedule_id: &str) -> Result<(), ClientError> {
        self.post_action(schedule_id, "trigger").await
    }

    async fn logs(&self, schedule_id: &str, limit: usize) -> Result<Vec<ExecutionLog>, ClientError> {
        let envelope: LogsEnvelope = self
            .authorized(
                self.client
                    .get(self.url(&format!("/{schedule_id}/logs")))
                    .query(&[("limit", limit)]),
            )
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if !envelope.success {
            return Err(ClientError::Api(
                envelope.error.unwrap_or_else(|| "Unknown".to_string()),
            ));
        }
        Ok(envelope.executions)
    }
}

/// Translate a 5-field cron expression into readable text. Covers the
/// shapes the scheduler actually emits; anything else is echoed back.
pub fn cron_to_human(expr: &str) -> String {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    if fields.len() != 5 {
        return expr.to_string();
    }
    let (minute, hour, dom, _month, dow) = (fields[0], fields[1], fields[2], fields[3], fields[4]);

    if minute == "*" && hour == "*" && dom == "*" && dow == "*" {
        return "Every minute".to_string();
    }
    if let Some(step) = minute.strip_prefix("*/") {
        if hour == "*" && dom == "*" && dow == "*" {
            return format!("Every {step} minutes");
        }
    }
    if let Some(step) = hour.strip_prefix("*/") {
        if minute.parse::<u32>().is_ok() && dom == "*" && dow == "*" {
            return format!("Every {step} hours");
        }
    }
    let (minute, hour) = match (minute.parse::<u32>(), hour.parse::<u32>()) {
        (Ok(m), Ok(h)) => (m, h),
        _ => return expr.to_string(),
    };
    let time = format!("{hour}:{minute:02}");
    if dom == "*" && dow == "*" {
        return format!("Daily at {time}");
    }
    if dom == "*" {
        if let Some(day) = weekday_name(dow) {
            return format!("Every {day} at {time}");
        }
    }
    if dow == "*" {
        if let Ok(day) = dom.parse::<u32>() {
            return format!("Monthly on day {day} at {time}");
        }
    }
    expr.to_string()
}

fn weekday_name(field: &str) -> Option<&'static str> {
    match field {
        "0" | "7" => Some("Sunday"),
        "1" => Some("Monday"),
        "2" => Some("Tuesday"),
        "3" => Some("Wednesday"),
        "4" => Some("Thursday"),
        "5" => Some("Friday"),
        "6" => Some("Saturday"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_cron_shapes() {
        assert_eq!(cron_to_human("* * * * *"), "Every minute");
        assert_eq!(cron_to_human("*/15 * * * *"), "Every 15 minutes");
        assert_eq!(cron_to_human("0 */6 * * *"), "Every 6 hours");
        assert_eq!(cron_to_human("0 9 * * *"), "Daily at 9:00");
        assert_eq!(cron_to_human("30 8 * * 1"), "Every Monday at 8:30");
        assert_eq!(cron_to_human("0 12 1 * *"), "Monthly on day 1 at 12:00");
    }

    #[test]
    fn unrecognized_expressions_echo_back() {
        assert_eq!(cron_to_human("not a cron"), "not a cron");
        assert_eq!(cron_to_human("0 9 * *"), "0 9 * *");
    }

    #[test]
    fn schedule_tolerates_missing_timestamps() {
        let schedule: Schedule = serde_json::from_value(serde_json::json!({
            "id": "s1",
            "agent_id": "a1",
            "is_active": true,
            "cron_expression": "0 9 * * *"
        }))
        .unwrap();
        assert!(schedule.next_run_time.is_none());
        assert!(schedule.last_run_at.is_none());
    }
}
