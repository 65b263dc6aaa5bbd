//! Kanban view of tracked job opportunities.

use crate::card::CoordinatorReport;
use serde::{Deserialize, Serialize};

/// Pipeline stage of a tracked job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStage {
    Discovered,
    Applied,
    Contacted,
    Replied,
    Interview,
    Done,
}

impl JobStage {
    pub const ALL: [JobStage; 6] = [
        JobStage::Discovered,
        JobStage::Applied,
        JobStage::Contacted,
        JobStage::Replied,
        JobStage::Interview,
        JobStage::Done,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            JobStage::Discovered => "DISCOVERED",
            JobStage::Applied => "APPLIED",
            JobStage::Contacted => "CONTACTED",
            JobStage::Replied => "REPLIED",
            JobStage::Interview => "INTERVIEW",
            JobStage::Done => "DONE",
        }
    }

    /// Infer a stage from a free-text status string. Substring rules
    /// are evaluated in order; the first match wins even when a later
    /// rule would also match.
    pub fn infer(status: &str) -> JobStage {
        let lower = status.to_lowercase();
        if lower.contains("applied") || lower.contains("submitted") {
            JobStage::Applied
        } else if lower.contains("contact") || lower.contains("outreach") {
            JobStage::Contacted
        } else if lower.contains("repl") {
            JobStage::Replied
        } else if lower.contains("interview") {
            JobStage::Interview
        } else if lower.contains("done") || lower.contains("accepted") || lower.contains("offer") {
            JobStage::Done
        } else {
            JobStage::Discovered
        }
    }
}

/// A locally tracked job opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanbanJob {
    pub id: u64,
    pub company: String,
    pub role: String,
    pub stage: JobStage,
    pub match_score: Option<f64>,
    pub channel: Option<String>,
}

/// Insertion-ordered board. New entries are prepended; an existing
/// entry is never re-classified by a later response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KanbanBoard {
    jobs: Vec<KanbanJob>,
    next_id: u64,
}

impl KanbanBoard {
    pub fn jobs(&self) -> &[KanbanJob] {
        &self.jobs
    }

    pub fn in_stage(&self, stage: JobStage) -> impl Iterator<Item = &KanbanJob> {
        self.jobs.iter().filter(move |job| job.stage == stage)
    }

    /// Track the high-priority jobs from a coordinator result.
    pub fn absorb(&mut self, report: &CoordinatorReport) {
        for job in report.high_priority_jobs.iter().rev() {
            let stage = job
                .status
                .as_deref()
                .or(job.action_taken.as_deref())
                .map(JobStage::infer)
                .unwrap_or(JobStage::Discovered);
            let entry = KanbanJob {
                id: self.next_id,
                company: job.company.clone().unwrap_or_else(|| "--".to_string()),
                role: job.title.clone().unwrap_or_else(|| "--".to_string()),
                stage,
                match_score: job.match_score,
                channel: job.channel.clone(),
            };
            self.next_id += 1;
            self.jobs.insert(0, entry);
        }
    }
}
