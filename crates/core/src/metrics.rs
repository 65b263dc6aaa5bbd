//! Running pipeline counters folded from classified agent results.

use crate::card::Card;
use serde::{Deserialize, Serialize};

/// Cumulative job-search progress. All counters are merge-by-presence:
/// a result that omits a field never clobbers the prior value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineMetrics {
    pub jobs_found: u64,
    pub applied: u64,
    pub emails_sent: u64,
    pub interviews: u64,
    pub pending: u64,
}

impl PipelineMetrics {
    /// Fold one classified result into the running totals.
    ///
    /// The per-field policy is deliberately mixed: coordinator and
    /// scout results report cycle totals and replace, outreach results
    /// report only the emails just sent and add, and interview results
    /// increment by one when a slot was actually booked.
    pub fn absorb(&mut self, card: &Card) {
        match card {
            Card::Coordinator(report) => {
                if let Some(v) = report.jobs_found {
                    self.jobs_found = v;
                }
                if let Some(v) = report.applications_sent {
                    self.applied = v;
                }
                if let Some(v) = report.emails_sent {
                    self.emails_sent = v;
                }
                if let Some(v) = report.pending_approvals {
                    self.pending = v;
                }
            }
            Card::Scout(report) => {
                if let Some(v) = report.jobs_found {
                    self.jobs_found = v;
                }
            }
            Card::Outreach(report) => {
                if let Some(v) = report.emails_sent {
                    self.emails_sent += v;
                }
            }
            Card::Interview(report) => {
                if report.scheduled() {
                    self.interviews += 1;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentKind;
    use crate::card::classify;
    use serde_json::json;

    fn card_for(agent: AgentKind, payload: serde_json::Value) -> Card {
        classify(Some(agent), &payload)
    }

    #[test]
    fn coordinator_replaces_present_fields_only() {
        let mut metrics = PipelineMetrics {
            jobs_found: 2,
            applied: 1,
            emails_sent: 3,
            interviews: 1,
            pending: 4,
        };
        metrics.absorb(&card_for(
            AgentKind::JobHuntCoordinator,
            json!({"jobs_found": 12, "applications_sent": 5}),
        ));
        assert_eq!(metrics.jobs_found, 12);
        assert_eq!(metrics.applied, 5);
        // Absent fields keep prior values.
        assert_eq!(metrics.emails_sent, 3);
        assert_eq!(metrics.pending, 4);
        assert_eq!(metrics.interviews, 1);
    }

    #[test]
    fn scout_without_emails_sent_leaves_emails_intact() {
        let mut metrics = PipelineMetrics::default();
        metrics.absorb(&card_for(
            AgentKind::JobHuntCoordinator,
            json!({"emails_sent": 3}),
        ));
        metrics.absorb(&card_for(AgentKind::JobScout, json!({"jobs_found": 9})));
        assert_eq!(metrics.emails_sent, 3);
        assert_eq!(metrics.jobs_found, 9);
    }

    #[test]
    fn outreach_emails_are_additive() {
        let mut metrics = PipelineMetrics::default();
        metrics.absorb(&card_for(AgentKind::OutreachAgent, json!({"emails_sent": 1})));
        metrics.absorb(&card_for(AgentKind::OutreachAgent, json!({"emails_sent": 2})));
        assert_eq!(metrics.emails_sent, 3);
    }

    #[test]
    fn interview_increments_by_one_regardless_of_numbers() {
        let mut metrics = PipelineMetrics::default();
        metrics.absorb(&card_for(
            AgentKind::InterviewScheduler,
            json!({"interview_scheduled": true, "interviews": 7}),
        ));
        assert_eq!(metrics.interviews, 1);
        metrics.absorb(&card_for(
            AgentKind::InterviewScheduler,
            json!({"interview_scheduled": false}),
        ));
        assert_eq!(metrics.interviews, 1);
    }
}
