//! The seven remote agent capabilities the terminal can drive.

use crate::card::CardType;
use serde::{Deserialize, Serialize};

/// Stable identity of a remote agent capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    CvStrategist,
    JobScout,
    ApplicationCrafter,
    OutreachAgent,
    JobHuntCoordinator,
    InterviewScheduler,
    TelegramNotifier,
}

impl AgentKind {
    pub const ALL: [AgentKind; 7] = [
        AgentKind::CvStrategist,
        AgentKind::JobScout,
        AgentKind::ApplicationCrafter,
        AgentKind::OutreachAgent,
        AgentKind::JobHuntCoordinator,
        AgentKind::InterviewScheduler,
        AgentKind::TelegramNotifier,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentKind::CvStrategist => "CV Strategist",
            AgentKind::JobScout => "Job Scout",
            AgentKind::ApplicationCrafter => "App Crafter",
            AgentKind::OutreachAgent => "Outreach",
            AgentKind::JobHuntCoordinator => "Coordinator",
            AgentKind::InterviewScheduler => "Interview Sched.",
            AgentKind::TelegramNotifier => "Telegram",
        }
    }

    pub fn purpose(&self) -> &'static str {
        match self {
            AgentKind::CvStrategist => "Analyzes CV, extracts strategy profile",
            AgentKind::JobScout => "Searches job boards for matches",
            AgentKind::ApplicationCrafter => "Generates cover letters & applications",
            AgentKind::OutreachAgent => "Sends personalized recruiter emails",
            AgentKind::JobHuntCoordinator => "Orchestrates daily job hunt cycle",
            AgentKind::InterviewScheduler => "Negotiates & schedules interviews",
            AgentKind::TelegramNotifier => "Sends notifications & approvals",
        }
    }

    /// Canonical card type when a payload carries no explicit type tag.
    pub fn card_type(&self) -> CardType {
        match self {
            AgentKind::CvStrategist => CardType::Cv,
            AgentKind::JobScout => CardType::Scout,
            AgentKind::ApplicationCrafter => CardType::Application,
            AgentKind::OutreachAgent => CardType::Outreach,
            AgentKind::JobHuntCoordinator => CardType::Coordinator,
            AgentKind::InterviewScheduler => CardType::Interview,
            AgentKind::TelegramNotifier => CardType::Telegram,
        }
    }
}
