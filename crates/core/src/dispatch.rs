//! Static command dispatch rules: which agent a command targets, how
//! its prompt is built, and what happens when arguments are missing.

use crate::agent::AgentKind;
use crate::card::CardType;
use crate::command::ParsedInput;
use crate::session::FormKind;

/// Resolved dispatch plan for one parsed input. The caller executes
/// the side effects; resolution itself is pure.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Print the static command reference.
    Help,
    /// Trigger the external file picker flow.
    Upload,
    /// Invoke a remote agent and classify the result as `tag`.
    Invoke {
        agent: AgentKind,
        prompt: String,
        tag: CardType,
        /// System message shown before the call; empty for free text.
        notice: String,
        /// Agent message text on success.
        done: String,
        /// Error prefix on failure.
        fail: String,
        /// Free text gets looser result handling than a command.
        freeform: bool,
    },
    /// Required arguments missing: show the inline form instead.
    ShowForm(FormKind),
    /// Read-only summary of local metrics plus schedule state.
    Status,
    /// Schedule mutations and reads, all against the one configured id.
    Pause,
    Activate,
    RunNow,
    Logs,
    /// Knowledge-base document listing / removal.
    Docs,
    RemoveDoc(String),
    /// Agent roster display.
    Agents,
    /// Kanban board display.
    Board,
    Unknown(String),
}

pub const ANALYZE_PROMPT: &str = "Analyze the uploaded CV and provide a comprehensive strategy \
    profile including target roles, key strengths, differentiators, top skills, strategy summary, \
    recommended channels, salary positioning, CV gaps, and quick fixes.";

pub const HUNT_PROMPT: &str = "Execute the daily job hunting cycle. Find matching jobs, craft \
    applications for high-priority matches, send outreach emails to recruiters, and provide a \
    comprehensive summary.";

pub const SCOUT_PROMPT: &str = "Search all job boards and channels for matching positions based \
    on my strategy profile. Return ranked results with match scores.";

pub fn craft_prompt(company: &str, role: &str) -> String {
    format!(
        "Craft a personalized application for the {role} position at {company}. Include cover \
         letter, application message, highlighted projects, and key alignment points."
    )
}

pub fn outreach_prompt(name: &str, email: &str, company: &str) -> String {
    let company = if company.is_empty() { "unknown company" } else { company };
    format!(
        "Send a personalized cold outreach email to {name} at {email}. They work at {company}. \
         Craft a compelling intro email."
    )
}

pub fn schedule_prompt(recruiter_email: &str, context: &str) -> String {
    format!(
        "Check email thread with {recruiter_email} regarding: {context}. Negotiate interview \
         time, confirm the slot, and create a Google Calendar event."
    )
}

/// Map a parsed input to its dispatch plan. Returns `None` for empty
/// input, which is a full no-op.
pub fn resolve(input: &ParsedInput) -> Option<Dispatch> {
    match input {
        ParsedInput::Empty => None,
        ParsedInput::FreeText(text) => Some(Dispatch::Invoke {
            agent: AgentKind::JobHuntCoordinator,
            prompt: text.clone(),
            tag: CardType::Coordinator,
            notice: String::new(),
            done: "Response received".to_string(),
            fail: "Error".to_string(),
            freeform: true,
        }),
        ParsedInput::Command { name, args } => Some(resolve_command(name, args)),
    }
}

fn resolve_command(name: &str, args: &[String]) -> Dispatch {
    match name {
        "/help" | "/start" => Dispatch::Help,
        "/upload" => Dispatch::Upload,
        "/analyze" => Dispatch::Invoke {
            agent: AgentKind::CvStrategist,
            prompt: ANALYZE_PROMPT.to_string(),
            tag: CardType::Cv,
            notice: "Running CV analysis...".to_string(),
            done: "CV analysis complete".to_string(),
            fail: "CV analysis failed".to_string(),
            freeform: false,
        },
        "/hunt" => Dispatch::Invoke {
            agent: AgentKind::JobHuntCoordinator,
            prompt: HUNT_PROMPT.to_string(),
            tag: CardType::Coordinator,
            notice: "Launching job hunt cycle... This may take a few minutes.".to_string(),
            done: "Hunt cycle complete".to_string(),
            fail: "Hunt cycle failed".to_string(),
            freeform: false,
        },
        "/scout" => Dispatch::Invoke {
            agent: AgentKind::JobScout,
            prompt: SCOUT_PROMPT.to_string(),
            tag: CardType::Scout,
            notice: "Scanning job boards...".to_string(),
            done: "Job scan complete".to_string(),
            fail: "Job scout failed".to_string(),
            freeform: false,
        },
        "/craft" => {
            let company = args.first();
            let role = join_rest(args, 1);
            match (company, role) {
                (Some(company), Some(role)) => Dispatch::Invoke {
                    agent: AgentKind::ApplicationCrafter,
                    prompt: craft_prompt(company, &role),
                    tag: CardType::Application,
                    notice: format!("Crafting application for {role} at {company}..."),
                    done: "Application crafted".to_string(),
                    fail: "Craft failed".to_string(),
                    freeform: false,
                },
                _ => Dispatch::ShowForm(FormKind::Craft),
            }
        }
        "/outreach" => {
            let name = args.first();
            let email = args.get(1);
            match (name, email) {
                (Some(name), Some(email)) => {
                    let company = join_rest(args, 2).unwrap_or_default();
                    Dispatch::Invoke {
                        agent: AgentKind::OutreachAgent,
                        prompt: outreach_prompt(name, email, &company),
                        tag: CardType::Outreach,
                        notice: format!("Sending outreach to {name} ({email})..."),
                        done: "Email sent".to_string(),
                        fail: "Outreach failed".to_string(),
                        freeform: false,
                    }
                }
                _ => Dispatch::ShowForm(FormKind::Outreach),
            }
        }
        "/schedule" => {
            let recruiter_email = args.first();
            let context = join_rest(args, 1);
            match (recruiter_email, context) {
                (Some(email), Some(context)) => Dispatch::Invoke {
                    agent: AgentKind::InterviewScheduler,
                    prompt: schedule_prompt(email, &context),
                    tag: CardType::Interview,
                    notice: format!("Scheduling interview via {email}..."),
                    done: "Interview processing complete".to_string(),
                    fail: "Interview scheduling failed".to_string(),
                    freeform: false,
                },
                _ => Dispatch::ShowForm(FormKind::Schedule),
            }
        }
        "/notify" => {
            let message = join_rest(args, 0).unwrap_or_else(|| "Status check".to_string());
            Dispatch::Invoke {
                agent: AgentKind::TelegramNotifier,
                prompt: message,
                tag: CardType::Telegram,
                notice: "Sending Telegram notification...".to_string(),
                done: "Notification sent".to_string(),
                fail: "Notification failed".to_string(),
                freeform: false,
            }
        }
        "/status" => Dispatch::Status,
        "/pause" => Dispatch::Pause,
        "/activate" => Dispatch::Activate,
        "/run" => Dispatch::RunNow,
        "/logs" => Dispatch::Logs,
        "/docs" => Dispatch::Docs,
        "/rm" => match join_rest(args, 0) {
            Some(file) => Dispatch::RemoveDoc(file),
            None => Dispatch::Docs,
        },
        "/agents" => Dispatch::Agents,
        "/board" => Dispatch::Board,
        other => Dispatch::Unknown(other.to_string()),
    }
}

fn join_rest(args: &[String], from: usize) -> Option<String> {
    if args.len() <= from {
        return None;
    }
    Some(args[from..].join(" "))
}

/// Static `/help` reference text.
pub fn help_text() -> String {
    [
        "Available Commands:",
        "",
        "/upload       - Upload CV (PDF, DOCX, TXT)",
        "/analyze      - Re-analyze CV in knowledge base",
        "/hunt         - Run full job hunt cycle (Coordinator)",
        "/scout        - Find matching jobs (Job Scout)",
        "/craft        - Craft application for a specific job",
        "/outreach     - Send recruiter outreach email",
        "/schedule     - Schedule an interview",
        "/notify [msg] - Send Telegram notification",
        "/status       - View schedule & pipeline status",
        "/board        - View job kanban board",
        "/agents       - List available agents",
        "/docs         - List knowledge base documents",
        "/rm <file>    - Remove a knowledge base document",
        "/pause        - Pause daily schedule",
        "/activate     - Activate daily schedule",
        "/run          - Trigger schedule now",
        "/logs         - View execution logs",
        "/help         - Show this help",
        "",
        "Or type any free-text message to talk to the Coordinator.",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse;

    fn resolve_raw(raw: &str) -> Dispatch {
        resolve(&parse(raw)).expect("non-empty input")
    }

    #[test]
    fn empty_input_resolves_to_none() {
        assert_eq!(resolve(&parse("   ")), None);
    }

    #[test]
    fn free_text_routes_to_coordinator_verbatim() {
        match resolve_raw("find me staff roles") {
            Dispatch::Invoke { agent, prompt, tag, .. } => {
                assert_eq!(agent, AgentKind::JobHuntCoordinator);
                assert_eq!(prompt, "find me staff roles");
                assert_eq!(tag, CardType::Coordinator);
            }
            other => panic!("expected invoke, got {other:?}"),
        }
    }

    #[test]
    fn craft_missing_args_shows_form() {
        assert_eq!(resolve_raw("/craft"), Dispatch::ShowForm(FormKind::Craft));
        assert_eq!(resolve_raw("/craft Stripe"), Dispatch::ShowForm(FormKind::Craft));
    }

    #[test]
    fn craft_joins_role_tokens() {
        match resolve_raw("/craft Stripe Senior Software Engineer") {
            Dispatch::Invoke { agent, prompt, .. } => {
                assert_eq!(agent, AgentKind::ApplicationCrafter);
                assert!(prompt.contains("Senior Software Engineer position at Stripe"));
            }
            other => panic!("expected invoke, got {other:?}"),
        }
    }

    #[test]
    fn outreach_args_map_to_name_email_company() {
        match resolve_raw("/outreach Jane jane@x.com Stripe") {
            Dispatch::Invoke { agent, prompt, notice, .. } => {
                assert_eq!(agent, AgentKind::OutreachAgent);
                assert!(prompt.contains("Jane at jane@x.com"));
                assert!(prompt.contains("work at Stripe"));
                assert_eq!(notice, "Sending outreach to Jane (jane@x.com)...");
            }
            other => panic!("expected invoke, got {other:?}"),
        }
    }

    #[test]
    fn outreach_missing_email_shows_form() {
        assert_eq!(resolve_raw("/outreach Jane"), Dispatch::ShowForm(FormKind::Outreach));
    }

    #[test]
    fn schedule_missing_context_shows_form() {
        assert_eq!(
            resolve_raw("/schedule recruiter@x.com"),
            Dispatch::ShowForm(FormKind::Schedule)
        );
    }

    #[test]
    fn notify_defaults_to_status_check() {
        match resolve_raw("/notify") {
            Dispatch::Invoke { agent, prompt, .. } => {
                assert_eq!(agent, AgentKind::TelegramNotifier);
                assert_eq!(prompt, "Status check");
            }
            other => panic!("expected invoke, got {other:?}"),
        }
        match resolve_raw("/notify interview at 3pm") {
            Dispatch::Invoke { prompt, .. } => assert_eq!(prompt, "interview at 3pm"),
            other => panic!("expected invoke, got {other:?}"),
        }
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(resolve_raw("/xyzzy"), Dispatch::Unknown("/xyzzy".to_string()));
    }

    #[test]
    fn command_name_is_case_insensitive() {
        assert_eq!(resolve_raw("/HUNT"), resolve_raw("/hunt"));
    }

    #[test]
    fn fixed_prompt_commands_have_no_arg_requirements() {
        for raw in ["/analyze", "/hunt", "/scout"] {
            assert!(matches!(resolve_raw(raw), Dispatch::Invoke { .. }), "{raw}");
        }
    }
}
