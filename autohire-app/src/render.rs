//! Plain ANSI rendering of log messages, cards and status screens.
//! No alternate screen; the log scrolls like a chat transcript.

use autohire_client::{cron_to_human, DocumentInfo, ExecutionLog, Schedule};
use autohire_core::card::{
    ApplicationReport, Card, CoordinatorReport, CvReport, InterviewReport, OutreachReport,
    ScoutReport, TelegramReport,
};
use autohire_core::{JobStage, KanbanBoard, Message, MessageKind, PipelineMetrics};
use chrono::Local;

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const ACCENT: &str = "\x1b[38;5;39m";
const GREEN: &str = "\x1b[38;5;114m";
const RED: &str = "\x1b[38;5;203m";
const YELLOW: &str = "\x1b[38;5;221m";

fn paint(text: &str, style: &str) -> String {
    if std::env::var_os("NO_COLOR").is_none() {
        format!("{style}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// One log entry as display text, card body included.
pub fn render_message(message: &Message) -> String {
    let clock = message
        .timestamp
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string();
    let prefix = match message.kind {
        MessageKind::System => paint("[SYS]", DIM),
        MessageKind::User => paint(">", ACCENT),
        MessageKind::Agent => {
            let name = message
                .agent
                .map(|a| a.display_name())
                .unwrap_or("Agent");
            paint(&format!("[{name}]"), GREEN)
        }
        MessageKind::Error => paint("[ERR]", RED),
        MessageKind::File => paint("[FILE]", YELLOW),
    };
    let mut out = format!("{} {} {}", paint(&clock, DIM), prefix, message.text);
    if let Some(card) = &message.card {
        out.push('\n');
        out.push_str(&render_card(card));
    }
    out
}

/// Card body, one section block per shape.
pub fn render_card(card: &Card) -> String {
    match card {
        Card::Cv(report) => render_cv(report),
        Card::Coordinator(report) => render_coordinator(report),
        Card::Outreach(report) => render_outreach(report),
        Card::Scout(report) => render_scout(report),
        Card::Interview(report) => render_interview(report),
        Card::Application(report) => render_application(report),
        Card::Telegram(report) => render_telegram(report),
        Card::Text(text) => format!("  {text}"),
        Card::Raw(value) => {
            let dump = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            indent(&dump)
        }
    }
}

fn render_cv(report: &CvReport) -> String {
    let mut lines = vec![paint("  CV STRATEGY PROFILE", ACCENT)];
    if !report.target_roles.is_empty() {
        lines.push(format!("  TARGET ROLES: {}", report.target_roles.join(", ")));
    }
    if let Some(years) = &report.experience_years {
        lines.push(format!("  EXPERIENCE: {} years", plain(years)));
    }
    if !report.top_skills.is_empty() {
        lines.push(format!("  SKILLS: {}", report.top_skills.join(", ")));
    }
    push_list(&mut lines, "KEY STRENGTHS", &report.key_strengths);
    push_list(&mut lines, "DIFFERENTIATORS", &report.differentiators);
    if let Some(summary) = &report.strategy_summary {
        lines.push(format!("  STRATEGY: {summary}"));
    }
    if !report.recommended_channels.is_empty() {
        lines.push(format!("  CHANNELS: {}", report.recommended_channels.join(", ")));
    }
    if let Some(salary) = &report.salary_positioning {
        lines.push(format!("  SALARY: {salary}"));
    }
    push_list(&mut lines, "GAPS", &report.cv_gaps);
    push_list(&mut lines, "FIXES", &report.quick_fixes);
    lines.join("\n")
}

fn render_coordinator(report: &CoordinatorReport) -> String {
    let mut lines = vec![paint("  HUNT CYCLE REPORT", ACCENT)];
    lines.push(format!(
        "  Jobs: {}  Applied: {}  Emails: {}  Pending: {}",
        opt_num(report.jobs_found),
        opt_num(report.applications_sent),
        opt_num(report.emails_sent),
        opt_num(report.pending_approvals),
    ));
    for job in &report.high_priority_jobs {
        let score = job
            .match_score
            .map(|s| format!(" [{s:.0}%]"))
            .unwrap_or_default();
        let status = job
            .status
            .as_deref()
            .or(job.action_taken.as_deref())
            .unwrap_or("--");
        lines.push(format!(
            "  * {} @ {}{} - {}",
            job.title.as_deref().unwrap_or("--"),
            job.company.as_deref().unwrap_or("--"),
            score,
            status,
        ));
    }
    if let Some(summary) = &report.daily_summary {
        lines.push(format!("  SUMMARY: {summary}"));
    }
    if let Some(outreach) = &report.outreach_summary {
        lines.push(format!("  OUTREACH: {outreach}"));
    }
    push_list(&mut lines, "NEXT ACTIONS", &report.next_actions);
    lines.join("\n")
}

fn render_scout(report: &ScoutReport) -> String {
    let mut lines = vec![paint("  JOB SCAN RESULTS", ACCENT)];
    lines.push(format!(
        "  Found: {}  High priority: {}",
        opt_num(report.jobs_found),
        opt_num(report.high_priority_count),
    ));
    for job in &report.jobs {
        let score = job
            .match_score
            .map(|s| format!(" [{s:.0}%]"))
            .unwrap_or_default();
        let mut line = format!(
            "  * {} @ {}{}",
            job.title.as_deref().unwrap_or("--"),
            job.company.as_deref().unwrap_or("--"),
            score,
        );
        if let Some(location) = &job.location {
            line.push_str(&format!(" ({location})"));
        }
        if let Some(channel) = &job.channel {
            line.push_str(&format!(" via {channel}"));
        }
        if let Some(salary) = &job.salary_range {
            line.push_str(&format!(" - {salary}"));
        }
        lines.push(line);
        if let Some(url) = &job.url {
            lines.push(paint(&format!("    {url}"), DIM));
        }
    }
    if let Some(summary) = &report.search_summary {
        lines.push(format!("  SUMMARY: {summary}"));
    }
    lines.join("\n")
}

fn render_outreach(report: &OutreachReport) -> String {
    let mut lines = vec![paint("  OUTREACH REPORT", ACCENT)];
    lines.push(format!(
        "  Emails sent: {}  Follow-ups: {}",
        opt_num(report.emails_sent),
        opt_num(report.follow_ups_scheduled),
    ));
    for target in &report.outreach_targets {
        let mut line = format!("  * {}", target.name.as_deref().unwrap_or("--"));
        if let Some(company) = &target.company {
            line.push_str(&format!(" @ {company}"));
        }
        if let Some(role) = &target.role {
            line.push_str(&format!(" ({role})"));
        }
        if let Some(status) = &target.email_status {
            line.push_str(&format!(" - {status}"));
        }
        lines.push(line);
        if let Some(subject) = &target.email_subject {
            lines.push(paint(&format!("    \"{subject}\""), DIM));
        }
    }
    if let Some(summary) = &report.summary {
        lines.push(format!("  SUMMARY: {summary}"));
    }
    lines.join("\n")
}

fn render_interview(report: &InterviewReport) -> String {
    let headline = if report.scheduled() {
        paint("  INTERVIEW SCHEDULED", GREEN)
    } else {
        paint("  INTERVIEW UPDATE", ACCENT)
    };
    let mut lines = vec![headline];
    if let Some(company) = &report.company {
        let role = report.role.as_deref().unwrap_or("--");
        lines.push(format!("  {role} @ {company}"));
    }
    match (&report.interview_date, &report.interview_time) {
        (Some(date), Some(time)) => lines.push(format!("  When: {date} {time}")),
        (Some(date), None) => lines.push(format!("  When: {date}")),
        _ => {}
    }
    if let Some(format) = &report.interview_format {
        lines.push(format!("  Format: {format}"));
    }
    if let Some(interviewer) = &report.interviewer {
        lines.push(format!("  With: {interviewer}"));
    }
    if report
        .calendar_event_created
        .as_ref()
        .is_some_and(autohire_core::card::truthy)
    {
        lines.push(paint("  Calendar event created", GREEN));
    }
    if let Some(status) = &report.status {
        lines.push(format!("  Status: {status}"));
    }
    if let Some(notes) = &report.notes {
        lines.push(format!("  Notes: {notes}"));
    }
    lines.join("\n")
}

fn render_application(report: &ApplicationReport) -> String {
    let mut lines = vec![paint("  CRAFTED APPLICATIONS", ACCENT)];
    if let Some(total) = report.total_crafted {
        lines.push(format!("  Total: {total}"));
    }
    for application in &report.applications {
        lines.push(format!(
            "  * {} @ {}",
            application.job_title.as_deref().unwrap_or("--"),
            application.company.as_deref().unwrap_or("--"),
        ));
        push_list(&mut lines, "  PROJECTS", &application.highlighted_projects);
        push_list(&mut lines, "  ALIGNMENT", &application.key_alignment_points);
        if let Some(message) = &application.application_message {
            lines.push(paint(&format!("    {message}"), DIM));
        }
        if let Some(letter) = &application.cover_letter {
            lines.push(paint("    Cover letter:", DIM));
            lines.push(indent(letter));
        }
    }
    if let Some(summary) = &report.summary {
        lines.push(format!("  SUMMARY: {summary}"));
    }
    lines.join("\n")
}

fn render_telegram(report: &TelegramReport) -> String {
    let title = report.message_title.as_deref().unwrap_or("NOTIFICATION");
    let mut lines = vec![paint(&format!("  {title}"), ACCENT)];
    if let Some(body) = &report.message_body {
        lines.push(format!("  {body}"));
    }
    if let Some(metrics) = &report.metrics {
        lines.push(format!(
            "  Jobs: {}  Applied: {}  Responses: {}  Interviews: {}",
            opt_num(metrics.jobs_found),
            opt_num(metrics.applications_sent),
            opt_num(metrics.responses_received),
            opt_num(metrics.interviews_scheduled),
        ));
    }
    if report
        .action_required
        .as_ref()
        .is_some_and(autohire_core::card::truthy)
    {
        lines.push(paint("  ACTION REQUIRED", YELLOW));
        for option in &report.action_options {
            lines.push(format!("    - {option}"));
        }
    }
    lines.join("\n")
}

/// The `/status` screen: local pipeline counters plus schedule state.
pub fn status_text(metrics: &PipelineMetrics, schedule: Option<&Schedule>) -> String {
    let mut lines = vec![paint("PIPELINE STATUS", ACCENT)];
    lines.push(format!(
        "  Jobs found: {}   Applied: {}   Emails sent: {}   Interviews: {}   Pending: {}",
        metrics.jobs_found, metrics.applied, metrics.emails_sent, metrics.interviews, metrics.pending,
    ));
    lines.push(String::new());
    lines.push(paint("SCHEDULE", ACCENT));
    match schedule {
        Some(schedule) => {
            let state = if schedule.is_active {
                paint("ACTIVE", GREEN)
            } else {
                paint("PAUSED", YELLOW)
            };
            let cadence = schedule
                .cron_expression
                .as_deref()
                .map(cron_to_human)
                .unwrap_or_else(|| "--".to_string());
            lines.push(format!("  {state}  {cadence}"));
            if let Some(next) = schedule.next_run_time {
                lines.push(format!(
                    "  Next: {}",
                    next.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                ));
            }
            if let Some(last) = schedule.last_run_at {
                lines.push(format!(
                    "  Last: {}",
                    last.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                ));
            }
        }
        None => lines.push(paint("  No schedule configured", DIM)),
    }
    lines.join("\n")
}

/// The `/board` screen, one column block per stage.
pub fn board_text(board: &KanbanBoard) -> String {
    if board.jobs().is_empty() {
        return "No jobs tracked yet. Run /hunt or /scout to populate the board.".to_string();
    }
    let mut lines = vec![paint("JOB BOARD", ACCENT)];
    for stage in JobStage::ALL {
        let jobs: Vec<_> = board.in_stage(stage).collect();
        if jobs.is_empty() {
            continue;
        }
        lines.push(paint(&format!("  {} ({})", stage.label(), jobs.len()), DIM));
        for job in jobs {
            let score = job
                .match_score
                .map(|s| format!(" [{s:.0}%]"))
                .unwrap_or_default();
            let channel = job
                .channel
                .as_deref()
                .map(|c| format!(" via {c}"))
                .unwrap_or_default();
            lines.push(format!("    {} @ {}{}{}", job.role, job.company, score, channel));
        }
    }
    lines.join("\n")
}

/// The `/agents` roster.
pub fn agents_text() -> String {
    let mut lines = vec![paint("AGENT ROSTER", ACCENT)];
    for agent in autohire_core::AgentKind::ALL {
        lines.push(format!("  {:<16} {}", agent.display_name(), agent.purpose()));
    }
    lines.join("\n")
}

/// The `/docs` listing.
pub fn docs_text(documents: &[DocumentInfo]) -> String {
    if documents.is_empty() {
        return "Knowledge base is empty. Use /upload to add your CV.".to_string();
    }
    let mut lines = vec![paint(&format!("DOCUMENTS ({}):", documents.len()), ACCENT)];
    for document in documents {
        let size = document
            .size_bytes
            .map(human_size)
            .unwrap_or_else(|| "--".to_string());
        let mut line = format!("  {} ({size})", document.file_name);
        if let Some(uploaded) = document.uploaded_at {
            line.push_str(&format!(
                "  {}",
                uploaded.with_timezone(&Local).format("%Y-%m-%d")
            ));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// One `/logs` entry line.
pub fn execution_log_line(log: &ExecutionLog) -> String {
    let mark = if log.success {
        paint("[OK]", GREEN)
    } else {
        paint("[FAIL]", RED)
    };
    let mut line = format!(
        "  {mark} {} (attempt {}/{})",
        log.executed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        log.attempt,
        log.max_attempts,
    );
    if let Some(error) = &log.error_message {
        line.push_str(&format!(" - {error}"));
    }
    line
}

fn push_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("  {heading}:"));
    for item in items {
        lines.push(format!("    - {item}"));
    }
}

fn opt_num(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "--".to_string())
}

fn plain(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn human_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
