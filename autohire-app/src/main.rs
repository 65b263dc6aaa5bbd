use anyhow::Result;
use autohire_app::config::Config;
use autohire_app::forms::{CraftForm, OutreachForm, ScheduleForm};
use autohire_app::input::{ask, ask_required, read_line, LineOutcome};
use autohire_app::processor::{Outcome, Processor};
use autohire_app::render;
use autohire_client::{HttpAgentClient, HttpKnowledgeBase, HttpScheduleManager};
use autohire_core::FormKind;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load_or_init()?;
    let endpoint = config.endpoint();
    let api_key = config.api_key();

    let invoker = Arc::new(HttpAgentClient::new(endpoint.clone(), api_key.clone()));
    let knowledge = Arc::new(HttpKnowledgeBase::new(endpoint.clone(), api_key.clone()));
    let scheduler = Arc::new(HttpScheduleManager::new(endpoint, api_key));

    let mut processor = Processor::new(config, invoker, knowledge, scheduler);
    processor.refresh_schedule().await;
    processor.session.log.push(
        autohire_core::MessageKind::System,
        None,
        "AutoHire Terminal v2.0 initialized. Type /help for available commands.",
        None,
    );

    let mut next_render_id = 0u64;
    loop {
        next_render_id = flush_log(&processor, next_render_id);

        let line = match read_line("> ", &mut processor.session.history)? {
            LineOutcome::Submit(line) => line,
            LineOutcome::Exit => break,
        };
        let trimmed = line.trim();
        if trimmed == "exit" || trimmed == "quit" {
            break;
        }

        match processor.process(&line).await {
            Outcome::Done => {}
            Outcome::NeedForm(kind) => {
                next_render_id = flush_log(&processor, next_render_id);
                run_form(&mut processor, kind).await?;
            }
            Outcome::NeedUpload => {
                next_render_id = flush_log(&processor, next_render_id);
                run_upload(&mut processor).await?;
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}

/// Print every log entry not yet shown; returns the next unseen id.
fn flush_log(processor: &Processor, from_id: u64) -> u64 {
    let mut next = from_id;
    for message in processor.session.log.since(from_id) {
        println!("{}", render::render_message(message));
        next = message.id + 1;
    }
    next
}

async fn run_form(processor: &mut Processor, kind: FormKind) -> Result<()> {
    match kind {
        FormKind::Outreach => {
            println!("Outreach email (Ctrl-C to abort):");
            let form = OutreachForm {
                recipient: ask_required("  Recipient name: ")?,
                email: ask_required("  Email: ")?,
                company: ask("  Company: ")?,
                role: ask("  Their role: ")?,
                context: ask("  Context: ")?,
            };
            processor.submit_outreach_form(form).await;
        }
        FormKind::Schedule => {
            println!("Interview scheduling (Ctrl-C to abort):");
            let form = ScheduleForm {
                recruiter_email: ask_required("  Recruiter email: ")?,
                thread_context: ask_required("  Thread context: ")?,
                availability: ask("  Availability: ")?,
            };
            processor.submit_schedule_form(form).await;
        }
        FormKind::Craft => {
            println!("Craft application (Ctrl-C to abort):");
            let form = CraftForm {
                company: ask_required("  Company: ")?,
                role: ask_required("  Role: ")?,
            };
            processor.submit_craft_form(form).await;
        }
    }
    Ok(())
}

async fn run_upload(processor: &mut Processor) -> Result<()> {
    let path = ask("Path to CV (pdf, docx, txt; empty to cancel): ")?;
    if path.is_empty() {
        return Ok(());
    }
    processor.upload(&PathBuf::from(path)).await;
    Ok(())
}
