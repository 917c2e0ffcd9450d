//! Subcommand handlers
//!
//! Each handler drives the orchestrator and prints the result. A handler
//! returns `Ok(false)` when the action ran but did not succeed (a rejected
//! upload, an unavailable report) after telling the user why.

use super::cli::args::{Command, KeyAction};
use super::cli::config::Settings;
use super::cli::display;
use super::spinner::with_spinner;
use crate::core::error_handling::ContextualError;
use crate::core::styles::StyleRole;
use crate::core::version;
use crate::scanner::{ScanError, ScanOrchestrator};
use crate::service::{ClientConfig, ServiceError, VirusTotalClient};
use crate::storage::{StorageError, StorageLayout};
use std::sync::Arc;

/// Characters of the API key left visible by `key show`
const KEY_VISIBLE_SUFFIX: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("No hash given and the scan history is empty")]
    NothingToReport,

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl ContextualError for CommandError {
    fn is_user_actionable(&self) -> bool {
        match self {
            CommandError::Scan(e) => e.is_user_actionable(),
            CommandError::Service(e) => e.is_user_actionable(),
            CommandError::Storage(e) => e.is_user_actionable(),
            CommandError::NothingToReport => true,
            CommandError::Output(_) => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            CommandError::Scan(e) => e.user_message(),
            CommandError::Service(e) => e.user_message(),
            CommandError::Storage(e) => e.user_message(),
            CommandError::NothingToReport => {
                Some("No hash given and there are no previous scans to report on")
            }
            CommandError::Output(_) => None,
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Short description of a command for error context
pub fn describe(command: &Command) -> &'static str {
    match command {
        Command::Select { .. } => "Selecting file",
        Command::Upload { .. } => "Uploading file",
        Command::Report { .. } => "Fetching report",
        Command::History { .. } => "Reading scan history",
        Command::Key { .. } => "Managing API key",
        Command::About => "Showing build information",
    }
}

/// Build an orchestrator from resolved settings
pub fn build_orchestrator(settings: &Settings) -> CommandResult<ScanOrchestrator> {
    let layout = match &settings.data_dir {
        Some(dir) => StorageLayout::new(dir),
        None => StorageLayout::default_location()?,
    };
    log::debug!("Using storage root {}", layout.root().display());

    let client = VirusTotalClient::new(ClientConfig {
        base_url: settings.base_url.clone(),
    })?;
    log::debug!("Using analysis service at {}", client.base_url());

    Ok(ScanOrchestrator::new(Arc::new(client), layout))
}

/// Execute one subcommand
pub async fn run(command: &Command, settings: &Settings) -> CommandResult<bool> {
    if let Command::About = command {
        println!("{}", about_text());
        return Ok(true);
    }

    let orchestrator = build_orchestrator(settings)?;
    let use_color = settings.color;

    match command {
        Command::Select { file } => {
            let attributes = orchestrator.select_file(file).await?;
            println!("{}", display::format_attributes(&attributes));
            Ok(true)
        }
        Command::Upload { file } => {
            let attributes = orchestrator.select_file(file).await?;
            println!("{}", display::format_attributes(&attributes));

            let outcome = with_spinner("Uploading", orchestrator.upload()).await?;
            println!("{}", display::format_submission(&outcome, use_color));
            Ok(outcome.is_success())
        }
        Command::Report {
            hash,
            last: _,
            engines,
        } => {
            let hash = match hash {
                Some(hash) => hash.clone(),
                None => orchestrator
                    .latest_history_entry()
                    .ok_or(CommandError::NothingToReport)?,
            };

            let report = with_spinner("Fetching report", orchestrator.get_report(&hash)).await?;
            match report {
                Some(report) => {
                    display::print_report(&report, *engines, use_color)?;
                    Ok(true)
                }
                None => {
                    println!(
                        "{}",
                        StyleRole::Warning.paint(display::REPORT_UNAVAILABLE_MESSAGE, use_color)
                    );
                    Ok(false)
                }
            }
        }
        Command::History { full, clear } => {
            if *clear {
                orchestrator.clear_history()?;
                println!("Scan history cleared.");
            } else {
                println!(
                    "{}",
                    display::format_history(&orchestrator.get_history(), *full)
                );
            }
            Ok(true)
        }
        Command::Key { action } => {
            run_key_action(&orchestrator, action)?;
            Ok(true)
        }
        Command::About => Ok(true),
    }
}

fn run_key_action(orchestrator: &ScanOrchestrator, action: &KeyAction) -> CommandResult<()> {
    match action {
        KeyAction::Set { token } => {
            orchestrator.set_credential(token)?;
            println!(
                "API key saved to {}",
                orchestrator.credential_path().display()
            );
        }
        KeyAction::Show => {
            let token = orchestrator.get_credential();
            if token.is_empty() {
                println!("No API key is set.");
            } else {
                println!("API key: {}", mask_token(&token));
                println!("Stored at: {}", orchestrator.credential_path().display());
            }
        }
        KeyAction::Clear => {
            orchestrator.clear_credential()?;
            println!("API key cleared.");
        }
    }
    Ok(())
}

/// Replace all but the last few characters with `*`
pub fn mask_token(token: &str) -> String {
    let length = token.chars().count();
    let hidden = length.saturating_sub(KEY_VISIBLE_SUFFIX);
    token
        .chars()
        .enumerate()
        .map(|(i, c)| if i < hidden { '*' } else { c })
        .collect()
}

pub fn about_text() -> String {
    format!(
        "vtdesk {} (built {}, commit {})\n\
         An independent VirusTotal client. Not affiliated with or endorsed by VirusTotal.",
        version::version(),
        version::build_time(),
        version::git_hash()
    )
}
