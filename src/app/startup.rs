use super::cli::args::Args;
use super::cli::config::{FileConfig, Settings};
use super::commands;
use crate::core::error_handling::{display_message, log_error_with_context};
use crate::core::logging::init_logging;
use crate::core::styles::StyleRole;
use std::io::IsTerminal;

/// Run the application and return the process exit code
pub async fn startup() -> i32 {
    let terminal_color = std::io::stdout().is_terminal();
    let help_color = terminal_color && !std::env::args().any(|arg| arg == "--no-color");

    let args = Args::parse_with_styles(help_color);

    // Configuration is loaded before logging starts, so failures go to stderr
    let file_config = match FileConfig::load(args.config_file.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let settings = match Settings::resolve(&args, file_config, terminal_color) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if let Err(e) = init_logging(
        Some(&settings.log_level),
        Some(&settings.log_format),
        settings.log_file.as_deref(),
        settings.color,
    ) {
        eprintln!("Error initialising logging: {}", e);
        return 1;
    }

    log::info!(
        "vtdesk {} starting: {}",
        crate::core::version::version(),
        commands::describe(&args.command)
    );
    log::debug!("Resolved settings: {:?}", settings);

    let context = commands::describe(&args.command);
    match commands::run(&args.command, &settings).await {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            log_error_with_context(&e, context);
            // The logger already showed it on stderr unless errors are filtered out
            if !log::log_enabled!(log::Level::Error) {
                eprintln!(
                    "{}",
                    StyleRole::Error.paint(&display_message(&e, context), settings.color)
                );
            }
            1
        }
    }
}
