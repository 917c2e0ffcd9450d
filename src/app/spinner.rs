//! Simple progress spinner for terminal feedback

use std::future::Future;
use std::io::Write;
use tokio::time::{interval, Duration};

const BRAILLE_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Check if spinner should be displayed
pub fn should_show_spinner() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr()) && !log::log_enabled!(log::Level::Info)
}

/// Simple spinner struct
pub struct ProgressSpinner {
    frame_index: usize,
    message: String,
}

impl ProgressSpinner {
    pub fn new(message: &str) -> Self {
        Self {
            frame_index: 0,
            message: message.to_string(),
        }
    }

    pub fn tick(&mut self) {
        let frame = BRAILLE_FRAMES[self.frame_index];
        self.frame_index = (self.frame_index + 1) % BRAILLE_FRAMES.len();

        // Clear line and show spinner with message
        eprint!("\r{frame} {}", self.message);
        let _ = std::io::stderr().flush();
    }

    pub fn finish(&self) {
        eprint!("\r{}\r", " ".repeat(self.message.chars().count() + 2));
        let _ = std::io::stderr().flush();
    }
}

/// Await `task`, animating a spinner on stderr until it completes
///
/// Nothing is drawn when stderr is not a terminal or info logging is on.
pub async fn with_spinner<F: Future>(message: &str, task: F) -> F::Output {
    if !should_show_spinner() {
        return task.await;
    }

    let mut spinner = ProgressSpinner::new(message);
    let mut update_interval = interval(Duration::from_millis(100)); // 10Hz
    tokio::pin!(task);

    loop {
        tokio::select! {
            output = &mut task => {
                spinner.finish();
                return output;
            }

            // Update spinner animation
            _ = update_interval.tick() => {
                spinner.tick();
            }
        }
    }
}
