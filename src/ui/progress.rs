use crate::ui::theme;
use crate::ui::Icons;
use indicatif::{HumanDuration, ProgressBar};
use owo_colors::OwoColorize;
use std::time::Duration;

pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if console::Term::stdout().is_term() {
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(message.to_string());
        Self { pb }
    }

    pub fn finish_with_message(&self, msg: &str) {
        self.pb.finish_with_message(msg.to_string());
    }

    /// Clear the spinner and report a failure on stderr
    pub fn fail(&self, msg: &str) {
        self.pb.finish_and_clear();
        eprintln!("{} {}", Icons::CROSS, msg.style(theme().error.clone()));
    }

    /// Clear the spinner and print a one-line seed summary
    pub fn finish_with_summary(&self, duration: Duration, components: usize, links: usize, roles: usize) {
        self.pb.finish_and_clear();
        println!(
            "{} {}",
            Icons::CHECK.style(theme().success.clone()),
            format!("Seeded in {}", HumanDuration(duration)).style(theme().success.clone())
        );
        println!(
            "  {} {}  {} {}  {} {}",
            Icons::PACKAGE.style(theme().info.clone()),
            components,
            Icons::LINK.style(theme().info.clone()),
            links,
            Icons::STAR.style(theme().info.clone()),
            roles
        );
    }
}
