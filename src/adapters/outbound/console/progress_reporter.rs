use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;
use std::io::IsTerminal;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with the outcome JSON
/// printed on stdout. Uses indicatif for the enrichment progress bar and
/// colors warnings and errors when stderr is a terminal.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
    colored: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
            colored: std::io::stderr().is_terminal(),
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut pb_option = self.progress_bar.borrow_mut();
        if let Some(pb) = pb_option.as_ref() {
            pb.clone()
        } else {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            *pb_option = Some(pb.clone());
            pb
        }
    }

    /// Finishes and forgets the current bar so the next operation gets a fresh one
    fn finish_progress_bar(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }

    /// Prints above the progress bar when one is active
    fn print_line(&self, line: String) {
        match self.progress_bar.borrow().as_ref() {
            Some(pb) => pb.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.print_line(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
        if current >= total {
            self.finish_progress_bar();
        }
    }

    fn report_warning(&self, message: &str) {
        if self.colored {
            self.print_line(format!("⚠️  {}", message.yellow()));
        } else {
            self.print_line(format!("⚠️  {}", message));
        }
    }

    fn report_error(&self, message: &str) {
        self.finish_progress_bar();
        if self.colored {
            eprintln!("{}", message.red());
        } else {
            eprintln!("{}", message);
        }
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!();
        if self.colored {
            eprintln!("{}", message.green().bold());
        } else {
            eprintln!("{}", message);
        }
    }
}
