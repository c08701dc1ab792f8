//! Generate run summary and failure listing.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use owo_colors::{Stream, Style};

use super::Outcome;
use crate::logger::paint;
use crate::target::RenderTarget;
use crate::utils::path::relative_to;
use crate::utils::plural::plural_s;

/// What happened to every target of one run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Files written to disk.
    pub written: Vec<PathBuf>,
    /// Rendered but not written (`--dry`).
    pub rendered: Vec<PathBuf>,
    /// Failed targets and their error message.
    pub failures: BTreeMap<PathBuf, String>,
    /// Disabled targets.
    pub skipped: usize,
    /// Targets not started because of Ctrl+C.
    pub cancelled: usize,
}

impl GenerateReport {
    pub fn record(&mut self, target: &RenderTarget, outcome: Outcome) {
        match outcome {
            Outcome::Written => self.written.push(target.path.clone()),
            Outcome::Rendered => self.rendered.push(target.path.clone()),
            Outcome::Failed(message) => {
                self.failures.insert(target.path.clone(), message);
            }
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled > 0
    }

    /// Print failed targets to stderr, paths relative to `root`.
    pub fn print_failures(&self, root: &Path) {
        if self.failures.is_empty() {
            return;
        }
        eprintln!();

        let count = self.failures.len();
        let dim = Style::new().dimmed();
        eprintln!(
            "{} {}",
            paint(Stream::Stderr, "failed", Style::new().red().bold()),
            paint(Stream::Stderr, format!("({count} target{})", plural_s(count)), dim)
        );

        for (path, message) in &self.failures {
            let shown = relative_to(path, root);
            eprintln!(
                "{}{}{}",
                paint(Stream::Stderr, "[", dim),
                paint(Stream::Stderr, shown.display(), Style::new().cyan()),
                paint(Stream::Stderr, "]", dim)
            );
            eprintln!("{} {}", paint(Stream::Stderr, "→", Style::new().red()), message);
        }
    }
}

impl fmt::Display for GenerateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.written.is_empty() {
            parts.push(format!("{} written", self.written.len()));
        }
        if !self.rendered.is_empty() {
            parts.push(format!("{} rendered (dry run)", self.rendered.len()));
        }
        if self.skipped > 0 {
            parts.push(format!("{} disabled", self.skipped));
        }
        if self.cancelled > 0 {
            parts.push(format!("{} cancelled", self.cancelled));
        }
        if parts.is_empty() && self.failures.is_empty() {
            parts.push("nothing to do".to_string());
        }

        write!(f, "{}", parts.join(", "))?;
        if !self.failures.is_empty() {
            let count = self.failures.len();
            let sep = if parts.is_empty() { "" } else { ", " };
            let failures = format!("{count} failure{}", plural_s(count));
            write!(
                f,
                "{sep}{}",
                paint(Stream::Stdout, failures, Style::new().red().bold())
            )?;
        }
        Ok(())
    }
}
