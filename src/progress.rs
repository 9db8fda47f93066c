//! # Console Reporting Module
//!
//! Questo modulo gestisce tutta la superficie console del tool.
//!
//! ## Responsabilità:
//! - Banner di apertura/chiusura (righe di `=`)
//! - Header di sezione per ogni categoria di asset (`📁 ...`)
//! - Righe per-file con glifo `✓` (successo) o `✗` (fallimento)
//! - Progress bar per-stage con `indicatif`
//!
//! Le righe per-file passano da `ProgressBar::println` quando una barra è
//! attiva, così restano visibili sopra la barra invece di esserne
//! sovrascritte. Non c'è aggregazione di contatori: ogni esito viene
//! riportato nel momento in cui accade e basta.
//!
//! ## Visual feedback:
//! ```text
//! 📁 Processing Doctor Photos...
//! ✓ Optimized: dr1.png -> DrdeepikaPics_dr1.jpg
//! ✗ Error processing broken.jpg: Image processing error: ...
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Width of the banner rule, matching the historical script output.
const BANNER_WIDTH: usize = 50;

/// Reports per-file outcomes and stage progress on the console
pub struct ConsoleReporter {
    bar: Option<ProgressBar>,
}

impl ConsoleReporter {
    /// Create a reporter with no active stage bar
    pub fn new() -> Self {
        Self { bar: None }
    }

    /// Print a banner line framed by `=` rules
    pub fn banner(&self, text: &str) {
        println!("{}", "=".repeat(BANNER_WIDTH));
        println!("{text}");
        println!("{}", "=".repeat(BANNER_WIDTH));
    }

    /// Print a section header for one asset category
    pub fn section(&self, title: &str) {
        println!("\n📁 {title}...");
    }

    /// Start a progress bar for a stage with `total` files
    pub fn start_stage(&mut self, total: u64) {
        let bar = ProgressBar::new(total);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Advance the active stage bar by one file
    pub fn file_done(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Finish and clear the active stage bar
    pub fn finish_stage(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    /// Report a per-file success
    pub fn success(&self, message: &str) {
        self.line(format!("✓ {message}"));
    }

    /// Report a per-file failure
    pub fn failure(&self, message: &str) {
        self.line(format!("✗ {message}"));
    }

    fn line(&self, text: String) {
        match &self.bar {
            Some(bar) => bar.println(text),
            None => println!("{text}"),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
