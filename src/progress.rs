//! Progress bars for scans and pruning, using indicatif.
//!
//! Bars are hidden when progress is disabled, so library callers and tests
//! can pass a [`ScanProgress::hidden`] bar without output.

use indicatif::{ProgressBar, ProgressStyle};

/// Longest file name shown next to the bar.
const MESSAGE_WIDTH: usize = 50;

const BAR_TEMPLATE: &str =
    "{prefix:.green} [{bar:40.cyan/blue}] {percent}% {pos}/{len} ({per_sec}, ETA {eta}) {msg}";

/// Progress reporter wrapping an indicatif bar.
pub struct ScanProgress {
    bar: ProgressBar,
}

impl ScanProgress {
    /// A visible bar for `total` items, labelled with `label`.
    pub fn new(total: u64, label: &str) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        bar.set_prefix(label.to_string());
        Self { bar }
    }

    /// A bar that never draws.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Visible or hidden depending on `enabled`.
    pub fn for_run(enabled: bool, total: u64, label: &str) -> Self {
        if enabled {
            Self::new(total, label)
        } else {
            Self::hidden()
        }
    }

    pub fn set_length(&self, total: u64) {
        self.bar.set_length(total);
    }

    /// Show the file currently being processed.
    pub fn set_current(&self, path: &str) {
        self.bar.set_message(truncate_middle(path, MESSAGE_WIDTH));
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Shorten `path` to at most `max_len` characters by replacing its middle
/// with `...`.
pub fn truncate_middle(path: &str, max_len: usize) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= max_len {
        return path.to_string();
    }
    if max_len < 10 {
        return chars[..max_len].iter().collect();
    }
    let prefix_len = (max_len - 3) / 2;
    let suffix_len = max_len - 3 - prefix_len;
    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[chars.len() - suffix_len..].iter().collect();
    format!("{}...{}", prefix, suffix)
}
