//! Run reports for the CLI

use super::types::{SymbolReport, SymbolStatus};
use serde::Serialize;

/// Reports of one CLI invocation
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub symbols: Vec<SymbolReport>,
}

impl RunSummary {
    pub fn new(symbols: Vec<SymbolReport>) -> Self {
        Self { symbols }
    }

    pub fn failed(&self) -> usize {
        self.count(SymbolStatus::Failed)
    }

    fn count(&self, status: SymbolStatus) -> usize {
        self.symbols.iter().filter(|r| r.status == status).count()
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let mut rows = String::new();
        for r in &self.symbols {
            rows.push_str(&format!(
                "{:<10} {:<8} {:>7} {:>7} {:>7} {:>7} {:>5} {:>5} {:>5}\n",
                r.symbol,
                r.status.as_str(),
                r.bars,
                r.events,
                r.dropped_total(),
                r.labels,
                r.positive,
                r.neutral,
                r.negative,
            ));
            if let Some(ref error) = r.error {
                rows.push_str(&format!("  error: {}\n", error));
            } else if let Some(ref path) = r.output {
                rows.push_str(&format!("  -> {}\n", path.display()));
            }
        }

        let labels: usize = self.symbols.iter().map(|r| r.labels).sum();
        let ties: usize = self.symbols.iter().map(|r| r.ties).sum();

        format!(
            r#"
══════════════════════════════════════════════════════════════════════
               LABELING RESULTS
══════════════════════════════════════════════════════════════════════
SYMBOL     STATUS      BARS  EVENTS DROPPED  LABELS    +1     0    -1
──────────────────────────────────────────────────────────────────────
{}──────────────────────────────────────────────────────────────────────
Symbols:          {} ({} written, {} empty, {} failed)
Labels:           {}
Barrier ties:     {}
══════════════════════════════════════════════════════════════════════
"#,
            rows,
            self.symbols.len(),
            self.count(SymbolStatus::Written),
            self.count(SymbolStatus::Empty),
            self.failed(),
            labels,
            ties,
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
