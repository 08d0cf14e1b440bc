use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use htmlfaker_core::{BlockKind, InlineKind};

/// Counts of the units emitted while composing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Headings keyed by level.
    pub headings: BTreeMap<u8, u64>,
    pub paragraphs: u64,
    pub lead_paragraphs: u64,
    pub blocks: BTreeMap<String, u64>,
    pub inline_elements: BTreeMap<String, u64>,
    pub table_rows: u64,
}

impl DocumentReport {
    pub fn record_heading(&mut self, level: u8) {
        *self.headings.entry(level).or_insert(0) += 1;
    }

    pub fn record_paragraph(&mut self, lead: bool) {
        if lead {
            self.lead_paragraphs += 1;
        } else {
            self.paragraphs += 1;
        }
    }

    pub fn record_block(&mut self, kind: BlockKind) {
        *self.blocks.entry(kind.to_string()).or_insert(0) += 1;
    }

    pub fn record_inline(&mut self, kind: InlineKind) {
        *self.inline_elements.entry(kind.to_string()).or_insert(0) += 1;
    }

    pub fn record_table_rows(&mut self, rows: usize) {
        self.table_rows += rows as u64;
    }

    /// Top-level units: headings, paragraphs and block elements.
    pub fn units(&self) -> u64 {
        self.headings.values().sum::<u64>()
            + self.paragraphs
            + self.lead_paragraphs
            + self.blocks.values().sum::<u64>()
    }
}

/// Generated fragment together with its report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub html: String,
    pub report: DocumentReport,
}
