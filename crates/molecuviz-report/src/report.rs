//! Molecule report assembly.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use molecuviz_common::Interaction;

use crate::error::Result;
use crate::layout::{Block, FlowDocument};

pub const PRODUCT_NAME: &str = "MolecuViz";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_USES: &str = "No uses listed.";
pub const NO_INTERACTION: &str = "No recent AI interaction recorded for this molecule.";

/// Everything needed to render one report.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub name: String,
    pub formula: String,
    /// Free-form metadata from the front-end (`molecule_info`).
    pub properties: HashMap<String, String>,
    pub recent_qa: Option<Interaction>,
}

impl ReportRequest {
    /// First non-blank value among `keys`. The front-end sends camelCase,
    /// other clients tend to send snake_case.
    fn property(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.properties.get(*k))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }
}

/// Render the report for `req`, stamped with the current time.
pub fn build_report(req: &ReportRequest) -> Result<Vec<u8>> {
    report_document(req, Utc::now()).render()
}

/// Block sequence of a report generated at `generated_at`.
pub fn report_document(req: &ReportRequest, generated_at: DateTime<Utc>) -> FlowDocument {
    let name = req.name.trim();
    let formula = req.formula.trim();
    let title = format!("{} Report: {}", PRODUCT_NAME, name);

    let mut doc = FlowDocument::new(title.clone());
    doc.push(Block::Title(title));
    doc.push(Block::Subtitle(format!(
        "Formula: {}",
        if formula.is_empty() { NOT_AVAILABLE } else { formula }
    )));

    doc.push(Block::Heading("Basic Information".into()));
    let basics: [(&str, &[&str]); 3] = [
        ("Molecular Weight", &["molecularWeight", "molecular_weight"]),
        ("Bond Angle",       &["bondAngle", "bond_angle"]),
        ("Polarity",         &["polarity"]),
    ];
    for (label, keys) in basics {
        doc.push(Block::key_value(label, req.property(keys).unwrap_or(NOT_AVAILABLE)));
    }

    doc.push(Block::Heading("Description".into()));
    doc.push(Block::paragraph(req.property(&["description"]).unwrap_or(NO_DESCRIPTION)));

    doc.push(Block::Heading("Applications".into()));
    doc.push(Block::paragraph(req.property(&["uses"]).unwrap_or(NO_USES)));

    doc.push(Block::Heading("Recent AI Interaction".into()));
    match &req.recent_qa {
        Some(qa) => {
            doc.push(Block::key_value("Asked", qa.timestamp.as_str()));
            doc.push(Block::italic(format!("Q: {}", qa.question)));
            doc.push(Block::paragraph(format!("A: {}", qa.answer)));
        }
        None => {
            doc.push(Block::paragraph(NO_INTERACTION));
        }
    }

    doc.push(Block::Spacer(18.0));
    doc.push(Block::small(format!(
        "Generated by {} on {}",
        PRODUCT_NAME,
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )));
    doc
}
