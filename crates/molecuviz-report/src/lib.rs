//! molecuviz-report — PDF report generation.
//!
//! `layout` turns an ordered list of flow blocks into paginated PDF bytes;
//! `report` decides which blocks a molecule report contains.

pub mod encoding;
pub mod error;
pub mod layout;
pub mod report;

pub use error::{ReportError, Result};
pub use layout::{Block, FlowDocument, TextStyle};
pub use report::{build_report, ReportRequest};
