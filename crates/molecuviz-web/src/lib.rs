//! molecuviz-web — HTTP edge for MolecuViz
//! Provides:
//!   - Static front-end serving
//!   - AI chemistry assistant endpoints (ask / explain / compare / predict)
//!   - PDF molecule reports (download and inline preview)
//!   - Health check

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
