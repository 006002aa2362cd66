use std::sync::Arc;

use crate::config::Config;
use crate::export::paginator::PageGeometry;
use crate::storage::RelationalStore;
use crate::tailoring::orchestrator::SubmissionOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SubmissionOrchestrator>,
    /// Read side of the relational store, for history and exports.
    pub relational: Arc<dyn RelationalStore>,
    pub config: Config,
    /// Page geometry for exported reports.
    pub page_geometry: PageGeometry,
}
