//! Tailoring pipeline: one submission from upload to saved suggestions.

pub mod audit;
pub mod extractor;
pub mod formatter;
pub mod handlers;
pub mod models;
pub mod orchestrator;

pub use audit::TracingAudit;
pub use orchestrator::SubmissionOrchestrator;
