//! Pages
//!
//! Top-level page components, one per section.

pub mod analytics;
pub mod dashboard;
pub mod evaluations;
pub mod rubrics;

pub use analytics::Analytics;
pub use dashboard::Dashboard;
pub use evaluations::Evaluations;
pub use rubrics::Rubrics;
