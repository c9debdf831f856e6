//! Domain model for analyzer reports.
//!
//! Reports are plain data. They are produced fresh for each gate run and
//! discarded once the gate has been evaluated.

mod file_set;
mod report;
mod severity;

pub use file_set::FileSet;
pub use report::{AnalysisReport, Detection, FileResult, QualityScore};
pub use severity::Severity;
