//! Report stages, one per report section.

mod process;
mod cache_hit;
mod success_rate;
mod parallel_rate;
mod modules;

pub use process::{ProcessKind, ProcessReportStage};
pub use cache_hit::CacheHitReportStage;
pub use success_rate::SuccessRateReportStage;
pub use parallel_rate::ParallelRateReportStage;
pub use modules::{ModulesExecutionReportStage, ModulesSourceCountReportStage};
