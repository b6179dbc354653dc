pub mod criteria;
pub mod evaluations;
pub mod export;
pub mod flags;
pub mod grades;

pub use criteria::CriteriaService;
pub use evaluations::EvaluationService;
pub use export::ExportService;
pub use flags::FlagService;
pub use grades::GradeService;
