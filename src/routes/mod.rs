pub mod criteria;

pub mod evaluations;

pub mod export;

pub mod flags;

pub mod grades;

pub use criteria::configure_criteria_routes;
pub use evaluations::configure_evaluations_routes;
pub use export::configure_export_routes;
pub use flags::configure_flags_routes;
pub use grades::configure_grades_routes;
