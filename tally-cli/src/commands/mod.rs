pub mod kpi;
pub mod records;
pub mod run;
pub mod validate;

pub use kpi::run_kpi;
pub use run::run_pipeline;
pub use validate::run_validate;
