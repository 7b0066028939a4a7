//! Load-test orchestration: plan validation and the bounded driver.
mod driver;
mod plan;


pub use driver::run_load_test;
pub use plan::LoadPlan;
