pub mod assignment;
pub mod pricing;
pub mod queue;
