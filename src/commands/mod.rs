/// Command implementations.
pub mod activity;

pub use activity::run;
