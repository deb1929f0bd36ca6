pub mod calculations;
pub mod dashboard;
pub mod emissions;
pub mod filters;
pub mod store;
