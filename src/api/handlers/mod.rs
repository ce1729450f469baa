pub mod health;
pub mod metrics;
pub mod model;
pub mod predict;
