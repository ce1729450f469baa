pub mod engine;
pub mod heuristic;
pub mod model;
pub mod resolver;

pub use engine::{Assessment, ConfidenceProxy, RiskEngine};
pub use heuristic::{evaluate, HeuristicOutcome, RuleHit};
pub use model::{ModelArtifact, ModelError, ModelResult, RiskModel};
pub use resolver::{resolve, ModelAvailability, ModelLoadError};
