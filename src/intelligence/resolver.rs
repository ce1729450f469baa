use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::model::{ModelArtifact, RiskModel};

/// Why a model artifact could not be materialized.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model artifact not found at {0}")]
    NotFound(PathBuf),

    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("incompatible model artifact: {0}")]
    Format(#[from] serde_json::Error),

    #[error("invalid model parameters: {0}")]
    Invalid(String),
}

/// Result of the one-time startup model lookup. Never mutated afterwards.
#[derive(Clone)]
pub enum ModelAvailability {
    Usable {
        model: Arc<dyn RiskModel>,
        loaded_from: PathBuf,
        loaded_at: DateTime<Utc>,
    },
    Unavailable {
        reason: String,
    },
}

impl ModelAvailability {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ModelAvailability::Unavailable {
            reason: reason.into(),
        }
    }

    /// Wrap an already constructed model.
    pub fn usable(model: Arc<dyn RiskModel>, loaded_from: impl Into<PathBuf>) -> Self {
        ModelAvailability::Usable {
            model,
            loaded_from: loaded_from.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, ModelAvailability::Usable { .. })
    }

    pub fn model(&self) -> Option<&dyn RiskModel> {
        match self {
            ModelAvailability::Usable { model, .. } => Some(model.as_ref()),
            ModelAvailability::Unavailable { .. } => None,
        }
    }
}

impl fmt::Debug for ModelAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelAvailability::Usable {
                model,
                loaded_from,
                loaded_at,
            } => f
                .debug_struct("Usable")
                .field("kind", &model.kind())
                .field("loaded_from", loaded_from)
                .field("loaded_at", loaded_at)
                .finish(),
            ModelAvailability::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Read, parse and validate a model artifact.
pub fn load_model(path: &Path) -> Result<Arc<dyn RiskModel>, ModelLoadError> {
    if !path.exists() {
        return Err(ModelLoadError::NotFound(path.to_path_buf()));
    }

    let raw = std::fs::read_to_string(path)?;
    let artifact: ModelArtifact = serde_json::from_str(&raw)?;
    artifact.validate().map_err(ModelLoadError::Invalid)?;

    Ok(Arc::from(artifact.into_model()))
}

/// Try to materialize the model at `path`. Any failure is logged and turned
/// into [`ModelAvailability::Unavailable`]; startup always continues.
pub fn resolve(path: &Path) -> ModelAvailability {
    match load_model(path) {
        Ok(model) => {
            tracing::info!(
                path = %path.display(),
                kind = model.kind(),
                features = model.expected_features(),
                "External model loaded"
            );
            ModelAvailability::usable(model, path)
        }
        Err(ModelLoadError::NotFound(p)) => {
            tracing::info!(path = %p.display(), "No model artifact found, using heuristic scoring");
            ModelAvailability::unavailable(format!("model artifact not found at {}", p.display()))
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Model artifact unusable, using heuristic scoring"
            );
            ModelAvailability::unavailable(e.to_string())
        }
    }
}
