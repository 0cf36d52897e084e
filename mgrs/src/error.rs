//! Types d'erreurs pour le crate mgrs

use thiserror::Error;

/// Erreurs pouvant survenir lors de la conversion MGRS
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MgrsError {
    /// Chaîne MGRS mal formée (structure, lettre I/O, partie numérique impaire)
    #[error("Invalid MGRS format '{input}': {reason}")]
    InvalidFormat { input: String, reason: String },

    /// Coordonnées calculées hors des bornes géographiques
    #[error("Computed coordinates out of range: latitude={latitude}, longitude={longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },
}

impl MgrsError {
    /// Crée une erreur de format avec contexte
    pub fn invalid_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Remplace l'entrée rapportée par une erreur de format
    pub fn with_input(self, input: impl Into<String>) -> Self {
        match self {
            Self::InvalidFormat { reason, .. } => Self::InvalidFormat {
                input: input.into(),
                reason,
            },
            other => other,
        }
    }
}
