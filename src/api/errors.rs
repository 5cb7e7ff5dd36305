//! Errors surfaced by calls to the planning API.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("request cancelled")]
    Cancelled,

    #[error("session missing or expired")]
    Unauthorized,

    #[error("access denied")]
    Forbidden,

    #[error("resource not found")]
    NotFound,

    #[error("validation failed: {message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, Vec<String>>,
    },

    /// Delete refused because dependent records still exist.
    #[error("conflict: {message}")]
    Conflict {
        message: String,
        counts: BTreeMap<String, u64>,
    },

    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Whether the request never got a usable answer from the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Timeout)
    }

    /// Message shown in the page banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => {
                "Erreur de connexion au serveur. Veuillez réessayer.".to_string()
            }
            ApiError::Timeout => {
                "Le serveur met trop de temps à répondre. Veuillez réessayer.".to_string()
            }
            ApiError::Cancelled => "Requête annulée.".to_string(),
            ApiError::Unauthorized => "Votre session a expiré, reconnectez-vous.".to_string(),
            ApiError::Forbidden => "Vous n'avez pas les droits pour cette action.".to_string(),
            ApiError::NotFound => "Élément introuvable.".to_string(),
            ApiError::Validation { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Validation { .. } => "Le formulaire contient des erreurs.".to_string(),
            ApiError::Conflict { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Conflict { .. } => {
                "Cet élément est lié à d'autres enregistrements.".to_string()
            }
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Status { .. } | ApiError::Decode(_) => {
                "Une erreur inattendue est survenue.".to_string()
            }
        }
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_share_the_connection_banner() {
        let message = ApiError::Transport("connection refused".into()).user_message();
        assert!(message.starts_with("Erreur de connexion"));
        assert!(ApiError::Timeout.is_transport());
        assert!(!ApiError::NotFound.is_transport());
    }

    #[test]
    fn server_messages_are_shown_verbatim() {
        let err = ApiError::Conflict {
            message: "Le programme contient 3 modules".into(),
            counts: BTreeMap::from([("modules".to_string(), 3)]),
        };
        assert_eq!(err.user_message(), "Le programme contient 3 modules");

        let err = ApiError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), "Une erreur inattendue est survenue.");
    }
}
