//! Page services: role checks, form validation and gateway calls behind each
//! management page.

use thiserror::Error;

use crate::api::errors::ApiError;
use crate::api::session::{SessionContext, SessionError};
use crate::domain::auth::AuthenticatedUser;
use crate::forms::{FieldErrors, FormError};
use crate::models::config::DashboardConfig;
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub mod crud;
pub mod intervenants;
pub mod listing;
pub mod logs;
pub mod modules;
pub mod notifications;
pub mod periodes;
pub mod programmes;
pub mod quality;
pub mod salles;
pub mod users;

/// Field key for messages that belong to the whole form.
pub const FORM_ERROR_KEY: &str = "form";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("authentication required")]
    Unauthorized,

    #[error("insufficient role")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("invalid form data")]
    Validation(FieldErrors),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Api(ApiError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Page to send the browser to instead of rendering an error.
    pub fn redirect_target<'a>(&self, config: &'a DashboardConfig) -> Option<&'a str> {
        match self {
            ServiceError::Unauthorized => Some(config.sign_in_url.as_str()),
            ServiceError::Forbidden => Some(config.dashboard_url.as_str()),
            _ => None,
        }
    }

    /// Message for the page banner.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Unauthorized => "Votre session a expiré. Veuillez vous reconnecter.".into(),
            ServiceError::Forbidden => "Accès refusé.".into(),
            ServiceError::NotFound => "Élément introuvable.".into(),
            ServiceError::Validation(_) => "Veuillez corriger les champs en erreur.".into(),
            ServiceError::Conflict(message) => message.clone(),
            ServiceError::Api(err) => err.user_message(),
        }
    }
}

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => ServiceError::Unauthorized,
            ApiError::Forbidden => ServiceError::Forbidden,
            ApiError::NotFound => ServiceError::NotFound,
            ApiError::Validation { message, fields } => {
                let mut errors = FieldErrors::from(fields);
                if errors.is_empty() {
                    errors.push(FORM_ERROR_KEY, message);
                }
                ServiceError::Validation(errors)
            }
            ApiError::Conflict { message, .. } => ServiceError::Conflict(message),
            other => ServiceError::Api(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.field_errors())
    }
}

impl From<SessionError> for ServiceError {
    fn from(_: SessionError) -> Self {
        ServiceError::Unauthorized
    }
}

/// Decodes the signed-in user from the session token.
pub fn current_user(
    session: &SessionContext,
    config: &DashboardConfig,
) -> ServiceResult<AuthenticatedUser> {
    session.user(&config.jwt_secret).map_err(|err| {
        log::warn!("Rejected session: {err}");
        ServiceError::from(err)
    })
}

/// Checks that `user` holds `role`; the admin role satisfies every check.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if user.has_role(role) || user.has_role(SERVICE_ADMIN_ROLE) {
        Ok(())
    } else {
        log::warn!("User {} lacks role {role}", user.email);
        Err(ServiceError::Forbidden)
    }
}

/// Read access to the planning pages.
pub fn ensure_access(user: &AuthenticatedUser) -> ServiceResult<()> {
    ensure_role(user, SERVICE_ACCESS_ROLE)
}

/// Write access to the planning pages.
pub fn ensure_admin(user: &AuthenticatedUser) -> ServiceResult<()> {
    ensure_role(user, SERVICE_ADMIN_ROLE)
}
