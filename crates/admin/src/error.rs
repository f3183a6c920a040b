//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::magento::MagentoError;
use crate::services::ServiceError;
use crate::shopify::AdminShopifyError;

/// Application-level error type for the admin service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// Magento API operation failed.
    #[error("Magento error: {0}")]
    Magento(#[from] MagentoError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Repository(RepositoryError::NotFound) => {
                Self::NotFound("record".to_string())
            }
            ServiceError::Repository(e) => Self::Database(e),
            ServiceError::Shopify(AdminShopifyError::NotFound(what)) => Self::NotFound(what),
            ServiceError::Shopify(e) => Self::Shopify(e),
            // Missing or broken settings are the caller's to fix.
            ServiceError::Magento(e @ (MagentoError::NotConfigured | MagentoError::InvalidUrl(_))) => {
                Self::BadRequest(e.to_string())
            }
            ServiceError::Magento(e) => Self::Magento(e),
            ServiceError::Invalid(message) => Self::BadRequest(message),
            ServiceError::NotFound(what) => Self::NotFound(what),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Shopify(_) | Self::Magento(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Shopify(_) | Self::Magento(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(RepositoryError::SaveFailed(_)) => {
                "Menu was not saved; the previous version is still active".to_string()
            }
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Shopify(_) | Self::Magento(_) => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn body_text(err: AppError) -> String {
        let bytes = err
            .into_response()
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("menu version 7".to_string());
        assert_eq!(err.to_string(), "Not found: menu version 7");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Shopify(AdminShopifyError::Unauthorized(
                "revoked".to_string()
            ))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::Magento(MagentoError::RateLimited(5))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_service_errors_map_to_client_errors() {
        assert!(matches!(
            AppError::from(ServiceError::Invalid("Missing required fields".into())),
            AppError::BadRequest(m) if m == "Missing required fields"
        ));
        assert!(matches!(
            AppError::from(ServiceError::Magento(MagentoError::NotConfigured)),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(ServiceError::Repository(RepositoryError::NotFound)),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(ServiceError::Shopify(AdminShopifyError::NotFound(
                "Online Store publication".into()
            ))),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(ServiceError::Magento(MagentoError::Unauthorized)),
            AppError::Magento(_)
        ));
    }

    #[tokio::test]
    async fn test_failed_save_has_its_own_message() {
        let failed = || AppError::Database(RepositoryError::SaveFailed("lock timeout".into()));
        assert_eq!(get_status(failed()), StatusCode::INTERNAL_SERVER_ERROR);

        let text = body_text(failed()).await;
        assert!(text.contains("not saved"));
        assert!(!text.contains("lock timeout"));

        let generic = body_text(AppError::Database(RepositoryError::Conflict("x".into()))).await;
        assert_eq!(generic, "Internal server error");
    }
}
