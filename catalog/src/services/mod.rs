pub mod catalog;
pub use catalog::CatalogService;

use axum::{
    response::IntoResponse,
    http::StatusCode,
    Json
};
use tracing::error;
use crate::api::models::ErrorDetail;

pub struct AppError(pub common::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self.0 {
            common::Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            common::Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let detail = match &self.0 {
            common::Error::NotFound(message) | common::Error::InvalidInput(message) => message.clone(),
            other => {
                error!(error = %other, "Catalog request failed");
                "Internal server error".to_string()
            }
        };

        (status_code, Json(ErrorDetail { detail })).into_response()
    }
}

impl From<common::Error> for AppError {
    fn from(err: common::Error) -> Self {
        AppError(err)
    }
}
