pub mod client;
pub use client::{FoodTruckClient, FoodTruckSource};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Failures that happen before any part of the page has been streamed. Only
/// shell rendering can fail there, so every error is a 500.
pub struct AppError(pub common::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "UI request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
    }
}

impl From<common::Error> for AppError {
    fn from(err: common::Error) -> Self {
        AppError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn every_error_is_an_internal_error() {
        for err in [
            common::Error::Other("broken template".into()),
            common::Error::InvalidInput("page".into()),
        ] {
            let response = AppError(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&body[..], b"Something went wrong");
        }
    }
}
