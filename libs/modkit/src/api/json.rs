use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;

use crate::api::problem::{Problem, ProblemResponse};

/// JSON request body whose rejections render as [`Problem`].
///
/// A request without a JSON content type is read as an empty object, so the
/// handler's own required-field checks decide the outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => {
                serde_json::from_value(serde_json::json!({}))
                    .map(JsonBody)
                    .map_err(|e| {
                        ProblemResponse::from(Problem::new(StatusCode::BAD_REQUEST, e.to_string()))
                    })
            }
            Err(rejection) => Err(rejection_to_problem(&rejection)),
        }
    }
}

fn rejection_to_problem(rejection: &JsonRejection) -> ProblemResponse {
    let status = match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            StatusCode::BAD_REQUEST
        }
        other => other.status(),
    };
    Problem::new(status, "Invalid request body")
        .with_details(rejection.body_text())
        .into()
}
