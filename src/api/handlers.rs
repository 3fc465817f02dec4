//! HTTP request handlers for the Estate Distribution Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_distribution;
use crate::models::{InheritanceCase, Role};
use crate::presentation::render_summary;

use super::request::CalculationRequest;
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, HealthResponse, RoleDescription,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/roles", get(roles_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts an inheritance case and returns the distribution together with
/// a summary in the requested locale.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") || body_text.contains("unknown variant")
                    {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let locale = state.resolve_locale(request.locale.as_deref());
    let case: InheritanceCase = request.into();
    let config = state.config();

    let start_time = Instant::now();
    match calculate_distribution(&case, config.catalog()) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                relatives = case.relatives.len(),
                awards = result.awards.len(),
                total_awarded = %result.total_awarded,
                overflow_corrected = result.overflow_corrected,
                locale = %locale,
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );

            let localized_summary = render_summary(&result, &case, config.messages(), locale);
            let user_awards = case
                .user_role
                .map(|role| {
                    result
                        .awards
                        .iter()
                        .filter(|award| award.role == role)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            let references: BTreeMap<String, String> = result
                .awards
                .iter()
                .filter_map(|award| award.reference.as_deref())
                .filter_map(|citation| {
                    config
                        .reference_text(citation)
                        .map(|text| (citation.to_string(), text.to_string()))
                })
                .collect();

            let response = CalculationResponse {
                calculation_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                scheme: config.scheme().clone(),
                locale,
                result,
                localized_summary,
                user_awards,
                references,
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Query parameters for GET /roles.
#[derive(Debug, Deserialize)]
struct RolesQuery {
    locale: Option<String>,
}

/// Handler for GET /roles endpoint.
///
/// Lists every supported role with its localized name and description.
async fn roles_handler(
    State(state): State<AppState>,
    Query(query): Query<RolesQuery>,
) -> Json<Vec<RoleDescription>> {
    let locale = state.resolve_locale(query.locale.as_deref());
    let config = state.config();
    let messages = config.messages();

    let roles = Role::ALL
        .iter()
        .map(|role| RoleDescription {
            role: *role,
            name: messages.get(locale, &format!("role.{}", role)).to_string(),
            description: config.role_description(*role).unwrap_or_default().to_string(),
        })
        .collect();

    Json(roles)
}

/// Handler for GET /health endpoint.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        scheme: state.config().scheme().code.clone(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::{DeceasedRequest, RelativeRequest};
    use crate::config::ConfigLoader;
    use crate::models::{Fraction, Gender};
    use crate::presentation::Locale;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/faraid").expect("Failed to load config");
        AppState::new(config)
    }

    fn relative(id: &str, role: Role, gender: Gender) -> RelativeRequest {
        RelativeRequest {
            id: id.to_string(),
            role,
            name: None,
            alive: true,
            gender,
        }
    }

    fn create_valid_request() -> CalculationRequest {
        CalculationRequest {
            deceased: DeceasedRequest {
                gender: Gender::Male,
            },
            relatives: vec![
                relative("wife", Role::Wife, Gender::Female),
                relative("son", Role::Son, Gender::Male),
            ],
            estate_value: None,
            user_role: Some(Role::Wife),
            locale: Some("id".to_string()),
        }
    }

    async fn body_bytes(response: axum::response::Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let response: CalculationResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(response.locale, Locale::Id);
        assert_eq!(response.result.share_of("wife"), Fraction::new(1, 8).unwrap());
        assert_eq!(response.result.share_of("son"), Fraction::new(7, 8).unwrap());
        assert_eq!(response.user_awards.len(), 1);
        assert_eq!(response.user_awards[0].relative_id, "wife");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_roles_lists_every_role() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/roles")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let roles: Vec<RoleDescription> =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(roles.len(), Role::ALL.len());
        assert!(roles.iter().all(|entry| !entry.name.is_empty()));
    }
}
