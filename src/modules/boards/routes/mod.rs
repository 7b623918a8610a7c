//! Handlers for the boards endpoint.
//!
//! Each handler extracts the caller identity, validates its inputs, and
//! forwards to the [`BoardService`] behind the module; results come back in
//! the uniform response envelope. No recovery logic lives here.

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::Json;
use serde_json::json;
use validator::{Validate, ValidationErrors};

use corkboard_http::error::AppError;
use corkboard_http::identity::Identity;
use corkboard_http::response::ApiResponse;

use super::models::{BoardCount, BoardDetail, BoardSummary, CreateBoardRequest, PageQuery, Slice};
use super::service::SharedBoardService;

/// Validated board id path parameter.
///
/// Rejects missing, non-numeric, and non-positive values before any handler
/// logic runs, so the service is never called with a bad id.
#[derive(Debug, Clone, Copy)]
pub struct BoardId(pub i64);

impl<S> FromRequestParts<S> for BoardId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => raw,
            Err(_) => return Err(invalid_board_id()),
        };

        let board_id: i64 = raw.parse().map_err(|_| invalid_board_id())?;
        if board_id <= 0 {
            return Err(invalid_board_id());
        }

        Ok(BoardId(board_id))
    }
}

fn invalid_board_id() -> AppError {
    AppError::validation(
        vec![json!({"field": "board_id", "error": "must be a positive integer"})],
        "board id must be a positive integer",
    )
}

/// Flatten `validator` errors into the envelope's details array.
fn validation_details(errors: &ValidationErrors) -> Vec<serde_json::Value> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                json!({
                    "field": field,
                    "error": error
                        .message
                        .as_deref()
                        .unwrap_or("failed validation")
                })
            })
        })
        .collect()
}

/// POST /v1/boards
///
/// Create one board for the caller.
pub async fn create_board(
    Identity(owner): Identity,
    State(service): State<SharedBoardService>,
    Json(request): Json<CreateBoardRequest>,
) -> Result<ApiResponse<()>, AppError> {
    request.validate().map_err(|errors| {
        AppError::validation(
            validation_details(&errors),
            "create board request failed validation",
        )
    })?;

    service.create_board(&owner, request).await?;

    tracing::info!(owner = %owner, "board created");
    Ok(ApiResponse::Empty)
}

/// DELETE /v1/boards/{board_id}
///
/// Delete one board owned by the caller.
pub async fn delete_board(
    Identity(owner): Identity,
    State(service): State<SharedBoardService>,
    board_id: BoardId,
) -> Result<ApiResponse<()>, AppError> {
    service.delete_board(&owner, board_id.0).await?;

    tracing::info!(owner = %owner, board_id = board_id.0, "board deleted");
    Ok(ApiResponse::Empty)
}

/// PATCH /v1/boards/fixed/{board_id}
///
/// Pin one board to the top of its category.
pub async fn fix_board(
    Identity(owner): Identity,
    State(service): State<SharedBoardService>,
    board_id: BoardId,
) -> Result<ApiResponse<()>, AppError> {
    service.fix_board(&owner, board_id.0).await?;

    tracing::info!(owner = %owner, board_id = board_id.0, "board fixed");
    Ok(ApiResponse::Empty)
}

/// GET /v1/boards
///
/// List the caller's boards as a slice. Pagination parameters go to the
/// service untouched.
pub async fn list_boards(
    Identity(owner): Identity,
    State(service): State<SharedBoardService>,
    Query(page): Query<PageQuery>,
) -> Result<ApiResponse<Slice<BoardSummary>>, AppError> {
    let slice = service.list_boards(&owner, page).await?;

    Ok(ApiResponse::Payload(slice))
}

/// GET /v1/boards/count
///
/// Count the caller's boards.
pub async fn count_boards(
    Identity(owner): Identity,
    State(service): State<SharedBoardService>,
) -> Result<ApiResponse<BoardCount>, AppError> {
    let count = service.count_boards(&owner).await?;

    Ok(ApiResponse::Payload(count))
}

/// GET /v1/boards/{board_id}
///
/// Fetch one board owned by the caller.
pub async fn get_board(
    Identity(owner): Identity,
    State(service): State<SharedBoardService>,
    board_id: BoardId,
) -> Result<ApiResponse<BoardDetail>, AppError> {
    let detail = service.get_board(&owner, board_id.0).await?;

    Ok(ApiResponse::Payload(detail))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Method, Request, Response, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::modules::boards::service::{BoardService, BoardServiceError};
    use crate::modules::boards::BoardsModule;
    use corkboard_http::identity::DEFAULT_IDENTITY_HEADER;
    use corkboard_kernel::Module;

    use super::*;

    /// Call record captured by the mock service, one per trait method.
    #[derive(Debug, Clone, PartialEq)]
    enum ServiceCall {
        Create { owner: String, name: String },
        Delete { owner: String, board_id: i64 },
        Fix { owner: String, board_id: i64 },
        List { owner: String, page: PageQuery },
        Count { owner: String },
        Get { owner: String, board_id: i64 },
    }

    /// Recording mock: stores every call, answers with canned values, and
    /// reports NotFound for ids listed in `missing`.
    #[derive(Default)]
    struct MockBoardService {
        calls: Mutex<Vec<ServiceCall>>,
        missing: Vec<i64>,
    }

    impl MockBoardService {
        fn recorded(&self) -> Vec<ServiceCall> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: ServiceCall) {
            self.calls.lock().unwrap().push(call);
        }

        fn check_missing(&self, board_id: i64) -> Result<(), BoardServiceError> {
            if self.missing.contains(&board_id) {
                Err(BoardServiceError::NotFound { board_id })
            } else {
                Ok(())
            }
        }
    }

    fn canned_slice() -> Slice<BoardSummary> {
        Slice {
            content: vec![BoardSummary {
                board_id: 1,
                name: "reading".to_string(),
                category: "personal".to_string(),
                fixed: false,
            }],
            page: 0,
            size: 10,
            has_next: false,
        }
    }

    #[async_trait]
    impl BoardService for MockBoardService {
        async fn create_board(
            &self,
            owner: &str,
            request: CreateBoardRequest,
        ) -> Result<(), BoardServiceError> {
            self.record(ServiceCall::Create {
                owner: owner.to_string(),
                name: request.name,
            });
            Ok(())
        }

        async fn delete_board(&self, owner: &str, board_id: i64) -> Result<(), BoardServiceError> {
            self.record(ServiceCall::Delete {
                owner: owner.to_string(),
                board_id,
            });
            self.check_missing(board_id)
        }

        async fn fix_board(&self, owner: &str, board_id: i64) -> Result<(), BoardServiceError> {
            self.record(ServiceCall::Fix {
                owner: owner.to_string(),
                board_id,
            });
            self.check_missing(board_id)
        }

        async fn list_boards(
            &self,
            owner: &str,
            page: PageQuery,
        ) -> Result<Slice<BoardSummary>, BoardServiceError> {
            self.record(ServiceCall::List {
                owner: owner.to_string(),
                page,
            });
            Ok(canned_slice())
        }

        async fn count_boards(&self, owner: &str) -> Result<BoardCount, BoardServiceError> {
            self.record(ServiceCall::Count {
                owner: owner.to_string(),
            });
            Ok(BoardCount { count: 3 })
        }

        async fn get_board(
            &self,
            owner: &str,
            board_id: i64,
        ) -> Result<BoardDetail, BoardServiceError> {
            self.record(ServiceCall::Get {
                owner: owner.to_string(),
                board_id,
            });
            self.check_missing(board_id)?;
            Ok(BoardDetail {
                board_id,
                name: "reading".to_string(),
                description: Some("links worth keeping".to_string()),
                category: "personal".to_string(),
                fixed: false,
            })
        }
    }

    fn test_router(service: Arc<MockBoardService>) -> axum::Router {
        BoardsModule::with_service(service).routes()
    }

    fn authed(method: Method, uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(DEFAULT_IDENTITY_HEADER, "user@example.com")
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap()
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_board_returns_empty_success() {
        let service = Arc::new(MockBoardService::default());
        let app = test_router(service.clone());

        let body = Body::from(
            serde_json::to_vec(&json!({"name": "reading", "category": "personal"})).unwrap(),
        );
        let response = app.oneshot(authed(Method::POST, "/", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"success": true}));
        assert_eq!(
            service.recorded(),
            vec![ServiceCall::Create {
                owner: "user@example.com".to_string(),
                name: "reading".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn create_board_rejects_invalid_body_before_service() {
        let service = Arc::new(MockBoardService::default());
        let app = test_router(service.clone());

        let body =
            Body::from(serde_json::to_vec(&json!({"name": "", "category": "personal"})).unwrap());
        let response = app.oneshot(authed(Method::POST, "/", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "validation_error");
        assert!(service.recorded().is_empty());
    }

    #[tokio::test]
    async fn delete_board_calls_service_exactly_once_with_exact_args() {
        let service = Arc::new(MockBoardService::default());
        let app = test_router(service.clone());

        let response = app
            .oneshot(authed(Method::DELETE, "/42", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"success": true}));
        assert_eq!(
            service.recorded(),
            vec![ServiceCall::Delete {
                owner: "user@example.com".to_string(),
                board_id: 42,
            }]
        );
    }

    #[tokio::test]
    async fn non_positive_board_id_is_rejected_before_service() {
        for uri in ["/0", "/-5", "/not-a-number"] {
            let service = Arc::new(MockBoardService::default());
            let app = test_router(service.clone());

            let response = app
                .oneshot(authed(Method::DELETE, uri, Body::empty()))
                .await
                .unwrap();

            assert_eq!(
                response.status(),
                StatusCode::UNPROCESSABLE_ENTITY,
                "expected rejection for {uri}"
            );
            let json = body_json(response).await;
            assert_eq!(json["success"], false);
            assert_eq!(json["error"]["details"][0]["field"], "board_id");
            assert!(service.recorded().is_empty(), "service called for {uri}");
        }
    }

    #[tokio::test]
    async fn fix_board_returns_empty_success() {
        let service = Arc::new(MockBoardService::default());
        let app = test_router(service.clone());

        let response = app
            .oneshot(authed(Method::PATCH, "/fixed/7", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"success": true}));
        assert_eq!(
            service.recorded(),
            vec![ServiceCall::Fix {
                owner: "user@example.com".to_string(),
                board_id: 7,
            }]
        );
    }

    #[tokio::test]
    async fn list_boards_relays_service_slice_unmodified() {
        let service = Arc::new(MockBoardService::default());
        let app = test_router(service.clone());

        let response = app
            .oneshot(authed(Method::GET, "/", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(
            json["data"],
            serde_json::to_value(canned_slice()).unwrap()
        );
    }

    #[tokio::test]
    async fn list_boards_forwards_pagination_unchanged() {
        let service = Arc::new(MockBoardService::default());
        let app = test_router(service.clone());

        let response = app
            .oneshot(authed(
                Method::GET,
                "/?page=2&size=5&sort=name,asc",
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert_eq!(
            service.recorded(),
            vec![ServiceCall::List {
                owner: "user@example.com".to_string(),
                page: PageQuery {
                    page: Some(2),
                    size: Some(5),
                    sort: Some("name,asc".to_string()),
                },
            }]
        );
    }

    #[tokio::test]
    async fn list_boards_leaves_absent_pagination_absent() {
        let service = Arc::new(MockBoardService::default());
        let app = test_router(service.clone());

        let response = app
            .oneshot(authed(Method::GET, "/", Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert_eq!(
            service.recorded(),
            vec![ServiceCall::List {
                owner: "user@example.com".to_string(),
                page: PageQuery::default(),
            }]
        );
    }

    #[tokio::test]
    async fn count_boards_relays_service_count() {
        let service = Arc::new(MockBoardService::default());
        let app = test_router(service.clone());

        let response = app
            .oneshot(authed(Method::GET, "/count", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["count"], 3);
        assert_eq!(
            service.recorded(),
            vec![ServiceCall::Count {
                owner: "user@example.com".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn get_board_relays_service_detail() {
        let service = Arc::new(MockBoardService::default());
        let app = test_router(service.clone());

        let response = app
            .oneshot(authed(Method::GET, "/42", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["board_id"], 42);
        assert_eq!(json["data"]["name"], "reading");
    }

    #[tokio::test]
    async fn get_missing_board_surfaces_enveloped_failure() {
        let service = Arc::new(MockBoardService {
            missing: vec![999],
            ..MockBoardService::default()
        });
        let app = test_router(service.clone());

        let response = app
            .oneshot(authed(Method::GET, "/999", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "not_found");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn missing_identity_is_rejected() {
        let service = Arc::new(MockBoardService::default());
        let app = test_router(service.clone());

        let request = Request::builder()
            .method(Method::GET)
            .uri("/count")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(service.recorded().is_empty());
    }
}
