//! Router builder for the corkboard HTTP server

use axum::http::HeaderName;
use axum::routing::get;
use axum::{Extension, Router};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use corkboard_kernel::ModuleRegistry;

use crate::identity::IdentityHeader;

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under `/v1/{module_name}`
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        let api_path = format!("/v1/{}", module_name);
        self.router = self.router.nest(&api_path, module_router);
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Add request ID middleware
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Make the configured identity header name available to the
    /// [`crate::identity::Identity`] extractor on every request
    pub fn with_identity_header(mut self, header: HeaderName) -> Self {
        self.router = self.router.layer(Extension(IdentityHeader(header)));
        self
    }

    /// Add OpenAPI documentation by collecting specs from all modules
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let openapi_spec = merged_openapi(registry);

        // Deserialize our JSON spec into a proper utoipa OpenApi object
        // so SwaggerUI can serve it correctly.
        let openapi_obj: utoipa::openapi::OpenApi = serde_json::from_value(openapi_spec.clone())
            .unwrap_or_else(|_| {
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title("corkboard API")
                            .version("1.0.0")
                            .build(),
                    )
                    .build()
            });

        // Mount Swagger UI at /swagger-ui with the merged OpenAPI spec.
        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi_obj.clone()),
        );

        // Also serve the raw JSON spec at /docs/openapi.json for external consumers.
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
        );

        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge the base OpenAPI document with every module's fragment.
///
/// Module paths are prefixed with `/v1/{module_name}` to match where
/// [`RouterBuilder::mount_module`] mounts them.
pub fn merged_openapi(registry: &ModuleRegistry) -> serde_json::Value {
    let mut openapi_spec = serde_json::json!({
        "openapi": "3.0.0",
        "info": {
            "title": "corkboard API",
            "version": "1.0.0",
            "description": "Board management service API"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    // Common envelope schemas shared by every endpoint.
    openapi_spec["components"]["schemas"]["EmptyResponse"] = serde_json::json!({
        "type": "object",
        "properties": {
            "success": {
                "type": "boolean"
            }
        },
        "required": ["success"]
    });
    openapi_spec["components"]["schemas"]["ErrorResponse"] = serde_json::json!({
        "type": "object",
        "properties": {
            "success": {
                "type": "boolean",
                "enum": [false]
            },
            "error": {
                "type": "object",
                "properties": {
                    "code": {
                        "type": "string"
                    },
                    "message": {
                        "type": "string"
                    },
                    "details": {
                        "type": "array",
                        "items": {}
                    },
                    "trace_id": {
                        "type": "string"
                    },
                    "timestamp": {
                        "type": "string"
                    }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["success", "error"]
    });

    // Server health endpoint.
    openapi_spec["paths"]["/healthz"] = serde_json::json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": {
                            "schema": {
                                "type": "string"
                            }
                        }
                    }
                }
            }
        }
    });

    // Collect OpenAPI specs from all modules.
    for module in registry.modules() {
        if let Some(module_spec) = module.openapi() {
            // Merge paths from module.
            if let Some(paths) = module_spec.get("paths") {
                if let Some(paths_obj) = paths.as_object() {
                    for (path, path_item) in paths_obj {
                        let suffix = if path == "/" { "" } else { path.as_str() };
                        let prefixed_path = format!("/v1/{}{}", module.name(), suffix);
                        openapi_spec["paths"][prefixed_path] = path_item.clone();
                    }
                }
            }

            // Merge schemas from module.
            if let Some(components) = module_spec.get("components") {
                if let Some(schemas) = components.get("schemas") {
                    if let Some(schemas_obj) = schemas.as_object() {
                        for (schema_name, schema_def) in schemas_obj {
                            openapi_spec["components"]["schemas"][schema_name] =
                                schema_def.clone();
                        }
                    }
                }
            }
        }
    }

    openapi_spec
}
