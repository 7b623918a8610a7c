pub mod models;
pub mod routes;
pub mod service;

use async_trait::async_trait;
use axum::routing::{get, patch, post};
use axum::Router;
use serde_json::json;

use corkboard_kernel::{InitCtx, Module};

use crate::utils;
use service::{InMemoryBoardService, SharedBoardService};

/// Boards module: the HTTP surface for board management.
pub struct BoardsModule {
    service: SharedBoardService,
}

impl BoardsModule {
    /// Create the module with the in-memory board service.
    pub fn new() -> Self {
        Self::with_service(std::sync::Arc::new(InMemoryBoardService::new()))
    }

    /// Create the module backed by a specific board service.
    pub fn with_service(service: SharedBoardService) -> Self {
        Self { service }
    }
}

impl Default for BoardsModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BoardsModule {
    fn name(&self) -> &'static str {
        "boards"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let prefix = utils::log_prefix(self.name());
        tracing::info!(
            target: "corkboard.modules",
            %prefix,
            environment = ?ctx.settings.environment,
            "boards module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", post(routes::create_board).get(routes::list_boards))
            .route("/count", get(routes::count_boards))
            .route(
                "/{board_id}",
                get(routes::get_board).delete(routes::delete_board),
            )
            .route("/fixed/{board_id}", patch(routes::fix_board))
            .with_state(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "post": {
                        "summary": "Create a board",
                        "tags": ["Boards"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/CreateBoardRequest"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Board created",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/EmptyResponse"
                                        }
                                    }
                                }
                            },
                            "422": {
                                "description": "Request failed validation",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "get": {
                        "summary": "List boards",
                        "tags": ["Boards"],
                        "parameters": [
                            {
                                "name": "page",
                                "in": "query",
                                "schema": { "type": "integer", "minimum": 0 }
                            },
                            {
                                "name": "size",
                                "in": "query",
                                "schema": { "type": "integer", "minimum": 1 }
                            },
                            {
                                "name": "sort",
                                "in": "query",
                                "schema": { "type": "string" },
                                "description": "field,direction ordering hint, e.g. name,asc"
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Slice of the caller's boards",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BoardSliceResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/count": {
                    "get": {
                        "summary": "Count boards",
                        "tags": ["Boards"],
                        "responses": {
                            "200": {
                                "description": "Total number of the caller's boards",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BoardCountResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{boardId}": {
                    "get": {
                        "summary": "Fetch one board",
                        "tags": ["Boards"],
                        "parameters": [
                            {
                                "name": "boardId",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer", "minimum": 1 }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Board detail",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BoardDetailResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Board not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a board",
                        "tags": ["Boards"],
                        "parameters": [
                            {
                                "name": "boardId",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer", "minimum": 1 }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Board deleted",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/EmptyResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Board not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/fixed/{boardId}": {
                    "patch": {
                        "summary": "Pin a board to the top of its category",
                        "tags": ["Boards"],
                        "parameters": [
                            {
                                "name": "boardId",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer", "minimum": 1 }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Board fixed",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/EmptyResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Board not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "CreateBoardRequest": {
                        "type": "object",
                        "properties": {
                            "name": {
                                "type": "string",
                                "minLength": 1,
                                "maxLength": 100
                            },
                            "description": {
                                "type": "string",
                                "maxLength": 1000
                            },
                            "category": {
                                "type": "string",
                                "minLength": 1,
                                "maxLength": 50
                            }
                        },
                        "required": ["name", "category"]
                    },
                    "BoardSummary": {
                        "type": "object",
                        "properties": {
                            "board_id": { "type": "integer" },
                            "name": { "type": "string" },
                            "category": { "type": "string" },
                            "fixed": { "type": "boolean" }
                        },
                        "required": ["board_id", "name", "category", "fixed"]
                    },
                    "BoardDetail": {
                        "type": "object",
                        "properties": {
                            "board_id": { "type": "integer" },
                            "name": { "type": "string" },
                            "description": { "type": "string" },
                            "category": { "type": "string" },
                            "fixed": { "type": "boolean" }
                        },
                        "required": ["board_id", "name", "category", "fixed"]
                    },
                    "BoardDetailResponse": {
                        "type": "object",
                        "properties": {
                            "success": { "type": "boolean" },
                            "data": {
                                "$ref": "#/components/schemas/BoardDetail"
                            }
                        },
                        "required": ["success", "data"]
                    },
                    "BoardCountResponse": {
                        "type": "object",
                        "properties": {
                            "success": { "type": "boolean" },
                            "data": {
                                "type": "object",
                                "properties": {
                                    "count": { "type": "integer" }
                                },
                                "required": ["count"]
                            }
                        },
                        "required": ["success", "data"]
                    },
                    "BoardSliceResponse": {
                        "type": "object",
                        "properties": {
                            "success": { "type": "boolean" },
                            "data": {
                                "type": "object",
                                "properties": {
                                    "content": {
                                        "type": "array",
                                        "items": {
                                            "$ref": "#/components/schemas/BoardSummary"
                                        }
                                    },
                                    "page": { "type": "integer" },
                                    "size": { "type": "integer" },
                                    "has_next": { "type": "boolean" }
                                },
                                "required": ["content", "page", "size", "has_next"]
                            }
                        },
                        "required": ["success", "data"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "boards module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "boards module stopped");
        Ok(())
    }
}

/// Create a new instance of the boards module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BoardsModule::new())
}
