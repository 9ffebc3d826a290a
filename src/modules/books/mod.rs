pub mod models;
pub mod routes;

use async_trait::async_trait;
use axum::routing::get;
use axum::Router;
use serde_json::json;

use biblio_kernel::{InitCtx, Migration, Module};

/// CRUD module for the book catalogue
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        Router::new()
            .route(
                "/books",
                get(routes::list_books)
                    .post(routes::create_book)
                    .put(routes::update_book)
                    .delete(routes::delete_book),
            )
            .route("/books/{id}", get(routes::find_book))
            .with_state(ctx.db.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "page_size",
                                "in": "query",
                                "schema": {"type": "integer", "default": 10},
                                "description": "Clamped to [0, 100]; out-of-range values become 100"
                            },
                            {
                                "name": "page",
                                "in": "query",
                                "schema": {"type": "integer", "default": 1}
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Envelope with a books array",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "title",
                                "in": "query",
                                "required": true,
                                "schema": {"type": "string"}
                            },
                            {
                                "name": "pages",
                                "in": "query",
                                "required": true,
                                "schema": {"type": "integer"}
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Success envelope",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            }
                        }
                    },
                    "put": {
                        "summary": "Update a book (partial)",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "query",
                                "required": true,
                                "schema": {"type": "integer"}
                            },
                            {
                                "name": "title",
                                "in": "query",
                                "schema": {"type": "string"}
                            },
                            {
                                "name": "pages",
                                "in": "query",
                                "schema": {"type": "integer"}
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Success envelope",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            },
                            "500": {
                                "description": "Unknown id or internal error",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "query",
                                "required": true,
                                "schema": {"type": "integer"}
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Success envelope",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            },
                            "500": {
                                "description": "Unknown id or internal error",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            }
                        }
                    }
                },
                "/books/{id}": {
                    "get": {
                        "summary": "Fetch one book",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": {"type": "integer"}
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Envelope with the book, or null when absent",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "description": "Unique identifier for the book"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the book"
                            },
                            "pages": {
                                "type": "integer",
                                "description": "Page count"
                            },
                            "created_at": {
                                "type": "string",
                                "format": "date",
                                "description": "Creation date, set by the server"
                            }
                        },
                        "required": ["id", "title", "pages", "created_at"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS book (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    pages INTEGER NOT NULL,
                    created_at TEXT NOT NULL
                );
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
