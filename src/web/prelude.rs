pub(crate) use crate::check::{CheckRun, SharedRun};
pub(crate) use crate::error::PingAppError;
pub(crate) use crate::web::AppState;
pub(crate) use askama::Template;
pub(crate) use askama_web::WebTemplate;
pub(crate) use axum::extract::{Form, State};
pub(crate) use axum::response::IntoResponse;
pub(crate) use serde::Deserialize;
pub(crate) use std::sync::Arc;
pub(crate) use tokio::sync::RwLock;
pub(crate) use tower_sessions::Session;
pub(crate) use tracing::{debug, info};
