//! Projects API - HTTP client for `/api/projects/`

mod client;
mod csrf;
mod error;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{ProjectPayload, ProjectRecord};

pub use client::{ProjectsClient, PROJECTS_PATH};
pub use csrf::{token_from_cookie_header, CSRF_COOKIE, CSRF_HEADER};
pub use error::{ApiError, Result};

/// Remote operations the projects view depends on
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// GET the full project list, in server order
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>>;

    /// POST a new project; the response body is returned untouched
    async fn create_project(&self, payload: &ProjectPayload) -> Result<Value>;
}
