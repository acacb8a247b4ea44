//! reqwest implementation of [`ProjectsApi`]

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde_json::Value;

use super::csrf::{token_from_cookie_header, CSRF_HEADER};
use super::{ApiError, ProjectsApi, Result};
use crate::domain::{ProjectPayload, ProjectRecord};

/// Collection endpoint, relative to the base URL
pub const PROJECTS_PATH: &str = "/api/projects/";

/// HTTP client for the Projects API
///
/// Cookies set by the server (or seeded from config) live in a shared jar;
/// the `csrftoken` cookie the jar would send with a request is echoed as
/// `X-CSRFToken` on that request.
#[derive(Debug, Clone)]
pub struct ProjectsClient {
    base_url: String,
    origin: Url,
    endpoint: Url,
    client: Client,
    jar: Arc<Jar>,
}

impl ProjectsClient {
    /// Create a new client with the given base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let parse = |url: &str| {
            Url::parse(url).map_err(|err| ApiError::InvalidUrl {
                url: url.to_string(),
                reason: err.to_string(),
            })
        };
        let origin = parse(base_url.as_str())?;
        let endpoint = parse(format!("{base_url}{PROJECTS_PATH}").as_str())?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder().cookie_provider(jar.clone()).build()?;
        Ok(Self {
            base_url,
            origin,
            endpoint,
            client,
            jar,
        })
    }

    /// Seed cookies (e.g. `sessionid`, `csrftoken`) for the base URL
    pub fn with_cookies(self, cookies: &[(String, String)]) -> Self {
        for (name, value) in cookies {
            self.jar
                .add_cookie_str(&format!("{name}={value}; Path=/"), &self.origin);
        }
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn projects_url(&self) -> String {
        self.endpoint.to_string()
    }

    /// CSRF token the jar holds for the projects endpoint, if any
    pub fn csrf_token(&self) -> Option<String> {
        self.csrf_token_for(&self.endpoint)
    }

    fn csrf_token_for(&self, url: &Url) -> Option<String> {
        let header = self.jar.cookies(url)?;
        token_from_cookie_header(header.to_str().ok()?)
    }

    // ========================================================================
    // Internal HTTP Methods
    // ========================================================================

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let mut request = request.build()?;
        // Same cookie lookup the jar performs for this URL, so a path-scoped
        // csrftoken still reaches the header.
        if let Some(token) = self.csrf_token_for(request.url()) {
            let name = HeaderName::from_bytes(CSRF_HEADER.as_bytes());
            if let (Ok(name), Ok(value)) = (name, HeaderValue::from_str(&token)) {
                request.headers_mut().insert(name, value);
            }
        }

        let response = self.client.execute(request).await?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ProjectsApi for ProjectsClient {
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>> {
        let response = self.send(self.client.get(self.endpoint.clone())).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn create_project(&self, payload: &ProjectPayload) -> Result<Value> {
        let response = self
            .send(self.client.post(self.endpoint.clone()).json(payload))
            .await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects_url_from_base() {
        let client = ProjectsClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.projects_url(), "http://localhost:8000/api/projects/");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ProjectsClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn test_seeded_csrf_cookie() {
        let client = ProjectsClient::new("http://localhost:8000").unwrap();
        assert_eq!(client.csrf_token(), None);
        let client = client.with_cookies(&[
            ("sessionid".to_string(), "s1".to_string()),
            ("csrftoken".to_string(), "tok".to_string()),
        ]);
        assert_eq!(client.csrf_token(), Some("tok".to_string()));
    }

    #[test]
    fn test_path_scoped_csrf_cookie_is_found() {
        let client = ProjectsClient::new("http://localhost:8000").unwrap();
        client
            .jar
            .add_cookie_str("csrftoken=scoped; Path=/api/projects", &client.endpoint);
        assert_eq!(client.csrf_token_for(&client.origin), None);
        assert_eq!(client.csrf_token(), Some("scoped".to_string()));
    }
}
