use crate::core::batch::{descriptions_from_json, projects_from_json};
use crate::core::decode::{decode_user, result_field};
use crate::core::pool::WorkerPool;
use crate::domain::model::{Project, User};
use crate::domain::ports::{ConfigProvider, HttpGet, ProjectEnricher};
use crate::utils::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub const PROJECTS_PATH: &str = "projects/0.1/projects";
pub const ACTIVE_PROJECTS_PATH: &str = "projects/0.1/projects/active";
pub const USERS_PATH: &str = "users/0.1/users";
pub const DEFAULT_PROJECT_LIMIT: u32 = 10;

/// Resolves users and project listings against the Freelancer API.
///
/// A user lookup is two sequential round trips: the user record first, then
/// that user's recent projects keyed by the decoded id. Each response is
/// decoded on the shared worker pool.
pub struct UserLookup<H: HttpGet, E: ProjectEnricher> {
    http: H,
    enricher: E,
    pool: Arc<WorkerPool>,
    base_url: String,
    project_limit: u32,
}

impl<H: HttpGet, E: ProjectEnricher> UserLookup<H, E> {
    pub fn new(http: H, enricher: E, pool: Arc<WorkerPool>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            enricher,
            pool,
            base_url: base_url.into(),
            project_limit: DEFAULT_PROJECT_LIMIT,
        }
    }

    pub fn from_config<C: ConfigProvider>(
        http: H,
        enricher: E,
        pool: Arc<WorkerPool>,
        config: &C,
    ) -> Self {
        Self::new(http, enricher, pool, config.base_url()).with_project_limit(config.project_limit())
    }

    pub fn with_project_limit(mut self, limit: u32) -> Self {
        self.project_limit = limit;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn enrich(&self, projects: Vec<Project>) -> Vec<Project> {
        let count = projects.len();
        let enriched = self.enricher.enrich(projects);
        if enriched.len() != count {
            tracing::warn!(
                "⚠️ Enricher changed project count from {} to {}",
                count,
                enriched.len()
            );
        }
        enriched
    }

    /// Decode a user response and attach that user's latest projects.
    pub async fn user_from_json(&self, body: &str) -> Result<User> {
        let root: Value = serde_json::from_str(body)?;
        let mut user = decode_user(result_field(&root)?)?;
        tracing::info!("👤 Decoded user '{}' ({}), fetching projects", user.username, user.id);

        let mut params = HashMap::new();
        params.insert("owners[]".to_string(), user.id.to_string());
        params.insert("full_description".to_string(), "true".to_string());
        params.insert("job_details".to_string(), "true".to_string());
        params.insert("limit".to_string(), self.project_limit.to_string());

        let data = self.http.get(&self.endpoint(PROJECTS_PATH), &params).await?;
        let projects = projects_from_json(&self.pool, &data).await?;
        tracing::debug!("Decoded {} projects for user {}", projects.len(), user.id);

        user.set_projects(self.enrich(projects));
        Ok(user)
    }

    pub async fn fetch_user(&self, user_id: i64) -> Result<User> {
        let url = self.endpoint(&format!("{}/{}", USERS_PATH, user_id));
        let body = self.http.get(&url, &HashMap::new()).await?;
        self.user_from_json(&body).await
    }

    fn search_params(query: &str, limit: u32, offset: u32) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("query".to_string(), query.to_string());
        params.insert("limit".to_string(), limit.to_string());
        params.insert("offset".to_string(), offset.to_string());
        params.insert("job_details".to_string(), "true".to_string());
        params.insert("full_description".to_string(), "true".to_string());
        params
    }

    /// One page of active projects matching `query`.
    pub async fn search_projects(&self, query: &str, limit: u32, offset: u32) -> Result<Vec<Project>> {
        tracing::info!("🔎 Searching projects for '{}' (limit {}, offset {})", query, limit, offset);
        let body = self
            .http
            .get(&self.endpoint(ACTIVE_PROJECTS_PATH), &Self::search_params(query, limit, offset))
            .await?;
        let projects = projects_from_json(&self.pool, &body).await?;
        Ok(self.enrich(projects))
    }

    pub async fn search_descriptions(&self, query: &str, limit: u32, offset: u32) -> Result<Vec<String>> {
        let body = self
            .http
            .get(&self.endpoint(ACTIVE_PROJECTS_PATH), &Self::search_params(query, limit, offset))
            .await?;
        descriptions_from_json(&self.pool, &body).await
    }
}
