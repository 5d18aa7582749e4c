use crate::domain::model::Project;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// 遠端 API 的 GET 呼叫，回傳完整的 response body。
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get(&self, url: &str, params: &HashMap<String, String>) -> Result<String>;
}

/// 解碼後的專案再加工（例如可讀性評分）。必須保持順序與筆數。
pub trait ProjectEnricher: Send + Sync {
    fn enrich(&self, projects: Vec<Project>) -> Vec<Project>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn pool_size(&self) -> usize;
    fn project_limit(&self) -> u32;
}
