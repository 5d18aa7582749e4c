use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub sentences: usize,
    pub words: usize,
    pub syllables: usize,
}

/// 專案列表的一筆資料。
///
/// `id` 與 `owner_id` 都來自 API 的 `owner_id`：列表端點以專案擁有者作為項目鍵值，
/// 下游同時讀取這兩個欄位。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub description: String,
    pub title: String,
    pub submitted_at: DateTime<Utc>,
    pub owner_id: i64,
    pub skills: Vec<Job>,
    #[serde(rename = "type")]
    pub project_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readability: Option<Readability>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl User {
    pub fn new(id: i64, username: String, display_name: String, role: String) -> Self {
        Self {
            id,
            username,
            display_name,
            role,
            projects: Vec::new(),
        }
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
    }
}
