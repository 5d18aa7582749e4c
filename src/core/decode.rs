//! JSON tree -> entity conversion. No I/O; every function here runs inside a
//! worker pool task.

use crate::domain::model::{Job, Project, User};
use crate::utils::error::{FetchError, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

fn require_i64(obj: &Value, field: &str) -> Result<i64> {
    obj.get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| FetchError::decode(field, "an integer"))
}

fn require_str(obj: &Value, field: &str) -> Result<String> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| FetchError::decode(field, "a string"))
}

fn require_array<'a>(obj: &'a Value, field: &str) -> Result<&'a Vec<Value>> {
    obj.get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::decode(field, "an array"))
}

/// `time_submitted` 為秒，轉成毫秒精度的時間
fn seconds_to_timestamp(field: &str, seconds: i64) -> Result<DateTime<Utc>> {
    seconds
        .checked_mul(1000)
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
        .ok_or_else(|| FetchError::decode(field, "a representable unix timestamp"))
}

pub fn decode_job(obj: &Value) -> Result<Job> {
    Ok(Job {
        id: require_i64(obj, "id")?,
        name: require_str(obj, "name")?,
    })
}

pub fn decode_project(obj: &Value) -> Result<Project> {
    let owner_id = require_i64(obj, "owner_id")?;
    let description = require_str(obj, "preview_description")?;
    let title = require_str(obj, "title")?;
    let submitted_at = seconds_to_timestamp("time_submitted", require_i64(obj, "time_submitted")?)?;
    let project_type = require_str(obj, "type")?;

    let skills = require_array(obj, "jobs")?
        .iter()
        .enumerate()
        .map(|(i, job)| {
            decode_job(job).map_err(|e| match e {
                FetchError::Decode { field, expected } => {
                    FetchError::decode(format!("jobs[{}].{}", i, field), expected)
                }
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Project {
        id: owner_id,
        description,
        title,
        submitted_at,
        owner_id,
        skills,
        project_type,
        readability: None,
    })
}

pub fn decode_user(obj: &Value) -> Result<User> {
    Ok(User::new(
        require_i64(obj, "id")?,
        require_str(obj, "username")?,
        require_str(obj, "display_name")?,
        require_str(obj, "role")?,
    ))
}

pub fn result_field(root: &Value) -> Result<&Value> {
    root.get("result")
        .filter(|result| result.is_object())
        .ok_or_else(|| FetchError::decode("result", "an object"))
}

pub fn projects_array(root: &Value) -> Result<&Vec<Value>> {
    result_field(root)?
        .get("projects")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::decode("result.projects", "an array"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_project_reads_owner_id_twice() {
        let raw = json!({
            "owner_id": 7,
            "preview_description": "Hello",
            "title": "T",
            "time_submitted": 1000,
            "type": "fixed",
            "jobs": []
        });

        let project = decode_project(&raw).unwrap();

        assert_eq!(project.id, 7);
        assert_eq!(project.owner_id, 7);
        assert_eq!(project.description, "Hello");
        assert_eq!(project.title, "T");
        assert_eq!(project.submitted_at.timestamp_millis(), 1_000_000);
        assert_eq!(project.project_type, "fixed");
        assert!(project.skills.is_empty());
        assert!(project.readability.is_none());
    }

    #[test]
    fn test_decode_project_keeps_job_order() {
        let raw = json!({
            "owner_id": 11,
            "preview_description": "Build a site",
            "title": "Website",
            "time_submitted": 1_647_000_000,
            "type": "hourly",
            "jobs": [
                {"id": 3, "name": "PHP"},
                {"id": 17, "name": "HTML"},
                {"id": 9, "name": "Website Design"}
            ]
        });

        let project = decode_project(&raw).unwrap();

        let names: Vec<&str> = project.skills.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["PHP", "HTML", "Website Design"]);
        assert_eq!(project.skills[1], Job { id: 17, name: "HTML".to_string() });
    }

    #[test]
    fn test_decode_project_reports_bad_nested_job() {
        let raw = json!({
            "owner_id": 1,
            "preview_description": "x",
            "title": "x",
            "time_submitted": 0,
            "type": "fixed",
            "jobs": [{"id": 1, "name": "ok"}, {"id": "two", "name": "bad"}]
        });

        let err = decode_project(&raw).unwrap_err();

        assert!(matches!(err, FetchError::Decode { ref field, .. } if field == "jobs[1].id"));
    }

    #[test]
    fn test_decode_project_requires_jobs_array() {
        let raw = json!({
            "owner_id": 1,
            "preview_description": "x",
            "title": "x",
            "time_submitted": 0,
            "type": "fixed"
        });

        let err = decode_project(&raw).unwrap_err();

        assert!(matches!(err, FetchError::Decode { ref field, expected } if field == "jobs" && expected == "an array"));
    }

    #[test]
    fn test_decode_project_rejects_overflowing_timestamp() {
        let raw = json!({
            "owner_id": 1,
            "preview_description": "x",
            "title": "x",
            "time_submitted": i64::MAX,
            "type": "fixed",
            "jobs": []
        });

        assert!(matches!(
            decode_project(&raw),
            Err(FetchError::Decode { ref field, .. }) if field == "time_submitted"
        ));
    }

    #[test]
    fn test_decode_user_starts_without_projects() {
        let raw = json!({
            "id": 42,
            "username": "jdoe",
            "display_name": "Jane Doe",
            "role": "employer"
        });

        let user = decode_user(&raw).unwrap();

        assert_eq!(user.id, 42);
        assert_eq!(user.username, "jdoe");
        assert_eq!(user.display_name, "Jane Doe");
        assert_eq!(user.role, "employer");
        assert!(user.projects.is_empty());
    }

    #[test]
    fn test_decode_user_rejects_mistyped_field() {
        let raw = json!({"id": 42, "username": 5, "display_name": "x", "role": "x"});

        assert!(matches!(
            decode_user(&raw),
            Err(FetchError::Decode { ref field, expected }) if field == "username" && expected == "a string"
        ));
    }

    #[test]
    fn test_decode_job_requires_name() {
        assert!(decode_job(&json!({"id": 1})).is_err());
        assert_eq!(
            decode_job(&json!({"id": 1, "name": "Rust"})).unwrap(),
            Job { id: 1, name: "Rust".to_string() }
        );
    }

    #[test]
    fn test_projects_array_navigation() {
        let root = json!({"result": {"projects": [{"a": 1}, {"b": 2}]}});
        assert_eq!(projects_array(&root).unwrap().len(), 2);

        let missing = json!({"result": {"users": []}});
        assert!(matches!(
            projects_array(&missing),
            Err(FetchError::Decode { ref field, .. }) if field == "result.projects"
        ));

        let no_result = json!({"status": "error"});
        assert!(matches!(
            result_field(&no_result),
            Err(FetchError::Decode { ref field, .. }) if field == "result"
        ));
    }
}
