use crate::core::decode::{decode_project, projects_array};
use crate::core::pool::WorkerPool;
use crate::domain::model::Project;
use crate::utils::error::{FetchError, Result};
use serde_json::Value;

/// Decode every element of `items` on the pool and collect the results in
/// input order.
///
/// All tasks are submitted before the first join. Handles are then awaited
/// in index order and the first failure met that way is returned as
/// [`FetchError::BatchDecode`]; tasks already queued still run, their
/// output is discarded.
pub async fn transform_all<T, F>(pool: &WorkerPool, items: Vec<Value>, decode: F) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(&Value) -> Result<T> + Clone + Send + 'static,
{
    let total = items.len();
    tracing::debug!("Submitting {} decode tasks ({} queued)", total, pool.queued());

    let handles: Vec<_> = items
        .into_iter()
        .map(|item| {
            let decode = decode.clone();
            pool.submit(move || decode(&item))
        })
        .collect();

    let mut decoded = Vec::with_capacity(total);
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.await.and_then(|outcome| outcome) {
            Ok(value) => decoded.push(value),
            Err(e) => {
                tracing::warn!("⚠️ Decode task {} of {} failed: {}", index, total, e);
                return Err(FetchError::BatchDecode {
                    index,
                    source: Box::new(e),
                });
            }
        }
    }

    Ok(decoded)
}

fn take_projects(body: &str) -> Result<Vec<Value>> {
    let root: Value = serde_json::from_str(body)?;
    Ok(projects_array(&root)?.clone())
}

pub async fn projects_from_json(pool: &WorkerPool, body: &str) -> Result<Vec<Project>> {
    let items = take_projects(body)?;
    transform_all(pool, items, decode_project).await
}

/// 取出每個專案的 preview_description 並轉為小寫
pub async fn descriptions_from_json(pool: &WorkerPool, body: &str) -> Result<Vec<String>> {
    let items = take_projects(body)?;
    transform_all(pool, items, |obj: &Value| {
        obj.get("preview_description")
            .and_then(Value::as_str)
            .map(str::to_lowercase)
            .ok_or_else(|| FetchError::decode("preview_description", "a string"))
    })
    .await
}
