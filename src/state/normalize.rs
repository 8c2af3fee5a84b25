use serde_json::Value;
use tracing::warn;

/// Unwraps a single entity out of whichever envelope the API used.
/// Accepted shapes, tried in order: `{data: {data: entity}}`,
/// `{data: entity}`, a bare entity carrying an `id`. Anything else
/// resolves to `None`.
pub fn resolve_entity(raw: &Value) -> Option<Value> {
    if let Some(data) = raw.get("data") {
        if let Some(inner) = data.get("data") {
            if inner.get("id").is_some() {
                return Some(inner.clone());
            }
        }
        if data.get("id").is_some() {
            return Some(data.clone());
        }
    }
    if raw.get("id").is_some() {
        return Some(raw.clone());
    }
    warn!("unrecognized entity envelope, dropping payload");
    None
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedList {
    pub items: Vec<Value>,
    pub total_items: Option<i64>,
    pub total_pages: Option<i64>,
}

/// Unwraps a list response. `collection_key` names the keyed array inside
/// `data` ("jobs", "candidates"); bare arrays at either level are also
/// accepted since older fixtures returned them.
pub fn resolve_list(raw: &Value, collection_key: &str) -> ResolvedList {
    let data = raw.get("data").unwrap_or(raw);

    let items = data
        .get(collection_key)
        .and_then(Value::as_array)
        .or_else(|| data.as_array())
        .or_else(|| raw.as_array())
        .cloned();
    let items = match items {
        Some(items) => items,
        None => {
            warn!(collection_key, "unrecognized list envelope, treating as empty");
            Vec::new()
        }
    };

    let pagination = data.get("pagination");
    ResolvedList {
        items,
        total_items: pagination
            .and_then(|p| p.get("total_items"))
            .and_then(Value::as_i64),
        total_pages: pagination
            .and_then(|p| p.get("total_pages"))
            .and_then(Value::as_i64),
    }
}
