use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header::CONTENT_TYPE, Method, Request};
use serde_json::Value;
use tower::ServiceExt;

use crate::error::{Error, Result};
use crate::AppState;

pub mod assessments;
pub mod candidates;
pub mod jobs;

pub use candidates::CandidatesQuery;
pub use jobs::JobsQuery;

/// Typed client over the intercepted API. Requests never touch a socket:
/// each call is dispatched straight into the router with `oneshot`,
/// carrying HTTP-shaped values end to end.
#[derive(Clone)]
pub struct ApiClient {
    router: Router,
}

impl ApiClient {
    pub fn new(state: AppState) -> Self {
        Self {
            router: crate::routes::api_router(state),
        }
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(value)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|err| Error::Internal(err.to_string()))?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|err| Error::Internal(err.to_string()))?;
        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        if !status.is_success() {
            let message = value
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Request failed")
                .to_string();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(value)
    }
}

/// Builds a query string, omitting absent values and the literal "all".
/// "all" is the sentinel for "no filter", so sending it is never correct.
pub(crate) fn query_string(pairs: &[(&str, Option<String>)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        if let Some(value) = value {
            if value == "all" {
                continue;
            }
            serializer.append_pair(key, value);
            any = true;
        }
    }
    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}
