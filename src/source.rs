use crate::errors::CycleError;
use crate::models::PostureReading;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;

/// Where poll cycles get their readings from.
pub trait PostureSource: Send + Sync {
    /// Fetches the raw feed payload. No shape checks happen here.
    fn fetch(&self) -> impl Future<Output = Result<Value, CycleError>> + Send;
}

/// Plain GET against the remote posture feed.
///
/// The status code is ignored: whatever body comes back is parsed as JSON.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PostureSource for HttpSource {
    async fn fetch(&self) -> Result<Value, CycleError> {
        let response = self.client.get(&self.url).send().await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Picks the reading to render out of a feed payload.
///
/// `Ok(None)` means there is nothing to show this cycle: the payload is
/// falsy or has no elements. A non-empty string yields its last character,
/// which carries no fields.
pub fn latest_reading(payload: Value) -> Result<Option<PostureReading>, CycleError> {
    match payload {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(_) => Ok(Some(PostureReading::default())),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        Value::Array(mut items) => match items.pop() {
            None => Ok(None),
            Some(last) => PostureReading::from_value(last)
                .map(Some)
                .ok_or_else(|| CycleError::UnexpectedPayload("last reading is null".to_string())),
        },
        other => Err(CycleError::UnexpectedPayload(format!(
            "expected an array of readings, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
