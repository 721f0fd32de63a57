//! Machine translation capability.
//!
//! The engine only needs [`Translator`]; [`GoogleTranslator`] is the default
//! network implementation.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("translator answered with HTTP {0}")]
    Status(u16),
    #[error("unexpected translator response: {0}")]
    Response(String),
}

/// Translate `text` from one language code to another.
pub trait Translator {
    fn translate(&self, text: &str, from: &str, to: &str) -> Result<String, TranslateError>;
}

/// Client for the public `translate_a/single` endpoint.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub const DEFAULT_ENDPOINT: &'static str = "https://translate.googleapis.com";

    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, from: &str, to: &str) -> Result<String, TranslateError> {
        let url = format!("{}/translate_a/single", self.endpoint);
        debug!("translating {:?} {} -> {}", text, from, to);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", from),
                ("tl", to),
                ("dt", "t"),
                ("q", text),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body = response.text()?;
        parse_response(&body)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The body looks like `[[["Hello","Hola",null,null,10], ...], null, "es", ...]`.
fn parse_response(body: &str) -> Result<String, TranslateError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|err| TranslateError::Response(format!("invalid JSON: {err}")))?;

    let segments = json
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Response("missing sentence list".to_string()))?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(part) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(part);
        }
    }

    if translated.is_empty() {
        return Err(TranslateError::Response("no translated text".to_string()));
    }
    Ok(translated)
}
