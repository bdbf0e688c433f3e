//! Focus-point override fetcher
//!
//! Requests `/focus-point-overrides.json` once and decides whether the
//! response carries override records or stands for "no overrides".
//!
//! Development servers and SPA hosting answer unknown paths with the
//! application's HTML shell and a 200 status, so the declared content type is
//! the only reliable signal there. A 404/410 status is honoured first when the
//! serving layer provides one; the content-type rule stays as a compatibility
//! shim for the fallback-routing setup.

use crate::config::BootConfig;
use crate::datasets::FocusPoint;
use crate::error::BootError;
use crate::obs;
use crate::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Fixed path of the override document
pub const OVERRIDES_PATH: &str = "/focus-point-overrides.json";

/// Raw result of the override request, discarded once classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideResponse {
    /// HTTP status code
    pub status: u16,
    /// Declared `Content-Type`, if the header was present
    pub content_type: Option<String>,
    /// Response body
    pub body: Vec<u8>,
}

impl OverrideResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        OverrideResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    /// 200 response declaring `application/json`
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, Some("application/json"), body)
    }

    /// 200 response declaring `text/html`, as served by fallback routing
    pub fn html(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, Some("text/html; charset=utf-8"), body)
    }
}

/// Why a response was treated as "no overrides configured"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsenceReason {
    /// Server answered 404 or 410
    NotFound { status: u16 },
    /// Server answered with a non-JSON document (usually the HTML shell)
    NonJsonContent { content_type: String },
    /// No `Content-Type` header at all
    MissingContentType,
}

impl fmt::Display for AbsenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbsenceReason::NotFound { status } => write!(f, "status {}", status),
            AbsenceReason::NonJsonContent { content_type } => {
                write!(f, "non-JSON content type {}", content_type)
            }
            AbsenceReason::MissingContentType => write!(f, "missing content type"),
        }
    }
}

/// Outcome of classifying an [`OverrideResponse`]
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideDecision {
    /// Body parsed as override records (possibly none)
    Accepted(Vec<FocusPoint>),
    /// No override document is available
    Absent(AbsenceReason),
}

impl OverrideDecision {
    /// The accepted override set; empty when absent.
    pub fn into_points(self) -> Vec<FocusPoint> {
        match self {
            OverrideDecision::Accepted(points) => points,
            OverrideDecision::Absent(_) => Vec::new(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, OverrideDecision::Accepted(_))
    }
}

/// True for `application/json` and `application/*+json`, ignoring
/// parameters and case.
pub fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}

/// Decide what an override response means.
///
/// Fails only when JSON was declared and the body is not an array of
/// records.
pub fn classify(response: OverrideResponse) -> Result<OverrideDecision> {
    if matches!(response.status, 404 | 410) {
        return Ok(OverrideDecision::Absent(AbsenceReason::NotFound {
            status: response.status,
        }));
    }

    let Some(content_type) = response.content_type else {
        return Ok(OverrideDecision::Absent(AbsenceReason::MissingContentType));
    };

    if !is_json_media_type(&content_type) {
        return Ok(OverrideDecision::Absent(AbsenceReason::NonJsonContent {
            content_type,
        }));
    }

    let points: Vec<FocusPoint> =
        serde_json::from_slice(&response.body).map_err(BootError::MalformedOverrides)?;
    Ok(OverrideDecision::Accepted(points))
}

/// Issues the single override request.
#[async_trait]
pub trait OverrideTransport: Send + Sync {
    /// GET `path`. Transport failures are returned as errors; any HTTP
    /// status is a successful response.
    async fn get(&self, path: &str) -> Result<OverrideResponse>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &BootConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(HttpTransport {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Absolute URL for `path` on the configured origin
    pub fn url_for(&self, path: &str) -> Result<reqwest::Url> {
        let raw = format!("{}{}", self.base_url, path);
        reqwest::Url::parse(&raw).map_err(|e| BootError::InvalidUrl(format!("{}: {}", raw, e)))
    }
}

#[async_trait]
impl OverrideTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<OverrideResponse> {
        let url = self.url_for(path)?;
        debug!(%url, "Requesting override document");

        let response = self.http_client.get(url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        let body = response.bytes().await?.to_vec();

        Ok(OverrideResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Fetches and classifies the override document
#[derive(Clone)]
pub struct OverrideFetcher {
    transport: Arc<dyn OverrideTransport>,
}

impl OverrideFetcher {
    pub fn new(transport: Arc<dyn OverrideTransport>) -> Self {
        OverrideFetcher { transport }
    }

    /// Fetcher talking HTTP to the configured origin
    pub fn http(config: &BootConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// One request, one decision.
    pub async fn fetch(&self) -> Result<OverrideDecision> {
        let response = self.transport.get(OVERRIDES_PATH).await?;
        let status = response.status;
        let decision = classify(response)?;

        match &decision {
            OverrideDecision::Accepted(points) => obs::emit_override_accepted(status, points.len()),
            OverrideDecision::Absent(reason) => obs::emit_override_absent(status, reason),
        }

        Ok(decision)
    }
}
