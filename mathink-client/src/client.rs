//! HTTP client for the recognition and solver endpoints.

use std::sync::Arc;
use std::time::Duration;

use mathink_renderer::EncodedImage;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::solution::{parse_solution, Solution};

/// Query sent with an equation when the caller does not provide one.
pub const DEFAULT_QUERY: &str = "solve for x";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("mathink/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Result of image recognition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    /// Recognized equation (LaTeX).
    #[serde(alias = "latex")]
    pub equation: String,
    /// Any other fields the service returned.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SolveResponse {
    #[serde(default)]
    result: Option<String>,
}

/// Client for the recognition (`/predict`) and solver (`/solve`) services.
#[derive(Clone)]
pub struct MathApiClient {
    inner: Arc<InnerClient>,
}

struct InnerClient {
    http: Client,
    predict_url: Url,
    solve_url: Url,
}

impl MathApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the URL is malformed or not HTTP(S).
    /// Returns [`ClientError::Http`] if the HTTP client fails to build.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_config(base_url, &ClientConfig::default())
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the URL is malformed or not HTTP(S).
    /// Returns [`ClientError::Http`] if the HTTP client fails to build.
    pub fn with_config(base_url: &str, config: &ClientConfig) -> ClientResult<Self> {
        let mut base = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme {:?}",
                base.scheme()
            )));
        }
        // Keep any path prefix when joining endpoint names.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let join = |endpoint: &str| {
            base.join(endpoint)
                .map_err(|e| ClientError::InvalidUrl(e.to_string()))
        };
        let predict_url = join("predict")?;
        let solve_url = join("solve")?;

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(InnerClient {
                http,
                predict_url,
                solve_url,
            }),
        })
    }

    /// Recognition endpoint.
    #[must_use]
    pub fn predict_url(&self) -> &Url {
        &self.inner.predict_url
    }

    /// Solver endpoint.
    #[must_use]
    pub fn solve_url(&self) -> &Url {
        &self.inner.solve_url
    }

    /// Upload an image and return the recognized equation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the response is not the expected JSON.
    pub async fn recognize(&self, image: &EncodedImage) -> ClientResult<Recognition> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name("image"))
            .mime_str(image.mime_type())?;
        let form = Form::new().part("image", part);

        tracing::debug!(
            "Uploading {} byte {} image to {}",
            image.bytes.len(),
            image.format,
            self.inner.predict_url
        );
        let response = self
            .inner
            .http
            .post(self.inner.predict_url.clone())
            .multipart(form)
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        let recognition: Recognition = serde_json::from_str(&body)?;
        tracing::debug!("Recognized equation: {}", recognition.equation);
        Ok(recognition)
    }

    /// Ask the solver to solve `equation` according to `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the response is not the expected JSON.
    pub async fn solve(&self, equation: &str, query: &str) -> ClientResult<Solution> {
        tracing::debug!("Solving {equation:?} ({query})");
        let response = self
            .inner
            .http
            .post(self.inner.solve_url.clone())
            .form(&[("equation", equation), ("query", query)])
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        let parsed: SolveResponse = serde_json::from_str(&body)?;
        let solution = parse_solution(parsed.result.as_deref().unwrap_or_default());
        tracing::debug!(
            "Solver returned {} steps, answer {:?}",
            solution.steps.len(),
            solution.answer
        );
        Ok(solution)
    }

    async fn success_body(response: Response) -> ClientResult<String> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Service returned HTTP {status}");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.text().await?)
    }
}
