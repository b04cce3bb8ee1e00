//! Async HTTP client wrapping the texume JSON API and export routes.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use texume_core::{content::Content, format::OutputFormat, section::Section};

/// Connection settings for the texume server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Body of `POST /api/profiles/{username}/content`.
#[derive(Debug, Serialize)]
pub struct SaveRequest<'a> {
  pub section:    &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub formatting: Option<&'a str>,
  pub body:       &'a str,
}

/// Async HTTP client for the texume server.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    if config.username.is_empty() {
      return Err(anyhow!("no username configured (use --user, TEXUME_USER, or the config file)"));
    }
    let client = Client::builder()
      // PDF compilation can take a while.
      .timeout(Duration::from_secs(120))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  /// `base_url` joined with `segments`, each percent-encoded.
  fn url(&self, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(&self.config.base_url)
      .with_context(|| format!("invalid server URL {:?}", self.config.base_url))?;
    url
      .path_segments_mut()
      .map_err(|_| anyhow!("server URL {:?} cannot have a path", self.config.base_url))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  fn content_url(&self, rest: &[&str]) -> Result<Url> {
    let mut segments = vec!["api", "profiles", self.config.username.as_str(), "content"];
    segments.extend_from_slice(rest);
    self.url(&segments)
  }

  async fn get(&self, url: Url) -> Result<Response> {
    tracing::debug!(%url, "GET");
    let resp = self
      .client
      .get(url.clone())
      .basic_auth(&self.config.username, Some(&self.config.password))
      .send()
      .await
      .with_context(|| format!("GET {url} failed"))?;
    check(resp).await
  }

  // ── Content ───────────────────────────────────────────────────────────────

  /// `GET /api/profiles/{username}/content/{section}`
  pub async fn section(&self, section: Section) -> Result<Content> {
    let url = self.content_url(&[section.label()])?;
    self.get(url).await?.json().await.context("deserialising content")
  }

  /// `GET /api/profiles/{username}/content/{section}/history`
  pub async fn history(&self, section: Section) -> Result<Vec<Content>> {
    let url = self.content_url(&[section.label(), "history"])?;
    self.get(url).await?.json().await.context("deserialising history")
  }

  /// `POST /api/profiles/{username}/content`
  pub async fn save(&self, request: &SaveRequest<'_>) -> Result<Content> {
    let url = self.content_url(&[])?;
    tracing::debug!(%url, section = request.section, "POST");
    let resp = self
      .client
      .post(url.clone())
      .basic_auth(&self.config.username, Some(&self.config.password))
      .json(request)
      .send()
      .await
      .with_context(|| format!("POST {url} failed"))?;
    check(resp).await?.json().await.context("deserialising saved content")
  }

  // ── Rendering ─────────────────────────────────────────────────────────────

  /// `GET /api/profiles/{username}/resume?format=<format>`
  pub async fn render(&self, format: OutputFormat) -> Result<String> {
    let mut url = self.url(&["api", "profiles", self.config.username.as_str(), "resume"])?;
    url.query_pairs_mut().append_pair("format", format.as_str());
    self.get(url).await?.text().await.context("reading rendered resume")
  }

  /// `GET /export/resume.tex`
  pub async fn export_latex(&self) -> Result<Vec<u8>> {
    let url = self.url(&["export", "resume.tex"])?;
    Ok(self.get(url).await?.bytes().await.context("reading LaTeX export")?.to_vec())
  }

  /// `GET /export/resume.pdf`
  pub async fn export_pdf(&self) -> Result<Vec<u8>> {
    let url = self.url(&["export", "resume.pdf"])?;
    Ok(self.get(url).await?.bytes().await.context("reading PDF export")?.to_vec())
  }
}

/// Turn a non-success response into an error carrying the server's message.
async fn check(resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let text = resp.text().await.unwrap_or_default();
  let message = serde_json::from_str::<serde_json::Value>(&text)
    .ok()
    .and_then(|v| v["error"].as_str().map(str::to_owned))
    .unwrap_or(text);
  Err(anyhow!("server returned {status}: {message}"))
}
