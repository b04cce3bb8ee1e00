//! HTTP server for texume.
//!
//! Mounts the JSON API under `/api`, adds the document export routes, and
//! puts everything behind HTTP Basic auth.

pub mod auth;
pub mod error;
pub mod export;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware, routing::get};
use serde::Deserialize;
use texume_api::ApiState;
use texume_core::store::ContentStore;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, require_auth};
use export::LatexCompiler;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  pub auth_username:        String,
  pub auth_password_hash:   String,
  #[serde(default = "default_latex_command")]
  pub latex_command:        String,
  #[serde(default = "default_latex_args")]
  pub latex_args:           Vec<String>,
  /// Directory holding `default.tex` and `layout.tex`.
  #[serde(default = "default_template_dir")]
  pub template_dir:         PathBuf,
  #[serde(default = "default_compile_timeout_secs")]
  pub compile_timeout_secs: u64,
}

fn default_latex_command() -> String { "pdflatex".into() }

fn default_latex_args() -> Vec<String> {
  vec!["-interaction=nonstopmode".into(), "-halt-on-error".into()]
}

fn default_template_dir() -> PathBuf { PathBuf::from("templates") }

fn default_compile_timeout_secs() -> u64 { 60 }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, C> {
  pub api:      ApiState<S>,
  pub config:   Arc<ServerConfig>,
  pub auth:     Arc<AuthConfig>,
  pub compiler: Arc<C>,
}

impl<S, C> Clone for AppState<S, C> {
  fn clone(&self) -> Self {
    Self {
      api:      self.api.clone(),
      config:   Arc::clone(&self.config),
      auth:     Arc::clone(&self.auth),
      compiler: Arc::clone(&self.compiler),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete server [`Router`].
pub fn router<S, C>(state: AppState<S, C>) -> Router
where
  S: ContentStore + 'static,
  C: LatexCompiler + 'static,
{
  let auth = Arc::clone(&state.auth);
  let api = texume_api::api_router(state.api.clone());

  Router::new()
    .route("/export/resume.tex", get(export::latex::<S, C>))
    .route("/export/resume.pdf", get(export::pdf::<S, C>))
    .with_state(state)
    .nest("/api", api)
    .layer(middleware::from_fn_with_state(auth, require_auth))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use rand_core::OsRng;
  use serde_json::json;
  use texume_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;
  use crate::export::CompileError;

  /// Records documents and answers with fixed bytes, or fails.
  #[derive(Default)]
  struct FakeCompiler {
    fail: bool,
    seen: Mutex<Vec<String>>,
  }

  impl LatexCompiler for FakeCompiler {
    async fn compile(&self, document: String) -> Result<Vec<u8>, CompileError> {
      self.seen.lock().unwrap().push(document);
      if self.fail {
        Err(CompileError::Failed {
          status: "exit status: 1".into(),
          log:    "! LaTeX Error: File `layout.tex' not found.".into(),
        })
      } else {
        Ok(b"%PDF-1.5 fake".to_vec())
      }
    }
  }

  async fn make_state(password: &str, compiler: FakeCompiler) -> AppState<SqliteStore, FakeCompiler> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.add_profile("user".into()).await.unwrap();

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string();

    AppState {
      api:      ApiState::new(Arc::new(store)),
      config:   Arc::new(ServerConfig {
        host:                 "127.0.0.1".to_string(),
        port:                 8080,
        store_path:           PathBuf::from(":memory:"),
        auth_username:        "user".to_string(),
        auth_password_hash:   hash.clone(),
        latex_command:        default_latex_command(),
        latex_args:           default_latex_args(),
        template_dir:         default_template_dir(),
        compile_timeout_secs: default_compile_timeout_secs(),
      }),
      auth:     Arc::new(AuthConfig {
        username:      "user".to_string(),
        password_hash: hash,
      }),
      compiler: Arc::new(compiler),
    }
  }

  fn auth_header(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  async fn oneshot_raw(
    state:   AppState<SqliteStore, FakeCompiler>,
    method:  &str,
    uri:     &str,
    headers: Vec<(header::HeaderName, &str)>,
    body:    &str,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
      builder = builder.header(k, v);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_bytes(resp: Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec()
  }

  // ── Auth ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unauthenticated_requests_return_401() {
    let state = make_state("secret", FakeCompiler::default()).await;
    for uri in ["/api/profiles/user", "/export/resume.tex", "/export/resume.pdf"] {
      let resp = oneshot_raw(state.clone(), "GET", uri, vec![], "").await;
      assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
      assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
    }
  }

  #[tokio::test]
  async fn wrong_password_returns_401() {
    let state = make_state("secret", FakeCompiler::default()).await;
    let auth  = auth_header("user", "nope");
    let resp  = oneshot_raw(
      state,
      "GET",
      "/api/profiles/user",
      vec![(header::AUTHORIZATION, auth.as_str())],
      "",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  // ── API passthrough ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let state = make_state("secret", FakeCompiler::default()).await;
    let auth  = auth_header("user", "secret");

    let save = json!({ "section": "Name", "body": "Ada Lovelace" }).to_string();
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/api/profiles/user/content",
      vec![
        (header::AUTHORIZATION, auth.as_str()),
        (header::CONTENT_TYPE, "application/json"),
      ],
      &save,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = oneshot_raw(
      state,
      "GET",
      "/api/profiles/user/resume",
      vec![(header::AUTHORIZATION, auth.as_str())],
      "",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let md = String::from_utf8(body_bytes(resp).await).unwrap();
    assert!(md.starts_with("Ada Lovelace\n"), "{md}");
  }

  // ── Export ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn latex_export_embeds_document_template() {
    let state = make_state("secret", FakeCompiler::default()).await;
    let auth  = auth_header("user", "secret");
    let resp  = oneshot_raw(
      state,
      "GET",
      "/export/resume.tex",
      vec![(header::AUTHORIZATION, auth.as_str())],
      "",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_owned();
    assert!(ct.starts_with("application/x-latex"), "{ct}");

    let doc = String::from_utf8(body_bytes(resp).await).unwrap();
    assert!(doc.starts_with("\\input{default}\n\\renewcommand{\\phone}{}\n"), "{doc}");
    assert!(doc.ends_with("\\renewcommand{\\extracurricular}{\n\n}\n\\input{layout}\n"), "{doc}");
  }

  #[tokio::test]
  async fn pdf_export_returns_compiler_bytes() {
    let state = make_state("secret", FakeCompiler::default()).await;
    let auth  = auth_header("user", "secret");
    let resp  = oneshot_raw(
      state.clone(),
      "GET",
      "/export/resume.pdf",
      vec![(header::AUTHORIZATION, auth.as_str())],
      "",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
    assert!(
      resp.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .starts_with("attachment")
    );
    assert_eq!(body_bytes(resp).await, b"%PDF-1.5 fake");

    let seen = state.compiler.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].starts_with("\\input{default}\n"));
  }

  #[tokio::test]
  async fn compile_failure_is_502_with_log() {
    let compiler = FakeCompiler { fail: true, ..Default::default() };
    let state = make_state("secret", compiler).await;
    let auth  = auth_header("user", "secret");
    let resp  = oneshot_raw(
      state,
      "GET",
      "/export/resume.pdf",
      vec![(header::AUTHORIZATION, auth.as_str())],
      "",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(body["error"].as_str().unwrap().contains("layout.tex"), "{body}");
  }

  #[tokio::test]
  async fn malformed_section_blocks_export() {
    use texume_core::{
      content::NewContent, formatting::FormattingMode, section::Section,
    };

    let state = make_state("secret", FakeCompiler::default()).await;
    let profile = state.api.store.get_profile("user").await.unwrap().unwrap();
    state
      .api
      .store
      .save(
        NewContent::new(profile.profile_id, Section::Courses, "2019")
          .with_formatting(FormattingMode::DatePoints),
      )
      .await
      .unwrap();

    let auth = auth_header("user", "secret");
    let resp = oneshot_raw(
      state.clone(),
      "GET",
      "/export/resume.pdf",
      vec![(header::AUTHORIZATION, auth.as_str())],
      "",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(state.compiler.seen.lock().unwrap().is_empty());
  }
}
