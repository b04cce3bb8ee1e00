//! Document export: the full LaTeX source and its compiled PDF.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/export/resume.tex` | Compiler-ready document for the authenticated user |
//! | `GET`  | `/export/resume.pdf` | 502 with the compiler log tail on failure |

use std::{future::Future, path::PathBuf, process::Stdio, time::Duration};

use axum::{
  Extension,
  extract::State,
  http::header,
  response::{IntoResponse, Response},
};
use texume_api::{ApiError, profiles::require_profile};
use texume_core::store::ContentStore;
use thiserror::Error;
use tokio::process::Command;

use crate::{AppState, ServerConfig, auth::Authenticated, error::Error};

/// Lines of compiler output kept in a [`CompileError::Failed`].
const LOG_TAIL_LINES: usize = 20;

// ─── Compiler ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CompileError {
  #[error("build directory: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to start {command:?}: {source}")]
  Spawn {
    command: String,
    #[source]
    source:  std::io::Error,
  },

  #[error("timed out after {0:?}")]
  Timeout(Duration),

  #[error("compiler exited with {status}\n{log}")]
  Failed { status: String, log: String },

  #[error("compiler produced no PDF")]
  MissingOutput,
}

/// Turns a complete LaTeX document into PDF bytes.
pub trait LatexCompiler: Send + Sync {
  fn compile(
    &self,
    document: String,
  ) -> impl Future<Output = Result<Vec<u8>, CompileError>> + Send + '_;
}

/// Runs an external LaTeX engine in a scratch directory.
///
/// The document is written to `resume.tex`; the engine is invoked as
/// `<command> <args...> resume.tex` with `TEXINPUTS` pointing at the template
/// directory, and `resume.pdf` is read back.
#[derive(Debug, Clone)]
pub struct PdflatexCompiler {
  pub command:      String,
  pub args:         Vec<String>,
  /// Must be absolute; the engine runs inside the scratch directory.
  pub template_dir: PathBuf,
  pub timeout:      Duration,
}

impl PdflatexCompiler {
  pub fn from_config(config: &ServerConfig) -> Self {
    Self {
      command:      config.latex_command.clone(),
      args:         config.latex_args.clone(),
      template_dir: config.template_dir.clone(),
      timeout:      Duration::from_secs(config.compile_timeout_secs),
    }
  }

  /// `TEXINPUTS` value: the template directory, then the engine defaults
  /// (the trailing separator).
  fn texinputs(&self) -> String {
    let sep = if cfg!(windows) { ';' } else { ':' };
    format!("{}{sep}", self.template_dir.display())
  }
}

impl LatexCompiler for PdflatexCompiler {
  async fn compile(&self, document: String) -> Result<Vec<u8>, CompileError> {
    let dir = tempfile::tempdir()?;
    tokio::fs::write(dir.path().join("resume.tex"), document).await?;

    let child = Command::new(&self.command)
      .args(&self.args)
      .arg("resume.tex")
      .current_dir(dir.path())
      .env("TEXINPUTS", self.texinputs())
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(true)
      .spawn()
      .map_err(|source| CompileError::Spawn { command: self.command.clone(), source })?;

    let output = tokio::time::timeout(self.timeout, child.wait_with_output())
      .await
      .map_err(|_| CompileError::Timeout(self.timeout))??;

    if !output.status.success() {
      let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
      log.push_str(&String::from_utf8_lossy(&output.stderr));
      return Err(CompileError::Failed {
        status: output.status.to_string(),
        log:    log_tail(&log, LOG_TAIL_LINES),
      });
    }

    match tokio::fs::read(dir.path().join("resume.pdf")).await {
      Ok(pdf) => Ok(pdf),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CompileError::MissingOutput),
      Err(e) => Err(e.into()),
    }
  }
}

/// The last `lines` non-empty lines of `log`.
fn log_tail(log: &str, lines: usize) -> String {
  let kept: Vec<&str> = log.lines().filter(|l| !l.trim().is_empty()).collect();
  kept[kept.len().saturating_sub(lines)..].join("\n")
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// Render the authenticated user's résumé into the full LaTeX document.
async fn document<S, C>(state: &AppState<S, C>, username: &str) -> Result<String, Error>
where
  S: ContentStore,
{
  let store = &*state.api.store;
  let profile = require_profile(store, username).await?;
  let resume = state
    .api
    .cache
    .get_or_load(store, profile.profile_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let doc = resume.render_document().map_err(ApiError::from)?;
  Ok(doc)
}

/// `GET /export/resume.tex`
pub async fn latex<S, C>(
  State(state): State<AppState<S, C>>,
  Extension(user): Extension<Authenticated>,
) -> Result<Response, Error>
where
  S: ContentStore,
  C: LatexCompiler,
{
  let doc = document(&state, &user.username).await?;
  Ok(
    (
      [
        (header::CONTENT_TYPE, "application/x-latex; charset=utf-8"),
        (header::CONTENT_DISPOSITION, "attachment; filename=\"resume.tex\""),
      ],
      doc,
    )
      .into_response(),
  )
}

/// `GET /export/resume.pdf`
pub async fn pdf<S, C>(
  State(state): State<AppState<S, C>>,
  Extension(user): Extension<Authenticated>,
) -> Result<Response, Error>
where
  S: ContentStore,
  C: LatexCompiler,
{
  let doc = document(&state, &user.username).await?;
  let bytes = state.compiler.compile(doc).await?;
  tracing::info!(username = %user.username, bytes = bytes.len(), "pdf compiled");
  Ok(
    (
      [
        (header::CONTENT_TYPE, "application/pdf"),
        (header::CONTENT_DISPOSITION, "attachment; filename=\"resume.pdf\""),
      ],
      bytes,
    )
      .into_response(),
  )
}
