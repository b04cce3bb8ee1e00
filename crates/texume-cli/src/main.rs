//! `texume`: command-line client for a texume server.
//!
//! # Usage
//!
//! ```text
//! texume --url http://localhost:8080 --user ada --password secret render
//! texume --config ~/.config/texume/config.toml save courses --formatting date-points --file courses.txt
//! texume export --output resume.pdf
//! ```

mod client;

use std::{
  io::{self, Read as _, Write as _},
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig, SaveRequest};
use serde::Deserialize;
use texume_core::{
  content::Content, format::OutputFormat, formatting::FormattingMode, section::Section,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "texume", about = "Edit and render a résumé on a texume server")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the texume server (default: http://localhost:8080).
  #[arg(long, env = "TEXUME_URL")]
  url: Option<String>,

  /// Username; also selects the profile.
  #[arg(long, env = "TEXUME_USER")]
  user: Option<String>,

  /// Password (plaintext).
  #[arg(long, env = "TEXUME_PASSWORD")]
  password: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print the rendered résumé.
  Render {
    #[arg(short, long, default_value = "markdown", value_parser = parse_format)]
    format: OutputFormat,
  },

  /// Print the current content of a section.
  Show {
    #[arg(value_parser = parse_section)]
    section: Section,
  },

  /// List every saved version of a section, latest first.
  History {
    #[arg(value_parser = parse_section)]
    section: Section,
  },

  /// Save a new version of a section.
  Save {
    #[arg(value_parser = parse_section)]
    section: Section,

    /// text, date-points, or org-loc-title-date-points (default: text).
    #[arg(long, value_parser = parse_formatting)]
    formatting: Option<FormattingMode>,

    /// Read the body from FILE, or from stdin when omitted or `-`.
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,
  },

  /// Download the compiled PDF (or the LaTeX source with `--latex`).
  Export {
    /// Destination file, or `-` for stdout (default: resume.pdf / resume.tex).
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[arg(long)]
    latex: bool,
  },
}

fn parse_format(s: &str) -> Result<OutputFormat, String> { s.parse().map_err(|e| format!("{e}")) }

fn parse_section(s: &str) -> Result<Section, String> { Section::parse(s).map_err(|e| e.to_string()) }

fn parse_formatting(s: &str) -> Result<FormattingMode, String> {
  FormattingMode::parse(s).map_err(|e| e.to_string())
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

/// Flag (or its environment variable), then config file, then `default`.
fn layered(flag: Option<String>, file: &str, default: &str) -> String {
  flag
    .or_else(|| (!file.is_empty()).then(|| file.to_owned()))
    .unwrap_or_else(|| default.to_owned())
}

fn load_config_file(path: Option<&Path>) -> Result<ConfigFile> {
  let Some(path) = path else {
    return Ok(ConfigFile::default());
  };
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading config file {}", path.display()))?;
  toml::from_str(&raw).context("parsing config file")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();
  let file_cfg = load_config_file(args.config.as_deref())?;

  // CLI flags override config file, which overrides defaults.
  let client = ApiClient::new(ApiConfig {
    base_url: layered(args.url, &file_cfg.url, DEFAULT_URL),
    username: layered(args.user, &file_cfg.username, ""),
    password: layered(args.password, &file_cfg.password, ""),
  })?;

  match args.command {
    Command::Render { format } => {
      print!("{}", client.render(format).await?);
    }
    Command::Show { section } => {
      let content = client.section(section).await?;
      print_content(&content);
    }
    Command::History { section } => {
      let versions = client.history(section).await?;
      if versions.is_empty() {
        eprintln!("{section} has never been saved");
      }
      for (i, content) in versions.iter().enumerate() {
        if i > 0 {
          println!();
        }
        print_content(content);
      }
    }
    Command::Save { section, formatting, file } => {
      let body = read_body(file.as_deref())?;
      let saved = client
        .save(&SaveRequest {
          section:    section.label(),
          formatting: formatting.map(FormattingMode::as_str),
          body:       &body,
        })
        .await?;
      eprintln!("saved {} ({}) on {}", saved.section, saved.formatting, saved.created);
    }
    Command::Export { output, latex } => {
      let (bytes, default_name) = if latex {
        (client.export_latex().await?, "resume.tex")
      } else {
        (client.export_pdf().await?, "resume.pdf")
      };
      let output = output.unwrap_or_else(|| PathBuf::from(default_name));
      write_output(&output, &bytes)?;
    }
  }

  Ok(())
}

fn print_content(content: &Content) {
  if content.is_persisted() {
    println!("# {} ({}, {})", content.section, content.formatting, content.created);
  } else {
    println!("# {} (never saved)", content.section);
  }
  println!("{}", content.body);
}

/// Read a section body from `path`, or stdin for `None` / `-`.
fn read_body(path: Option<&Path>) -> Result<String> {
  match path {
    Some(p) if p != Path::new("-") => {
      std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
    }
    _ => {
      let mut body = String::new();
      io::stdin().read_to_string(&mut body).context("reading body from stdin")?;
      Ok(body)
    }
  }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
  if path == Path::new("-") {
    io::stdout().write_all(bytes).context("writing to stdout")?;
  } else {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    eprintln!("wrote {} ({} bytes)", path.display(), bytes.len());
  }
  Ok(())
}
