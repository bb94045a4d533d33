use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

/// Upper bound on diagnostic text carried by a [`CompileError`].
pub const MAX_DIAGNOSTIC_CHARS: usize = 2000;

/// Lines of `resume.log` appended to a failure diagnostic.
const LOG_TAIL_LINES: usize = 50;

const JOB_NAME: &str = "resume";

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Compilation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Compilation produced no output document:\n{diagnostic}")]
    MissingOutput { diagnostic: String },

    #[error("Compiler I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    /// Text suitable for showing to the user.
    pub fn diagnostic(&self) -> String {
        match self {
            CompileError::MissingOutput { diagnostic } => diagnostic.clone(),
            other => other.to_string(),
        }
    }
}

/// Turns filled markup into a binary document.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    async fn compile(&self, markup: &str) -> Result<Bytes, CompileError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LatexCompiler: pdflatex in a scratch directory
// ────────────────────────────────────────────────────────────────────────────

/// Runs a LaTeX engine twice over the markup so cross references resolve.
/// Both passes share one timeout; the child is killed when it expires.
pub struct LatexCompiler {
    program: String,
    timeout: Duration,
}

impl LatexCompiler {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    async fn run_pass(&self, work_dir: &Path) -> Result<Output, CompileError> {
        Command::new(&self.program)
            .arg("-interaction=nonstopmode")
            .arg(format!("{JOB_NAME}.tex"))
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| CompileError::Spawn {
                program: self.program.clone(),
                source,
            })
    }

    async fn run_passes(&self, work_dir: &Path) -> Result<Vec<Output>, CompileError> {
        let mut outputs = Vec::with_capacity(2);
        for _ in 0..2 {
            outputs.push(self.run_pass(work_dir).await?);
        }
        Ok(outputs)
    }
}

#[async_trait]
impl DocumentCompiler for LatexCompiler {
    async fn compile(&self, markup: &str) -> Result<Bytes, CompileError> {
        let work_dir = tempfile::tempdir()?;
        tokio::fs::write(work_dir.path().join(format!("{JOB_NAME}.tex")), markup).await?;

        info!("Compiling {} bytes of LaTeX with {}", markup.len(), self.program);
        let outputs = tokio::time::timeout(self.timeout, self.run_passes(work_dir.path()))
            .await
            .map_err(|_| {
                warn!("LaTeX compilation timed out after {:?}", self.timeout);
                CompileError::Timeout(self.timeout)
            })??;

        let pdf_path = work_dir.path().join(format!("{JOB_NAME}.pdf"));
        match tokio::fs::read(&pdf_path).await {
            Ok(pdf) => {
                info!("LaTeX compilation produced {} bytes", pdf.len());
                Ok(Bytes::from(pdf))
            }
            Err(_) => {
                let log = tokio::fs::read_to_string(work_dir.path().join(format!("{JOB_NAME}.log")))
                    .await
                    .unwrap_or_default();
                let diagnostic = build_diagnostic(&outputs, &log);
                warn!("LaTeX compilation failed: {} chars of diagnostics", diagnostic.len());
                Err(CompileError::MissingOutput { diagnostic })
            }
        }
    }
}

fn build_diagnostic(outputs: &[Output], log: &str) -> String {
    let mut text = String::new();
    for (pass, output) in outputs.iter().enumerate() {
        text.push_str(&format!(
            "=== pass {} (exit {}) ===\n",
            pass + 1,
            output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string())
        ));
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            text.push_str(&format!("stderr:\n{}\n", stderr.trim_end()));
        }
        if !stdout.trim().is_empty() {
            text.push_str(&format!("stdout:\n{}\n", stdout.trim_end()));
        }
    }

    let lines: Vec<&str> = log.lines().collect();
    if !lines.is_empty() {
        let tail = &lines[lines.len().saturating_sub(LOG_TAIL_LINES)..];
        text.push_str(&format!("=== {JOB_NAME}.log (last {} lines) ===\n", tail.len()));
        text.push_str(&tail.join("\n"));
    }

    truncate_diagnostic(&text, MAX_DIAGNOSTIC_CHARS)
}

/// Bounds `text` to roughly `max_chars`, keeping whole lines from the head and
/// the tail so both the first and last compiler messages survive.
pub fn truncate_diagnostic(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let budget = max_chars / 2;
    let lines: Vec<&str> = text.lines().collect();

    let mut head = Vec::new();
    let mut used = 0;
    for line in &lines {
        let cost = line.chars().count() + 1;
        if used + cost > budget {
            break;
        }
        head.push(*line);
        used += cost;
    }

    let mut tail = Vec::new();
    used = 0;
    for line in lines[head.len()..].iter().rev() {
        let cost = line.chars().count() + 1;
        if used + cost > budget {
            break;
        }
        tail.push(*line);
        used += cost;
    }
    tail.reverse();

    // a single huge line fits neither side: fall back to raw characters
    if head.is_empty() && tail.is_empty() {
        let start: String = text.chars().take(budget).collect();
        let end: String = {
            let chars: Vec<char> = text.chars().collect();
            chars[chars.len().saturating_sub(budget)..].iter().collect()
        };
        return format!("{start}\n[...]\n{end}");
    }

    let omitted = lines.len() - head.len() - tail.len();
    format!(
        "{}\n[... {omitted} lines omitted ...]\n{}",
        head.join("\n"),
        tail.join("\n")
    )
}
