//! Pandoc subprocess converter
//!
//! Each conversion writes the source to a scoped temporary file, runs
//! `pandoc --from=<from> --to=<to> <file>` and captures standard output.
//! The temporary file is removed when the conversion returns, whether it
//! succeeded or not.

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, warn};
use tempfile::NamedTempFile;
use which::which;

use crate::converter::Converter;
use crate::error::{PandocError, Result};
use crate::format::Format;

/// Environment variable naming the pandoc executable
pub const PANDOC_ENV: &str = "MDTREE_PANDOC";

/// Converter backed by the pandoc executable
#[derive(Debug, Clone)]
pub struct Pandoc {
    program: PathBuf,
    /// Arguments placed before `--from`/`--to` on every invocation
    extra_args: Vec<String>,
}

impl Pandoc {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    /// Find pandoc: `MDTREE_PANDOC` if set, otherwise `pandoc` on `PATH`
    pub fn locate() -> Result<Self> {
        if let Some(path) = env::var_os(PANDOC_ENV) {
            if !path.is_empty() {
                return Ok(Self::new(path));
            }
        }

        which("pandoc")
            .map(Self::new)
            .map_err(|_| PandocError::NotFound)
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// First line of `pandoc --version`
    pub fn version(&self) -> Result<String> {
        let output = self.command().arg("--version").output().map_err(|source| {
            PandocError::Launch {
                program: self.program.clone(),
                source,
            }
        })?;

        if !output.status.success() {
            return Err(failure(&output));
        }

        let stdout = String::from_utf8(output.stdout)?;
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.extra_args);
        cmd.stdin(Stdio::null());
        cmd
    }

    /// Write the source to a temporary file removed when the guard drops
    fn input_file(&self, source: &str, from: &Format) -> Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("mdtree-")
            .suffix(&format!(".{}", from.extension()))
            .tempfile()
            .map_err(PandocError::TempFile)?;
        file.write_all(source.as_bytes())
            .and_then(|()| file.flush())
            .map_err(PandocError::TempFile)?;
        Ok(file)
    }
}

impl Converter for Pandoc {
    fn convert(&self, source: &str, from: &Format, to: &Format) -> Result<String> {
        let input = self.input_file(source, from)?;

        debug!(
            "running {} --from={} --to={} {}",
            self.program.display(),
            from,
            to,
            input.path().display()
        );

        let output = self
            .command()
            .arg(format!("--from={from}"))
            .arg(format!("--to={to}"))
            .arg(input.path())
            .output()
            .map_err(|source| PandocError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(failure(&output));
        }

        if !output.stderr.is_empty() {
            warn!(
                "pandoc reported while converting {from} to {to}: {}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }

        let stdout = String::from_utf8(output.stdout)?;
        if to.is_tree() {
            serde_json::from_str::<serde::de::IgnoredAny>(&stdout).map_err(PandocError::Format)?;
        }
        Ok(stdout)
    }
}

fn failure(output: &std::process::Output) -> PandocError {
    PandocError::ConversionFailure {
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
    }
}
