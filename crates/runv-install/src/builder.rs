use crate::error::{Error, Result};
use runv_platform::env::{PathModifier, find_executable};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

/// Builder exit status meaning "no such definition".
pub const DEFINITION_NOT_FOUND: i32 = 2;

/// Flags forwarded to the builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub keep: bool,
    pub verbose: bool,
    pub patch: bool,
    pub debug: bool,
}

#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub definition: String,
    pub prefix: PathBuf,
    pub options: BuildOptions,
    /// Added to the builder's inherited environment.
    pub env: BTreeMap<String, String>,
}

/// Fetches and compiles a definition into a prefix.
///
/// A build that fails is reported through the returned status, not `Err`;
/// `Err` is for when the builder could not be run at all.
pub trait Builder {
    fn build(&self, request: &BuildRequest) -> Result<i32>;

    /// Every definition the builder knows about.
    fn definitions(&self) -> Result<Vec<String>>;
}

/// Runs an external builder program.
///
/// Invoked as `<program> [--keep] [--verbose] [--patch] [--debug]
/// <definition> <prefix>`, or `<program> --definitions` for the list. Stdin
/// is inherited so `--patch` can read a patch from it.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: OsString,
    search_path: OsString,
}

impl CommandBuilder {
    pub fn new(program: impl Into<OsString>, search_path: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            search_path: search_path.into(),
        }
    }

    pub fn from_config(config: &runv_core::Config) -> Self {
        Self::new(config.builder.clone(), config.search_path.clone())
    }

    fn locate(&self) -> Result<PathBuf> {
        let program = PathBuf::from(&self.program);
        if program.components().count() > 1 {
            return Ok(program);
        }
        let search = PathModifier::from_os(&self.search_path);
        find_executable(&self.program.to_string_lossy(), &search).map_err(|e| {
            self.spawn_error(std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))
        })
    }

    fn spawn_error(&self, source: std::io::Error) -> Error {
        Error::Builder {
            program: self.program.to_string_lossy().into_owned(),
            source,
        }
    }
}

impl Builder for CommandBuilder {
    fn build(&self, request: &BuildRequest) -> Result<i32> {
        let mut cmd = Command::new(self.locate()?);
        let flags = [
            (request.options.keep, "--keep"),
            (request.options.verbose, "--verbose"),
            (request.options.patch, "--patch"),
            (request.options.debug, "--debug"),
        ];
        for (_, flag) in flags.iter().filter(|(on, _)| *on) {
            cmd.arg(flag);
        }
        cmd.arg(&request.definition)
            .arg(&request.prefix)
            .envs(&request.env)
            .stdin(Stdio::inherit());

        tracing::debug!("running builder: {cmd:?}");
        let status = cmd.status().map_err(|e| self.spawn_error(e))?;
        Ok(exit_code(status))
    }

    fn definitions(&self) -> Result<Vec<String>> {
        let output = Command::new(self.locate()?)
            .arg("--definitions")
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| self.spawn_error(e))?;
        if !output.status.success() {
            return Err(self.spawn_error(std::io::Error::other(format!(
                "--definitions exited with status {}",
                exit_code(output.status)
            ))));
        }
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect())
    }
}

/// Exit code as a shell would report it; signals map to `128 + signo`.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
