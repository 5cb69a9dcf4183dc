//! Install and uninstall hooks.
//!
//! Hooks come from two places. Files discovered on disk hold declarative
//! steps (`[[before]]` and `[[after]]` tables in TOML); programs embedding
//! the library can also register [`Hook`] objects directly. Discovered hooks
//! run first, in discovery order, then registered ones.
//!
//! ```toml
//! [[before]]
//! action = "env"
//! name = "CONFIGURE_OPTS"
//! value = "--enable-shared"
//!
//! [[after]]
//! action = "run"
//! command = "echo installed $RUNV_VERSION_NAME"
//! ```

use crate::error::{Error, HookError, Result};
use runv_core::Config;
use runv_fs::list_dir_names;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

const HOOK_EXTENSION: &str = "toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    Install,
    Uninstall,
}

impl HookEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            HookEvent::Install => "install",
            HookEvent::Uninstall => "uninstall",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// State shared by every hook of one install or uninstall session.
///
/// `env` is both what hooks see and what they may extend: variables set by a
/// `before` hook are passed on to the builder and to later hooks.
#[derive(Debug, Clone)]
pub struct HookContext {
    pub event: HookEvent,
    pub version_name: String,
    pub prefix: PathBuf,
    pub env: BTreeMap<String, String>,
    /// Builder exit status; only set while `after` hooks run.
    pub status: Option<i32>,
}

impl HookContext {
    pub fn new(event: HookEvent, version_name: &str, prefix: &Path, root: &Path) -> Self {
        let mut env = BTreeMap::new();
        env.insert("RUNV_VERSION_NAME".to_string(), version_name.to_string());
        env.insert("RUNV_PREFIX".to_string(), prefix.display().to_string());
        env.insert("RUNV_ROOT".to_string(), root.display().to_string());
        Self {
            event,
            version_name: version_name.to_string(),
            prefix: prefix.to_path_buf(),
            env,
            status: None,
        }
    }

    /// Everything a spawned hook command receives on top of the inherited
    /// environment.
    pub fn command_env(&self) -> impl Iterator<Item = (String, String)> + '_ {
        let status = self.status.map(|s| ("RUNV_STATUS".to_string(), s.to_string()));
        self.env.iter().map(|(k, v)| (k.clone(), v.clone())).chain(status)
    }
}

/// A hook object. Both methods default to doing nothing.
pub trait Hook {
    /// Name used in logs and error messages.
    fn name(&self) -> String;

    fn before(&self, _ctx: &mut HookContext) -> std::result::Result<(), HookError> { Ok(()) }

    fn after(&self, _ctx: &mut HookContext) -> std::result::Result<(), HookError> { Ok(()) }
}

/// One declarative step from a hook file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum HookStep {
    /// Set a variable for the builder and later hooks.
    Env { name: String, value: String },
    /// Run a shell command; a non-zero exit aborts the session.
    Run { command: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HookFile {
    #[serde(default)]
    before: Vec<HookStep>,
    #[serde(default)]
    after: Vec<HookStep>,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Before,
    After,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Before => "before",
            Phase::After => "after",
        })
    }
}

struct StepHook {
    source: PathBuf,
    phase: Phase,
    index: usize,
    step: HookStep,
}

impl StepHook {
    fn apply(&self, ctx: &mut HookContext) -> std::result::Result<(), HookError> {
        match &self.step {
            HookStep::Env { name, value } => {
                tracing::debug!("{}: {name}={value}", self.name());
                ctx.env.insert(name.clone(), value.clone());
                Ok(())
            }
            HookStep::Run { command } => {
                tracing::debug!("{}: running `{command}`", self.name());
                let status = shell(command)
                    .envs(ctx.command_env())
                    .status()
                    .map_err(|source| HookError::Spawn { hook: self.name(), source })?;
                if status.success() {
                    Ok(())
                } else {
                    Err(HookError::Failed {
                        hook: self.name(),
                        status: status.code().unwrap_or(1),
                    })
                }
            }
        }
    }
}

impl Hook for StepHook {
    fn name(&self) -> String { format!("{}:{}[{}]", self.source.display(), self.phase, self.index) }

    fn before(&self, ctx: &mut HookContext) -> std::result::Result<(), HookError> {
        match self.phase {
            Phase::Before => self.apply(ctx),
            Phase::After => Ok(()),
        }
    }

    fn after(&self, ctx: &mut HookContext) -> std::result::Result<(), HookError> {
        match self.phase {
            Phase::Before => Ok(()),
            Phase::After => self.apply(ctx),
        }
    }
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Ordered `before` and `after` hooks for one event.
#[derive(Default)]
pub struct HookRegistry {
    before: Vec<Box<dyn Hook>>,
    after: Vec<Box<dyn Hook>>,
}

impl HookRegistry {
    pub fn new() -> Self { Self::default() }

    /// Load every hook file for `event`; see [`hook_files`] for the order.
    pub fn discover(config: &Config, event: HookEvent) -> Result<Self> {
        let mut registry = Self::new();
        for path in hook_files(config, event)? {
            let text = std::fs::read_to_string(&path).map_err(|source| Error::Io {
                action: "failed to read hook file",
                path: path.clone(),
                source,
            })?;
            let file: HookFile = toml::from_str(&text).map_err(|source| Error::HookFile {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(
                "loaded {} {event} hook(s) from {}",
                file.before.len() + file.after.len(),
                path.display()
            );
            for (index, step) in file.before.into_iter().enumerate() {
                registry.before.push(Box::new(StepHook { source: path.clone(), phase: Phase::Before, index, step }));
            }
            for (index, step) in file.after.into_iter().enumerate() {
                registry.after.push(Box::new(StepHook { source: path.clone(), phase: Phase::After, index, step }));
            }
        }
        Ok(registry)
    }

    /// Register a hook object for both phases.
    pub fn register<H: Hook + Clone + 'static>(&mut self, hook: H) -> &mut Self {
        self.before.push(Box::new(hook.clone()));
        self.after.push(Box::new(hook));
        self
    }

    pub fn register_before<H: Hook + 'static>(&mut self, hook: H) -> &mut Self {
        self.before.push(Box::new(hook));
        self
    }

    pub fn register_after<H: Hook + 'static>(&mut self, hook: H) -> &mut Self {
        self.after.push(Box::new(hook));
        self
    }

    pub fn is_empty(&self) -> bool { self.before.is_empty() && self.after.is_empty() }

    /// Run `before` hooks in order; the first failure stops the rest.
    pub fn run_before(&self, ctx: &mut HookContext) -> Result<()> {
        for hook in &self.before {
            tracing::trace!("before {} hook {}", ctx.event, hook.name());
            hook.before(ctx)?;
        }
        Ok(())
    }

    /// Run `after` hooks in order; the first failure stops the rest.
    pub fn run_after(&self, ctx: &mut HookContext) -> Result<()> {
        for hook in &self.after {
            tracing::trace!("after {} hook {}", ctx.event, hook.name());
            hook.after(ctx)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |hooks: &[Box<dyn Hook>]| hooks.iter().map(|h| h.name()).collect::<Vec<_>>();
        f.debug_struct("HookRegistry")
            .field("before", &names(&self.before))
            .field("after", &names(&self.after))
            .finish()
    }
}

/// Hook files for `event`, in run order.
///
/// Roots are `RUNV_HOOK_PATH` entries in order, then
/// `<root>/plugins/<plugin>/etc/runv.d` for each plugin by name. Within a
/// root, `<event>.toml` and `<event>/*.toml` are sorted together by file
/// name. Hidden files and other extensions are ignored.
pub fn hook_files(config: &Config, event: HookEvent) -> Result<Vec<PathBuf>> {
    let mut roots = config.hook_path.clone();
    let plugins = config.plugins_dir();
    let mut names = list_dir_names(&plugins)?;
    names.sort();
    for plugin in names {
        roots.push(plugins.join(plugin).join("etc").join("runv.d"));
    }

    let mut files = Vec::new();
    for root in roots {
        let mut found: Vec<(String, PathBuf)> = Vec::new();

        let single = format!("{}.{HOOK_EXTENSION}", event.as_str());
        let path = root.join(&single);
        if path.is_file() {
            found.push((single, path));
        }

        let dir = root.join(event.as_str());
        for name in list_dir_names(&dir)? {
            let path = dir.join(&name);
            if path.is_file() && Path::new(&name).extension().is_some_and(|e| e == HOOK_EXTENSION) {
                found.push((name, path));
            }
        }

        found.sort();
        files.extend(found.into_iter().map(|(_, path)| path));
    }
    Ok(files)
}
