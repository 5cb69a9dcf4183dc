use crate::builder::{BuildOptions, BuildRequest, Builder, DEFINITION_NOT_FOUND};
use crate::error::{Error, Result};
use crate::hooks::{HookContext, HookEvent, HookRegistry};
use crate::prompt::Confirm;
use crate::rollback::RollbackGuard;
use crate::suggest::suggest;
use runv_core::{Config, VersionName, VersionResolver, VersionStore};
use runv_fs::{list_dir_names, make_executable, remove_dir_all_if_exists};
use runv_shim::ShimManager;
use runv_version::derive_version_name;
use std::path::PathBuf;

const DEBUG_SUFFIX: &str = "-debug";

#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Reinstall over an existing version without asking.
    pub force: bool,
    /// Do nothing if the version is already installed.
    pub skip_existing: bool,
    /// Keep the build tree.
    pub keep: bool,
    pub verbose: bool,
    /// Let the builder read a patch from stdin.
    pub patch: bool,
    /// Debug build; the derived version name gets a `-debug` suffix.
    pub debug: bool,
    /// Install under this name instead of one derived from the definition.
    pub version_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed { version: VersionName, prefix: PathBuf },
    /// Already installed and `skip_existing` was set.
    Skipped { version: VersionName, prefix: PathBuf },
    /// Already installed and the user said no.
    Declined { version: VersionName, prefix: PathBuf },
    /// The builder exited non-zero. For [`DEFINITION_NOT_FOUND`],
    /// `suggestions` lists definitions that look like the one asked for.
    Failed {
        version: VersionName,
        status: i32,
        suggestions: Vec<String>,
    },
}

impl InstallOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            InstallOutcome::Installed { .. } | InstallOutcome::Skipped { .. } => 0,
            InstallOutcome::Declined { .. } => 1,
            InstallOutcome::Failed { status, .. } => *status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallOutcome {
    Removed { version: VersionName, prefix: PathBuf },
    /// Not installed, and `force` made that a no-op.
    Absent { version: VersionName },
    Declined { version: VersionName },
}

/// Drives installs and uninstalls.
///
/// Install: preflight, `before` hooks, build, then link and rehash on
/// success or rollback on failure, then `after` hooks (which always run once
/// the build has been attempted). Uninstall: confirm, `before` hooks, delete,
/// rehash, `after` hooks. A hook failure aborts the session; during install
/// that also rolls back a prefix the session created.
///
/// Two concurrent installs of the same version are not coordinated.
pub struct InstallCoordinator<'a> {
    config: &'a Config,
    store: &'a VersionStore,
    shims: &'a ShimManager<'a>,
    builder: &'a dyn Builder,
    confirm: &'a dyn Confirm,
}

impl<'a> InstallCoordinator<'a> {
    pub fn new(
        config: &'a Config,
        store: &'a VersionStore,
        shims: &'a ShimManager<'a>,
        builder: &'a dyn Builder,
        confirm: &'a dyn Confirm,
    ) -> Self {
        Self {
            config,
            store,
            shims,
            builder,
            confirm,
        }
    }

    pub fn definitions(&self) -> Result<Vec<String>> { self.builder.definitions() }

    /// Name the install of `definition` will live under.
    pub fn version_name(&self, definition: &str, options: &InstallOptions) -> Result<VersionName> {
        if let Some(name) = &options.version_name {
            return Ok(VersionName::new(name.as_str())?);
        }
        let name = derive_version_name(definition)?;
        if options.debug {
            return Ok(VersionName::new(format!("{name}{DEBUG_SUFFIX}"))?);
        }
        Ok(name)
    }

    pub fn install(&self, definition: &str, options: &InstallOptions, hooks: &HookRegistry) -> Result<InstallOutcome> {
        // Preflight.
        let version = self.version_name(definition, options)?;
        let prefix = self.store.prefix_for(&version);
        let prefix_existed = prefix.exists();

        if self.store.bin_root(&version).is_dir() {
            if options.skip_existing {
                tracing::info!("{version} is already installed, skipping");
                return Ok(InstallOutcome::Skipped { version, prefix });
            }
            if !options.force {
                let question = format!("{} already exists\ncontinue with installation?", prefix.display());
                if !self.confirm.confirm(&question) {
                    return Ok(InstallOutcome::Declined { version, prefix });
                }
            }
        }

        let mut ctx = HookContext::new(HookEvent::Install, version.as_str(), &prefix, &self.config.root);
        let mut build_options = BuildOptions {
            keep: options.keep,
            verbose: options.verbose,
            patch: options.patch,
            debug: options.debug,
        };
        self.prepare_build_env(&version, &mut ctx, &mut build_options)?;

        let mut guard = RollbackGuard::new(&prefix, prefix_existed);

        hooks.run_before(&mut ctx)?;

        let request = BuildRequest {
            definition: definition.to_string(),
            prefix: prefix.clone(),
            options: build_options,
            env: ctx.env.clone(),
        };
        tracing::info!("installing {definition} into {}", prefix.display());
        let status = self.builder.build(&request)?;

        let finished = if status == 0 {
            guard.commit();
            self.link_and_rehash(&version)
        } else {
            tracing::debug!("builder exited with status {status}");
            guard.rollback().map_err(Error::from)
        };

        // After hooks see the build status even if linking failed.
        ctx.status = Some(status);
        let after = hooks.run_after(&mut ctx);
        drop(guard);
        finished?;
        after?;

        if status == 0 {
            return Ok(InstallOutcome::Installed { version, prefix });
        }
        let suggestions = if status == DEFINITION_NOT_FOUND {
            self.suggestions(definition)
        } else {
            Vec::new()
        };
        Ok(InstallOutcome::Failed {
            version,
            status,
            suggestions,
        })
    }

    pub fn uninstall(&self, specifier: &str, force: bool, hooks: &HookRegistry) -> Result<UninstallOutcome> {
        let version = derive_version_name(specifier)?;
        let prefix = self.store.prefix_for(&version);

        if !self.store.exists(&version) {
            if force {
                return Ok(UninstallOutcome::Absent { version });
            }
            return Err(Error::NotInstalled(version.into_string()));
        }
        if !force && !self.confirm.confirm(&format!("remove {}?", prefix.display())) {
            return Ok(UninstallOutcome::Declined { version });
        }

        let mut ctx = HookContext::new(HookEvent::Uninstall, version.as_str(), &prefix, &self.config.root);
        hooks.run_before(&mut ctx)?;

        remove_dir_all_if_exists(&prefix)?;
        tracing::info!("removed {}", prefix.display());
        self.shims.rehash()?;

        hooks.run_after(&mut ctx)?;
        Ok(UninstallOutcome::Removed { version, prefix })
    }

    /// Session variables the builder needs besides the request itself.
    fn prepare_build_env(
        &self,
        version: &VersionName,
        ctx: &mut HookContext,
        options: &mut BuildOptions,
    ) -> Result<()> {
        if let Some(build_root) = &self.config.build_root {
            options.keep = true;
            let build_path = build_root.join(version.as_str());
            ctx.env.insert("RUNV_BUILD_BUILD_PATH".into(), build_path.display().to_string());
        }
        if let Some(cache) = &self.config.cache_path {
            ctx.env.insert("RUNV_BUILD_CACHE_PATH".into(), cache.display().to_string());
        }
        // Builds run against the global selection, not whatever the
        // current directory pins.
        if self.config.version_override.is_none() {
            let global = VersionResolver::new(self.config)
                .global()?
                .map(|r| r.names().collect::<Vec<_>>().join(":"))
                .unwrap_or_else(|| runv_core::SYSTEM.to_string());
            ctx.env.insert("RUNV_VERSION".into(), global);
        }
        Ok(())
    }

    fn link_and_rehash(&self, version: &VersionName) -> Result<()> {
        let bin = self.store.bin_root(version);
        std::fs::create_dir_all(&bin).map_err(|source| Error::Io {
            action: "failed to create",
            path: bin.clone(),
            source,
        })?;
        for name in list_dir_names(&bin)? {
            let path = bin.join(name);
            if path.is_file() {
                make_executable(&path)?;
            }
        }
        let report = self.shims.rehash()?;
        tracing::debug!("rehash: {} shim(s), {} removed", report.shims.len(), report.removed.len());
        Ok(())
    }

    fn suggestions(&self, definition: &str) -> Vec<String> {
        let Ok(query) = derive_version_name(definition) else {
            return Vec::new();
        };
        match self.builder.definitions() {
            Ok(definitions) => suggest(&definitions, query.as_str()).into_iter().map(str::to_owned).collect(),
            Err(e) => {
                tracing::debug!("no suggestions: {e}");
                Vec::new()
            }
        }
    }
}
