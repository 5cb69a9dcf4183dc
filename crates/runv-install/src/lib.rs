//! Install and uninstall lifecycle.
//!
//! Installing a version runs, in order: preflight (name, prefix, existing
//! install policy), `before` hooks, the external [`Builder`], link and rehash
//! on success or rollback on failure, then `after` hooks. The builder's exit
//! status is the result; a failed build is data, not an error.
//!
//! Rollback only ever deletes a prefix the attempt created. It runs on a
//! failed build, on an error return, and on Ctrl-C.

pub use builder::{BuildOptions, BuildRequest, Builder, CommandBuilder, DEFINITION_NOT_FOUND};
pub use coordinator::{InstallCoordinator, InstallOptions, InstallOutcome, UninstallOutcome};
pub use error::{Error, HookError, Result};
pub use hooks::{Hook, HookContext, HookEvent, HookRegistry, HookStep, hook_files};
pub use prompt::Confirm;
pub use rollback::RollbackGuard;
pub use suggest::suggest;

mod builder;
mod coordinator;
mod error;
mod hooks;
mod prompt;
mod rollback;
mod suggest;
