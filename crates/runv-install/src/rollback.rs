//! Prefix rollback on failure and on Ctrl-C.

use once_cell::sync::{Lazy, OnceCell};
use runv_fs::CleanupGuard;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Exit status after an interrupted install, as a shell reports SIGINT.
const INTERRUPTED: i32 = 130;

static PENDING: Lazy<Mutex<Vec<PathBuf>>> = Lazy::new(|| Mutex::new(Vec::new()));
static HANDLER: OnceCell<()> = OnceCell::new();

fn pending() -> MutexGuard<'static, Vec<PathBuf>> {
    PENDING.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn install_handler() {
    HANDLER.get_or_init(|| {
        if let Err(e) = ctrlc::set_handler(on_interrupt) {
            tracing::warn!("cannot install interrupt handler, Ctrl-C will not roll back: {e}");
        }
    });
}

fn on_interrupt() {
    let paths = std::mem::take(&mut *pending());
    for path in paths {
        match std::fs::remove_dir_all(&path) {
            Ok(()) => eprintln!("runv: interrupted, removed {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => eprintln!("runv: interrupted, could not remove {}: {e}", path.display()),
        }
    }
    std::process::exit(INTERRUPTED);
}

/// Owns the rollback of one install prefix.
///
/// A prefix that existed before the attempt is never touched. Otherwise:
/// dropping the guard without [`commit`](Self::commit) removes the prefix,
/// and until the guard is dropped a Ctrl-C removes it too, even after a
/// commit.
#[derive(Debug)]
pub struct RollbackGuard {
    cleanup: CleanupGuard,
    registered: bool,
}

impl RollbackGuard {
    pub fn new(prefix: &Path, prefix_existed: bool) -> Self {
        if prefix_existed {
            return Self {
                cleanup: CleanupGuard::inert(prefix),
                registered: false,
            };
        }
        install_handler();
        pending().push(prefix.to_path_buf());
        Self {
            cleanup: CleanupGuard::new(prefix),
            registered: true,
        }
    }

    pub fn prefix(&self) -> &Path { self.cleanup.path() }

    /// Whether an error return or drop would remove the prefix.
    pub fn is_armed(&self) -> bool { self.cleanup.is_armed() }

    /// The build succeeded; keep the prefix on ordinary errors from here on.
    pub fn commit(&mut self) { self.cleanup.disarm() }

    /// Remove the prefix now.
    pub fn rollback(&mut self) -> runv_fs::Result<()> {
        if self.cleanup.is_armed() {
            tracing::info!("removing partial install at {}", self.prefix().display());
        }
        self.cleanup.cleanup()
    }
}

impl Drop for RollbackGuard {
    fn drop(&mut self) {
        if self.registered {
            let prefix = self.cleanup.path().to_path_buf();
            let mut pending = pending();
            if let Some(pos) = pending.iter().rposition(|p| *p == prefix) {
                pending.remove(pos);
            }
        }
    }
}
