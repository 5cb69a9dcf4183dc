//! Shim dispatch from the command line.

use super::Session;
use anyhow::{Context, Result};
use runv_shim::{Dispatch, Dispatcher};

/// Shell convention for "command not found".
const NOT_FOUND: i32 = 127;

pub fn which(session: &Session, command: &str) -> Result<i32> {
    match locate(session, command)? {
        Some(dispatch) => {
            println!("{}", dispatch.path.display());
            Ok(0)
        }
        None => Ok(NOT_FOUND),
    }
}

pub fn whence(session: &Session, command: &str, path: bool) -> Result<i32> {
    let mut found = false;
    for version in session.store.list()? {
        let Some(exe) = session.store.command_path(&version, command) else {
            continue;
        };
        found = true;
        if path {
            println!("{}", exe.display());
        } else {
            println!("{version}");
        }
    }
    Ok(if found { 0 } else { 1 })
}

pub fn exec(session: &Session, command: &str, args: &[String]) -> Result<i32> {
    let Some(dispatch) = locate(session, command)? else {
        return Ok(NOT_FOUND);
    };
    let path = dispatch.path.clone();
    let mut child = dispatch.into_command(args);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let err = child.exec();
        Err(err).with_context(|| format!("failed to exec {}", path.display()))
    }

    #[cfg(not(unix))]
    {
        let status = child.status().with_context(|| format!("failed to run {}", path.display()))?;
        Ok(status.code().unwrap_or(1))
    }
}

/// `None` after reporting a command no selected version provides.
fn locate(session: &Session, command: &str) -> Result<Option<Dispatch>> {
    match Dispatcher::new(&session.config, &session.store).locate(command) {
        Ok(dispatch) => Ok(Some(dispatch)),
        Err(err) => {
            let runv_shim::Error::NotFound { command, providers, .. } = &err else {
                return Err(err.into());
            };
            eprintln!("runv: {err}");
            if !providers.is_empty() {
                eprintln!();
                eprintln!("The `{command}' command exists in these versions:");
                for version in providers {
                    eprintln!("  {version}");
                }
            }
            Ok(None)
        }
    }
}
