use super::Session;
use crate::cli::App;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};

pub fn rehash(session: &Session) -> Result<i32> {
    let report = session.shims().rehash()?;
    if !report.removed.is_empty() {
        tracing::debug!("removed stale shims: {}", report.removed.join(", "));
    }
    Ok(0)
}

pub fn list(session: &Session, short: bool) -> Result<i32> {
    let shims = session.shims();
    for name in shims.list()? {
        if short {
            println!("{name}");
        } else {
            println!("{}", shims.shims_dir().join(name).display());
        }
    }
    Ok(0)
}

pub fn completions(shell: Shell) -> Result<i32> {
    let mut cmd = App::command();
    generate(shell, &mut cmd, "runv", &mut std::io::stdout());
    Ok(0)
}
