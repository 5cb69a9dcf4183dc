//! Commands that read or change which version is selected.

use super::Session;
use anyhow::{Result, bail};
use runv_core::{VersionName, VersionOrigin, VersionRequest, VersionResolver, write_global, write_local};
use std::io::Write;

pub fn global(session: &Session, versions: &[String]) -> Result<i32> {
    if versions.is_empty() {
        let request = VersionResolver::new(&session.config).global()?.unwrap_or_else(VersionRequest::system);
        print_names(&mut std::io::stdout().lock(), &request)?;
        return Ok(0);
    }
    let names = installed_names(session, versions)?;
    write_global(&session.config, &names)?;
    tracing::debug!("global version set in {}", session.config.global_marker().display());
    Ok(0)
}

pub fn local(session: &Session, versions: &[String], unset: bool) -> Result<i32> {
    let dir = &session.config.dir;
    if unset {
        if !runv_core::unset_local(dir)? {
            tracing::debug!("no local version file in {}", dir.display());
        }
        return Ok(0);
    }
    if versions.is_empty() {
        let Some(request) = VersionResolver::new(&session.config).local()? else {
            return Err(runv_core::Error::NoLocalVersion.into());
        };
        print_names(&mut std::io::stdout().lock(), &request)?;
        return Ok(0);
    }
    let names = installed_names(session, versions)?;
    write_local(dir, &names)?;
    Ok(0)
}

pub fn version(session: &Session) -> Result<i32> {
    let request = VersionResolver::new(&session.config).resolve()?;
    let mut out = std::io::stdout().lock();
    let mut missing = 0;
    for version in &request.versions {
        if version.is_system() || session.store.exists(version) {
            writeln!(out, "{version} ({})", describe(&request.origin))?;
        } else {
            eprintln!("runv: version `{version}' is not installed ({})", describe(&request.origin));
            missing += 1;
        }
    }
    Ok(if missing > 0 { 1 } else { 0 })
}

pub fn version_name(session: &Session) -> Result<i32> {
    let request = VersionResolver::new(&session.config).resolve()?;
    for version in &request.versions {
        session.store.require(version)?;
    }
    println!("{}", request.names().collect::<Vec<_>>().join(":"));
    Ok(0)
}

pub fn versions(session: &Session, bare: bool) -> Result<i32> {
    let installed = session.store.list()?;
    let mut out = std::io::stdout().lock();
    if bare {
        for version in &installed {
            writeln!(out, "{version}")?;
        }
        return Ok(0);
    }
    let request = VersionResolver::new(&session.config).resolve()?;
    print_versions(&mut out, &installed, &request)?;
    Ok(0)
}

pub fn prefix(session: &Session, versions: &[String]) -> Result<i32> {
    let names = if versions.is_empty() {
        VersionResolver::new(&session.config).resolve()?.versions
    } else {
        parse_names(versions)?
    };
    let mut prefixes = Vec::with_capacity(names.len());
    for name in &names {
        if name.is_system() {
            bail!("the system version is not managed by runv and has no prefix");
        }
        session.store.require(name)?;
        prefixes.push(session.store.prefix_for(name).display().to_string());
    }
    println!("{}", prefixes.join(":"));
    Ok(0)
}

pub fn root(session: &Session) -> Result<i32> {
    println!("{}", session.config.root.display());
    Ok(0)
}

fn parse_names(versions: &[String]) -> Result<Vec<VersionName>> {
    Ok(versions.iter().map(|v| VersionName::new(v.as_str())).collect::<Result<_, _>>()?)
}

/// Parse and check that each version is installed (`system` always is).
fn installed_names(session: &Session, versions: &[String]) -> Result<Vec<VersionName>> {
    let names = parse_names(versions)?;
    for name in &names {
        session.store.require(name)?;
    }
    Ok(names)
}

fn describe(origin: &VersionOrigin) -> String {
    match origin {
        VersionOrigin::Default => "no version file found, using the default".to_string(),
        origin => format!("set by {origin}"),
    }
}

fn print_names(out: &mut impl Write, request: &VersionRequest) -> std::io::Result<()> {
    for name in request.names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

/// `system` first, then installed versions; selected ones are starred.
fn print_versions(out: &mut impl Write, installed: &[VersionName], request: &VersionRequest) -> std::io::Result<()> {
    let system = VersionName::system();
    for version in std::iter::once(&system).chain(installed) {
        if request.versions.contains(version) {
            writeln!(out, "* {version} ({})", describe(&request.origin))?;
        } else {
            writeln!(out, "  {version}")?;
        }
    }
    Ok(())
}
