use super::Session;
use crate::cli::{App, InstallArgs, UninstallArgs};
use crate::prompt::TermPrompt;
use anyhow::Result;
use clap::CommandFactory;
use clap::error::ErrorKind;
use runv_core::VersionResolver;
use runv_install::{
    Builder, CommandBuilder, DEFINITION_NOT_FOUND, HookEvent, HookRegistry, InstallCoordinator, InstallOptions,
    InstallOutcome, UninstallOutcome,
};
use std::io::Write;

pub fn install(session: &Session, args: InstallArgs) -> Result<i32> {
    let builder = CommandBuilder::from_config(&session.config);

    if args.list {
        let definitions = builder.definitions()?;
        print_definitions(&mut std::io::stdout().lock(), &definitions)?;
        return Ok(0);
    }

    let definition = match args.definition {
        Some(definition) => definition,
        None => match local_version(session)? {
            Some(version) => version,
            None => {
                App::command()
                    .error(ErrorKind::MissingRequiredArgument, "no definition given and no local version is set")
                    .print()?;
                return Ok(1);
            }
        },
    };

    let options = InstallOptions {
        force: args.force,
        skip_existing: args.skip_existing,
        keep: args.keep,
        verbose: args.verbose,
        patch: args.patch,
        debug: args.debug,
        version_name: args.as_name,
    };

    let hooks = HookRegistry::discover(&session.config, HookEvent::Install)?;
    let shims = session.shims();
    let prompt = TermPrompt::new();
    let coordinator = InstallCoordinator::new(&session.config, &session.store, &shims, &builder, &prompt);

    let outcome = coordinator.install(&definition, &options, &hooks)?;
    match &outcome {
        InstallOutcome::Installed { version, prefix } => {
            tracing::info!("installed {version} to {}", prefix.display());
        }
        InstallOutcome::Skipped { version, .. } => tracing::debug!("{version} already installed"),
        InstallOutcome::Declined { .. } => {}
        InstallOutcome::Failed { status, suggestions, .. } => {
            if *status == DEFINITION_NOT_FOUND {
                print_suggestions(&mut std::io::stderr().lock(), &definition, suggestions)?;
            }
        }
    }
    Ok(outcome.exit_code())
}

pub fn uninstall(session: &Session, args: UninstallArgs) -> Result<i32> {
    let hooks = HookRegistry::discover(&session.config, HookEvent::Uninstall)?;
    let builder = CommandBuilder::from_config(&session.config);
    let shims = session.shims();
    let prompt = TermPrompt::new();
    let coordinator = InstallCoordinator::new(&session.config, &session.store, &shims, &builder, &prompt);

    Ok(match coordinator.uninstall(&args.version, args.force, &hooks)? {
        UninstallOutcome::Removed { version, .. } => {
            tracing::info!("uninstalled {version}");
            0
        }
        UninstallOutcome::Absent { .. } => 0,
        UninstallOutcome::Declined { .. } => 1,
    })
}

/// First version named by the nearest local marker.
fn local_version(session: &Session) -> Result<Option<String>> {
    let request = VersionResolver::new(&session.config).local()?;
    Ok(request.and_then(|r| r.versions.into_iter().next()).map(|v| v.into_string()))
}

fn print_definitions(out: &mut impl Write, definitions: &[String]) -> std::io::Result<()> {
    writeln!(out, "Available versions:")?;
    for definition in definitions {
        writeln!(out, "  {definition}")?;
    }
    Ok(())
}

fn print_suggestions(out: &mut impl Write, definition: &str, suggestions: &[String]) -> std::io::Result<()> {
    let query = runv_version::derive_version_name(definition).map(|v| v.into_string()).unwrap_or_else(|_| definition.to_string());
    if !suggestions.is_empty() {
        writeln!(out)?;
        writeln!(out, "The following versions contain `{query}' in the name:")?;
        for suggestion in suggestions {
            writeln!(out, "  {suggestion}")?;
        }
    }
    writeln!(out)?;
    writeln!(out, "See all available versions with `runv install --list'.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_definitions_are_indented() {
        let out = render(|w| print_definitions(w, &["3.11.7".into(), "3.12.1".into()]));
        assert_eq!(out, "Available versions:\n  3.11.7\n  3.12.1\n");
    }

    #[test]
    fn test_suggestions_name_the_query() {
        let out = render(|w| print_suggestions(w, "defs/3.12", &["3.12.0".into(), "3.12.1".into()]));
        assert!(out.contains("contain `3.12' in the name:\n  3.12.0\n  3.12.1\n"));
        assert!(out.ends_with("`runv install --list'.\n"));
    }

    #[test]
    fn test_no_suggestions_still_points_at_list() {
        let out = render(|w| print_suggestions(w, "9.9", &[]));
        assert_eq!(out, "\nSee all available versions with `runv install --list'.\n");
    }
}
