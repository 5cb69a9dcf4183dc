use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Clone, Debug, Parser)]
#[command(name = "runv", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Install a version from a build definition
    #[command(name = "install")]
    Install(InstallArgs),
    /// Remove an installed version
    #[command(name = "uninstall")]
    Uninstall(UninstallArgs),

    /// Show or set the global version(s)
    #[command(name = "global")]
    Global {
        versions: Vec<String>,
    },
    /// Show or set the version(s) for the current directory
    #[command(name = "local")]
    Local {
        versions: Vec<String>,
        /// Remove the local version file
        #[arg(long, conflicts_with = "versions")]
        unset: bool,
    },
    /// Show the current version(s) and where they were set
    #[command(name = "version")]
    Version,
    /// Show the current version name(s)
    #[command(name = "version-name")]
    VersionName,
    /// List installed versions
    #[command(name = "versions")]
    Versions {
        /// Names only, without markers or `system`
        #[arg(long)]
        bare: bool,
    },
    /// Show the install prefix of a version
    #[command(name = "prefix")]
    Prefix {
        versions: Vec<String>,
    },
    /// Show the runv root directory
    #[command(name = "root")]
    Root,

    /// Show the full path of the executable a shim would run
    #[command(name = "which")]
    Which {
        command: String,
    },
    /// List installed versions providing a command
    #[command(name = "whence")]
    Whence {
        /// Print executable paths instead of version names
        #[arg(long)]
        path: bool,
        command: String,
    },
    /// Run a command under the selected version
    ///
    /// Everything after the command is passed through untouched, including
    /// `--help` and `--version`.
    #[command(name = "exec", disable_help_flag = true, disable_version_flag = true)]
    Exec {
        command: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Regenerate shims for every installed executable
    #[command(name = "rehash")]
    Rehash,
    /// List existing shims
    #[command(name = "shims")]
    Shims {
        /// Names only
        #[arg(long)]
        short: bool,
    },

    /// Print a shell completion script
    #[command(name = "completions")]
    Completions {
        shell: Shell,
    },
}

#[derive(Args, Clone, Debug, Default)]
pub struct InstallArgs {
    /// Definition name or path; defaults to the local version
    pub definition: Option<String>,
    /// List available definitions
    #[arg(short, long, conflicts_with = "definition")]
    pub list: bool,
    /// Install even if the version appears to be installed already
    #[arg(short, long, conflicts_with = "skip_existing")]
    pub force: bool,
    /// Skip if the version appears to be installed already
    #[arg(short, long)]
    pub skip_existing: bool,
    /// Keep the build tree after installing
    #[arg(short, long)]
    pub keep: bool,
    /// Show builder output
    #[arg(short, long)]
    pub verbose: bool,
    /// Apply a patch from stdin before building
    #[arg(short, long)]
    pub patch: bool,
    /// Debug build; installs as `<name>-debug`
    #[arg(short = 'g', long)]
    pub debug: bool,
    /// Install under this version name
    #[arg(long = "as", value_name = "NAME")]
    pub as_name: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct UninstallArgs {
    /// Do not ask; succeed quietly if the version is not installed
    #[arg(short, long)]
    pub force: bool,
    #[arg(id = "version_arg", value_name = "VERSION")]
    pub version: String,
}
