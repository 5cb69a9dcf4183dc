#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};
use tempfile::{TempDir, tempdir};

const FAKE_BUILDER: &str = r#"#!/bin/sh
if [ "$1" = "--definitions" ]; then
    printf '3.11.7\n3.12.0\n3.12.1\n'
    exit 0
fi
for prefix; do :; done
case "$1" in
    3.11.7|3.12.1)
        mkdir -p "$prefix/bin"
        printf '#!/bin/sh\necho "tool from %s" "$@"\n' "$1" > "$prefix/bin/tool"
        ;;
    slow)
        mkdir -p "$prefix/bin"
        sleep 30
        ;;
    *)
        echo "definition not found: $1" >&2
        exit 2
        ;;
esac
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("work")).unwrap();
        let builder = dir.path().join("fake-build");
        std::fs::write(&builder, FAKE_BUILDER).unwrap();
        std::fs::set_permissions(&builder, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    fn root(&self) -> PathBuf { self.dir.path().join("root") }

    fn work(&self) -> PathBuf { self.dir.path().join("work") }

    fn env(&self, cmd: &mut Command) {
        cmd.env_clear()
            .env("PATH", "/usr/bin:/bin")
            .env("HOME", self.dir.path())
            .env("RUNV_ROOT", self.root())
            .env("RUNV_DIR", self.work())
            .env("RUNV_BUILDER", self.dir.path().join("fake-build"))
            .stdin(Stdio::null());
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_runv"));
        cmd.args(args);
        self.env(&mut cmd);
        cmd
    }

    fn run(&self, args: &[&str]) -> Output { self.command(args).output().unwrap() }

    fn run_with(&self, args: &[&str], key: &str, value: &str) -> Output {
        self.command(args).env(key, value).output().unwrap()
    }
}

fn stdout(output: &Output) -> String { String::from_utf8_lossy(&output.stdout).into_owned() }

fn stderr(output: &Output) -> String { String::from_utf8_lossy(&output.stderr).into_owned() }

fn is_executable(path: &Path) -> bool { std::fs::metadata(path).unwrap().permissions().mode() & 0o111 != 0 }

#[test]
fn test_install_creates_version_and_shims() {
    let fx = Fixture::new();

    let out = fx.run(&["install", "3.12.1"]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));

    assert!(is_executable(&fx.root().join("versions/3.12.1/bin/tool")));
    assert!(fx.root().join("shims/tool").is_file());
    assert_eq!(stdout(&fx.run(&["versions", "--bare"])), "3.12.1\n");
    assert_eq!(stdout(&fx.run(&["shims", "--short"])), "tool\n");
}

#[test]
fn test_unknown_definition_passes_status_and_suggests() {
    let fx = Fixture::new();

    let out = fx.run(&["install", "3.12"]);
    assert_eq!(out.status.code(), Some(2));
    let err = stderr(&out);
    assert!(err.contains("The following versions contain `3.12' in the name:\n  3.12.0\n  3.12.1\n"), "{err}");
    assert!(!fx.root().join("versions/3.12").exists());
}

#[test]
fn test_install_list() {
    let fx = Fixture::new();
    let out = fx.run(&["install", "--list"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "Available versions:\n  3.11.7\n  3.12.0\n  3.12.1\n");
}

#[test]
fn test_reinstall_policies() {
    let fx = Fixture::new();
    assert!(fx.run(&["install", "3.12.1"]).status.success());

    assert_eq!(fx.run(&["install", "-s", "3.12.1"]).status.code(), Some(0));
    // No terminal to answer the prompt: declined.
    assert_eq!(fx.run(&["install", "3.12.1"]).status.code(), Some(1));
    assert_eq!(fx.run(&["install", "-f", "3.12.1"]).status.code(), Some(0));
}

#[test]
fn test_uninstall() {
    let fx = Fixture::new();

    let out = fx.run(&["uninstall", "9.9.9"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("version `9.9.9' not installed"));

    let out = fx.run(&["uninstall", "-f", "9.9.9"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stderr.is_empty());

    assert!(fx.run(&["install", "3.12.1"]).status.success());
    assert_eq!(fx.run(&["uninstall", "-f", "3.12.1"]).status.code(), Some(0));
    assert!(!fx.root().join("versions/3.12.1").exists());
    assert!(!fx.root().join("shims/tool").exists());
}

#[test]
fn test_global_and_local_selection() {
    let fx = Fixture::new();
    assert!(fx.run(&["install", "3.11.7"]).status.success());
    assert!(fx.run(&["install", "3.12.1"]).status.success());

    assert_eq!(stdout(&fx.run(&["global"])), "system\n");
    assert_eq!(fx.run(&["global", "9.9"]).status.code(), Some(1));
    assert!(fx.run(&["global", "3.11.7"]).status.success());
    assert_eq!(stdout(&fx.run(&["global"])), "3.11.7\n");
    assert_eq!(stdout(&fx.run(&["version-name"])), "3.11.7\n");

    assert_eq!(fx.run(&["local"]).status.code(), Some(1));
    assert!(fx.run(&["local", "3.12.1"]).status.success());
    let marker = fx.work().join(".runv-version");
    assert_eq!(
        stdout(&fx.run(&["version"])),
        format!("3.12.1 (set by {})\n", marker.display())
    );
    assert_eq!(stdout(&fx.run_with(&["version-name"], "RUNV_VERSION", "3.11.7")), "3.11.7\n");

    assert!(fx.run(&["local", "--unset"]).status.success());
    assert!(!marker.exists());
}

#[test]
fn test_which_whence_and_exec() {
    let fx = Fixture::new();
    assert!(fx.run(&["install", "3.11.7"]).status.success());
    assert!(fx.run(&["install", "3.12.1"]).status.success());

    let out = fx.run_with(&["which", "tool"], "RUNV_VERSION", "3.12.1");
    assert_eq!(stdout(&out).trim(), fx.root().join("versions/3.12.1/bin/tool").display().to_string());

    assert_eq!(stdout(&fx.run(&["whence", "tool"])), "3.11.7\n3.12.1\n");
    assert_eq!(fx.run(&["whence", "nothing"]).status.code(), Some(1));

    let out = fx.run_with(&["exec", "tool"], "RUNV_VERSION", "3.11.7");
    assert_eq!(stdout(&out), "tool from 3.11.7\n");

    let out = fx.run_with(&["which", "tool"], "RUNV_VERSION", "system");
    assert_eq!(out.status.code(), Some(127));
    assert!(stderr(&out).contains("exists in these versions:\n  3.11.7\n  3.12.1\n"));
}

#[test]
fn test_shim_dispatches_through_runv() {
    let fx = Fixture::new();
    assert!(fx.run(&["install", "3.12.1"]).status.success());

    let mut shim = Command::new(fx.root().join("shims/tool"));
    fx.env(&mut shim);
    let out = shim.env("RUNV_VERSION", "3.12.1").output().unwrap();
    assert_eq!(stdout(&out), "tool from 3.12.1\n", "{}", stderr(&out));
}

#[test]
fn test_shim_passes_help_and_version_to_the_program() {
    let fx = Fixture::new();
    assert!(fx.run(&["install", "3.12.1"]).status.success());

    for flag in ["--version", "--help", "-h"] {
        let mut shim = Command::new(fx.root().join("shims/tool"));
        fx.env(&mut shim);
        let out = shim.arg(flag).env("RUNV_VERSION", "3.12.1").output().unwrap();
        assert_eq!(stdout(&out), format!("tool from 3.12.1 {flag}\n"), "{}", stderr(&out));
    }

    let out = fx.run_with(&["exec", "tool", "-V"], "RUNV_VERSION", "3.12.1");
    assert_eq!(stdout(&out), "tool from 3.12.1 -V\n");
}

#[test]
fn test_interrupted_install_removes_prefix() {
    let fx = Fixture::new();
    let prefix = fx.root().join("versions/slow");

    let mut child = fx.command(&["install", "slow"]).stdout(Stdio::null()).stderr(Stdio::null()).spawn().unwrap();
    let deadline = Instant::now() + Duration::from_secs(10);
    while !prefix.join("bin").is_dir() {
        assert!(Instant::now() < deadline, "builder never created {}", prefix.display());
        std::thread::sleep(Duration::from_millis(50));
    }

    let kill = Command::new("kill").args(["-INT", &child.id().to_string()]).status().unwrap();
    assert!(kill.success());
    let status = child.wait().unwrap();

    assert_eq!(status.code(), Some(130));
    assert!(!prefix.exists());
}

#[test]
fn test_debug_setting_enables_tracing() {
    let fx = Fixture::new();

    let out = fx.run_with(&["version-name"], "RUNV_DEBUG", "1");
    assert_eq!(stdout(&out), "system\n");
    assert!(stderr(&out).contains("resolved [system]"), "{}", stderr(&out));

    let out = fx.run(&["version-name"]);
    assert!(out.stderr.is_empty(), "{}", stderr(&out));
}

#[test]
fn test_usage_errors_exit_one() {
    let fx = Fixture::new();
    assert_eq!(fx.run(&["install", "-f", "-s", "3.12.1"]).status.code(), Some(1));
    assert_eq!(fx.run(&["no-such-command"]).status.code(), Some(1));
    assert_eq!(fx.run(&["--version"]).status.code(), Some(0));
    assert_eq!(fx.run(&["install"]).status.code(), Some(1));
}
