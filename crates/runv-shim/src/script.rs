use std::path::Path;

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Shim body. Every shim is identical apart from the file name, which the
/// script reads back from `$0`.
pub(crate) fn render(exe: &Path, root: &Path) -> String {
    format!(
        r#"#!/usr/bin/env bash
set -e
[ -n "$RUNV_DEBUG" ] && set -x

program="${{0##*/}}"

export RUNV_ROOT={root}
exec {exe} exec "$program" "$@"
"#,
        root = shell_quote(&root.to_string_lossy()),
        exe = shell_quote(&exe.to_string_lossy()),
    )
}
