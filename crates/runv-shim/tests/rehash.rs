use runv_core::{Config, VersionStore};
use runv_shim::ShimManager;
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::tempdir;

fn install(root: &Path, version: &str, bins: &[&str]) {
    let bin = root.join("versions").join(version).join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    for b in bins {
        std::fs::write(bin.join(b), "#!/bin/sh\n").unwrap();
    }
}

fn union_of_bins(root: &Path) -> BTreeSet<String> {
    let mut all = BTreeSet::new();
    let Ok(versions) = std::fs::read_dir(root.join("versions")) else {
        return all;
    };
    for version in versions {
        for entry in std::fs::read_dir(version.unwrap().path().join("bin")).unwrap() {
            all.insert(entry.unwrap().file_name().into_string().unwrap());
        }
    }
    all
}

#[test]
fn test_shim_set_tracks_installed_versions() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let config = Config::with_root(root, root);
    let store = VersionStore::new(&config);
    let manager = ShimManager::new(&config, &store, "/opt/runv/bin/runv");

    install(root, "0.18.0", &["crystal", "shards"]);
    install(root, "0.19.1", &["crystal", "shards", "crystal-doc"]);
    manager.rehash().unwrap();
    let on_disk: BTreeSet<String> = manager.list().unwrap().into_iter().collect();
    assert_eq!(on_disk, union_of_bins(root));

    std::fs::remove_dir_all(root.join("versions/0.19.1")).unwrap();
    let report = manager.rehash().unwrap();
    assert_eq!(report.removed, vec!["crystal-doc"]);
    let on_disk: BTreeSet<String> = manager.list().unwrap().into_iter().collect();
    assert_eq!(on_disk, union_of_bins(root));

    // Rehashing twice is a no-op on the shim set.
    let again = manager.rehash().unwrap();
    assert!(again.removed.is_empty());
    assert_eq!(again.shims, report.shims);
}

#[test]
fn test_shims_reenter_runv_exec() {
    let dir = tempdir().unwrap();
    let config = Config::with_root(dir.path(), dir.path());
    let store = VersionStore::new(&config);
    install(dir.path(), "1.0", &["tool"]);

    ShimManager::new(&config, &store, "/opt/runv/bin/runv").rehash().unwrap();
    let body = std::fs::read_to_string(dir.path().join("shims/tool")).unwrap();
    assert!(body.contains("exec '/opt/runv/bin/runv' exec \"$program\" \"$@\""));
    assert!(body.contains(&format!("export RUNV_ROOT='{}'", dir.path().display())));
}
