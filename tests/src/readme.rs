use crate::fixtures::workspace_root;

/// Every path the README tells a new project owner about must exist.
#[test]
fn readme_paths_exist() {
    let root = workspace_root();
    let readme = std::fs::read_to_string(root.join("README.md")).expect("README.md is missing");

    for path in [
        "cli",
        "core",
        "common",
        "tests/fixtures",
        ".vscode/settings.json",
    ] {
        assert!(readme.contains(path), "README no longer mentions {path}");
        assert!(root.join(path).exists(), "README mentions {path}, which does not exist");
    }
}
