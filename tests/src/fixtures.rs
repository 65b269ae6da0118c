use std::path::{Path, PathBuf};

pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Copies the discussion fixtures into `dir` and returns their new paths.
pub fn copy_discussions(dir: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
    let megan = dir.join("meganDenial.rtf");
    let tamara = dir.join("tamaraDenial.rtf");
    std::fs::copy(fixture_dir().join("meganDenial.rtf"), &megan)?;
    std::fs::copy(fixture_dir().join("tamaraDenial.rtf"), &tamara)?;
    Ok((megan, tamara))
}
