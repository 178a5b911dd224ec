use std::fs;
use std::path::{Path, PathBuf};

/// Write `contents` to `dir/name`, creating parent directories if needed.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("fixture dir");
    }
    fs::write(&path, contents).expect("fixture write");
    path
}
