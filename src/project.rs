//! Output file writing
//!
//! Places the rendered modules on disk. Existing files are left alone
//! unless `force` is set, so regenerating into a working tree never
//! clobbers local edits silently.

use crate::pipeline::GeneratedModules;
use std::fs;
use std::path::{Path, PathBuf};

pub const TYPES_MODULE_FILE: &str = "classes.js";
pub const CLIENT_MODULE_FILE: &str = "services.js";

/// Write both modules into `dir`, creating it if needed
///
/// Returns the paths actually written; skipped files are not included.
pub fn write_modules(
    dir: &Path,
    modules: &GeneratedModules,
    force: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    if let Some(path) = write_module(&dir.join(TYPES_MODULE_FILE), &modules.types_module, force)? {
        written.push(path);
    }
    if let Some(path) = write_module(&dir.join(CLIENT_MODULE_FILE), &modules.client_module, force)? {
        written.push(path);
    }
    Ok(written)
}

fn write_module(path: &Path, content: &str, force: bool) -> anyhow::Result<Option<PathBuf>> {
    if path.exists() && !force {
        println!("⚠️  Skipping existing module file: {path:?}");
        return Ok(None);
    }
    let mut content = content.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    fs::write(path, content)?;
    println!("✅ Wrote {path:?}");
    Ok(Some(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modules() -> GeneratedModules {
        GeneratedModules {
            types_module: "function Item() {}".to_string(),
            client_module: "var RestServices = function () {};".to_string(),
        }
    }

    #[test]
    fn writes_both_modules() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_modules(dir.path(), &modules(), false).unwrap();
        assert_eq!(written.len(), 2);
        let types = fs::read_to_string(dir.path().join(TYPES_MODULE_FILE)).unwrap();
        assert!(types.ends_with('\n'));
    }

    #[test]
    fn refuses_to_clobber_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(TYPES_MODULE_FILE);
        fs::write(&target, "local edits").unwrap();
        let written = write_modules(dir.path(), &modules(), false).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(fs::read_to_string(&target).unwrap(), "local edits");

        let written = write_modules(dir.path(), &modules(), true).unwrap();
        assert_eq!(written.len(), 2);
        assert_ne!(fs::read_to_string(&target).unwrap(), "local edits");
    }
}
