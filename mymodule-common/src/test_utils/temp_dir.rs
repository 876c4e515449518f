use std::path::{Path, PathBuf};

const TEMP_DIR_ROOT_NAME: &str = "mymodule_test";

/// A builder of temp directory for tests purpose.
pub struct TempDir;

impl TempDir {
    /// Path of the temp directory for the given module and test name, no IO is done.
    pub fn path(module: &str, name: &str) -> PathBuf {
        std::env::temp_dir().join(TEMP_DIR_ROOT_NAME).join(module).join(name)
    }

    /// Create a fresh temp directory for the given module and test name, removing any
    /// content left by a previous run.
    pub fn create(module: &str, name: &str) -> PathBuf {
        let dir = Self::path(module, name);
        Self::recreate(&dir);
        dir
    }

    fn recreate(dir: &Path) {
        if dir.exists() {
            std::fs::remove_dir_all(dir)
                .unwrap_or_else(|e| panic!("Could not remove dir {dir:?}: {e}"));
        }
        std::fs::create_dir_all(dir)
            .unwrap_or_else(|e| panic!("Could not create dir {dir:?}: {e}"));
    }
}
