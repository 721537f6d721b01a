use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// Scratch resource root, removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(tag: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "rescache-{}-{}-{}",
            std::process::id(),
            tag,
            NEXT_DIR.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::create_dir_all(&path).expect("Failed to create scratch dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates `<root>/<kind_dir>/` and returns the full path of `filename` in it.
    pub fn file(&self, kind_dir: &str, filename: &str) -> PathBuf {
        let dir = self.path.join(kind_dir);
        std::fs::create_dir_all(&dir).expect("Failed to create kind dir");
        dir.join(filename)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
