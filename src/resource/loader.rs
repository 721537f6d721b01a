use std::path::{Path, PathBuf};

use crate::error::LoadError;

/// Directory, relative to the working directory, that loaders resolve files under by default.
pub const DEFAULT_RESOURCE_DIR: &str = "resources";

/// Turns a filename and a set of options into an owned resource.
///
/// Loaders are shared between caches through `Rc`, hence `&self`. An implementation with
/// internal state has to use interior mutability and must tolerate being called from every
/// cache it is shared with.
pub trait Loader {
    type Resource;
    /// Everything `load` needs beyond the filename. Stored per name for reloading.
    type Options;

    fn load(&self, filename: &str, options: &Self::Options) -> Result<Self::Resource, LoadError>;
}

/// The parameters a name was loaded with, replayed verbatim by reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRecord<O> {
    filename: String,
    options: O,
}

impl<O> LoadRecord<O> {
    pub fn new(filename: &str, options: O) -> Self {
        Self {
            filename: filename.to_owned(),
            options,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn options(&self) -> &O {
        &self.options
    }
}

/// `<root>/<kind_dir>/<filename>`
pub fn resource_path(root: &Path, kind_dir: &str, filename: &str) -> PathBuf {
    let mut path = root.join(kind_dir);
    path.push(filename);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_rooted_in_kind_dir() {
        let p = resource_path(Path::new("resources"), "textures", "hero.png");
        assert_eq!(p, Path::new("resources").join("textures").join("hero.png"));
    }

    #[test]
    fn nested_filenames_are_kept() {
        let p = resource_path(Path::new("/data"), "fonts", "ui/mono.png");
        assert!(p.ends_with("fonts/ui/mono.png"));
    }
}
