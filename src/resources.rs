use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::font::{Font, FontLoader, FontOptions};
use crate::resource::{DiagnosticSink, Handle, LogSink, ResourceCache, ResourceManager};
use crate::texture::{Texture, TextureLoader, TextureOptions};

/// Owns the caches of every resource kind loaded from one resource root.
///
/// Construct one at startup and pass it to whoever needs it; dropping it releases everything it
/// loaded.
pub struct Resources {
    root: PathBuf,
    textures: ResourceCache<TextureLoader>,
    fonts: ResourceCache<FontLoader>,
}

impl Resources {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self::with_sink(root, Rc::new(LogSink))
    }

    pub fn with_sink<P: Into<PathBuf>>(root: P, sink: Rc<dyn DiagnosticSink>) -> Self {
        let root = root.into();
        let textures = TextureLoader::new()
            .with_root(root.clone())
            .with_sink(Rc::clone(&sink));
        let fonts = FontLoader::new().with_root(root.clone()).with_sink(sink);

        log::debug!("Resource root: {}", root.display());

        Self {
            root,
            textures: ResourceCache::from_loader(textures),
            fonts: ResourceCache::from_loader(fonts),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn textures(&self) -> &ResourceCache<TextureLoader> {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut ResourceCache<TextureLoader> {
        &mut self.textures
    }

    pub fn fonts(&self) -> &ResourceCache<FontLoader> {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut ResourceCache<FontLoader> {
        &mut self.fonts
    }

    /// Reload everything. Returns how many resources were replaced.
    pub fn reload_all(&mut self) -> usize {
        self.textures.reload_all() + self.fonts.reload_all()
    }

    pub fn count(&self) -> usize {
        self.textures.count() + self.fonts.count()
    }
}

impl ResourceManager<Texture> for Resources {
    type Options = TextureOptions;

    fn get_resource(&self, handle: &Handle<Texture>) -> Option<&Texture> {
        self.textures.get(handle)
    }

    fn load_resource(
        &mut self,
        filename: &str,
        name: &str,
        options: TextureOptions,
    ) -> Handle<Texture> {
        self.textures.load_as(filename, name, options)
    }
}

impl ResourceManager<Font> for Resources {
    type Options = FontOptions;

    fn get_resource(&self, handle: &Handle<Font>) -> Option<&Font> {
        self.fonts.get(handle)
    }

    fn load_resource(&mut self, filename: &str, name: &str, options: FontOptions) -> Handle<Font> {
        self.fonts.load_as(filename, name, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FONT_DIR, SHEET_COLUMNS, SHEET_ROWS};
    use crate::testing::ScratchDir;
    use crate::texture::TEXTURE_DIR;

    fn populate(dir: &ScratchDir) {
        image::RgbaImage::new(2, 2)
            .save(dir.file(TEXTURE_DIR, "hero.png"))
            .unwrap();
        image::RgbaImage::new(SHEET_COLUMNS * 4, SHEET_ROWS * 4)
            .save(dir.file(FONT_DIR, "mono.png"))
            .unwrap();
    }

    #[test]
    fn loads_each_kind_into_its_cache() {
        let dir = ScratchDir::new("resources-kinds");
        populate(&dir);
        let mut resources = Resources::new(dir.path());

        let tex: Handle<Texture> = resources.load_resource("hero.png", "hero", TextureOptions);
        let font: Handle<Font> =
            resources.load_resource("mono.png", "mono", FontOptions { size: 4 });

        assert!(resources.get_resource(&tex).is_some());
        assert!(resources.get_resource(&font).is_some());
        assert_eq!(resources.textures().count(), 1);
        assert_eq!(resources.fonts().count(), 1);
        assert_eq!(resources.count(), 2);
        assert_eq!(resources.reload_all(), 2);
    }

    #[test]
    fn kinds_do_not_share_names() {
        let dir = ScratchDir::new("resources-names");
        populate(&dir);
        let mut resources = Resources::new(dir.path());

        resources.textures_mut().load_as("hero.png", "ui", TextureOptions);

        assert!(resources.fonts().handle("ui").is_null());
        assert!(resources
            .get_resource(&Handle::<Font>::new("ui"))
            .is_none());
    }

    #[test]
    fn missing_files_leave_caches_empty() {
        let dir = ScratchDir::new("resources-missing");
        let mut resources = Resources::new(dir.path());

        assert!(resources.textures_mut().load("nope.png").is_null());
        assert!(resources.fonts_mut().load("nope.png").is_null());
        assert_eq!(resources.count(), 0);
    }
}
