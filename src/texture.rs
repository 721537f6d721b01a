use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::GenericImageView as _;

use crate::error::LoadError;
use crate::resource::loader::resource_path;
use crate::resource::{DiagnosticSink, Loader, LogSink, DEFAULT_RESOURCE_DIR};
use crate::util::{Extent2D, PixelFormat};

pub const TEXTURE_DIR: &str = "textures";

/// Decoded pixels, ready to be uploaded by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    extent: Extent2D,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl Texture {
    /// `None` if `pixels` does not hold exactly `extent` pixels of `format`.
    pub fn from_raw(extent: Extent2D, format: PixelFormat, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != extent.area() * format.bytes_per_pixel() {
            return None;
        }

        Some(Self {
            extent,
            format,
            pixels,
        })
    }

    /// Keeps 8-bit layouts a renderer can take as-is, converts everything else to RGBA8.
    pub fn from_image(image: image::DynamicImage) -> Self {
        let extent = Extent2D::from(image.dimensions());
        let (format, pixels) = match PixelFormat::from_color_type(image.color()) {
            Some(format) => (format, image.into_bytes()),
            None => {
                log::debug!(
                    "Converting {:?} image to {:?}",
                    image.color(),
                    PixelFormat::Rgba8
                );
                (PixelFormat::Rgba8, image.into_rgba8().into_raw())
            }
        };

        Self {
            extent,
            format,
            pixels,
        }
    }

    pub fn extent(&self) -> Extent2D {
        self.extent
    }

    pub fn width(&self) -> u32 {
        self.extent.width
    }

    pub fn height(&self) -> u32 {
        self.extent.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes per row, rows are tightly packed.
    pub fn row_pitch(&self) -> usize {
        self.extent.width as usize * self.format.bytes_per_pixel()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.extent.width || y >= self.extent.height {
            return None;
        }

        let bpp = self.format.bytes_per_pixel();
        let start = y as usize * self.row_pitch() + x as usize * bpp;
        Some(&self.pixels[start..start + bpp])
    }
}

pub fn load_image(path: &Path) -> Result<image::DynamicImage, LoadError> {
    log::trace!("Trying to load image from {}", path.display());
    let image = image::open(path).map_err(|e| LoadError::from_image(path.to_owned(), e))?;

    log::trace!(
        "Loaded {:?} image with dimensions: {:?}",
        image.color(),
        image.dimensions()
    );

    Ok(image)
}

/// Textures take no options beyond the filename.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureOptions;

/// Loads textures from `<root>/textures/`.
pub struct TextureLoader {
    root: PathBuf,
    sink: Rc<dyn DiagnosticSink>,
}

impl TextureLoader {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_RESOURCE_DIR),
            sink: Rc::new(LogSink),
        }
    }

    pub fn with_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_sink(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for TextureLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for TextureLoader {
    type Resource = Texture;
    type Options = TextureOptions;

    fn load(&self, filename: &str, _options: &TextureOptions) -> Result<Texture, LoadError> {
        let path = resource_path(&self.root, TEXTURE_DIR, filename);
        self.sink.loading(&path);

        match load_image(&path) {
            Ok(image) => {
                let texture = Texture::from_image(image);
                self.sink.loaded(&path);
                Ok(texture)
            }
            Err(e) => {
                self.sink.failed(&path, &e);
                Err(e)
            }
        }
    }
}
