use std::convert::TryFrom;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::imageops::FilterType;
use image::GenericImageView as _;

use crate::error::LoadError;
use crate::resource::loader::resource_path;
use crate::resource::{DiagnosticSink, Loader, LogSink, DEFAULT_RESOURCE_DIR};
use crate::texture::{load_image, Texture};
use crate::util::{Extent2D, PixelFormat};

pub const FONT_DIR: &str = "fonts";
pub const DEFAULT_FONT_SIZE: u32 = 16;
pub const MAX_FONT_SIZE: u32 = 1024;
/// Largest atlas edge the rasterizer will allocate.
pub const MAX_ATLAS_DIMENSION: u32 = 16384;

// Glyph sheets are a 16x6 grid of equally sized cells holding ASCII 32..=127 in order.
pub const FIRST_GLYPH: u32 = 32;
pub const SHEET_COLUMNS: u32 = 16;
pub const SHEET_ROWS: u32 = 6;
const GLYPH_COUNT: u32 = SHEET_COLUMNS * SHEET_ROWS;

/// Everything needed to place and draw a single glyph. Distances are in atlas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    /// Horizontal cursor movement to the next glyph
    pub advance_x: f32,
    /// Vertical cursor movement to the next glyph
    pub advance_y: f32,
    pub bitmap_width: u32,
    pub bitmap_height: u32,
    /// Left edge of the bitmap relative to the cursor
    pub offset_x: i32,
    /// Top edge of the bitmap above the baseline
    pub offset_y: i32,
    pub texture_x: u32,
    pub texture_y: u32,
}

/// A coverage atlas and the metrics of the glyphs in it. ASCII only.
pub struct Font {
    texture: Texture,
    size: u32,
    line_height: u32,
    metrics: Vec<GlyphMetrics>,
}

impl Font {
    pub fn metrics_for_char(&self, c: char) -> Option<&GlyphMetrics> {
        let code = c as u32;
        if code < FIRST_GLYPH {
            return None;
        }

        self.metrics.get((code - FIRST_GLYPH) as usize)
    }

    /// Single channel coverage atlas.
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Sum of advances, unsupported characters are skipped.
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars()
            .filter_map(|c| self.metrics_for_char(c))
            .map(|m| m.advance_x)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontOptions {
    /// Height of a glyph cell in pixels
    pub size: u32,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_FONT_SIZE,
        }
    }
}

fn coverage(sheet: &image::DynamicImage) -> image::GrayImage {
    if sheet.color().has_alpha() {
        let rgba = sheet.to_rgba8();
        image::GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            image::Luma([rgba.get_pixel(x, y)[3]])
        })
    } else {
        sheet.to_luma8()
    }
}

struct InkBounds {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

fn ink_bounds(atlas: &image::GrayImage, x0: u32, y0: u32, w: u32, h: u32) -> Option<InkBounds> {
    let mut bounds: Option<InkBounds> = None;
    for y in 0..h {
        for x in 0..w {
            if atlas.get_pixel(x0 + x, y0 + y)[0] == 0 {
                continue;
            }

            bounds = Some(match bounds {
                None => InkBounds {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                },
                Some(b) => InkBounds {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(x),
                    max_y: b.max_y.max(y),
                },
            });
        }
    }

    bounds
}

/// Cell width and atlas size, `None` if the atlas would exceed `MAX_ATLAS_DIMENSION`.
fn atlas_dimensions(cell_w: u64, cell_h: u32) -> Option<(u32, u32, u32)> {
    let cell_w = u32::try_from(std::cmp::max(1, cell_w)).ok()?;
    let atlas_w = cell_w.checked_mul(SHEET_COLUMNS)?;
    let atlas_h = cell_h.checked_mul(SHEET_ROWS)?;
    if atlas_w > MAX_ATLAS_DIMENSION || atlas_h > MAX_ATLAS_DIMENSION {
        return None;
    }

    Some((cell_w, atlas_w, atlas_h))
}

/// Resample `sheet` so a cell is `size` pixels high and measure every glyph.
pub fn rasterize(sheet: &image::DynamicImage, size: u32, path: &Path) -> Result<Font, LoadError> {
    if size == 0 || size > MAX_FONT_SIZE {
        return Err(LoadError::InvalidOptions(format!(
            "font size {} is outside 1..={}",
            size, MAX_FONT_SIZE
        )));
    }

    let extent = Extent2D::from(sheet.dimensions());
    if extent.is_empty() || extent.width % SHEET_COLUMNS != 0 || extent.height % SHEET_ROWS != 0
    {
        return Err(LoadError::GlyphSheet {
            path: path.to_owned(),
            reason: format!(
                "{}x{} is not a {}x{} grid of glyph cells",
                extent.width, extent.height, SHEET_COLUMNS, SHEET_ROWS
            ),
        });
    }

    let src_cell_w = extent.width / SHEET_COLUMNS;
    let src_cell_h = extent.height / SHEET_ROWS;
    let cell_h = size;
    let cell_w = (src_cell_w as u64 * size as u64 + src_cell_h as u64 / 2) / src_cell_h as u64;
    let (cell_w, atlas_w, atlas_h) = atlas_dimensions(cell_w, cell_h).ok_or_else(|| {
        LoadError::InvalidOptions(format!(
            "a {} px atlas of {}x{} cells exceeds {} px",
            size, src_cell_w, src_cell_h, MAX_ATLAS_DIMENSION
        ))
    })?;

    let mut atlas = coverage(sheet);
    if (cell_w, cell_h) != (src_cell_w, src_cell_h) {
        log::trace!(
            "Resampling glyph cells from {}x{} to {}x{}",
            src_cell_w,
            src_cell_h,
            cell_w,
            cell_h
        );
        atlas = image::imageops::resize(
            &atlas,
            atlas_w,
            atlas_h,
            FilterType::Triangle,
        );
    }

    let baseline = cell_h * 4 / 5;
    let spacing = std::cmp::max(1, size / 8);

    let metrics = (0..GLYPH_COUNT)
        .map(|i| {
            let x0 = (i % SHEET_COLUMNS) * cell_w;
            let y0 = (i / SHEET_COLUMNS) * cell_h;
            match ink_bounds(&atlas, x0, y0, cell_w, cell_h) {
                None => GlyphMetrics {
                    advance_x: (cell_w / 2) as f32,
                    texture_x: x0,
                    texture_y: y0,
                    ..Default::default()
                },
                Some(b) => {
                    let bitmap_width = b.max_x - b.min_x + 1;
                    GlyphMetrics {
                        advance_x: (bitmap_width + spacing) as f32,
                        advance_y: 0.0,
                        bitmap_width,
                        bitmap_height: b.max_y - b.min_y + 1,
                        offset_x: 0,
                        offset_y: baseline as i32 - b.min_y as i32,
                        texture_x: x0 + b.min_x,
                        texture_y: y0 + b.min_y,
                    }
                }
            }
        })
        .collect();

    let extent = Extent2D::from(atlas.dimensions());
    let texture = Texture::from_raw(extent, PixelFormat::R8, atlas.into_raw())
        .ok_or_else(|| LoadError::Backend(String::from("glyph atlas size mismatch")))?;

    Ok(Font {
        texture,
        size,
        line_height: cell_h,
        metrics,
    })
}

/// Loads bitmap glyph sheets from `<root>/fonts/` and rasterizes them at the requested size.
pub struct FontLoader {
    root: PathBuf,
    sink: Rc<dyn DiagnosticSink>,
}

impl FontLoader {
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

impl Default for FontLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for FontLoader {
    type Resource = Font;
    type Options = FontOptions;

    fn load(&self, filename: &str, options: &FontOptions) -> Result<Font, LoadError> {
        let path = resource_path(&self.root, FONT_DIR, filename);
        self.sink.loading(&path);

        match load_image(&path).and_then(|sheet| rasterize(&sheet, options.size, &path)) {
            Ok(font) => {
                self.sink.loaded(&path);
                Ok(font)
            }
            Err(e) => {
                self.sink.failed(&path, &e);
                Err(e)
            }
        }
    }
}
