/// Layout of the bytes of one pixel. First channel is the lowest address.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    R8,
    Rgb8,
    Bgr8,
    Rgba8,
    Bgra8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::R8 => 1,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    /// The format a decoded image can be handed over in without conversion, if any.
    pub fn from_color_type(color: image::ColorType) -> Option<Self> {
        match color {
            image::ColorType::L8 => Some(Self::R8),
            image::ColorType::Rgb8 => Some(Self::Rgb8),
            image::ColorType::Bgr8 => Some(Self::Bgr8),
            image::ColorType::Rgba8 => Some(Self::Rgba8),
            image::ColorType::Bgra8 => Some(Self::Bgra8),
            _ => None,
        }
    }
}
