//! Image decoding.

use crate::zoom_math::Size;

/// A decoded RGBA8 image.
#[derive(Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wrap RGBA8 pixels. `pixels.len()` must be `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True if the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Turns raw file bytes into a bitmap.
pub trait ImageDecoder {
    /// Decode `bytes`. `None` if they aren't a (non-empty) image.
    fn decode(&self, bytes: &[u8]) -> Option<Bitmap>;

    /// File extensions this decoder reads (lowercase, without dots).
    ///
    /// Used for error messages and open-dialog filters.
    fn supported_formats(&self) -> Vec<String>;
}

/// Decoder for the raster formats the `image` crate is built with.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn decode(&self, bytes: &[u8]) -> Option<Bitmap> {
        if bytes.is_empty() {
            return None;
        }

        let img = match image::load_from_memory(bytes) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                log::warn!("Failed to decode image: {}", e);
                return None;
            }
        };

        let (width, height) = img.dimensions();
        log::trace!("RasterDecoder: decoded {}x{} image", width, height);

        let bitmap = Bitmap::new(width, height, img.into_raw());
        (!bitmap.is_empty()).then_some(bitmap)
    }

    fn supported_formats(&self) -> Vec<String> {
        image::ImageFormat::all()
            .filter(|format| format.reading_enabled())
            .flat_map(|format| format.extensions_str().iter().copied())
            .map(str::to_string)
            .collect()
    }
}
