//! Owned RGBA images, loading them from PNG files and generating simple shapes.

use std::{io::Cursor, path::Path};

use glam::Vec2;
use miette::{Context, IntoDiagnostic, Result};
use png::{BitDepth, ColorType, Decoder, Transformations};

use crate::{
    canvas::Canvas,
    color::Rgba,
    mesh::{self, Mesh},
};

/// Grid of pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Horizontal amount of pixels.
    width: u32,
    /// Vertical amount of pixels.
    height: u32,
    /// Pixels row by row, starting at the top-left.
    pixels: Vec<Rgba>,
}

impl Image {
    /// Create a fully transparent image.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Create an image where every pixel has the same color.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let pixels = vec![color; width as usize * height as usize];

        Self {
            width,
            height,
            pixels,
        }
    }

    /// Load a PNG image from disk.
    ///
    /// # Errors
    ///
    /// - When the file can't be read.
    /// - When the file is not a PNG image that can be converted to 8-bit RGBA.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        log::debug!("Loading image '{}'", path.display());

        let bytes = std::fs::read(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Error reading image file '{}'", path.display()))?;

        Self::from_png_bytes(&bytes)
            .wrap_err_with(|| format!("Error decoding image file '{}'", path.display()))
    }

    /// Decode a PNG image from memory.
    ///
    /// # Errors
    ///
    /// - When the bytes are not a valid PNG image.
    /// - When the pixel layout can't be converted to 8-bit RGBA.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self> {
        let mut decoder = Decoder::new(Cursor::new(bytes));

        // Discard text chunks
        decoder.set_ignore_text_chunk(true);

        // Convert indexed and 16 bit images to 8 bit, and add an alpha channel when missing
        decoder
            .set_transformations(Transformations::normalize_to_color8() | Transformations::ALPHA);

        let mut reader = decoder
            .read_info()
            .into_diagnostic()
            .wrap_err("Error reading PNG header")?;

        // Ensure we can use the PNG colors
        let (color_type, bit_depth) = reader.output_color_type();

        let mut buffer = vec![0; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buffer)
            .into_diagnostic()
            .wrap_err("Error reading PNG frame")?;
        let bytes = &buffer[..info.buffer_size()];

        let pixels = match (color_type, bit_depth) {
            (ColorType::Rgba, BitDepth::Eight) => bytemuck::cast_slice::<u8, Rgba>(bytes).to_vec(),
            (ColorType::GrayscaleAlpha, BitDepth::Eight) => bytes
                .chunks_exact(2)
                .map(|pixel| Rgba::new(pixel[0], pixel[0], pixel[0], pixel[1]))
                .collect(),
            (color_type, bit_depth) => miette::bail!(
                "PNG output is {color_type:?} with {bit_depth:?} bits, expected 8 bit RGBA"
            ),
        };

        Ok(Self {
            width: info.width,
            height: info.height,
            pixels,
        })
    }

    /// Filled circle inside a `2 * radius` square.
    #[must_use]
    pub fn circle(radius: u32, color: Rgba) -> Self {
        let mut image = Self::new(radius * 2, radius * 2);

        let center = Vec2::splat(radius as f32);
        let radius_squared = (radius * radius) as f32;
        for y in 0..image.height {
            for x in 0..image.width {
                // Sample the center of the pixel
                let offset = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;

                if offset.length_squared() <= radius_squared {
                    image.set(x, y, color);
                }
            }
        }

        image
    }

    /// Filled rectangle covering the whole image.
    #[must_use]
    pub fn rectangle(width: u32, height: u32, color: Rgba) -> Self {
        Self::filled(width, height, color)
    }

    /// Filled regular polygon inside a `2 * radius` square, with its first corner pointing up.
    ///
    /// # Errors
    ///
    /// - When `sides` is less than three.
    pub fn regular_polygon(sides: usize, radius: u32, color: Rgba) -> Result<Self> {
        let size = radius * 2;
        let center = Vec2::splat(radius as f32);
        let outline = mesh::regular_polygon_points(sides, center, radius as f32, 0.0);

        Ok(Self::from_mesh(size, size, &Mesh::convex(outline)?, color))
    }

    /// Rasterize a triangle mesh in a single color.
    #[must_use]
    pub fn from_mesh(width: u32, height: u32, mesh: &Mesh, color: Rgba) -> Self {
        let mut image = Self::new(width, height);
        image
            .canvas()
            .draw_triangles(&mesh.vertices, &mesh.indices, color);

        image
    }

    /// Color of a pixel.
    ///
    /// Coordinates outside of the image are fully transparent.
    #[inline]
    #[must_use]
    pub fn at(&self, x: i32, y: i32) -> Rgba {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return Rgba::TRANSPARENT;
        };
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }

        self.pixels[self.index(x, y)]
    }

    /// Overwrite a pixel.
    ///
    /// Coordinates outside of the image are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.pixels[index] = color;
        }
    }

    /// Width and height in pixels.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row by row.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw bytes in RGBA order, for uploading.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Draw on this image.
    #[inline]
    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(self.width, self.height, &mut self.pixels)
    }

    /// Index into the pixel vector.
    const fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }
}
