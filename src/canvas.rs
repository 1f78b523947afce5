//! Software rasterizer drawing into a pixel buffer.

use font8x8::legacy::BASIC_LEGACY;
use glam::{Affine2, Vec2};
use line_drawing::Bresenham;

use crate::{
    color::{ColorScale, Rgba},
    image::Image,
};

/// Size of a single debug text glyph in pixels.
pub const GLYPH_SIZE: u32 = 8;

/// Color of the debug text.
const DEBUG_TEXT_COLOR: Rgba = Rgba::WHITE;

/// Color of the shadow below the debug text.
const DEBUG_TEXT_SHADOW_COLOR: Rgba = Rgba::new(0, 0, 0, 0xC0);

/// How an image is placed when drawing it.
///
/// Transformations are applied in the order they are called, starting from the top-left corner of the image at the origin.
///
/// ```
/// use sprite_demos::canvas::DrawOptions;
///
/// // Rotate a 30x30 image around its center and place that center at (100, 100)
/// let options = DrawOptions::default()
///     .translate(-15.0, -15.0)
///     .rotate(0.5)
///     .translate(100.0, 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    /// Mapping from image pixels to canvas pixels.
    pub transform: Affine2,
    /// Multiplier for every drawn pixel.
    pub color_scale: ColorScale,
}

impl DrawOptions {
    /// Move the image.
    #[inline]
    #[must_use]
    pub fn translate(mut self, x: f32, y: f32) -> Self {
        self.transform = Affine2::from_translation(Vec2::new(x, y)) * self.transform;

        self
    }

    /// Rotate the image around the origin.
    ///
    /// # Arguments
    ///
    /// * `rotation` - Clockwise rotation in radians, because the Y axis points down.
    #[inline]
    #[must_use]
    pub fn rotate(mut self, rotation: f32) -> Self {
        self.transform = Affine2::from_angle(rotation) * self.transform;

        self
    }

    /// Multiply all drawn colors.
    #[inline]
    #[must_use]
    pub const fn scale_color(mut self, color_scale: ColorScale) -> Self {
        self.color_scale = color_scale;

        self
    }
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            color_scale: ColorScale::IDENTITY,
        }
    }
}

/// Simple wrapper around a pixel buffer that can be passed around to rendering calls.
pub struct Canvas<'a> {
    /// Horizontal amount of pixels.
    width: u32,
    /// Vertical amount of pixels.
    height: u32,
    /// Reference to the pixel buffer.
    pixels: &'a mut [Rgba],
}

impl<'a> Canvas<'a> {
    /// Wrap a buffer of `width * height` pixels.
    pub(crate) fn new(width: u32, height: u32, pixels: &'a mut [Rgba]) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);

        Self {
            width,
            height,
            pixels,
        }
    }

    /// Fill the canvas with a single color.
    #[inline]
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Overwrite a pixel.
    ///
    /// If the coordinate is out of bounds nothing will be done.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
        }
    }

    /// Draw a pixel on top of what's already there, taking the alpha channel into account.
    ///
    /// If the coordinate is out of bounds nothing will be done.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color.blend_over(self.pixels[index]);
        }
    }

    /// Draw a one pixel wide line using Bresenham's line algorithm.
    pub fn draw_line(&mut self, start: Vec2, end: Vec2, color: Rgba) {
        for (x, y) in Bresenham::new(
            (start.x.floor() as i32, start.y.floor() as i32),
            (end.x.floor() as i32, end.y.floor() as i32),
        ) {
            self.blend_pixel(x, y, color);
        }
    }

    /// Fill a triangle.
    ///
    /// A pixel is filled when its center lies inside the triangle or on one of its edges.
    pub fn draw_triangle(&mut self, corners: [Vec2; 3], color: Rgba) {
        let [a, b, c] = corners;

        // Twice the signed area, the sign tells the winding order
        let area = edge_function(a, b, c);
        if area.abs() <= f32::EPSILON {
            // Nothing to fill
            return;
        }

        // Only visit the pixels in the bounding box that are on the canvas
        let min = a.min(b).min(c);
        let max = a.max(b).max(c);
        let start_x = min.x.floor().max(0.0) as u32;
        let start_y = min.y.floor().max(0.0) as u32;
        let end_x = (max.x.ceil().max(0.0) as u32).min(self.width);
        let end_y = (max.y.ceil().max(0.0) as u32).min(self.height);

        for y in start_y..end_y {
            for x in start_x..end_x {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

                let weights = [
                    edge_function(b, c, center),
                    edge_function(c, a, center),
                    edge_function(a, b, center),
                ];

                let inside = if area > 0.0 {
                    weights.iter().all(|weight| *weight >= 0.0)
                } else {
                    weights.iter().all(|weight| *weight <= 0.0)
                };

                if inside {
                    self.blend_pixel(x as i32, y as i32, color);
                }
            }
        }
    }

    /// Fill a list of triangles in a single color.
    ///
    /// Every three indices form a triangle, trailing indices are ignored.
    /// Triangles referring to vertices that don't exist are skipped.
    pub fn draw_triangles(&mut self, vertices: &[Vec2], indices: &[u16], color: Rgba) {
        for triangle in indices.chunks_exact(3) {
            let corners = [triangle[0], triangle[1], triangle[2]]
                .map(|index| vertices.get(usize::from(index)).copied());

            match corners {
                [Some(a), Some(b), Some(c)] => self.draw_triangle([a, b, c], color),
                _ => log::warn!("Skipping triangle {triangle:?}, it refers to a missing vertex"),
            }
        }
    }

    /// Draw an image with a transformation and color scale.
    ///
    /// Every canvas pixel covered by the transformed image takes the color of the image pixel under its center.
    pub fn draw_image(&mut self, image: &Image, options: &DrawOptions) {
        profiling::scope!("Draw image");

        let (width, height) = image.size();
        let (width, height) = (width as f32, height as f32);

        // Can't map canvas pixels back when the image is squashed to nothing
        let inverse = options.transform.inverse();
        if !inverse.is_finite() {
            return;
        }

        // Find the bounding box of the transformed image
        let corners = [
            Vec2::ZERO,
            Vec2::new(width, 0.0),
            Vec2::new(0.0, height),
            Vec2::new(width, height),
        ]
        .map(|corner| options.transform.transform_point2(corner));
        let min = corners.iter().copied().fold(Vec2::INFINITY, Vec2::min);
        let max = corners.iter().copied().fold(Vec2::NEG_INFINITY, Vec2::max);

        let start_x = min.x.floor().max(0.0) as u32;
        let start_y = min.y.floor().max(0.0) as u32;
        let end_x = (max.x.ceil().max(0.0) as u32).min(self.width);
        let end_y = (max.y.ceil().max(0.0) as u32).min(self.height);

        for y in start_y..end_y {
            for x in start_x..end_x {
                let source =
                    inverse.transform_point2(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));

                let color = image.at(source.x.floor() as i32, source.y.floor() as i32);
                if color.is_visible() {
                    self.blend_pixel(x as i32, y as i32, options.color_scale.apply(color));
                }
            }
        }
    }

    /// Print debug text in the top-left corner.
    #[inline]
    pub fn debug_print(&mut self, text: &str) {
        self.debug_print_at(text, 0, 0);
    }

    /// Print debug text with a shadow, every line is [`GLYPH_SIZE`] pixels high.
    ///
    /// Characters that are not printable ASCII are drawn as `?`.
    pub fn debug_print_at(&mut self, text: &str, x: i32, y: i32) {
        let glyph_size = GLYPH_SIZE as i32;

        let mut cursor_x = x;
        let mut cursor_y = y;
        for ch in text.chars() {
            if ch == '\n' {
                cursor_x = x;
                cursor_y += glyph_size;
                continue;
            }

            let ch = if ch.is_ascii_graphic() || ch == ' ' {
                ch
            } else {
                '?'
            };

            self.draw_glyph(ch, cursor_x + 1, cursor_y + 1, DEBUG_TEXT_SHADOW_COLOR);
            self.draw_glyph(ch, cursor_x, cursor_y, DEBUG_TEXT_COLOR);

            cursor_x += glyph_size;
        }
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
}

/// Drawing helpers.
impl<'a> Canvas<'a> {
    /// Draw a single ASCII character from the built-in 8x8 font.
    fn draw_glyph(&mut self, ch: char, x: i32, y: i32, color: Rgba) {
        let Some(rows) = BASIC_LEGACY.get(ch as usize) else {
            return;
        };

        for (row_y, row) in (0..).zip(rows.iter().copied()) {
            for column in 0..GLYPH_SIZE as i32 {
                // The lowest bit is the leftmost pixel
                if (row >> column) & 1 == 1 {
                    self.blend_pixel(x + column, y + row_y, color);
                }
            }
        }
    }

    /// Index in the buffer, `None` when out of bounds.
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return None;
        };
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(x as usize + y as usize * self.width as usize)
    }
}

/// Signed distance-like value, positive when `point` is on the left of the edge `start` → `end`.
#[inline]
fn edge_function(start: Vec2, end: Vec2, point: Vec2) -> f32 {
    (end.x - start.x).mul_add(point.y - start.y, -(end.y - start.y) * (point.x - start.x))
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::DrawOptions;
    use crate::{
        color::{ColorScale, Rgba},
        image::Image,
    };

    #[test]
    fn line_is_clipped() {
        let mut image = Image::new(4, 4);
        image
            .canvas()
            .draw_line(Vec2::new(-2.0, 0.0), Vec2::new(10.0, 0.0), Rgba::WHITE);

        for x in 0..4 {
            assert_eq!(image.at(x, 0), Rgba::WHITE);
            assert_eq!(image.at(x, 1), Rgba::TRANSPARENT);
        }
    }

    #[test]
    fn diagonal_line() {
        let mut image = Image::new(4, 4);
        image
            .canvas()
            .draw_line(Vec2::ZERO, Vec2::new(3.0, 3.0), Rgba::RED);

        for i in 0..4 {
            assert_eq!(image.at(i, i), Rgba::RED);
        }
        assert_eq!(image.at(3, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn triangle_winding_does_not_matter() {
        let corners = [Vec2::ZERO, Vec2::new(8.0, 0.0), Vec2::new(0.0, 8.0)];

        let mut clockwise = Image::new(8, 8);
        clockwise.canvas().draw_triangle(corners, Rgba::WHITE);

        let mut counter_clockwise = Image::new(8, 8);
        counter_clockwise
            .canvas()
            .draw_triangle([corners[2], corners[1], corners[0]], Rgba::WHITE);

        assert_eq!(clockwise, counter_clockwise);
        assert_eq!(clockwise.at(1, 1), Rgba::WHITE);
        assert_eq!(clockwise.at(7, 7), Rgba::TRANSPARENT);
    }

    #[test]
    fn degenerate_triangle_draws_nothing() {
        let mut image = Image::new(4, 4);
        image.canvas().draw_triangle(
            [Vec2::ZERO, Vec2::new(2.0, 2.0), Vec2::new(4.0, 4.0)],
            Rgba::WHITE,
        );

        assert_eq!(image, Image::new(4, 4));
    }

    #[test]
    fn triangles_skip_missing_vertices() {
        let mut image = Image::new(4, 4);
        image.canvas().draw_triangles(
            &[Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)],
            &[0, 1, 7],
            Rgba::WHITE,
        );

        assert_eq!(image, Image::new(4, 4));
    }

    #[test]
    fn draw_translated_image() {
        let sprite = Image::filled(2, 2, Rgba::WHITE);

        let mut image = Image::new(6, 6);
        image
            .canvas()
            .draw_image(&sprite, &DrawOptions::default().translate(3.0, 1.0));

        assert_eq!(image.at(3, 1), Rgba::WHITE);
        assert_eq!(image.at(4, 2), Rgba::WHITE);
        assert_eq!(image.at(2, 1), Rgba::TRANSPARENT);
        assert_eq!(image.at(5, 1), Rgba::TRANSPARENT);
        assert_eq!(image.at(3, 3), Rgba::TRANSPARENT);
    }

    #[test]
    fn draw_rotated_image() {
        // A 4x2 bar rotated a quarter turn around its center becomes a 2x4 bar
        let sprite = Image::filled(4, 2, Rgba::WHITE);

        let mut image = Image::new(8, 8);
        image.canvas().draw_image(
            &sprite,
            &DrawOptions::default()
                .translate(-2.0, -1.0)
                .rotate(std::f32::consts::FRAC_PI_2)
                .translate(4.0, 4.0),
        );

        assert_eq!(image.at(3, 2), Rgba::WHITE);
        assert_eq!(image.at(4, 5), Rgba::WHITE);
        assert_eq!(image.at(2, 4), Rgba::TRANSPARENT);
        assert_eq!(image.at(5, 4), Rgba::TRANSPARENT);
    }

    #[test]
    fn draw_scaled_color() {
        let sprite = Image::filled(1, 1, Rgba::WHITE);

        let mut image = Image::filled(1, 1, Rgba::BLACK);
        image.canvas().draw_image(
            &sprite,
            &DrawOptions::default().scale_color(ColorScale::from(Rgba::GREEN)),
        );

        assert_eq!(image.at(0, 0), Rgba::GREEN);
    }

    #[test]
    fn debug_text_is_drawn() {
        let mut image = Image::new(32, 16);
        image.canvas().debug_print("Hi");

        assert!(image.pixels().iter().any(|pixel| *pixel == Rgba::WHITE));

        // Nothing is drawn after two glyphs plus the shadow
        for y in 0..16 {
            for x in 17..32 {
                assert_eq!(image.at(x, y), Rgba::TRANSPARENT);
            }
        }
    }

    #[test]
    fn debug_text_newline_returns_to_start_column() {
        let mut image = Image::new(32, 24);
        image.canvas().debug_print_at("H\nH", 4, 2);

        // Left leg of both glyphs, the second one on the next line
        assert_eq!(image.at(4, 2), Rgba::WHITE);
        assert_eq!(image.at(4, 10), Rgba::WHITE);

        // Nothing continues on the first line, nothing left of the start column
        for y in 0..24 {
            for x in (0..4).chain(13..32) {
                assert_eq!(image.at(x, y), Rgba::TRANSPARENT);
            }
        }
    }
}
