//! Two layer parallax starfield, the near layer scrolls faster than the far one.

use fastrand::Rng;

use super::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::{canvas::DrawOptions, color::Rgba, random, Config, Context, Game, Image};

/// Pixels the near stars move every update tick.
const TRANSLATE_NEAR: i32 = 3;

/// Pixels the far stars move every update tick.
const TRANSLATE_FAR: i32 = 1;

/// Amount of stars in the near layer.
pub const NEAR_STARS: usize = 50;

/// Amount of stars in the far layer.
pub const FAR_STARS: usize = 100;

/// Half of the size of a star.
const STAR_RADIUS: u32 = 3;

/// Color of the near stars.
const NEAR_COLOR: Rgba = Rgba::WHITE;

/// Color of the far stars, dimmed with the alpha channel.
const FAR_COLOR: Rgba = Rgba::new(0xFF, 0xFF, 0xFF, 0x80);

/// Window settings for this demo.
#[must_use]
pub fn config() -> Config {
    Config::default()
        .with_title("Starfield")
        .with_buffer_size(SCREEN_WIDTH, SCREEN_HEIGHT)
}

/// Square star that wraps around the screen edges.
#[derive(Debug, Clone)]
pub struct Star {
    /// Horizontal position of the top-left corner.
    pub x: i32,
    /// Vertical position of the top-left corner.
    pub y: i32,
    /// Half of the size.
    pub radius: u32,
    /// Filled square.
    image: Image,
}

impl Star {
    /// Create a star of `2 * radius` pixels wide and high.
    #[must_use]
    pub fn new(x: i32, y: i32, radius: u32, color: Rgba) -> Self {
        Self {
            x,
            y,
            radius,
            image: Image::filled(radius * 2, radius * 2, color),
        }
    }

    /// Move the star, leaving one edge of the screen puts it on the opposite edge.
    pub fn move_by(&mut self, x: i32, y: i32) {
        let (width, height) = (SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32);

        self.x += x;
        self.y += y;

        if self.x > width {
            self.x = 0;
        }
        if self.x < 0 {
            self.x = width;
        }
        if self.y > height {
            self.y = 0;
        }
        if self.y < 0 {
            self.y = height;
        }
    }

    /// Draw the star at the position.
    pub fn draw(&self, ctx: &Context) {
        ctx.draw_image(
            &self.image,
            &DrawOptions::default().translate(self.x as f32, self.y as f32),
        );
    }

    /// Filled square.
    #[must_use]
    pub const fn image(&self) -> &Image {
        &self.image
    }
}

/// Stars in two layers scrolling at different speeds.
pub struct Starfield {
    /// Bright stars moving fast.
    near: Vec<Star>,
    /// Dim stars moving slow.
    far: Vec<Star>,
}

impl Starfield {
    /// Scatter the stars, within a layer every star gets a unique column and a unique row.
    #[must_use]
    pub fn new(rng: &mut Rng) -> Self {
        let near = Self::layer(rng, NEAR_STARS, NEAR_COLOR);
        let far = Self::layer(rng, FAR_STARS, FAR_COLOR);

        Self { near, far }
    }

    /// Move both layers, the near layer moves further than the far layer.
    ///
    /// # Arguments
    ///
    /// * `x` - Horizontal direction, `-1`, `0` or `1`.
    /// * `y` - Vertical direction, `-1`, `0` or `1`.
    pub fn move_view(&mut self, x: i32, y: i32) {
        for star in &mut self.near {
            star.move_by(x * TRANSLATE_NEAR, y * TRANSLATE_NEAR);
        }
        for star in &mut self.far {
            star.move_by(x * TRANSLATE_FAR, y * TRANSLATE_FAR);
        }
    }

    /// Bright stars moving fast.
    #[must_use]
    pub fn near(&self) -> &[Star] {
        &self.near
    }

    /// Dim stars moving slow.
    #[must_use]
    pub fn far(&self) -> &[Star] {
        &self.far
    }

    /// Generate a single layer of stars.
    fn layer(rng: &mut Rng, amount: usize, color: Rgba) -> Vec<Star> {
        let xs = random::permutation_prefix(rng, SCREEN_WIDTH as usize, amount);
        let ys = random::permutation_prefix(rng, SCREEN_HEIGHT as usize, amount);

        xs.into_iter()
            .zip(ys)
            .map(|(x, y)| Star::new(x as i32, y as i32, STAR_RADIUS, color))
            .collect()
    }
}

impl Game for Starfield {
    fn update(&mut self, ctx: Context) {
        for (x, y) in super::held_directions(&ctx, true) {
            self.move_view(x, y);
        }

        super::handle_window_keys(&ctx);
    }

    fn render(&mut self, ctx: Context) {
        // Far stars are behind the near stars
        for star in self.far.iter().chain(&self.near) {
            star.draw(&ctx);
        }
    }
}
