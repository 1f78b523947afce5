//! Select one of two sprites by clicking on it and move it with the arrow keys.

use std::rc::Rc;

use miette::{Context as _, Result};
use winit::event::MouseButton;

use super::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::{canvas::DrawOptions, Config, Context, Game, Image};

/// Pixels a sprite moves every update tick.
const TRANSLATE_FACTOR: i32 = 10;

/// Image both sprites are drawn with, relative to the assets directory.
pub const SPRITE_ASSET: &str = "sprite.png";

/// Window settings for this demo.
#[must_use]
pub fn config() -> Config {
    Config::default()
        .with_title("Basic Input")
        .with_buffer_size(SCREEN_WIDTH, SCREEN_HEIGHT)
}

/// Movable image.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Name shown when active.
    pub id: String,
    /// Horizontal position of the top-left corner.
    pub x: i32,
    /// Vertical position of the top-left corner.
    pub y: i32,
    /// Shared image.
    image: Rc<Image>,
}

impl Sprite {
    /// Place an image with its top-left corner at a position.
    #[must_use]
    pub fn new(id: impl Into<String>, image: Rc<Image>, x: i32, y: i32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            image,
        }
    }

    /// Whether the pixel of the image under the buffer pixel is not fully transparent.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.image.at(x - self.x, y - self.y).is_visible()
    }

    /// Move the sprite, keeping it fully on the screen.
    pub fn move_by(&mut self, x: i32, y: i32) {
        let (width, height) = self.image.size();

        self.x = super::clamp_position(self.x + x, 0, SCREEN_WIDTH as i32 - width as i32);
        self.y = super::clamp_position(self.y + y, 0, SCREEN_HEIGHT as i32 - height as i32);
    }

    /// Draw the image at the position.
    pub fn draw(&self, ctx: &Context) {
        ctx.draw_image(
            &self.image,
            &DrawOptions::default().translate(self.x as f32, self.y as f32),
        );
    }
}

/// Two sprites sharing an image, one of them is active.
pub struct BasicInput {
    /// All sprites, the last one is drawn on top.
    sprites: Vec<Sprite>,
    /// Index of the sprite moved by the arrow keys.
    active: usize,
}

impl BasicInput {
    /// Create the sprites with an image.
    #[must_use]
    pub fn new(image: Image) -> Self {
        let image = Rc::new(image);

        let sprites = vec![
            Sprite::new("0", Rc::clone(&image), 0, 0),
            Sprite::new("1", image, 100, 100),
        ];
        let active = 0;

        Self { sprites, active }
    }

    /// Load the sprite image from the assets directory.
    ///
    /// # Errors
    ///
    /// - When the image can't be loaded.
    pub fn load(config: &Config) -> Result<Self> {
        let image = Image::load(config.asset_path(SPRITE_ASSET))
            .wrap_err("Error loading the sprite for the basic input demo")?;

        Ok(Self::new(image))
    }

    /// All sprites in draw order.
    #[must_use]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Sprite moved by the arrow keys.
    #[must_use]
    pub fn active_sprite(&self) -> &Sprite {
        &self.sprites[self.active]
    }
}

impl Game for BasicInput {
    fn update(&mut self, ctx: Context) {
        for (x, y) in super::held_directions(&ctx, false) {
            self.sprites[self.active].move_by(x * TRANSLATE_FACTOR, y * TRANSLATE_FACTOR);
        }

        if ctx.mouse_pressed(MouseButton::Left) {
            if let Some((x, y)) = ctx.cursor_position() {
                if let Some(index) = super::topmost(&self.sprites, |sprite| sprite.contains(x, y))
                {
                    log::debug!("Selected sprite {}", self.sprites[index].id);

                    self.active = index;
                }
            }
        }

        super::handle_window_keys(&ctx);
    }

    fn render(&mut self, ctx: Context) {
        ctx.debug_print(&format!("Active sprite: {}", self.active_sprite().id));

        for sprite in &self.sprites {
            sprite.draw(&ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::Sprite;
    use crate::{
        color::Rgba,
        demos::{SCREEN_HEIGHT, SCREEN_WIDTH},
        Image,
    };

    /// 10x10 image with only the left half opaque.
    fn half_image() -> Rc<Image> {
        let mut image = Image::new(10, 10);
        for y in 0..10 {
            for x in 0..5 {
                image.set(x, y, Rgba::WHITE);
            }
        }

        Rc::new(image)
    }

    #[test]
    fn hit_test_uses_alpha() {
        let sprite = Sprite::new("test", half_image(), 20, 30);

        assert!(sprite.contains(20, 30));
        assert!(sprite.contains(24, 39));
        // Transparent half
        assert!(!sprite.contains(25, 30));
        // Outside of the image
        assert!(!sprite.contains(19, 30));
        assert!(!sprite.contains(20, 40));
    }

    #[test]
    fn clamped_to_screen() {
        let mut sprite = Sprite::new("test", half_image(), 0, 0);

        sprite.move_by(-10, -10);
        assert_eq!((sprite.x, sprite.y), (0, 0));

        sprite.move_by(10_000, 10_000);
        assert_eq!(
            (sprite.x, sprite.y),
            (SCREEN_WIDTH as i32 - 10, SCREEN_HEIGHT as i32 - 10)
        );
    }
}
