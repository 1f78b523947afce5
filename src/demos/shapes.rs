//! Generated shapes that can be selected, moved and rotated around their center.

use miette::Result;
use winit::{event::MouseButton, keyboard::KeyCode};

use super::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::{color::Rgba, Config, Context, Game, Image};

/// Pixels a shape moves every update tick.
const TRANSLATE_FACTOR: i32 = 10;

/// Radians a shape rotates every update tick.
const ROTATE_FACTOR: f32 = 0.05;

/// Window settings for this demo.
#[must_use]
pub fn config() -> Config {
    Config::default()
        .with_title("Shapes")
        .with_buffer_size(SCREEN_WIDTH, SCREEN_HEIGHT)
}

/// Image drawn centered on its position with a rotation.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Name shown when active.
    pub id: String,
    /// Horizontal position of the center.
    pub x: i32,
    /// Vertical position of the center.
    pub y: i32,
    /// Clockwise rotation in radians.
    pub theta: f32,
    /// Generated image.
    image: Image,
}

impl Shape {
    /// Place an image with its center at a position.
    #[must_use]
    pub fn new(id: impl Into<String>, x: i32, y: i32, theta: f32, image: Image) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            theta,
            image,
        }
    }

    /// Whether the buffer pixel hits an opaque pixel of the rotated image.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        super::hits_centered(&self.image, self.x, self.y, self.theta, (x, y))
    }

    /// Move the center, keeping the unrotated image on the screen.
    pub fn move_by(&mut self, x: i32, y: i32) {
        let (width, height) = self.image.size();
        let (half_width, half_height) = ((width / 2) as i32, (height / 2) as i32);

        self.x = super::clamp_position(
            self.x + x,
            half_width,
            SCREEN_WIDTH as i32 - half_width,
        );
        self.y = super::clamp_position(
            self.y + y,
            half_height,
            SCREEN_HEIGHT as i32 - half_height,
        );
    }

    /// Draw the image rotated around its center.
    pub fn draw(&self, ctx: &Context) {
        ctx.draw_image(
            &self.image,
            &super::centered_options(&self.image, self.x, self.y, self.theta),
        );
    }

    /// Generated image.
    #[must_use]
    pub const fn image(&self) -> &Image {
        &self.image
    }
}

/// Four generated shapes, one of them is active.
pub struct Shapes {
    /// All shapes, the last one is drawn on top.
    shapes: Vec<Shape>,
    /// Index of the shape controlled by the keyboard.
    active: usize,
}

impl Shapes {
    /// Generate the triangle, pentagon, rectangle and circle.
    ///
    /// # Errors
    ///
    /// - When a polygon can't be generated.
    pub fn new() -> Result<Self> {
        let shapes = vec![
            Shape::new(
                "Triangle",
                50,
                50,
                0.0,
                Image::regular_polygon(3, 30, Rgba::WHITE)?,
            ),
            Shape::new(
                "Pentagon",
                100,
                100,
                0.0,
                Image::regular_polygon(5, 30, Rgba::RED)?,
            ),
            Shape::new(
                "Rectangle",
                200,
                200,
                0.0,
                Image::rectangle(30, 30, Rgba::RED),
            ),
            Shape::new("Circle", 300, 300, 0.0, Image::circle(30, Rgba::GREEN)),
        ];
        let active = 0;

        Ok(Self { shapes, active })
    }

    /// All shapes in draw order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shape controlled by the keyboard.
    #[must_use]
    pub fn active_shape(&self) -> &Shape {
        &self.shapes[self.active]
    }
}

impl Game for Shapes {
    fn update(&mut self, ctx: Context) {
        let shape = &mut self.shapes[self.active];

        for (x, y) in super::held_directions(&ctx, true) {
            shape.move_by(x * TRANSLATE_FACTOR, y * TRANSLATE_FACTOR);
        }

        if ctx.key_held(KeyCode::KeyQ) {
            shape.theta -= ROTATE_FACTOR;
        }
        if ctx.key_held(KeyCode::KeyE) {
            shape.theta += ROTATE_FACTOR;
        }

        if ctx.key_pressed(KeyCode::Space) {
            self.active = (self.active + 1) % self.shapes.len();

            log::debug!("Cycled to shape {}", self.shapes[self.active].id);
        }

        if ctx.mouse_pressed(MouseButton::Left) {
            if let Some((x, y)) = ctx.cursor_position() {
                if let Some(index) = super::topmost(&self.shapes, |shape| shape.contains(x, y)) {
                    log::debug!("Selected shape {}", self.shapes[index].id);

                    self.active = index;
                }
            }
        }

        super::handle_window_keys(&ctx);
    }

    fn render(&mut self, ctx: Context) {
        ctx.debug_print(&format!("Active shape: {}", self.active_shape().id));

        for shape in &self.shapes {
            shape.draw(&ctx);
        }
    }
}
