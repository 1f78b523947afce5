//! Polygons built from vertices and triangle indices, rasterized into images once at start-up.

use miette::Result;
use winit::{event::MouseButton, keyboard::KeyCode};

use super::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::{color::Rgba, Config, Context, Game, Image, Mesh};

/// Pixels a polygon moves every update tick.
const TRANSLATE_FACTOR: i32 = 10;

/// Radians a polygon rotates every update tick.
const ROTATE_FACTOR: f32 = 0.05;

/// Radius of every polygon.
const RADIUS: u32 = 20;

/// Window settings for this demo.
#[must_use]
pub fn config() -> Config {
    Config::default()
        .with_title("Polygon Making")
        .with_buffer_size(SCREEN_WIDTH, SCREEN_HEIGHT)
}

/// Mesh rasterized into an image, drawn centered on its position.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Name shown when active.
    pub id: String,
    /// Horizontal position of the center.
    pub x: i32,
    /// Vertical position of the center.
    pub y: i32,
    /// Half of the image size.
    pub radius: u32,
    /// Clockwise rotation in radians.
    pub theta: f32,
    /// Rasterized mesh.
    image: Image,
}

impl Polygon {
    /// Generate the mesh and rasterize it in a `2 * radius` square.
    ///
    /// Three sides creates a triangle filling the square, more sides approximate a circle.
    ///
    /// # Errors
    ///
    /// - When `sides` is less than three.
    pub fn new(
        id: impl Into<String>,
        x: i32,
        y: i32,
        radius: u32,
        sides: usize,
        color: Rgba,
    ) -> Result<Self> {
        let size = radius * 2;
        let mesh = if sides == 3 {
            Mesh::triangle(size as f32, size as f32)
        } else {
            Mesh::regular_polygon(radius as f32, sides)?
        };

        let image = Image::from_mesh(size, size, &mesh, color);

        Ok(Self {
            id: id.into(),
            x,
            y,
            radius,
            theta: 0.0,
            image,
        })
    }

    /// Whether the buffer pixel hits an opaque pixel of the rotated image.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        super::hits_centered(&self.image, self.x, self.y, self.theta, (x, y))
    }

    /// Move the center, keeping it at least a radius away from the screen edges.
    pub fn move_by(&mut self, x: i32, y: i32) {
        let radius = self.radius as i32;

        self.x = super::clamp_position(self.x + x, radius, SCREEN_WIDTH as i32 - radius);
        self.y = super::clamp_position(self.y + y, radius, SCREEN_HEIGHT as i32 - radius);
    }

    /// Draw the image rotated around its center.
    pub fn draw(&self, ctx: &Context) {
        ctx.draw_image(
            &self.image,
            &super::centered_options(&self.image, self.x, self.y, self.theta),
        );
    }

    /// Rasterized mesh.
    #[must_use]
    pub const fn image(&self) -> &Image {
        &self.image
    }
}

/// Three rasterized polygons, one of them is active.
pub struct PolygonMaking {
    /// All polygons, the last one is drawn on top.
    polygons: Vec<Polygon>,
    /// Index of the polygon controlled by the keyboard.
    active: usize,
}

impl PolygonMaking {
    /// Generate the triangle, pentagon and circle.
    ///
    /// # Errors
    ///
    /// - When a polygon can't be generated.
    pub fn new() -> Result<Self> {
        let polygons = vec![
            Polygon::new("Triangle", 0, 10, RADIUS, 3, Rgba::WHITE)?,
            Polygon::new("Pentagon", 50, 50, RADIUS, 5, Rgba::RED)?,
            Polygon::new("Circle", 100, 100, RADIUS, 8, Rgba::GREEN)?,
        ];
        let active = 0;

        Ok(Self { polygons, active })
    }

    /// All polygons in draw order.
    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Polygon controlled by the keyboard.
    #[must_use]
    pub fn active_polygon(&self) -> &Polygon {
        &self.polygons[self.active]
    }
}

impl Game for PolygonMaking {
    fn update(&mut self, ctx: Context) {
        let polygon = &mut self.polygons[self.active];

        for (x, y) in super::held_directions(&ctx, true) {
            polygon.move_by(x * TRANSLATE_FACTOR, y * TRANSLATE_FACTOR);
        }

        if ctx.key_held(KeyCode::KeyQ) {
            polygon.theta -= ROTATE_FACTOR;
        }
        if ctx.key_held(KeyCode::KeyE) {
            polygon.theta += ROTATE_FACTOR;
        }

        if ctx.key_pressed(KeyCode::Space) {
            self.active = (self.active + 1) % self.polygons.len();

            log::debug!("Cycled to polygon {}", self.polygons[self.active].id);
        }

        if ctx.mouse_pressed(MouseButton::Left) {
            if let Some((x, y)) = ctx.cursor_position() {
                if let Some(index) =
                    super::topmost(&self.polygons, |polygon| polygon.contains(x, y))
                {
                    log::debug!("Selected polygon {}", self.polygons[index].id);

                    self.active = index;
                }
            }
        }

        super::handle_window_keys(&ctx);
    }

    fn render(&mut self, ctx: Context) {
        ctx.debug_print(&format!("Active polygon: {}", self.active_polygon().id));

        for polygon in &self.polygons {
            polygon.draw(&ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Polygon, PolygonMaking};
    use crate::{
        color::Rgba,
        demos::{SCREEN_HEIGHT, SCREEN_WIDTH},
    };

    #[test]
    fn rasterized_polygons() {
        let demo = PolygonMaking::new().unwrap();
        assert_eq!(demo.polygons().len(), 3);

        for polygon in demo.polygons() {
            assert_eq!(polygon.image().size(), (40, 40));
            // The center is always filled
            assert!(polygon.image().at(20, 20).is_visible());
        }

        // Triangle points up, so the top corners are empty
        let triangle = demo.polygons()[0].image();
        assert!(!triangle.at(1, 1).is_visible());
        assert!(!triangle.at(38, 1).is_visible());
        assert!(triangle.at(20, 38).is_visible());

        // First corner of the octagon points right
        let circle = demo.polygons()[2].image();
        assert_eq!(circle.at(20, 20), Rgba::GREEN);
        assert!(circle.at(38, 20).is_visible());
        assert!(!circle.at(1, 1).is_visible());
    }

    #[test]
    fn too_few_sides() {
        assert!(Polygon::new("Line", 0, 0, 20, 2, Rgba::WHITE).is_err());
    }

    #[test]
    fn centre_clamped_by_radius() {
        let mut polygon = Polygon::new("Pentagon", 50, 50, 20, 5, Rgba::RED).unwrap();

        polygon.move_by(-100, -100);
        assert_eq!((polygon.x, polygon.y), (20, 20));

        polygon.move_by(10_000, 10_000);
        assert_eq!(
            (polygon.x, polygon.y),
            (SCREEN_WIDTH as i32 - 20, SCREEN_HEIGHT as i32 - 20)
        );
    }
}
