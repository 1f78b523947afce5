//! The tech demos, each a [`crate::Game`] exercising a single engine feature.
//!
//! | Demo | Feature |
//! | --- | --- |
//! | [`basic_input`] | Selecting sprites by their opaque pixels, moving them with the arrow keys |
//! | [`shapes`] | Generated shapes rotating around their center |
//! | [`polygon_making`] | Polygons rasterized from triangle fans |
//! | [`connect_lines`] | Random blocks connected by lines |
//! | [`starfield`] | Two layer parallax scrolling with wrap-around |
//! | [`turns`] | Turn counter incremented once per key press |
//!
//! All demos exit when 'Escape' is pressed and toggle fullscreen with 'F'.

pub mod basic_input;
pub mod connect_lines;
pub mod polygon_making;
pub mod shapes;
pub mod starfield;
pub mod turns;

use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::{canvas::DrawOptions, Context, Image};

/// Horizontal size of the buffer for most demos.
pub const SCREEN_WIDTH: u32 = 640;
/// Vertical size of the buffer for most demos.
pub const SCREEN_HEIGHT: u32 = 480;

/// Direction keys with their alternative on the left hand and the step they represent.
const DIRECTIONS: [(KeyCode, KeyCode, (i32, i32)); 4] = [
    (KeyCode::ArrowUp, KeyCode::KeyW, (0, -1)),
    (KeyCode::ArrowDown, KeyCode::KeyS, (0, 1)),
    (KeyCode::ArrowLeft, KeyCode::KeyA, (-1, 0)),
    (KeyCode::ArrowRight, KeyCode::KeyD, (1, 0)),
];

/// Unit step for every direction key being held this tick.
///
/// Opposite directions both count when held at the same time.
///
/// # Arguments
///
/// * `ctx` - Context to read the keys from.
/// * `with_wasd` - Also accept the WASD keys next to the arrow keys.
pub(crate) fn held_directions(
    ctx: &Context,
    with_wasd: bool,
) -> impl Iterator<Item = (i32, i32)> + '_ {
    DIRECTIONS
        .into_iter()
        .filter(move |(arrow, letter, _)| {
            ctx.key_held(*arrow) || (with_wasd && ctx.key_held(*letter))
        })
        .map(|(_, _, step)| step)
}

/// Handle the keys every demo shares: 'F' toggles fullscreen and 'Escape' exits.
pub(crate) fn handle_window_keys(ctx: &Context) {
    if ctx.key_pressed(KeyCode::KeyF) {
        ctx.toggle_fullscreen();
    }

    if ctx.key_pressed(KeyCode::Escape) {
        ctx.exit();
    }
}

/// Index of the last entity the cursor hits.
///
/// Entities are drawn first to last, so the last one is on top.
pub fn topmost<T>(entities: &[T], hit: impl FnMut(&T) -> bool) -> Option<usize> {
    entities.iter().rposition(hit)
}

/// Keep a coordinate between two bounds.
///
/// Unlike [`i32::clamp`] this doesn't panic when the entity is bigger than the screen, the upper bound wins then.
#[inline]
#[must_use]
pub const fn clamp_position(value: i32, min: i32, max: i32) -> i32 {
    let value = if value < min { min } else { value };

    if value > max {
        max
    } else {
        value
    }
}

/// Placement of an image with its center at a position, rotated around that center.
#[must_use]
pub fn centered_options(image: &Image, x: i32, y: i32, theta: f32) -> DrawOptions {
    let (width, height) = image.size();

    DrawOptions::default()
        .translate(-(width as f32) / 2.0, -(height as f32) / 2.0)
        .rotate(theta)
        .translate(x as f32, y as f32)
}

/// Whether a buffer pixel hits an opaque pixel of an image drawn with [`centered_options`].
///
/// The pixel center is mapped back into the image through the inverse rotation.
#[must_use]
pub fn hits_centered(image: &Image, x: i32, y: i32, theta: f32, pixel: (i32, i32)) -> bool {
    let (width, height) = image.size();
    let half_size = Vec2::new(width as f32, height as f32) / 2.0;

    let offset = Vec2::new(pixel.0 as f32 + 0.5, pixel.1 as f32 + 0.5) - Vec2::new(x as f32, y as f32);
    let local = Vec2::from_angle(-theta).rotate(offset) + half_size;

    image
        .at(local.x.floor() as i32, local.y.floor() as i32)
        .is_visible()
}
