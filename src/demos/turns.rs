//! Turn based loop, the world only advances when the player ends the turn.

use winit::keyboard::KeyCode;

use crate::{Config, Context, Game};

/// Window settings for this demo, a small buffer scaled up twice.
#[must_use]
pub fn config() -> Config {
    Config::default()
        .with_title("Turns")
        .with_buffer_size(320, 240)
        .with_scaling(2.0)
}

/// Counts the turns, a turn ends when 'Space' is pressed.
#[derive(Debug, Default)]
pub struct Turns {
    /// Amount of turns ended.
    turn: u32,
}

impl Turns {
    /// Start at turn zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { turn: 0 }
    }

    /// Amount of turns ended.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }
}

impl Game for Turns {
    fn update(&mut self, ctx: Context) {
        // Holding the key down only counts once
        if ctx.key_pressed(KeyCode::Space) {
            self.turn += 1;

            log::debug!("Turn {}", self.turn);
        }

        super::handle_window_keys(&ctx);
    }

    fn render(&mut self, ctx: Context) {
        ctx.debug_print(&format!("Turn: {}", self.turn));
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn small_scaled_window() {
        let config = super::config();

        assert_eq!(config.title, "Turns");
        assert_eq!((config.buffer_width, config.buffer_height), (320, 240));
        assert!((config.scaling - 2.0).abs() < f32::EPSILON);
    }
}
