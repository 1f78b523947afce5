//! Drive a game without a window.
//!
//! Input is injected directly, update ticks run on demand and frames are rendered into an [`Image`].
//! This is what the integration tests use to play the demos.
//!
//! ```
//! use sprite_demos::{context::KeyCode, Config, Context, Game, Headless, Shutdown};
//!
//! #[derive(Default)]
//! struct Counter(u32);
//!
//! impl Game for Counter {
//!     fn update(&mut self, ctx: Context) {
//!         if ctx.key_pressed(KeyCode::Space) {
//!             self.0 += 1;
//!         }
//!         if ctx.key_pressed(KeyCode::Escape) {
//!             ctx.exit();
//!         }
//!     }
//!
//!     fn render(&mut self, ctx: Context) {
//!         ctx.debug_print(&self.0.to_string());
//!     }
//! }
//!
//! let mut headless = Headless::new(Counter::default(), Config::default());
//!
//! headless.press_key(KeyCode::Space);
//! assert_eq!(headless.tick(), None);
//! assert_eq!(headless.game().0, 1);
//!
//! headless.press_key(KeyCode::Escape);
//! assert_eq!(headless.tick(), Some(Shutdown::Requested));
//! ```

use glam::Vec2;
use winit::{event::MouseButton, keyboard::KeyCode};

use crate::{
    context::{Context, ContextInner},
    Config, Game, Image, Shutdown,
};

/// Game runner without a window or a GPU.
pub struct Headless<G: Game> {
    /// Game being driven.
    game: G,
    /// Context passed to the game.
    ctx: Context,
}

impl<G: Game> Headless<G> {
    /// Setup the context and call [`Game::init`].
    #[must_use]
    pub fn new(mut game: G, config: Config) -> Self {
        let ctx = Context::new(config);

        game.init(ctx.clone());

        Self { game, ctx }
    }

    /// Start holding a key down.
    pub fn press_key(&mut self, key: KeyCode) {
        self.ctx.write(|ctx| ctx.input.set_key(key, true));
    }

    /// Let go of a key.
    pub fn release_key(&mut self, key: KeyCode) {
        self.ctx.write(|ctx| ctx.input.set_key(key, false));
    }

    /// Start holding a mouse button down.
    pub fn press_mouse(&mut self, mouse_button: MouseButton) {
        self.ctx
            .write(|ctx| ctx.input.set_mouse_button(mouse_button, true));
    }

    /// Let go of a mouse button.
    pub fn release_mouse(&mut self, mouse_button: MouseButton) {
        self.ctx
            .write(|ctx| ctx.input.set_mouse_button(mouse_button, false));
    }

    /// Move the cursor to a position on the buffer, `None` moves it off the buffer.
    pub fn move_cursor(&mut self, position: Option<(f32, f32)>) {
        self.ctx.write(|ctx| {
            ctx.input
                .set_mouse(position.map(|(x, y)| Vec2::new(x, y)));
        });
    }

    /// Click a mouse button on a buffer pixel, taking two update ticks.
    ///
    /// Returns the shutdown reason if the game exited during one of the ticks.
    pub fn click(&mut self, mouse_button: MouseButton, x: i32, y: i32) -> Option<Shutdown> {
        // Aim at the center of the pixel
        self.move_cursor(Some((x as f32 + 0.5, y as f32 + 0.5)));

        self.press_mouse(mouse_button);
        let shutdown = self.tick();
        self.release_mouse(mouse_button);

        shutdown.or_else(|| self.tick())
    }

    /// Run a single update tick.
    ///
    /// Returns [`Shutdown::Requested`] when the game called [`Context::exit`].
    pub fn tick(&mut self) -> Option<Shutdown> {
        self.game.update(self.ctx.clone());

        // Update the input so pressed and released events can be handled
        self.ctx.write(|ctx| ctx.input.update());

        self.ctx
            .read(|ctx| ctx.exit)
            .then_some(Shutdown::Requested)
    }

    /// Run multiple update ticks, stopping early when the game exits.
    pub fn tick_times(&mut self, ticks: usize) -> Option<Shutdown> {
        (0..ticks).find_map(|_| self.tick())
    }

    /// Clear the buffer, call [`Game::render`] and return a copy of the buffer.
    #[must_use]
    pub fn render(&mut self) -> Image {
        self.ctx.write(ContextInner::clear_buffer);

        self.game.render(self.ctx.clone());

        self.ctx.read(|ctx| ctx.buffer.clone())
    }

    /// Game being driven.
    #[inline]
    #[must_use]
    pub const fn game(&self) -> &G {
        &self.game
    }

    /// Mutable game being driven.
    #[inline]
    #[must_use]
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    /// Context passed to the game.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.ctx
    }
}
