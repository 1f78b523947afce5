//! Main interface with the game.

use std::{cell::RefCell, rc::Rc, sync::Arc};

pub use winit::{event::MouseButton, keyboard::KeyCode};
use winit::window::{Fullscreen, Window};

use crate::{
    canvas::{Canvas, DrawOptions},
    color::Rgba,
    config::Config,
    image::Image,
    input::Input,
};

/// Context containing most functionality for interfacing with the game engine.
///
/// Exposed in [`crate::Game::update`] and [`crate::Game::render`].
///
/// [`Context`] is safe and cheap to clone due to being a `Rc<RefCell<..>>` under the hood.
#[derive(Clone)]
pub struct Context {
    /// Implementation of all non-primitive parts.
    inner: Rc<RefCell<ContextInner>>,
}

/// Window methods.
impl Context {
    /// Size of the buffer in pixels.
    ///
    /// This ignores any scaling.
    ///
    /// # Returns
    ///
    /// - (`width`, `height`): width and height of the drawable part of the window.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.read(|ctx| ctx.buffer.size())
    }

    /// Toggle fullscreen mode.
    ///
    /// Uses a borderless fullscreen mode, not exclusive.
    #[inline]
    pub fn toggle_fullscreen(&self) {
        self.write(|ctx| {
            ctx.fullscreen = !ctx.fullscreen;

            log::debug!("Setting fullscreen to {}", ctx.fullscreen);

            if let Some(window) = &ctx.window {
                window.set_fullscreen(if ctx.fullscreen {
                    // Enable fullscreen
                    Some(Fullscreen::Borderless(None))
                } else {
                    // Turn fullscreen off
                    None
                });
            }
        });
    }

    /// Whether the window is in fullscreen mode.
    #[inline]
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.read(|ctx| ctx.fullscreen)
    }

    /// Tell the game to exit, this will close the window and return [`crate::Shutdown::Requested`] from [`crate::Game::run`].
    ///
    /// The rest of the update function will still be executed.
    ///
    /// # Example
    ///
    /// ```
    /// use sprite_demos::{context::KeyCode, Context, Game};
    ///
    /// # struct Empty; impl Game for Empty {
    /// // In `Game::update` trait implementation
    /// // ..
    /// fn update(&mut self, ctx: Context) {
    ///   // Stop game when 'Escape' is pressed
    ///   if ctx.key_pressed(KeyCode::Escape) {
    ///     ctx.exit();
    ///   }
    /// }
    /// # fn render(&mut self, ctx: Context) {}
    /// # }
    /// ```
    #[inline]
    pub fn exit(&self) {
        self.write(|ctx| ctx.exit = true);
    }
}

/// Game state methods.
impl Context {
    /// Get the delta time in seconds for the update tick.
    ///
    /// This is a constant set by [`Config::with_updates_per_second`].
    #[inline]
    #[must_use]
    pub fn delta_time(&self) -> f32 {
        self.read(|ctx| ctx.config.update_delta_time)
    }
}

/// Input methods.
impl Context {
    /// Get the position if the mouse is inside the buffer.
    ///
    /// This is `Some(..)` if the mouse is inside the letterboxed buffer, not the entire window.
    /// The value of the coordinates corresponds to the pixel, when the buffer is scaled this also encodes the subpixel in the fractional part.
    #[inline]
    #[must_use]
    pub fn mouse(&self) -> Option<(f32, f32)> {
        self.read(|ctx| ctx.input.mouse().map(|mouse| (mouse.x, mouse.y)))
    }

    /// Get the pixel the mouse is on if it's inside the buffer.
    #[inline]
    #[must_use]
    pub fn cursor_position(&self) -> Option<(i32, i32)> {
        self.read(|ctx| {
            ctx.input
                .mouse()
                .map(|mouse| (mouse.x.floor() as i32, mouse.y.floor() as i32))
        })
    }

    /// Whether the mouse button goes from "not pressed" to "pressed".
    ///
    /// # Arguments
    ///
    /// * `mouse_button` - Mouse button to check the state of.
    #[inline]
    #[must_use]
    pub fn mouse_pressed(&self, mouse_button: MouseButton) -> bool {
        self.read(|ctx| ctx.input.mouse_pressed(mouse_button))
    }

    /// Whether the mouse button goes from "pressed" to "not pressed".
    ///
    /// # Arguments
    ///
    /// * `mouse_button` - Mouse button to check the state of.
    #[inline]
    #[must_use]
    pub fn mouse_released(&self, mouse_button: MouseButton) -> bool {
        self.read(|ctx| ctx.input.mouse_released(mouse_button))
    }

    /// Whether the mouse button is in a "pressed" state.
    ///
    /// # Arguments
    ///
    /// * `mouse_button` - Mouse button to check the state of.
    #[inline]
    #[must_use]
    pub fn mouse_held(&self, mouse_button: MouseButton) -> bool {
        self.read(|ctx| ctx.input.mouse_held(mouse_button))
    }

    /// Whether the key goes from "not pressed" to "pressed".
    ///
    /// Uses physical keys in the US layout, so for example the W key will be in the same physical key on both US and french keyboards.
    ///
    /// # Arguments
    ///
    /// * `keycode` - Key to check the state of.
    #[inline]
    #[must_use]
    pub fn key_pressed(&self, keycode: KeyCode) -> bool {
        self.read(|ctx| ctx.input.key_pressed(keycode))
    }

    /// Whether the key goes from "pressed" to "not pressed".
    ///
    /// Uses physical keys in the US layout, so for example the W key will be in the same physical key on both US and french keyboards.
    ///
    /// # Arguments
    ///
    /// * `keycode` - Key to check the state of.
    #[inline]
    #[must_use]
    pub fn key_released(&self, keycode: KeyCode) -> bool {
        self.read(|ctx| ctx.input.key_released(keycode))
    }

    /// Whether the key is in a "pressed" state.
    ///
    /// Uses physical keys in the US layout, so for example the W key will be in the same physical key on both US and french keyboards.
    ///
    /// # Arguments
    ///
    /// * `keycode` - Key to check the state of.
    #[inline]
    #[must_use]
    pub fn key_held(&self, keycode: KeyCode) -> bool {
        self.read(|ctx| ctx.input.key_held(keycode))
    }
}

/// Drawing methods.
impl Context {
    /// Draw on the buffer with the canvas.
    ///
    /// <div class="warning">
    ///
    /// The context is borrowed while drawing, calling other context methods inside the closure will panic.
    ///
    /// </div>
    ///
    /// # Example
    ///
    /// ```
    /// use sprite_demos::{glam::Vec2, Context, Rgba};
    ///
    /// fn render(ctx: Context) {
    ///     ctx.draw(|canvas| canvas.draw_line(Vec2::ZERO, Vec2::new(10.0, 10.0), Rgba::WHITE));
    /// }
    /// ```
    #[inline]
    pub fn draw<R>(&self, drawer: impl FnOnce(&mut Canvas<'_>) -> R) -> R {
        self.write(|ctx| drawer(&mut ctx.buffer.canvas()))
    }

    /// Draw an image on the buffer.
    ///
    /// # Arguments
    ///
    /// * `image` - Image to draw.
    /// * `options` - Where and how to draw the image.
    #[inline]
    pub fn draw_image(&self, image: &Image, options: &DrawOptions) {
        self.draw(|canvas| canvas.draw_image(image, options));
    }

    /// Print debug text in the top-left corner of the buffer.
    #[inline]
    pub fn debug_print(&self, text: &str) {
        self.draw(|canvas| canvas.debug_print(text));
    }
}

/// Internally used methods.
impl Context {
    /// Create a new context without a window.
    pub(crate) fn new(config: Config) -> Self {
        let context_inner = ContextInner::new(config);

        // Wrap in a reference counter so it can be passed around
        let inner = Rc::new(RefCell::new(context_inner));

        Self { inner }
    }

    /// Get a read-only reference to the inner struct.
    ///
    /// # Panics
    ///
    /// - When the inner struct is already mutably borrowed.
    #[inline]
    pub(crate) fn read<R>(&self, reader: impl FnOnce(&ContextInner) -> R) -> R {
        reader(&self.inner.borrow())
    }

    /// Get a mutable reference to the inner struct.
    ///
    /// # Panics
    ///
    /// - When the inner struct is already borrowed.
    #[inline]
    pub(crate) fn write<R>(&self, writer: impl FnOnce(&mut ContextInner) -> R) -> R {
        writer(&mut self.inner.borrow_mut())
    }
}

/// Internal wrapped implementation for [`Context`].
pub(crate) struct ContextInner {
    /// Window instance.
    ///
    /// `None` when running headless.
    pub(crate) window: Option<Arc<Window>>,
    /// Pixels drawn every render tick.
    pub(crate) buffer: Image,
    /// Keyboard and mouse state.
    pub(crate) input: Input,
    /// Whether the game wants to stop.
    pub(crate) exit: bool,
    /// Whether fullscreen mode is requested.
    pub(crate) fullscreen: bool,
    /// User supplied game configuration.
    pub(crate) config: Config,
}

impl ContextInner {
    /// Initialize the inner context.
    fn new(config: Config) -> Self {
        let buffer = Image::new(config.buffer_width, config.buffer_height);
        let input = Input::new();
        let window = None;
        let exit = false;
        let fullscreen = false;

        Self {
            window,
            buffer,
            input,
            exit,
            fullscreen,
            config,
        }
    }

    /// Clear the buffer with the configured background color.
    pub(crate) fn clear_buffer(&mut self) {
        let background = Rgba::from_argb(self.config.background_color);

        self.buffer.canvas().fill(background);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::{Context, KeyCode, MouseButton};
    use crate::{color::Rgba, config::Config};

    #[test]
    fn input_queries() {
        let ctx = Context::new(Config::default());

        ctx.write(|ctx| {
            ctx.input.set_key(KeyCode::KeyW, true);
            ctx.input.set_mouse_button(MouseButton::Right, true);
            ctx.input.set_mouse(Some(Vec2::new(10.7, 20.2)));
        });

        assert!(ctx.key_pressed(KeyCode::KeyW));
        assert!(ctx.key_held(KeyCode::KeyW));
        assert!(!ctx.key_held(KeyCode::KeyS));
        assert!(ctx.mouse_pressed(MouseButton::Right));
        assert_eq!(ctx.mouse(), Some((10.7, 20.2)));
        assert_eq!(ctx.cursor_position(), Some((10, 20)));
    }

    #[test]
    fn window_state() {
        let ctx = Context::new(Config::default().with_buffer_size(320, 240));

        assert_eq!(ctx.size(), (320, 240));

        assert!(!ctx.is_fullscreen());
        ctx.toggle_fullscreen();
        assert!(ctx.is_fullscreen());
        ctx.toggle_fullscreen();
        assert!(!ctx.is_fullscreen());

        assert!(!ctx.read(|ctx| ctx.exit));
        ctx.exit();
        assert!(ctx.read(|ctx| ctx.exit));
    }

    #[test]
    fn drawing() {
        let ctx = Context::new(Config::default().with_buffer_size(16, 16));

        ctx.write(super::ContextInner::clear_buffer);
        assert_eq!(ctx.read(|ctx| ctx.buffer.at(0, 0)), Rgba::BLACK);

        ctx.draw(|canvas| canvas.set_pixel(3, 4, Rgba::RED));
        assert_eq!(ctx.read(|ctx| ctx.buffer.at(3, 4)), Rgba::RED);

        ctx.debug_print("A");
        assert!(ctx.read(|ctx| ctx.buffer.pixels().contains(&Rgba::WHITE)));
    }
}
