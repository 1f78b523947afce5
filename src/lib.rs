#![forbid(unsafe_code)]

//! Small tech demos on top of a tiny 2D pixel engine.
//!
//! # Features
//!
//! - Window creation with independent update and render game loop.
//! - Software canvas with image blitting, triangle rasterization, lines and debug text.
//! - Pixel-perfect integer scaled presentation on the GPU.
//! - Edge-triggered keyboard and mouse input.
//! - Headless back-end for driving games in tests.
//!
//! # Usage
//!
//! There is a single trait [`Game`] with two required functions, [`Game::update`] and [`Game::render`], that need to be implemented for a game state object.
//!
//! ```
//! use sprite_demos::{Config, Context, Game};
//!
//! struct MyGame;
//!
//! impl Game for MyGame {
//!     fn update(&mut self, ctx: Context) {
//!         // ..
//!     }
//!
//!     fn render(&mut self, ctx: Context) {
//!         // ..
//!     }
//! }
//!
//! # fn try_main() -> miette::Result<()> {
//! // In main
//!
//! let game = MyGame;
//!
//! game.run(Config::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example
//!
//! This example will show a window with a counter that's incremented when pressing the left mouse button.
//! When the 'Escape' key is pressed the game will exit and the window will close.
//!
//! ```
//! use sprite_demos::{
//!   Game, Context, Config, Shutdown,
//!   context::{MouseButton, KeyCode},
//! };
//!
//! /// Object holding all game state.
//! struct MyGame {
//!   /// A simple counter we increment by clicking on the screen.
//!   counter: u32,
//! }
//!
//! impl Game for MyGame {
//!   fn update(&mut self, ctx: Context) {
//!     // Increment the counter when we press the left mouse button
//!     if ctx.mouse_pressed(MouseButton::Left) {
//!       self.counter += 1;
//!     }
//!
//!     // Exit the game if 'Escape' is pressed
//!     if ctx.key_pressed(KeyCode::Escape) {
//!       ctx.exit();
//!     }
//!   }
//!
//!   fn render(&mut self, ctx: Context) {
//!     // Display the counter in the top-left corner
//!     ctx.debug_print(&format!("Counter: {}", self.counter));
//!   }
//! }
//!
//! # fn try_main() -> miette::Result<()> {
//! // In main
//!
//! // Initialize the game state
//! let game = MyGame { counter: 0 };
//!
//! // Run the game until exit is requested
//! if game.run(Config::default().with_title("My Game"))? == Shutdown::Requested {
//!   println!("Good bye!");
//! }
//! # Ok(())
//! # }
//! ```

pub mod canvas;
pub mod color;
pub mod config;
pub mod context;
pub mod demos;
mod graphics;
pub mod headless;
pub mod image;
mod input;
pub mod mesh;
pub mod random;

use std::sync::Arc;

pub use canvas::{Canvas, DrawOptions};
pub use color::{ColorScale, Rgba};
pub use config::Config;
pub use context::Context;
pub use fastrand;
pub use glam;
pub use headless::Headless;
pub use image::Image;
pub use mesh::Mesh;
use miette::{IntoDiagnostic, Report, Result, WrapErr};
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::graphics::Graphics;

/// Maximum of the amount of `update` calls for a single `render` call.
const MAX_UPDATE_CALLS_PER_RENDER: f32 = 20.0;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Why the game stopped running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// The game called [`Context::exit`].
    Requested,
    /// The window was closed by the user or the OS.
    WindowClosed,
}

/// Main entrypoint containing game state for running the game.
///
/// This is the main interface with the game engine.
///
/// See [`Context`] for all functions interfacing with the game engine from both functions.
pub trait Game: Sized
where
    Self: 'static,
{
    /// A single update tick in a fixed timestep.
    ///
    /// For most games this is the place where you want to handle input and move entities.
    /// Runs [`Config::with_updates_per_second`] times a second, independent of the frame rate.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Game context, used to obtain information and mutate the game state.
    ///
    /// # Example
    ///
    /// ```
    /// use sprite_demos::{context::KeyCode, Context, Game};
    ///
    /// struct MyGame;
    ///
    /// impl Game for MyGame {
    ///     fn update(&mut self, ctx: Context) {
    ///         // Stop the game and close the window when 'Escape' is pressed
    ///         if ctx.key_pressed(KeyCode::Escape) {
    ///             ctx.exit();
    ///         }
    ///     }
    ///
    ///     fn render(&mut self, ctx: Context) {
    ///         // ..
    ///     }
    /// }
    /// ```
    fn update(&mut self, ctx: Context);

    /// A single render tick.
    ///
    /// This is the place to draw everything, the buffer is cleared with [`Config::background_color`] before it's called.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Game context, used to obtain information and draw on the buffer.
    fn render(&mut self, ctx: Context);

    /// Called once when the window and the GPU are set up, before the first update tick.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Game context.
    #[inline(always)]
    #[allow(unused_variables)]
    fn init(&mut self, ctx: Context) {}

    /// Run the game, spawning the window.
    ///
    /// <div class="warning">
    ///
    /// Don't implement/override this method.
    ///
    /// </div>
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the window, can be used to set the buffer size, the window title and other things.
    ///
    /// # Returns
    ///
    /// - [`Shutdown::Requested`] when the game called [`Context::exit`].
    /// - [`Shutdown::WindowClosed`] when the window was closed.
    ///
    /// # Errors
    ///
    /// - When the event loop or the window could not be created.
    /// - If no GPU could be found or accessed.
    fn run(self, config: Config) -> Result<Shutdown> {
        init_logger();

        log::info!("Starting '{}'", config.title);

        // Create a polling event loop, which redraws the window whenever possible
        let event_loop = EventLoop::new()
            .into_diagnostic()
            .wrap_err("Error creating event loop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = State::new(self, config);

        // Run the game
        event_loop
            .run_app(&mut state)
            .into_diagnostic()
            .wrap_err("Error running event loop")?;

        state.finish()
    }
}

/// Setup logging with `RUST_LOG`, falling back to only showing warnings and errors.
///
/// Does nothing when a logger is already set.
fn init_logger() {
    let result = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER),
    )
    .try_init();

    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}

/// State of setting up a window that can still be uninitialized.
///
/// All optional fields are tied to the window creation flow of winit.
struct State<G: Game> {
    /// Game context.
    ctx: Context,
    /// Window and GPU presentation.
    ///
    /// `None` if the window still needs to be initialized.
    graphics: Option<Graphics>,
    /// User supplied game.
    game: G,
    /// User supplied configuration.
    config: Config,
    /// Time for calculating the update rate.
    last_time: Instant,
    /// Timestep accumulator for the update rate.
    accumulator: f32,
    /// Why the game stopped.
    shutdown: Option<Shutdown>,
    /// Error that happened inside the event loop.
    error: Option<Report>,
}

impl<G: Game> State<G> {
    /// Setup the state before the window exists.
    fn new(game: G, config: Config) -> Self {
        // Setup the timestep variables for calculating the update loop
        let accumulator = 0.0;
        let last_time = Instant::now();

        let ctx = Context::new(config.clone());
        let graphics = None;
        let shutdown = None;
        let error = None;

        Self {
            ctx,
            graphics,
            game,
            config,
            last_time,
            accumulator,
            shutdown,
            error,
        }
    }

    /// Create the window and setup the GPU on it.
    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<(Arc<Window>, Graphics)> {
        let width = f64::from(self.config.buffer_width);
        let height = f64::from(self.config.buffer_height);
        let scaling = f64::from(self.config.scaling);

        // Define the properties of the window
        let window_attributes = WindowAttributes::default()
            .with_title(&self.config.title)
            // Apply scaling for the requested size
            .with_inner_size(LogicalSize::new(width * scaling, height * scaling))
            // Don't allow the window to be smaller than the pixel size
            .with_min_inner_size(LogicalSize::new(width, height));

        // Spawn a new window using the event loop
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .into_diagnostic()
                .wrap_err("Error creating window")?,
        );

        // Because pollster returns the value we can set it immediately
        let graphics = pollster::block_on(Graphics::new(&self.config, Arc::clone(&window)))
            .wrap_err("Error setting up graphics")?;

        Ok((window, graphics))
    }

    /// Run as many update ticks as fit in the elapsed time, followed by a single render tick.
    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        profiling::scope!("Tick");

        // Update the timestep
        let current_time = Instant::now();
        let frame_time = (current_time - self.last_time)
            .as_secs_f32()
            // Ensure that the update loop cannot be called too often
            .min(MAX_UPDATE_CALLS_PER_RENDER * self.config.update_delta_time);
        self.last_time = current_time;

        self.accumulator += frame_time
            // Ensure the frametime will never surpass this amount
            .min(self.config.max_frame_time_secs);

        // Call the user update function with the context
        while self.accumulator >= self.config.update_delta_time {
            profiling::scope!("Update");

            // Call the implemented update function on the 'Game' trait
            self.game.update(self.ctx.clone());

            // Mark this tick as executed
            self.accumulator -= self.config.update_delta_time;

            // Update the input so pressed and released events can be handled
            self.ctx.write(|ctx| ctx.input.update());
        }

        if self.ctx.read(|ctx| ctx.exit) {
            log::info!("Exit requested");

            // Tell winit that we want to exit
            self.shutdown = Some(Shutdown::Requested);
            event_loop.exit();

            return;
        }

        // Only call render loop when the window is not minimized
        let minimized = self.ctx.read(|ctx| {
            ctx.window
                .as_ref()
                .and_then(|window| window.is_minimized())
                .unwrap_or(false)
        });
        if minimized {
            return;
        }

        {
            profiling::scope!("Render");

            self.ctx.write(context::ContextInner::clear_buffer);

            // Call the user render function with the context
            self.game.render(self.ctx.clone());
        }

        // Draw the buffer on the window
        if let Some(graphics) = &mut self.graphics {
            self.ctx.read(|ctx| graphics.render(&ctx.buffer));
        }

        profiling::finish_frame!();
    }

    /// Return why the event loop stopped.
    fn finish(self) -> Result<Shutdown> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let shutdown = self.shutdown.unwrap_or(Shutdown::WindowClosed);
        log::info!("Stopped with {shutdown:?}");

        Ok(shutdown)
    }
}

impl<G: Game> ApplicationHandler for State<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Setup the window
        if self.graphics.is_some() {
            return;
        }

        match self.create_window(event_loop) {
            Ok((window, graphics)) => {
                self.ctx.write(|ctx| ctx.window = Some(window));
                self.graphics = Some(graphics);

                // Don't count the setup time for the first tick
                self.last_time = Instant::now();

                // Call user passed init function
                self.game.init(self.ctx.clone());
            }
            Err(err) => {
                // Return the error from the run function
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Do nothing if the window is not set up yet
        let Some(graphics) = &mut self.graphics else {
            return;
        };

        // Handle the window events
        match event {
            // Handle the update loop and render loop
            WindowEvent::RedrawRequested => self.tick(event_loop),
            // Resize the render surface
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                // Resize the GPU surface
                graphics.resize(width, height);

                // On MacOS the window needs to be redrawn manually after resizing
                #[cfg(target_os = "macos")]
                self.ctx.read(|ctx| {
                    if let Some(window) = &ctx.window {
                        window.request_redraw();
                    }
                });
            }
            // Close the window if requested
            WindowEvent::CloseRequested => {
                log::info!("Window closed");

                // Tell winit that we want to exit
                self.shutdown = Some(Shutdown::WindowClosed);
                event_loop.exit();
            }
            // Handle other window events with the input manager
            WindowEvent::KeyboardInput { .. }
            | WindowEvent::CursorMoved { .. }
            | WindowEvent::CursorLeft { .. }
            | WindowEvent::MouseInput { .. } => {
                let letterbox = graphics.letterbox();
                self.ctx
                    .write(|ctx| ctx.input.handle_event(&event, letterbox));
            }
            // Ignore the rest of the events
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Ensure the control flow doesn't change
        event_loop.set_control_flow(ControlFlow::Poll);

        // Application is about to wait, request a redraw
        self.ctx.read(|ctx| {
            if let Some(window) = &ctx.window {
                window.request_redraw();
            }
        });
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // The surface must be destroyed before the window
        self.graphics = None;
        self.ctx.write(|ctx| ctx.window = None);
    }
}
