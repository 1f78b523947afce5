//! Randomly placed blocks that can be connected with lines.

use fastrand::Rng;
use glam::Vec2;
use winit::event::MouseButton;

use super::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::{
    canvas::DrawOptions,
    color::{ColorScale, Rgba},
    random, Config, Context, Game, Image,
};

/// Pixels a block moves every update tick.
const TRANSLATE_FACTOR: i32 = 1;

/// Amount of blocks.
pub const BLOCKS: usize = 50;

/// Width and height of a block.
pub const BLOCK_SIZE: u32 = 3;

/// Color of the selected block.
const SELECTED_COLOR: Rgba = Rgba::GREEN;

/// Color of the connection lines.
const LINE_COLOR: Rgba = Rgba::WHITE;

/// Window settings for this demo.
#[must_use]
pub fn config() -> Config {
    Config::default()
        .with_title("Connect Lines")
        .with_buffer_size(SCREEN_WIDTH, SCREEN_HEIGHT)
}

/// Small square.
#[derive(Debug, Clone)]
pub struct Block {
    /// Name shown when selected.
    pub id: String,
    /// Horizontal position of the top-left corner.
    pub x: i32,
    /// Vertical position of the top-left corner.
    pub y: i32,
    /// Width and height.
    pub size: u32,
    /// Color when not selected.
    pub color: Rgba,
    /// White square tinted when drawing.
    image: Image,
}

impl Block {
    /// Create a square block with its top-left corner at a position.
    #[must_use]
    pub fn new(id: usize, x: i32, y: i32, size: u32, color: Rgba) -> Self {
        Self {
            id: id.to_string(),
            x,
            y,
            size,
            color,
            image: Image::filled(size, size, Rgba::WHITE),
        }
    }

    /// Whether the buffer pixel is on the block, the far edges included.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        let size = self.size as i32;

        x >= self.x && x <= self.x + size && y >= self.y && y <= self.y + size
    }

    /// Move the block, keeping it fully on the screen.
    pub fn move_by(&mut self, x: i32, y: i32) {
        let size = self.size as i32;

        self.x = super::clamp_position(self.x + x, 0, SCREEN_WIDTH as i32 - size);
        self.y = super::clamp_position(self.y + y, 0, SCREEN_HEIGHT as i32 - size);
    }

    /// Pixel in the middle of the block, where lines connect.
    #[must_use]
    pub const fn center(&self) -> (i32, i32) {
        let half_size = (self.size / 2) as i32;

        (self.x + half_size, self.y + half_size)
    }

    /// Draw the block, tinted with a color.
    pub fn draw(&self, ctx: &Context, color: Rgba) {
        ctx.draw_image(
            &self.image,
            &DrawOptions::default()
                .translate(self.x as f32, self.y as f32)
                .scale_color(ColorScale::from(color)),
        );
    }
}

/// Blocks scattered over the screen with lines between connected ones.
pub struct ConnectLines {
    /// All blocks, the last one is drawn on top.
    blocks: Vec<Block>,
    /// Pairs of block indices connected by a line.
    connections: Vec<(usize, usize)>,
    /// Index of the block moved by the keyboard.
    selected: usize,
}

impl ConnectLines {
    /// Scatter the blocks, every block gets a unique column and a unique row.
    #[must_use]
    pub fn new(rng: &mut Rng) -> Self {
        let xs = random::permutation_prefix(rng, SCREEN_WIDTH as usize, BLOCKS);
        let ys = random::permutation_prefix(rng, SCREEN_HEIGHT as usize, BLOCKS);

        let blocks = xs
            .into_iter()
            .zip(ys)
            .enumerate()
            .map(|(id, (x, y))| Block::new(id, x as i32, y as i32, BLOCK_SIZE, Rgba::WHITE))
            .collect();
        let connections = Vec::new();
        let selected = 0;

        Self {
            blocks,
            connections,
            selected,
        }
    }

    /// Connect two blocks with a line.
    ///
    /// Returns `false` when the blocks are the same or already connected in either direction.
    pub fn connect(&mut self, first: usize, second: usize) -> bool {
        if first == second
            || self.connections.iter().any(|&connection| {
                connection == (first, second) || connection == (second, first)
            })
        {
            return false;
        }

        log::debug!(
            "Connecting block {} to block {}",
            self.blocks[first].id,
            self.blocks[second].id
        );

        self.connections.push((first, second));

        true
    }

    /// All blocks in draw order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Pairs of connected block indices.
    #[must_use]
    pub fn connections(&self) -> &[(usize, usize)] {
        &self.connections
    }

    /// Index of the block moved by the keyboard.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Topmost block under the cursor.
    fn block_under_cursor(&self, ctx: &Context) -> Option<usize> {
        let (x, y) = ctx.cursor_position()?;

        super::topmost(&self.blocks, |block| block.contains(x, y))
    }
}

impl Game for ConnectLines {
    fn update(&mut self, ctx: Context) {
        for (x, y) in super::held_directions(&ctx, true) {
            self.blocks[self.selected].move_by(x * TRANSLATE_FACTOR, y * TRANSLATE_FACTOR);
        }

        if ctx.mouse_pressed(MouseButton::Left) {
            if let Some(index) = self.block_under_cursor(&ctx) {
                log::debug!("Selected block {}", self.blocks[index].id);

                self.selected = index;
            }
        }

        if ctx.mouse_pressed(MouseButton::Right) {
            if let Some(index) = self.block_under_cursor(&ctx) {
                self.connect(self.selected, index);
            }
        }

        super::handle_window_keys(&ctx);
    }

    fn render(&mut self, ctx: Context) {
        ctx.debug_print(&format!("Active block: {}", self.blocks[self.selected].id));

        // Lines go below the blocks
        ctx.draw(|canvas| {
            for &(first, second) in &self.connections {
                let (start_x, start_y) = self.blocks[first].center();
                let (end_x, end_y) = self.blocks[second].center();

                canvas.draw_line(
                    Vec2::new(start_x as f32, start_y as f32),
                    Vec2::new(end_x as f32, end_y as f32),
                    LINE_COLOR,
                );
            }
        });

        for (index, block) in self.blocks.iter().enumerate() {
            let color = if index == self.selected {
                SELECTED_COLOR
            } else {
                block.color
            };

            block.draw(&ctx, color);
        }
    }
}
