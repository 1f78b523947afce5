//! Show the canvas in the window with the GPU.

pub(crate) mod gpu;
pub(crate) mod letterbox;
pub(crate) mod present;

use std::sync::Arc;

use miette::Result;
use winit::window::Window;

use self::{gpu::Gpu, letterbox::Letterbox, present::PresentState};
use crate::{config::Config, image::Image};

/// Convert an `u32` color to a WGPU [`wgpu::Color`] taking in account sRGB.
fn u32_to_wgpu_color(argb: u32, srgb: bool) -> wgpu::Color {
    let [a, r, g, b] = argb.to_be_bytes().map(|channel| f64::from(channel) / 255.0);

    if srgb {
        // Convert to linear space, the surface converts it back
        wgpu::Color {
            a,
            r: r.powf(2.2),
            g: g.powf(2.2),
            b: b.powf(2.2),
        }
    } else {
        wgpu::Color { a, r, g, b }
    }
}

/// Everything needed to show the buffer on the window.
pub(crate) struct Graphics {
    /// GPU surface and device.
    gpu: Gpu,
    /// Pipeline drawing the buffer.
    present: PresentState,
    /// Size of the buffer in pixels.
    buffer_size: (u32, u32),
    /// Where the buffer is drawn on the window.
    letterbox: Letterbox,
    /// Clear color of the area around the letterbox.
    viewport_color: wgpu::Color,
}

impl Graphics {
    /// Setup the GPU on the window.
    ///
    /// # Errors
    ///
    /// - When no surface, adapter or device can be created.
    pub(crate) async fn new(config: &Config, window: Arc<Window>) -> Result<Self> {
        let buffer_size = (config.buffer_width, config.buffer_height);

        let gpu = Gpu::new(window, config.vsync).await?;
        let present = PresentState::new(buffer_size, &gpu.device, gpu.format());
        let letterbox = Letterbox::new(buffer_size, gpu.screen_size());
        let viewport_color = u32_to_wgpu_color(config.viewport_color, gpu.format().is_srgb());

        Ok(Self {
            gpu,
            present,
            buffer_size,
            letterbox,
            viewport_color,
        })
    }

    /// Upload the buffer and show it on the window.
    pub(crate) fn render(&mut self, buffer: &Image) {
        self.present.upload(&self.gpu.queue, buffer);

        let screen_size = self.gpu.screen_size();
        let Some(mut frame) = self.gpu.start() else {
            return;
        };

        self.present
            .render(&mut frame, &self.letterbox, screen_size, self.viewport_color);

        frame.present();
    }

    /// Resize the surface and recalculate where the buffer is drawn.
    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);

        self.letterbox = Letterbox::new(self.buffer_size, self.gpu.screen_size());
    }

    /// Where the buffer is drawn on the window.
    #[inline]
    pub(crate) const fn letterbox(&self) -> &Letterbox {
        &self.letterbox
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn wgpu_color() {
        let color = super::u32_to_wgpu_color(0xFF00_FF00, false);
        assert!((color.a - 1.0).abs() < f64::EPSILON);
        assert!(color.r.abs() < f64::EPSILON);
        assert!((color.g - 1.0).abs() < f64::EPSILON);

        let dark = super::u32_to_wgpu_color(0xFF20_2020, true);
        assert!(dark.r < 0x20 as f64 / 255.0);
    }
}
