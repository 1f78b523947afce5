//! Fit the buffer inside the window with integer scaling.

use glam::Vec2;

/// Area of the window the buffer is drawn in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Letterbox {
    /// Top-left corner in window pixels.
    pub(crate) origin: Vec2,
    /// Size in window pixels, never bigger than the window.
    pub(crate) size: Vec2,
    /// Factor from buffer pixels to window pixels.
    ///
    /// A whole number when the buffer fits in the window, a fraction below one when it doesn't.
    pub(crate) scale: f32,
}

impl Letterbox {
    /// Calculate the biggest centered area with an integer scale that fits in the window.
    ///
    /// When the window is too small for the buffer it is shrunk to fit instead.
    pub(crate) fn new(buffer_size: (u32, u32), window_size: (u32, u32)) -> Self {
        let buffer = Vec2::new(buffer_size.0.max(1) as f32, buffer_size.1.max(1) as f32);
        let window = Vec2::new(window_size.0 as f32, window_size.1 as f32);

        // Scale of the axis that fits first
        let fit = (window / buffer).min_element();
        let scale = if fit >= 1.0 { fit.floor() } else { fit };

        // Never go outside of the window because of rounding
        let size = (buffer * scale).floor().min(window);

        // Center the scaled rectangle inside the window
        let origin = ((window - size) / 2.0).floor();

        log::debug!(
            "Setting new letterbox to ({}:{} x {}:{}) with {scale} scaling",
            origin.x,
            origin.y,
            size.x,
            size.y
        );

        Self {
            origin,
            size,
            scale,
        }
    }

    /// Map a window coordinate to a coordinate on the buffer.
    ///
    /// Returns `None` when the coordinate is outside of the letterbox.
    pub(crate) fn map_coordinate(&self, position: Vec2) -> Option<Vec2> {
        let relative = position - self.origin;
        if relative.x < 0.0 || relative.y < 0.0 || relative.x >= self.size.x || relative.y >= self.size.y
        {
            return None;
        }

        Some(relative / self.scale)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::Letterbox;

    #[test]
    fn exact_fit() {
        let letterbox = Letterbox::new((320, 240), (640, 480));

        assert!((letterbox.scale - 2.0).abs() < f32::EPSILON);
        assert_eq!(letterbox.origin, Vec2::ZERO);
        assert_eq!(letterbox.size, Vec2::new(640.0, 480.0));
        assert_eq!(
            letterbox.map_coordinate(Vec2::new(100.0, 50.0)),
            Some(Vec2::new(50.0, 25.0))
        );
    }

    #[test]
    fn wide_window_has_bars_on_the_sides() {
        let letterbox = Letterbox::new((640, 480), (1000, 480));

        assert!((letterbox.scale - 1.0).abs() < f32::EPSILON);
        assert_eq!(letterbox.origin, Vec2::new(180.0, 0.0));
        assert_eq!(letterbox.map_coordinate(Vec2::new(100.0, 10.0)), None);
        assert_eq!(
            letterbox.map_coordinate(Vec2::new(180.0, 10.0)),
            Some(Vec2::new(0.0, 10.0))
        );
        assert_eq!(letterbox.map_coordinate(Vec2::new(820.0, 10.0)), None);
    }

    #[test]
    fn small_window_shrinks_the_buffer() {
        let letterbox = Letterbox::new((640, 480), (320, 240));

        assert!((letterbox.scale - 0.5).abs() < f32::EPSILON);
        assert_eq!(letterbox.origin, Vec2::ZERO);
        assert_eq!(letterbox.size, Vec2::new(320.0, 240.0));
        assert_eq!(
            letterbox.map_coordinate(Vec2::new(100.0, 50.0)),
            Some(Vec2::new(200.0, 100.0))
        );
    }

    #[test]
    fn short_window_shrinks_and_centers() {
        let letterbox = Letterbox::new((640, 480), (1000, 400));

        // Height decides, 400 / 480
        assert!((letterbox.scale - 400.0 / 480.0).abs() < 1e-6);
        assert_eq!(letterbox.size, Vec2::new(533.0, 400.0));
        assert_eq!(letterbox.origin, Vec2::new(233.0, 0.0));

        // Drawn area stays inside the window
        let end = letterbox.origin + letterbox.size;
        assert!(end.x <= 1000.0 && end.y <= 400.0);

        // The bars on the side are not part of the buffer
        assert_eq!(letterbox.map_coordinate(Vec2::new(100.0, 50.0)), None);

        // Inside the drawn area the cursor lands on the shown pixel
        let mapped = letterbox
            .map_coordinate(Vec2::new(233.0 + 100.0, 50.0))
            .unwrap();
        assert!((mapped - Vec2::new(120.0, 60.0)).length() < 1e-3);
        let bottom_right = letterbox
            .map_coordinate(Vec2::new(233.0 + 532.5, 399.5))
            .unwrap();
        assert!(bottom_right.x < 640.0 && bottom_right.y < 480.0);
    }
}
