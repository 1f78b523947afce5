//! Vertex based shape generation.
//!
//! Shapes are built as triangle lists that can be rasterized with [`crate::canvas::Canvas::draw_triangles`].

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use miette::Result;

/// Triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Corner positions.
    pub vertices: Vec<Vec2>,
    /// Every three consecutive indices form a triangle.
    pub indices: Vec<u16>,
}

impl Mesh {
    /// Isosceles triangle pointing up, filling a `width` by `height` box.
    #[must_use]
    pub fn triangle(width: f32, height: f32) -> Self {
        Self {
            vertices: vec![
                Vec2::new(0.0, height),
                Vec2::new(width / 2.0, 0.0),
                Vec2::new(width, height),
            ],
            indices: vec![0, 1, 2],
        }
    }

    /// Approximate a circle with `sides` corners, centered in a `2 * radius` box.
    ///
    /// The first corner lies on the right of the center, the rest follow clockwise in screen space.
    /// The center is appended as the last vertex and every triangle fans out from it.
    ///
    /// # Errors
    ///
    /// - When `sides` is less than three.
    /// - When `sides` is too big to be indexed by a `u16`.
    pub fn regular_polygon(radius: f32, sides: usize) -> Result<Self> {
        let center = Vec2::splat(radius);
        let sides_index = fan_size(sides)?;

        let vertices = (0..sides)
            .map(|index| {
                let angle = TAU * index as f32 / sides as f32;

                center + Vec2::from_angle(angle) * radius
            })
            .chain(std::iter::once(center))
            .collect();

        let indices = (0..sides_index)
            .flat_map(|index| [index, (index + 1) % sides_index, sides_index])
            .collect();

        Ok(Self { vertices, indices })
    }

    /// Fill a convex outline by fanning triangles out from its first corner.
    ///
    /// # Errors
    ///
    /// - When the outline has less than three corners.
    /// - When the outline has too many corners to be indexed by a `u16`.
    pub fn convex(outline: Vec<Vec2>) -> Result<Self> {
        let corners = fan_size(outline.len())?;

        let indices = (1..corners - 1)
            .flat_map(|index| [0, index, index + 1])
            .collect();

        Ok(Self {
            vertices: outline,
            indices,
        })
    }

    /// Amount of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Corners of a regular polygon with the first corner pointing up.
///
/// Polygons with an even amount of sides are rotated half a step so they rest on a flat edge.
///
/// # Arguments
///
/// * `sides` - Amount of corners.
/// * `center` - Center of the circle the corners are placed on.
/// * `radius` - Distance from the center to every corner.
/// * `rotation` - Extra rotation in radians.
#[must_use]
pub fn regular_polygon_points(sides: usize, center: Vec2, radius: f32, rotation: f32) -> Vec<Vec2> {
    let step = TAU / sides as f32;
    let mut rotation = rotation - FRAC_PI_2;
    if sides % 2 == 0 {
        rotation += step / 2.0;
    }

    (0..sides)
        .map(|index| center + Vec2::from_angle(step.mul_add(index as f32, rotation)) * radius)
        .collect()
}

/// Validate the amount of corners for a fan, returning it as an index type.
fn fan_size(corners: usize) -> Result<u16> {
    if corners < 3 {
        miette::bail!("A polygon needs at least 3 corners, got {corners}");
    }

    // The fan center needs an index too
    match u16::try_from(corners) {
        Ok(corners) if corners < u16::MAX => Ok(corners),
        _ => miette::bail!("A polygon with {corners} corners can't be indexed"),
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::{regular_polygon_points, Mesh};

    #[test]
    fn triangle() {
        let mesh = Mesh::triangle(40.0, 40.0);

        assert_eq!(
            mesh.vertices,
            [Vec2::new(0.0, 40.0), Vec2::new(20.0, 0.0), Vec2::new(40.0, 40.0)]
        );
        assert_eq!(mesh.indices, [0, 1, 2]);
    }

    #[test]
    fn polygon_fan() {
        let mesh = Mesh::regular_polygon(20.0, 5).unwrap();

        // Five corners and the center
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.vertices[5], Vec2::splat(20.0));
        assert_eq!(mesh.triangle_count(), 5);
        assert_eq!(
            mesh.indices,
            [0, 1, 5, 1, 2, 5, 2, 3, 5, 3, 4, 5, 4, 0, 5]
        );

        // First corner is on the right of the center
        assert!((mesh.vertices[0] - Vec2::new(40.0, 20.0)).length() < 1e-4);

        // All corners are on the circle
        for corner in &mesh.vertices[..5] {
            assert!(((*corner - Vec2::splat(20.0)).length() - 20.0).abs() < 1e-3);
        }
    }

    #[test]
    fn polygon_needs_three_sides() {
        assert!(Mesh::regular_polygon(20.0, 2).is_err());
        assert!(Mesh::regular_polygon(20.0, 0).is_err());
        assert!(Mesh::regular_polygon(20.0, 3).is_ok());
        assert!(Mesh::convex(vec![Vec2::ZERO, Vec2::ONE]).is_err());
    }

    #[test]
    fn convex_fan() {
        let mesh = Mesh::convex(vec![
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::ONE,
            Vec2::new(0.0, 1.0),
        ])
        .unwrap();

        assert_eq!(mesh.indices, [0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn polygon_points_orientation() {
        // Odd polygons point up
        let triangle = regular_polygon_points(3, Vec2::splat(30.0), 30.0, 0.0);
        assert!((triangle[0] - Vec2::new(30.0, 0.0)).length() < 1e-3);

        // Even polygons rest on a flat edge
        let square = regular_polygon_points(4, Vec2::ZERO, 1.0, 0.0);
        assert!((square[0].y - square[3].y).abs() < 1e-5);
        assert!((square[1].y - square[2].y).abs() < 1e-5);
    }
}
