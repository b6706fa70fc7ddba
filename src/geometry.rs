//! Hard-coded geometry tables.

use crate::types::{Color, Vertex};

/// Number of vertices in a triangle list describing one triangle.
const TRIANGLE_VERTEX_COUNT: usize = 3;

/// 12 triangles, two per cube face.
const CUBE_VERTEX_COUNT: usize = 12 * 3;

/// A single triangle in the `z = 0` plane, spanning clip space.
pub const TRIANGLE: [Vertex; TRIANGLE_VERTEX_COUNT] = [
    Vertex::new(-1.0, -1.0, 0.0),
    Vertex::new(1.0, -1.0, 0.0),
    Vertex::new(0.0, 1.0, 0.0),
];

/// An axis-aligned cube of side 2 centered on the origin.
///
/// Three consecutive vertices form a triangle; two consecutive triangles
/// cover one face.
pub const CUBE: [Vertex; CUBE_VERTEX_COUNT] = [
    Vertex::new(-1.0, -1.0, -1.0),
    Vertex::new(-1.0, -1.0, 1.0),
    Vertex::new(-1.0, 1.0, 1.0),
    Vertex::new(1.0, 1.0, -1.0),
    Vertex::new(-1.0, -1.0, -1.0),
    Vertex::new(-1.0, 1.0, -1.0),
    Vertex::new(1.0, -1.0, 1.0),
    Vertex::new(-1.0, -1.0, -1.0),
    Vertex::new(1.0, -1.0, -1.0),
    Vertex::new(1.0, 1.0, -1.0),
    Vertex::new(1.0, -1.0, -1.0),
    Vertex::new(-1.0, -1.0, -1.0),
    Vertex::new(-1.0, -1.0, -1.0),
    Vertex::new(-1.0, 1.0, 1.0),
    Vertex::new(-1.0, 1.0, -1.0),
    Vertex::new(1.0, -1.0, 1.0),
    Vertex::new(-1.0, -1.0, 1.0),
    Vertex::new(-1.0, -1.0, -1.0),
    Vertex::new(-1.0, 1.0, 1.0),
    Vertex::new(-1.0, -1.0, 1.0),
    Vertex::new(1.0, -1.0, 1.0),
    Vertex::new(1.0, 1.0, 1.0),
    Vertex::new(1.0, -1.0, -1.0),
    Vertex::new(1.0, 1.0, -1.0),
    Vertex::new(1.0, -1.0, -1.0),
    Vertex::new(1.0, 1.0, 1.0),
    Vertex::new(1.0, -1.0, 1.0),
    Vertex::new(1.0, 1.0, 1.0),
    Vertex::new(1.0, 1.0, -1.0),
    Vertex::new(-1.0, 1.0, -1.0),
    Vertex::new(1.0, 1.0, 1.0),
    Vertex::new(-1.0, 1.0, -1.0),
    Vertex::new(-1.0, 1.0, 1.0),
    Vertex::new(1.0, 1.0, 1.0),
    Vertex::new(-1.0, 1.0, 1.0),
    Vertex::new(1.0, -1.0, 1.0),
];

/// One arbitrary color per [`CUBE`] vertex.
pub const CUBE_COLORS: [Color; CUBE_VERTEX_COUNT] = [
    Color::new(0.583, 0.771, 0.014),
    Color::new(0.609, 0.115, 0.436),
    Color::new(0.327, 0.483, 0.844),
    Color::new(0.822, 0.569, 0.201),
    Color::new(0.435, 0.602, 0.223),
    Color::new(0.31, 0.747, 0.185),
    Color::new(0.597, 0.77, 0.761),
    Color::new(0.559, 0.436, 0.73),
    Color::new(0.359, 0.583, 0.152),
    Color::new(0.483, 0.596, 0.789),
    Color::new(0.559, 0.861, 0.639),
    Color::new(0.195, 0.548, 0.859),
    Color::new(0.014, 0.184, 0.576),
    Color::new(0.771, 0.328, 0.97),
    Color::new(0.406, 0.615, 0.116),
    Color::new(0.676, 0.977, 0.133),
    Color::new(0.971, 0.572, 0.833),
    Color::new(0.14, 0.616, 0.489),
    Color::new(0.997, 0.513, 0.064),
    Color::new(0.945, 0.719, 0.592),
    Color::new(0.543, 0.021, 0.978),
    Color::new(0.279, 0.317, 0.505),
    Color::new(0.167, 0.62, 0.077),
    Color::new(0.347, 0.857, 0.137),
    Color::new(0.055, 0.953, 0.042),
    Color::new(0.714, 0.505, 0.345),
    Color::new(0.783, 0.29, 0.734),
    Color::new(0.722, 0.645, 0.174),
    Color::new(0.302, 0.455, 0.848),
    Color::new(0.225, 0.587, 0.04),
    Color::new(0.517, 0.713, 0.338),
    Color::new(0.053, 0.959, 0.12),
    Color::new(0.393, 0.621, 0.362),
    Color::new(0.673, 0.211, 0.457),
    Color::new(0.82, 0.883, 0.371),
    Color::new(0.982, 0.099, 0.879),
];

/// The mesh a scene draws.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Geometry {
    /// [`TRIANGLE`], uncolored.
    Triangle,
    /// [`CUBE`] with [`CUBE_COLORS`].
    Cube,
}

impl Geometry {
    /// Vertex positions, drawn as a `TRIANGLES` list.
    pub fn vertices(self) -> &'static [Vertex] {
        match self {
            Geometry::Triangle => &TRIANGLE,
            Geometry::Cube => &CUBE,
        }
    }

    /// Per-vertex colors, if the mesh has any. Always the same length as
    /// [`vertices`](Self::vertices).
    pub fn colors(self) -> Option<&'static [Color]> {
        match self {
            Geometry::Triangle => None,
            Geometry::Cube => Some(&CUBE_COLORS),
        }
    }

    /// The `count` argument for `glDrawArrays`.
    pub fn vertex_count(self) -> i32 {
        // Both tables are a few dozen entries long.
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        {
            self.vertices().len() as i32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_counts() {
        assert_eq!(Geometry::Triangle.vertex_count(), 3);
        assert_eq!(Geometry::Cube.vertex_count(), 36);
    }

    #[test]
    fn colors_match_vertices() {
        assert!(Geometry::Triangle.colors().is_none());
        let colors = Geometry::Cube.colors().unwrap_or_default();
        assert_eq!(colors.len(), Geometry::Cube.vertices().len());
        for color in colors {
            assert!(color.rgb.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn cube_corners_are_unit_distance_on_every_axis() {
        for v in &CUBE {
            assert!(v.position.iter().all(|c| c.abs() == 1.0), "{v:?}");
        }
    }

    /// Every triangle lies on one face plane, and each of the six planes
    /// holds exactly two triangles.
    #[test]
    fn cube_triangles_cover_each_face_twice() {
        let mut per_face = std::collections::HashMap::new();

        for tri in CUBE.chunks_exact(3) {
            let face = (0..3)
                .find_map(|axis| {
                    let c = tri[0].position[axis];
                    tri.iter()
                        .all(|v| v.position[axis] == c)
                        .then_some((axis, c > 0.0))
                })
                .expect("triangle does not lie on a cube face");
            *per_face.entry(face).or_insert(0) += 1;
        }

        assert_eq!(per_face.len(), 6);
        assert!(per_face.values().all(|&n| n == 2), "{per_face:?}");
    }

    #[test]
    fn triangles_are_not_degenerate() {
        for mesh in [Geometry::Triangle, Geometry::Cube] {
            for tri in mesh.vertices().chunks_exact(3) {
                let [a, b, c] = [tri[0], tri[1], tri[2]].map(|v| glam::Vec3::from(v.position));
                assert!((b - a).cross(c - a).length() > 0.0, "{tri:?}");
            }
        }
    }
}
