//! Model-view-projection setup.

use glam::{Mat4, Vec3};

/// How eye space is mapped to clip space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Projection {
    /// Symmetric perspective frustum.
    Perspective {
        /// Vertical field of view in degrees.
        fov_y_degrees: f32,
        /// Width over height.
        aspect: f32,
        /// Near clipping plane distance.
        near: f32,
        /// Far clipping plane distance.
        far: f32,
    },
    /// Axis-aligned box, no foreshortening.
    Orthographic {
        /// Left edge in eye space.
        left: f32,
        /// Right edge in eye space.
        right: f32,
        /// Bottom edge in eye space.
        bottom: f32,
        /// Top edge in eye space.
        top: f32,
        /// Near clipping plane distance.
        near: f32,
        /// Far clipping plane distance.
        far: f32,
    },
}

impl Projection {
    /// 45° vertical field of view for the given aspect ratio, clipping at
    /// 0.1 and 100 units.
    pub fn perspective(aspect: f32) -> Self {
        Projection::Perspective {
            fov_y_degrees: 45.0,
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    /// A 20×20 unit box looking down the view axis, clipping at 0 and 100.
    pub fn orthographic() -> Self {
        Projection::Orthographic {
            left: -10.0,
            right: 10.0,
            bottom: -10.0,
            top: 10.0,
            near: 0.0,
            far: 100.0,
        }
    }

    /// The OpenGL clip-space matrix (depth in `[-1, 1]`).
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective {
                fov_y_degrees,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh_gl(fov_y_degrees.to_radians(), aspect, near, far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Mat4::orthographic_rh_gl(left, right, bottom, top, near, far),
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::perspective(4.0 / 3.0)
    }
}

/// A camera looking at a fixed point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// World-space up direction.
    pub up: Vec3,
    /// Eye-to-clip mapping.
    pub projection: Projection,
}

impl Camera {
    /// A camera at `eye` looking at the origin with `+Y` up and the default
    /// perspective projection.
    pub fn looking_at_origin(eye: Vec3) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Projection::default(),
        }
    }

    /// Replace the projection, keeping position and orientation.
    #[must_use]
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// World-to-eye transform.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Eye-to-clip transform.
    pub fn projection(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// `projection * view * model`.
    pub fn mvp(&self, model: Mat4) -> Mat4 {
        self.projection() * self.view() * model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn to_ndc(mvp: Mat4, p: Vec3) -> Vec3 {
        let clip = mvp * p.extend(1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn target_projects_to_viewport_center() {
        for eye in [Vec3::new(4.0, 3.0, -3.0), Vec3::new(4.0, 3.0, 3.0)] {
            let ndc = to_ndc(Camera::looking_at_origin(eye).mvp(Mat4::IDENTITY), Vec3::ZERO);
            assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5, "{ndc:?}");
            assert!(ndc.z > -1.0 && ndc.z < 1.0, "{ndc:?}");
        }
    }

    #[test]
    fn cube_is_fully_visible_from_default_eye() {
        let mvp = Camera::looking_at_origin(Vec3::new(4.0, 3.0, -3.0)).mvp(Mat4::IDENTITY);
        for v in &crate::geometry::CUBE {
            let ndc = to_ndc(mvp, Vec3::from(v.position));
            assert!(ndc.abs().max_element() < 1.0, "{v:?} -> {ndc:?}");
        }
    }

    #[test]
    fn mvp_is_projection_times_view_times_model() {
        let camera = Camera::looking_at_origin(Vec3::new(4.0, 3.0, 3.0));
        let model = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let expected = camera.projection() * camera.view() * model;
        assert!(camera.mvp(model).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let camera = Camera::looking_at_origin(Vec3::new(4.0, 3.0, -3.0));
        let eye = camera.view() * camera.eye.extend(1.0);
        assert!(eye.abs_diff_eq(Vec4::W, 1e-5), "{eye:?}");
    }

    #[test]
    fn orthographic_keeps_parallel_lines_parallel() {
        let camera = Camera::looking_at_origin(Vec3::new(0.0, 0.0, 5.0))
            .with_projection(Projection::orthographic());
        let mvp = camera.mvp(Mat4::IDENTITY);
        let near = to_ndc(mvp, Vec3::new(5.0, 5.0, 1.0));
        let far = to_ndc(mvp, Vec3::new(5.0, 5.0, -1.0));
        assert!((near.x - 0.5).abs() < 1e-6 && (far.x - 0.5).abs() < 1e-6);
        assert!((near.y - 0.5).abs() < 1e-6 && (far.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn default_projection_is_four_by_three() {
        let Projection::Perspective { aspect, fov_y_degrees, .. } = Projection::default() else {
            panic!("default projection is not perspective");
        };
        assert!((aspect - 4.0 / 3.0).abs() < f32::EPSILON);
        assert!((fov_y_degrees - 45.0).abs() < f32::EPSILON);
    }
}
