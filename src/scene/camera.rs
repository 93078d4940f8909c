use glam::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Symmetric box of `half_width` x `half_height` around the view axis.
    Orthographic {
        half_width: f32,
        half_height: f32,
        near: f32,
        far: f32,
    },
    /// `fov_y` is the vertical field of view in degrees; `far` may be infinite.
    Perspective {
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub name: Option<String>,
    pub projection: Projection,
}

impl Camera {
    #[must_use]
    pub fn new_orthographic(half_width: f32, half_height: f32, near: f32, far: f32) -> Self {
        Self {
            name: None,
            projection: Projection::Orthographic {
                half_width,
                half_height,
                near,
                far,
            },
        }
    }

    /// `fov_y` in degrees.
    #[must_use]
    pub fn new_perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            name: None,
            projection: Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            },
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.name = name.map(str::to_string);
        self
    }

    /// Right-handed projection with a [0, 1] depth range.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => {
                if far.is_infinite() {
                    Mat4::perspective_infinite_rh(fov_y.to_radians(), aspect, near)
                } else {
                    Mat4::perspective_rh(fov_y.to_radians(), aspect, near, far)
                }
            }
            Projection::Orthographic {
                half_width,
                half_height,
                near,
                far,
            } => Mat4::orthographic_rh(-half_width, half_width, -half_height, half_height, near, far),
        }
    }
}
