use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub range: f32,
}

/// Cone angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub range: f32,
    pub inner_cone: f32,
    pub outer_cone: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Directional,
    Point(PointLight),
    Spot(SpotLight),
}

#[derive(Debug, Clone)]
pub struct Light {
    pub name: Option<String>,
    pub color: Vec3,
    pub intensity: f32, // Point/Spot in candela, Directional in lux
    pub kind: LightKind,
}

impl Light {
    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32) -> Self {
        Self {
            name: None,
            color,
            intensity,
            kind: LightKind::Directional,
        }
    }

    #[must_use]
    pub fn new_point(color: Vec3, intensity: f32, range: f32) -> Self {
        Self {
            name: None,
            color,
            intensity,
            kind: LightKind::Point(PointLight { range }),
        }
    }

    #[must_use]
    pub fn new_spot(
        color: Vec3,
        intensity: f32,
        range: f32,
        inner_cone: f32,
        outer_cone: f32,
    ) -> Self {
        Self {
            name: None,
            color,
            intensity,
            kind: LightKind::Spot(SpotLight {
                range,
                inner_cone,
                outer_cone,
            }),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.name = name.map(str::to_string);
        self
    }

    /// Range of point and spot lights; directional lights have none.
    #[must_use]
    pub fn range(&self) -> Option<f32> {
        match self.kind {
            LightKind::Directional => None,
            LightKind::Point(p) => Some(p.range),
            LightKind::Spot(s) => Some(s.range),
        }
    }
}
