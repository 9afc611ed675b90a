//! Scene definitions: spheres, lights, viewport and the seed scene

use crate::math::{Color, Point, Vec3};
use serde::{Deserialize, Serialize};

/// Errors raised while building a scene. Rendering itself never fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("sphere center must be finite")]
    NonFiniteCenter,

    #[error("specular exponent must be finite and non-negative, got {0}")]
    InvalidSpecular(f32),

    #[error("light intensity must be finite and non-negative, got {0}")]
    InvalidIntensity(f32),

    #[error("point light position must be finite")]
    NonFinitePosition,

    #[error("directional light direction must be finite and non-zero")]
    InvalidDirection,

    #[error("viewport {name} must be positive and finite, got {value}")]
    InvalidViewport { name: &'static str, value: f32 },

    #[error("camera origin must be finite")]
    NonFiniteCamera,
}

fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Sphere primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point,
    radius: f32,
    color: Color,
    specular: Option<f32>,
}

impl Sphere {
    /// Create a sphere. `specular` is the shininess exponent; `None` makes the
    /// surface purely diffuse.
    pub fn new(
        center: Point,
        radius: f32,
        color: Color,
        specular: Option<f32>,
    ) -> Result<Self, SceneError> {
        if !is_finite(&center.coords) {
            return Err(SceneError::NonFiniteCenter);
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidRadius(radius));
        }
        if let Some(s) = specular {
            if !(s.is_finite() && s >= 0.0) {
                return Err(SceneError::InvalidSpecular(s));
            }
        }
        Ok(Self { center, radius, color, specular })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn specular(&self) -> Option<f32> {
        self.specular
    }
}

/// Light source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Lights every point equally
    Ambient { intensity: f32 },
    /// Emits from a position in the scene
    Point { intensity: f32, position: Point },
    /// Arrives from infinitely far away; `direction` points toward the light
    Directional { intensity: f32, direction: Vec3 },
}

impl Light {
    pub fn ambient(intensity: f32) -> Result<Self, SceneError> {
        let light = Light::Ambient { intensity };
        light.validate()?;
        Ok(light)
    }

    pub fn point(intensity: f32, position: Point) -> Result<Self, SceneError> {
        let light = Light::Point { intensity, position };
        light.validate()?;
        Ok(light)
    }

    pub fn directional(intensity: f32, direction: Vec3) -> Result<Self, SceneError> {
        let light = Light::Directional { intensity, direction };
        light.validate()?;
        Ok(light)
    }

    pub fn intensity(&self) -> f32 {
        match *self {
            Light::Ambient { intensity }
            | Light::Point { intensity, .. }
            | Light::Directional { intensity, .. } => intensity,
        }
    }

    /// Check the parameters that shading relies on
    pub fn validate(&self) -> Result<(), SceneError> {
        let intensity = self.intensity();
        if !(intensity.is_finite() && intensity >= 0.0) {
            return Err(SceneError::InvalidIntensity(intensity));
        }
        match self {
            Light::Ambient { .. } => Ok(()),
            Light::Point { position, .. } => {
                if is_finite(&position.coords) {
                    Ok(())
                } else {
                    Err(SceneError::NonFinitePosition)
                }
            }
            Light::Directional { direction, .. } => {
                if is_finite(direction) && direction.magnitude_squared() > 0.0 {
                    Ok(())
                } else {
                    Err(SceneError::InvalidDirection)
                }
            }
        }
    }
}

/// Image plane in camera space, `distance` units in front of the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    distance: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, distance: f32) -> Result<Self, SceneError> {
        for (name, value) in [("width", width), ("height", height), ("distance", distance)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SceneError::InvalidViewport { name, value });
            }
        }
        Ok(Self { width, height, distance })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1.0, height: 1.0, distance: 1.0 }
    }
}

/// Switches for the optional lighting terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderOptions {
    #[serde(default = "enabled")]
    pub shadows: bool,
    #[serde(default = "enabled")]
    pub specular: bool,
}

fn enabled() -> bool {
    true
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { shadows: true, specular: true }
    }
}

/// The complete scene: camera, viewport, spheres and lights
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    camera_origin: Point,
    viewport: Viewport,
    background: Color,
    options: RenderOptions,
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::seed()
    }
}

impl Scene {
    /// Empty scene with the camera at `camera_origin` looking down +z
    pub fn new(camera_origin: Point, viewport: Viewport) -> Result<Self, SceneError> {
        if !is_finite(&camera_origin.coords) {
            return Err(SceneError::NonFiniteCamera);
        }
        Ok(Self {
            camera_origin,
            viewport,
            background: Color::WHITE,
            options: RenderOptions::default(),
            spheres: Vec::new(),
            lights: Vec::new(),
        })
    }

    /// Empty scene at the origin with a 1x1 viewport at distance 1
    pub fn empty() -> Self {
        Self {
            camera_origin: Point::origin(),
            viewport: Viewport::default(),
            background: Color::WHITE,
            options: RenderOptions::default(),
            spheres: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Three unit spheres over a giant yellow floor sphere, lit by an ambient,
    /// a point and a directional light
    pub fn seed() -> Self {
        let sphere = |center: [f32; 3], radius, color, specular| Sphere {
            center: Point::from(center),
            radius,
            color,
            specular: Some(specular),
        };

        let mut scene = Self::empty();
        scene.spheres = vec![
            sphere([0.0, -1.0, 3.0], 1.0, Color::RED, 500.0),
            sphere([2.0, 0.0, 4.0], 1.0, Color::BLUE, 500.0),
            sphere([-2.0, 0.0, 4.0], 1.0, Color::GREEN, 10.0),
            // Floor
            sphere([0.0, -5001.0, 0.0], 5000.0, Color::YELLOW, 1000.0),
        ];
        scene.lights = vec![
            Light::Ambient { intensity: 0.2 },
            Light::Point { intensity: 0.6, position: Point::new(2.0, 1.0, 0.0) },
            Light::Directional { intensity: 0.2, direction: Vec3::new(1.0, 4.0, 4.0) },
        ];
        scene
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    pub fn push_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Add a light, rejecting parameters that would poison shading
    pub fn push_light(&mut self, light: Light) -> Result<(), SceneError> {
        light.validate()?;
        self.lights.push(light);
        Ok(())
    }

    pub fn camera_origin(&self) -> Point {
        self.camera_origin
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }
}
