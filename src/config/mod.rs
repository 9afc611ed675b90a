mod loader;

use crate::math::{Color, Point, Vec3};
use crate::scene::{Light, RenderOptions, Scene, SceneError, Sphere, Viewport};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use loader::load_config;

/// Scene description as read from YAML
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub background: Color,
    #[serde(default)]
    pub options: RenderOptions,
    #[serde(default)]
    pub spheres: Vec<SphereConfig>,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
}

/// Camera placement. The camera always looks down +z.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CameraConfig {
    #[serde(default = "default_origin")]
    pub origin: Point,
}

fn default_origin() -> Point {
    Point::origin()
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { origin: default_origin() }
    }
}

/// Viewport size and distance from the camera
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_unit")]
    pub width: f32,
    #[serde(default = "default_unit")]
    pub height: f32,
    #[serde(default = "default_unit")]
    pub distance: f32,
}

fn default_unit() -> f32 {
    1.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_unit(),
            height: default_unit(),
            distance: default_unit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SphereConfig {
    pub center: Point,
    pub radius: f32,
    pub color: Color,
    /// Shininess exponent; omit for a matte surface
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specular: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LightConfig {
    Ambient { intensity: f32 },
    Point { intensity: f32, position: Point },
    Directional { intensity: f32, direction: Vec3 },
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::from(&Scene::seed())
    }
}

impl From<&Scene> for SceneConfig {
    fn from(scene: &Scene) -> Self {
        let viewport = scene.viewport();
        Self {
            camera: CameraConfig { origin: scene.camera_origin() },
            viewport: ViewportConfig {
                width: viewport.width(),
                height: viewport.height(),
                distance: viewport.distance(),
            },
            background: scene.background(),
            options: scene.options(),
            spheres: scene
                .spheres()
                .iter()
                .map(|s| SphereConfig {
                    center: s.center(),
                    radius: s.radius(),
                    color: s.color(),
                    specular: s.specular(),
                })
                .collect(),
            lights: scene
                .lights()
                .iter()
                .map(|light| match *light {
                    Light::Ambient { intensity } => LightConfig::Ambient { intensity },
                    Light::Point { intensity, position } => LightConfig::Point { intensity, position },
                    Light::Directional { intensity, direction } => {
                        LightConfig::Directional { intensity, direction }
                    }
                })
                .collect(),
        }
    }
}

impl SceneConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load the given file, or fall back to the seed scene
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate every entry and build the scene
    pub fn to_scene(&self) -> Result<Scene, ConfigError> {
        let viewport = Viewport::new(
            self.viewport.width,
            self.viewport.height,
            self.viewport.distance,
        )?;
        let mut scene = Scene::new(self.camera.origin, viewport)?
            .with_background(self.background)
            .with_options(self.options);

        for sphere in &self.spheres {
            scene.push_sphere(Sphere::new(
                sphere.center,
                sphere.radius,
                sphere.color,
                sphere.specular,
            )?);
        }

        for light in &self.lights {
            let light = match *light {
                LightConfig::Ambient { intensity } => Light::Ambient { intensity },
                LightConfig::Point { intensity, position } => Light::Point { intensity, position },
                LightConfig::Directional { intensity, direction } => {
                    Light::Directional { intensity, direction }
                }
            };
            scene.push_light(light)?;
        }

        Ok(scene)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Scene file not found: {0}")]
    NotFound(String),

    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scene file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid scene: {0}")]
    Invalid(#[from] SceneError),
}
