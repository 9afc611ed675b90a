use std::path::Path;

use super::{ConfigError, SceneConfig};

/// Load a scene description from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SceneConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: SceneConfig = serde_yaml::from_str(&content)?;

    tracing::debug!(
        path = %path.display(),
        spheres = config.spheres.len(),
        lights = config.lights.len(),
        "Scene file loaded"
    );

    Ok(config)
}
