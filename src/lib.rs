//! CPU sphere ray tracer
//!
//! Casts one ray per pixel from a fixed camera through a viewport into a scene
//! of spheres, then shades the nearest hit with ambient, diffuse and specular
//! lighting and hard shadows.
//!
//! ```no_run
//! use sphere_rt::{render_frame, PixelBuffer, Scene};
//!
//! let scene = Scene::seed();
//! let mut canvas = PixelBuffer::new(512, 512);
//! render_frame(&scene, &mut canvas);
//! canvas.save_png("render.png").unwrap();
//! ```

pub mod canvas;
pub mod config;
pub mod geometry;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod shading;

pub use canvas::{Canvas, PixelBuffer};
pub use config::{load_config, ConfigError, SceneConfig};
pub use math::{Color, Point, Vec3};
pub use renderer::{render_frame, render_parallel, Renderer};
pub use scene::{Light, RenderOptions, Scene, SceneError, Sphere, Viewport};

/// Default frame size in pixels
pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;

/// UTF-8 character gradient from dark to light
pub const ASCII_GRADIENT: &str = " ·∙:;░▒▓█";
