//! Camera projection and frame driver
//!
//! Rays leave the scene's camera origin and pass through the viewport plane at
//! `z = distance`. Each pixel is traced independently, so the same frame can be
//! produced one pixel at a time into any [`Canvas`] or row-parallel into a
//! [`PixelBuffer`].

use crate::canvas::{Canvas, PixelBuffer};
use crate::geometry::{closest_intersection, Ray};
use crate::math::{Color, Vec3};
use crate::scene::{Scene, Viewport};
use crate::shading::compute_lighting;
use rayon::prelude::*;
use std::time::Instant;

/// Primary rays ignore anything closer than the viewport plane at distance 1
pub const PRIMARY_T_MIN: f32 = 1.0;

/// View-space direction through the pixel at centered offset `(x, y)`
pub fn canvas_to_viewport(viewport: &Viewport, width: u32, height: u32, x: i32, y: i32) -> Vec3 {
    Vec3::new(
        x as f32 * viewport.width() / width as f32,
        y as f32 * viewport.height() / height as f32,
        viewport.distance(),
    )
}

/// Color seen along `ray` within `[t_min, t_max]`
pub fn trace_ray(scene: &Scene, ray: &Ray, t_min: f32, t_max: f32) -> Color {
    let Some(hit) = closest_intersection(scene.spheres(), ray, t_min, t_max) else {
        return scene.background();
    };

    let sphere = hit.sphere;
    let point = ray.at(hit.t);
    let normal = (point - sphere.center()).normalize();
    let view = -ray.direction;
    let intensity = compute_lighting(scene, point, normal, view, sphere.specular());
    sphere.color().scale(intensity)
}

/// Color of the pixel at centered offset `(x, y)` on a `width` x `height` canvas
pub fn pixel_color(scene: &Scene, width: u32, height: u32, x: i32, y: i32) -> Color {
    let direction = canvas_to_viewport(scene.viewport(), width, height, x, y);
    let ray = Ray::new(scene.camera_origin(), direction);
    trace_ray(scene, &ray, PRIMARY_T_MIN, f32::INFINITY)
}

/// Render one frame into `canvas`, writing every pixel exactly once
pub fn render_frame<C: Canvas + ?Sized>(scene: &Scene, canvas: &mut C) {
    let (width, height) = (canvas.width(), canvas.height());
    let _span = tracing::debug_span!("render_frame", width, height).entered();
    let start = Instant::now();

    for x in canvas.columns() {
        for y in canvas.rows() {
            let color = pixel_color(scene, width, height, x, y);
            canvas.put_pixel(x, y, color);
        }
    }

    tracing::debug!(
        pixels = width as u64 * height as u64,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "frame rendered"
    );
}

/// Render one frame into `buffer` with rows traced in parallel.
///
/// Produces the same pixels as [`render_frame`].
pub fn render_parallel(scene: &Scene, buffer: &mut PixelBuffer) {
    let (width, height) = (buffer.width(), buffer.height());
    let _span = tracing::debug_span!("render_parallel", width, height).entered();
    let start = Instant::now();

    let columns = buffer.columns();
    let top = buffer.rows().end - 1;

    buffer
        .pixels_mut()
        .par_chunks_exact_mut(width.max(1) as usize)
        .enumerate()
        .for_each(|(row, pixels)| {
            let y = top - row as i32;
            for (pixel, x) in pixels.iter_mut().zip(columns.clone()) {
                *pixel = pixel_color(scene, width, height, x, y);
            }
        });

    tracing::debug!(
        pixels = width as u64 * height as u64,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "frame rendered"
    );
}

/// Owns a frame buffer and renders scenes into it
pub struct Renderer {
    buffer: PixelBuffer,
    parallel: bool,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: PixelBuffer::new(width, height),
            parallel: true,
        }
    }

    /// Choose between the row-parallel sweep (default) and the single-threaded one
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.buffer.resize(width, height);
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Render the scene to the frame buffer
    pub fn render(&mut self, scene: &Scene) -> &PixelBuffer {
        if self.parallel {
            render_parallel(scene, &mut self.buffer);
        } else {
            render_frame(scene, &mut self.buffer);
        }
        &self.buffer
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }
}
