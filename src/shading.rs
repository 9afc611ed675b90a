//! Ambient, diffuse and specular lighting with hard shadows

use crate::geometry::{closest_intersection, Ray};
use crate::math::{Point, Vec3};
use crate::scene::{Light, Scene};

/// Shadow rays start this far along the light vector so a surface does not
/// shadow itself.
pub const SHADOW_EPSILON: f32 = 0.001;

/// Total light intensity arriving at `point`.
///
/// `normal` is the outward surface normal, `view` points back toward the
/// camera and `specular` is the surface's shininess exponent. The result is
/// non-negative and unbounded above; the color scale clamps it.
pub fn compute_lighting(
    scene: &Scene,
    point: Point,
    normal: Vec3,
    view: Vec3,
    specular: Option<f32>,
) -> f32 {
    let options = scene.options();
    let specular = specular.filter(|_| options.specular);
    let mut intensity = 0.0;

    for light in scene.lights() {
        // Light vector and how far along it an occluder must be to cast a shadow
        let (i, light_vec, reach) = match *light {
            Light::Ambient { intensity: i } => {
                intensity += i;
                continue;
            }
            Light::Point { intensity: i, position } => (i, position - point, 1.0),
            Light::Directional { intensity: i, direction } => (i, direction, f32::INFINITY),
        };

        // Light sits exactly on the surface
        if light_vec.magnitude_squared() == 0.0 {
            continue;
        }

        if options.shadows {
            let shadow_ray = Ray::new(point, light_vec);
            if closest_intersection(scene.spheres(), &shadow_ray, SHADOW_EPSILON, reach).is_some() {
                continue;
            }
        }

        let n_dot_l = normal.dot(&light_vec);
        if n_dot_l > 0.0 {
            intensity += i * n_dot_l / (normal.magnitude() * light_vec.magnitude());
        }

        if let Some(s) = specular {
            let reflected = reflect(&light_vec, &normal);
            let r_dot_v = reflected.dot(&view);
            if r_dot_v > 0.0 {
                intensity += i * (r_dot_v / (reflected.magnitude() * view.magnitude())).powf(s);
            }
        }
    }

    intensity
}

/// Mirror `l` about `n`: `2·n·dot(n, l) - l`
fn reflect(l: &Vec3, n: &Vec3) -> Vec3 {
    2.0 * n.dot(l) * *n - *l
}
