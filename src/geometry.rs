//! Ray-sphere intersection and nearest-hit queries

use crate::math::{Point, Vec3};
use crate::scene::Sphere;

/// A ray in 3D space. The direction is not normalized; `t` is measured in
/// multiples of it.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Point {
        self.origin + self.direction * t
    }
}

/// Both solutions of the ray-sphere quadratic, in no particular order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roots {
    pub t1: f32,
    pub t2: f32,
}

impl Roots {
    pub fn both(&self) -> [f32; 2] {
        [self.t1, self.t2]
    }
}

/// Nearest surface found by [`closest_intersection`]
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub sphere: &'a Sphere,
    /// Position of `sphere` in the scene's sphere list
    pub index: usize,
    pub t: f32,
}

impl Sphere {
    /// Solve `|O + tD - C|² = r²`. Returns `None` when the ray misses or its
    /// direction is zero.
    pub fn intersect(&self, ray: &Ray) -> Option<Roots> {
        let co = ray.origin - self.center();
        let a = ray.direction.dot(&ray.direction);
        if a <= 0.0 {
            return None;
        }
        let b = 2.0 * co.dot(&ray.direction);
        let c = co.dot(&co) - self.radius() * self.radius();

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        Some(Roots {
            t1: (-b + sqrt_d) / (2.0 * a),
            t2: (-b - sqrt_d) / (2.0 * a),
        })
    }
}

/// Find the sphere with the smallest root inside `[t_min, t_max]`.
///
/// Both roots of every sphere are considered independently. The scan uses a
/// strict comparison, so on an exact tie the sphere listed first wins.
pub fn closest_intersection<'a>(
    spheres: &'a [Sphere],
    ray: &Ray,
    t_min: f32,
    t_max: f32,
) -> Option<Hit<'a>> {
    let mut closest: Option<Hit<'a>> = None;
    let mut closest_t = f32::INFINITY;

    for (index, sphere) in spheres.iter().enumerate() {
        let Some(roots) = sphere.intersect(ray) else {
            continue;
        };
        for t in roots.both() {
            if t >= t_min && t <= t_max && t < closest_t {
                closest_t = t;
                closest = Some(Hit { sphere, index, t });
            }
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;

    fn sphere(center: [f32; 3], radius: f32) -> Sphere {
        Sphere::new(Point::from(center), radius, Color::RED, None).unwrap()
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point::origin(), Vec3::new(1.0, 0.0, 0.0));
        assert!((ray.at(5.0).x - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_sphere_intersection() {
        let s = sphere([0.0, 0.0, 3.0], 1.0);
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        let roots = s.intersect(&ray).unwrap();
        let mut ts = roots.both();
        ts.sort_by(f32::total_cmp);
        assert!((ts[0] - 2.0).abs() < 1e-5);
        assert!((ts[1] - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_roots_lie_on_surface() {
        let s = sphere([0.3, -1.2, 5.0], 1.7);
        let origin = Point::new(0.1, 0.2, -0.4);
        for direction in [
            Vec3::new(0.0, -0.2, 1.0),
            Vec3::new(0.05, -0.3, 0.7),
            Vec3::new(0.4, -1.4, 5.4) * 3.0,
        ] {
            let ray = Ray::new(origin, direction);
            let roots = s.intersect(&ray).unwrap();
            for t in roots.both() {
                let distance = (ray.at(t) - s.center()).magnitude();
                assert!((distance - s.radius()).abs() < 1e-4, "t={t} distance={distance}");
            }
        }
    }

    #[test]
    fn test_miss() {
        let s = sphere([0.0, 5.0, 3.0], 1.0);
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(s.intersect(&ray), None);
    }

    #[test]
    fn test_zero_direction_misses() {
        let s = sphere([0.0, 0.0, 0.0], 1.0);
        let ray = Ray::new(Point::origin(), Vec3::zeros());
        assert_eq!(s.intersect(&ray), None);
    }

    #[test]
    fn test_tangent_hit() {
        let s = sphere([0.0, -1.0, 3.0], 1.0);
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        let roots = s.intersect(&ray).unwrap();
        assert_eq!(roots.t1, 3.0);
        assert_eq!(roots.t2, 3.0);
    }

    #[test]
    fn test_closest_picks_nearer_sphere() {
        let spheres = [sphere([0.0, 0.0, 10.0], 1.0), sphere([0.0, 0.0, 5.0], 1.0)];
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        let hit = closest_intersection(&spheres, &ray, 1.0, f32::INFINITY).unwrap();
        assert_eq!(hit.index, 1);
        assert!((hit.t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_closest_overlapping_spheres() {
        // Second sphere starts inside the first along the ray
        let spheres = [sphere([0.0, 0.0, 6.0], 2.0), sphere([0.0, 0.0, 5.0], 2.0)];
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        let hit = closest_intersection(&spheres, &ray, 1.0, f32::INFINITY).unwrap();
        assert_eq!(hit.index, 1);
        assert!((hit.t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_tie_goes_to_first_sphere() {
        let spheres = [sphere([0.0, 0.0, 5.0], 1.0), sphere([0.0, 0.0, 5.0], 1.0)];
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        let hit = closest_intersection(&spheres, &ray, 1.0, f32::INFINITY).unwrap();
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_window_excludes_roots() {
        let spheres = [sphere([0.0, 0.0, 5.0], 1.0)];
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        assert!(closest_intersection(&spheres, &ray, 1.0, 3.0).is_none());
        // Near root excluded, far root still counts
        let hit = closest_intersection(&spheres, &ray, 4.5, f32::INFINITY).unwrap();
        assert!((hit.t - 6.0).abs() < 1e-5);
        // Inclusive bounds
        assert!(closest_intersection(&spheres, &ray, 4.0, 4.0).is_some());
    }

    #[test]
    fn test_behind_origin_ignored() {
        let spheres = [sphere([0.0, 0.0, -5.0], 1.0)];
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        assert!(closest_intersection(&spheres, &ray, 1.0, f32::INFINITY).is_none());
    }

    #[test]
    fn test_empty_scene() {
        let ray = Ray::new(Point::origin(), Vec3::new(0.0, 0.0, 1.0));
        assert!(closest_intersection(&[], &ray, 1.0, f32::INFINITY).is_none());
    }
}
