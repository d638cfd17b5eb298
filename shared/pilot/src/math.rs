use nalgebra::{vector, Rotation2, Vector2};

pub type Vec2 = Vector2<f64>;

/// Reduces an angle in degrees to (-180, 180].
///
/// Panics on NaN or infinite input. An undefined angle here always means a
/// bug upstream, so it is never coerced to a default.
pub fn normalize_angle(a: f64) -> f64 {
    assert!(a.is_finite(), "normalizing non-finite angle {a}");
    let mut a = a % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}

/// Absolute difference between two angles, in [0, 180].
pub fn angle_diff(a: f64, b: f64) -> f64 {
    normalize_angle(a - b).abs()
}

pub fn from_angle_len(angle: f64, len: f64) -> Vec2 {
    let rad = angle.to_radians();
    vector![rad.cos() * len, rad.sin() * len]
}

/// Heading of `v` in degrees. The zero vector points along 0.
pub fn angle_of(v: Vec2) -> f64 {
    if v.x == 0.0 && v.y == 0.0 {
        return 0.0;
    }
    normalize_angle(v.y.atan2(v.x).to_degrees())
}

pub fn angle_between(from: Vec2, to: Vec2) -> f64 {
    angle_of(to - from)
}

/// Length of the component of `v` along `angle`.
pub fn project(v: Vec2, angle: f64) -> f64 {
    let diff = angle - angle_of(v);
    v.magnitude() * diff.to_radians().cos()
}

pub fn rotate(v: Vec2, angle: f64) -> Vec2 {
    Rotation2::new(angle.to_radians()).transform_vector(&v)
}

pub fn to_world(rel: Vec2, base_angle: f64, base_pos: Vec2) -> Vec2 {
    rotate(rel, base_angle) + base_pos
}

pub fn to_rel(pos: Vec2, base_angle: f64, base_pos: Vec2) -> Vec2 {
    rotate(pos - base_pos, -base_angle)
}

/// Smallest non-negative root of `a*x^2 + b*x + c = 0`.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<f64> {
    if a == 0.0 {
        return solve_linear(b, c);
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    if disc == 0.0 {
        let x = -b / 2.0 / a;
        return if x < 0.0 { None } else { Some(x) };
    }
    let dsq = disc.sqrt();
    let x1 = (-b - dsq) / 2.0 / a;
    let x2 = (-b + dsq) / 2.0 / a;
    match (x1 < 0.0, x2 < 0.0) {
        (true, true) => None,
        (true, false) => Some(x2),
        (false, true) => Some(x1),
        (false, false) => Some(x1.min(x2)),
    }
}

/// Non-negative root of `b*x + c = 0`. A degenerate `0 = 0` counts as `x = 0`.
pub fn solve_linear(b: f64, c: f64) -> Option<f64> {
    if b == 0.0 {
        return if c == 0.0 { Some(0.0) } else { None };
    }
    let x = -c / b;
    if x < 0.0 {
        None
    } else {
        Some(x)
    }
}

/// Moves `src` toward `dst` by at most `step`.
pub fn approach(src: f64, dst: f64, step: f64) -> f64 {
    if dst - step <= src && src <= dst + step {
        return dst;
    }
    if src < dst {
        src + step
    } else {
        src - step
    }
}

/// Like [`approach`], but takes the short way around the circle.
pub fn approach_angle(src: f64, dst: f64, step: f64) -> f64 {
    let diff = normalize_angle(dst - src);
    if diff.abs() <= step {
        return dst;
    }
    if diff > 0.0 {
        normalize_angle(src + step)
    } else {
        normalize_angle(src - step)
    }
}

/// Half the angle a sphere of `radius` covers when seen from `dist` away.
pub fn angular_width_of_sphere(radius: f64, dist: f64) -> f64 {
    if dist <= radius {
        return 90.0;
    }
    (radius / dist).asin().to_degrees()
}

/// Length of an arc of `angle` degrees on a circle of radius `r`.
pub fn angle_to_arc(angle: f64, r: f64) -> f64 {
    angle.to_radians() * r
}

pub fn sign(positive: bool) -> f64 {
    if positive {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_log::test;

    #[test]
    fn test_normalize_range() {
        for a in [-1000.5, -540.0, -180.0, -179.5, 0.0, 179.5, 180.0, 360.0, 725.25] {
            let n = normalize_angle(a);
            assert!(n > -180.0 && n <= 180.0, "{a} -> {n}");
        }
        assert_eq!(normalize_angle(-180.0), 180.0);
        assert_eq!(normalize_angle(540.0), 180.0);
    }

    #[test]
    fn test_normalize_periodic() {
        for a in [-170.0, -45.5, 0.0, 12.25, 90.0, 180.0] {
            for k in -4..=4 {
                assert_eq!(normalize_angle(a), normalize_angle(a + 360.0 * k as f64));
            }
        }
    }

    #[test]
    #[should_panic(expected = "non-finite")]
    fn test_normalize_nan_panics() {
        normalize_angle(f64::NAN);
    }

    #[test]
    fn test_angle_diff() {
        for (a, b) in [(10.0, 350.0), (-170.0, 170.0), (0.0, 180.0), (45.0, -45.0)] {
            assert_eq!(angle_diff(a, b), angle_diff(b, a));
            assert_eq!(angle_diff(a, a), 0.0);
            let d = angle_diff(a, b);
            assert!((0.0..=180.0).contains(&d));
        }
        assert_abs_diff_eq!(angle_diff(10.0, 350.0), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_quadratic() {
        // (x - 1)(x - 3)
        assert_abs_diff_eq!(solve_quadratic(1.0, -4.0, 3.0).unwrap(), 1.0, epsilon = 1e-9);
        // Same roots, negative leading coefficient.
        assert_abs_diff_eq!(solve_quadratic(-1.0, 4.0, -3.0).unwrap(), 1.0, epsilon = 1e-9);
        // (x + 1)(x - 2)
        assert_abs_diff_eq!(solve_quadratic(1.0, -1.0, -2.0).unwrap(), 2.0, epsilon = 1e-9);
        // (x + 1)(x + 2)
        assert_eq!(solve_quadratic(1.0, 3.0, 2.0), None);
        assert_eq!(solve_quadratic(1.0, 0.0, 1.0), None);
        assert_eq!(solve_quadratic(0.0, 0.0, 0.0), Some(0.0));
        assert_eq!(solve_quadratic(0.0, 0.0, 5.0), None);
        assert_eq!(solve_quadratic(0.0, 2.0, -4.0), Some(2.0));
        assert_eq!(solve_linear(2.0, 4.0), None);
    }

    #[test]
    fn test_project() {
        assert_abs_diff_eq!(project(vector![3.0, 4.0], 0.0), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(project(vector![3.0, 4.0], 90.0), 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(project(vector![2.0, 0.0], 180.0), -2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_frames() {
        let base = vector![5.0, -2.0];
        let rel = vector![1.0, 2.0];
        let world = to_world(rel, 30.0, base);
        let back = to_rel(world, 30.0, base);
        assert_abs_diff_eq!(back.x, rel.x, epsilon = 1e-9);
        assert_abs_diff_eq!(back.y, rel.y, epsilon = 1e-9);
        let v = from_angle_len(90.0, 2.0);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.y, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(angle_of(v), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_approach_angle_wraps() {
        assert_eq!(approach_angle(170.0, -170.0, 5.0), 175.0);
        assert_eq!(approach_angle(178.0, -178.0, 5.0), -178.0);
        assert_eq!(approach(1.0, 3.0, 0.5), 1.5);
        assert_eq!(approach(1.0, 1.2, 0.5), 1.2);
    }
}
