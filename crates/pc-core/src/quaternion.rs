use std::ops::Mul;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{EPSILON, SLERP_THRESHOLD};

/// Unit quaternion representing a finite rotation of the sphere.
///
/// Always normalized. Antipodal quaternions (q and -q) represent the same
/// rotation — slerp resolves the double-cover by flipping sign to take the
/// shorter arc, and equality is tolerance-based per component.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        (self.w - other.w).abs() < EPSILON
            && (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.z - other.z).abs() < EPSILON
    }
}

impl Quaternion {
    /// Create a new quaternion, automatically normalized.
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }.normalize()
    }

    /// Identity rotation (1, 0, 0, 0).
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Normalize to unit length. Returns identity if near-zero magnitude,
    /// so a degenerate zero rotation reads as "no motion".
    pub fn normalize(self) -> Self {
        let norm = (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if norm < EPSILON {
            return Self::identity();
        }
        Self {
            w: self.w / norm,
            x: self.x / norm,
            y: self.y / norm,
            z: self.z / norm,
        }
    }

    /// The inverse rotation. For unit quaternions this is the conjugate.
    pub fn inverse(self) -> Self {
        Self {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// 4D dot product.
    pub fn dot(self, other: Self) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Angular separation of the two rotations. Range: [0, π].
    /// Uses abs(dot) to handle antipodal equivalence.
    pub fn angular_distance(self, other: Self) -> f64 {
        let d = self.dot(other).abs().clamp(-1.0, 1.0);
        2.0 * d.acos()
    }

    /// Spherical linear interpolation with antipodal flip and NLERP fallback.
    ///
    /// The dot-product sign check before interpolating guarantees the
    /// shorter arc is taken, whatever sign the operands happen to carry.
    pub fn slerp(self, other: Self, t: f64) -> Self {
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }

        let mut dot = self.dot(other);
        let o;

        // Take shorter arc
        if dot < 0.0 {
            o = Self {
                w: -other.w,
                x: -other.x,
                y: -other.y,
                z: -other.z,
            };
            dot = -dot;
        } else {
            o = other;
        }

        // Near-parallel: NLERP fallback
        if dot > SLERP_THRESHOLD {
            return Self {
                w: self.w + t * (o.w - self.w),
                x: self.x + t * (o.x - self.x),
                y: self.y + t * (o.y - self.y),
                z: self.z + t * (o.z - self.z),
            }
            .normalize();
        }

        let theta = dot.clamp(-1.0, 1.0).acos();
        let sin_theta = theta.sin();

        let s0 = ((1.0 - t) * theta).sin() / sin_theta;
        let s1 = (t * theta).sin() / sin_theta;

        Self {
            w: s0 * self.w + s1 * o.w,
            x: s0 * self.x + s1 * o.x,
            y: s0 * self.y + s1 * o.y,
            z: s0 * self.z + s1 * o.z,
        }
        .normalize()
    }

    /// Rotation of `angle_rad` radians about a unit axis.
    pub fn from_axis_angle(axis: [f64; 3], angle_rad: f64) -> Self {
        let half = angle_rad / 2.0;
        let sin_half = half.sin();
        Self::new(
            half.cos(),
            axis[0] * sin_half,
            axis[1] * sin_half,
            axis[2] * sin_half,
        )
    }

    /// Rotation from an Euler pole: pole latitude/longitude in degrees and
    /// rotation angle in degrees — the native parameterization of total
    /// reconstruction poles.
    pub fn from_euler_pole(lat_deg: f64, lon_deg: f64, angle_deg: f64) -> Self {
        let lat = lat_deg.to_radians();
        let lon = lon_deg.to_radians();
        let axis = [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()];
        Self::from_axis_angle(axis, angle_deg.to_radians())
    }

    /// Decompose into (pole latitude, pole longitude, angle), all degrees.
    /// The identity rotation has no defined pole; reported as the north
    /// pole with zero angle.
    pub fn to_euler_pole(self) -> (f64, f64, f64) {
        let vnorm = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if vnorm < EPSILON {
            return (90.0, 0.0, 0.0);
        }
        let angle = 2.0 * vnorm.atan2(self.w);
        let lat = (self.z / vnorm).clamp(-1.0, 1.0).asin();
        let lon = self.y.atan2(self.x);
        (lat.to_degrees(), lon.to_degrees(), angle.to_degrees())
    }

    /// Uniform random rotation using Shoemake's method. Test and benchmark
    /// fodder.
    pub fn random(rng: &mut impl Rng) -> Self {
        let s1: f64 = rng.random();
        let t1 = std::f64::consts::TAU * rng.random::<f64>();
        let t2 = std::f64::consts::TAU * rng.random::<f64>();

        let r1 = (1.0 - s1).sqrt();
        let r2 = s1.sqrt();

        Self {
            w: r1 * t1.sin(),
            x: r1 * t1.cos(),
            y: r2 * t2.sin(),
            z: r2 * t2.cos(),
        }
        .normalize()
    }

    /// Convert to [w, x, y, z] array for serialization.
    pub fn to_array(self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Create from [w, x, y, z] array.
    pub fn from_array(arr: [f64; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            w: -self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`.
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn assert_unit(q: Quaternion) {
        let norm = (q.w * q.w + q.x * q.x + q.y * q.y + q.z * q.z).sqrt();
        assert!(
            (norm - 1.0).abs() < 1e-10,
            "quaternion not unit: norm = {norm}"
        );
    }

    fn assert_approx_eq(a: Quaternion, b: Quaternion, tol: f64) {
        // Check both q and -q (antipodal equivalence for rotations)
        let direct = (a.w - b.w)
            .abs()
            .max((a.x - b.x).abs())
            .max((a.y - b.y).abs())
            .max((a.z - b.z).abs());
        let antipodal = (a.w + b.w)
            .abs()
            .max((a.x + b.x).abs())
            .max((a.y + b.y).abs())
            .max((a.z + b.z).abs());
        let min_diff = direct.min(antipodal);
        assert!(
            min_diff < tol,
            "quaternions not approx equal: {a:?} vs {b:?} (min_diff = {min_diff})"
        );
    }

    #[test]
    fn test_normalize() {
        let q = Quaternion::new(2.0, 0.0, 0.0, 0.0);
        assert_unit(q);
        assert!((q.w - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_near_zero() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(q, Quaternion::identity());
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let mut rng = rng();
        for _ in 0..20 {
            let q = Quaternion::random(&mut rng);
            assert_eq!(q * q.inverse(), Quaternion::identity());
            assert_eq!(q.inverse() * q, Quaternion::identity());
        }
    }

    #[test]
    fn test_inverse_of_identity() {
        assert_eq!(Quaternion::identity().inverse(), Quaternion::identity());
    }

    #[test]
    fn test_angular_distance_identity() {
        let a = Quaternion::identity();
        let b = Quaternion::identity();
        assert!(a.angular_distance(b) < EPSILON);
    }

    #[test]
    fn test_angular_distance_antipodal() {
        let a = Quaternion::identity();
        let b = -a;
        // Antipodal quaternions are the same rotation (abs(dot) = 1)
        assert!(a.angular_distance(b) < EPSILON);
    }

    #[test]
    fn test_slerp_endpoints() {
        let mut rng = rng();
        let a = Quaternion::random(&mut rng);
        let b = Quaternion::random(&mut rng);

        let s0 = a.slerp(b, 0.0);
        let s1 = a.slerp(b, 1.0);

        assert_approx_eq(s0, a, 1e-10);
        assert_approx_eq(s1, b, 1e-10);
    }

    #[test]
    fn test_slerp_identity() {
        let mut rng = rng();
        let q = Quaternion::random(&mut rng);

        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let result = q.slerp(q, t);
            assert_approx_eq(result, q, 1e-10);
        }
    }

    #[test]
    fn test_slerp_midpoint_equidistant() {
        let a = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        let b = Quaternion::new(0.707, 0.707, 0.0, 0.0);
        let mid = a.slerp(b, 0.5);
        assert_unit(mid);

        let da = a.angular_distance(mid);
        let db = mid.angular_distance(b);
        assert!(
            (da - db).abs() < 0.01,
            "midpoint not equidistant: {da} vs {db}"
        );
    }

    #[test]
    fn test_slerp_near_parallel_nlerp_fallback() {
        // Two very close quaternions to trigger NLERP path
        let a = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        let b = Quaternion::new(1.0, 0.0001, 0.0, 0.0);
        let mid = a.slerp(b, 0.5);
        assert_unit(mid);
    }

    #[test]
    fn test_slerp_antipodal_flip() {
        // When dot < 0, SLERP flips sign to take the shorter arc
        let a = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        let b = Quaternion::new(-0.9, -0.1, 0.0, 0.0);
        let mid = a.slerp(b, 0.5);
        assert_unit(mid);
        // The interpolant must stay within the short arc between a and -b
        let short_arc = a.angular_distance(b);
        assert!(a.angular_distance(mid) <= short_arc + 1e-9);
    }

    #[test]
    fn test_hamilton_product_identity() {
        let mut rng = rng();
        let q = Quaternion::random(&mut rng);
        let id = Quaternion::identity();

        assert_approx_eq(q * id, q, 1e-10);
        assert_approx_eq(id * q, q, 1e-10);
    }

    #[test]
    fn test_hamilton_product_associative() {
        let mut rng = rng();
        let a = Quaternion::random(&mut rng);
        let b = Quaternion::random(&mut rng);
        let c = Quaternion::random(&mut rng);

        assert_approx_eq((a * b) * c, a * (b * c), 1e-10);
    }

    #[test]
    fn test_from_euler_pole_roundtrip() {
        let q = Quaternion::from_euler_pole(30.0, -120.0, 45.0);
        assert_unit(q);
        let (lat, lon, angle) = q.to_euler_pole();
        assert!((lat - 30.0).abs() < 1e-9, "lat {lat}");
        assert!((lon + 120.0).abs() < 1e-9, "lon {lon}");
        assert!((angle - 45.0).abs() < 1e-9, "angle {angle}");
    }

    #[test]
    fn test_to_euler_pole_identity() {
        let (lat, lon, angle) = Quaternion::identity().to_euler_pole();
        assert_eq!((lat, lon), (90.0, 0.0));
        assert!(angle.abs() < EPSILON);
    }

    #[test]
    fn test_euler_pole_rotations_compose() {
        // Two rotations about the same pole add their angles
        let a = Quaternion::from_euler_pole(90.0, 0.0, 10.0);
        let b = Quaternion::from_euler_pole(90.0, 0.0, 20.0);
        let (_, _, angle) = (a * b).to_euler_pole();
        assert!((angle - 30.0).abs() < 1e-9, "angle {angle}");
    }

    #[test]
    fn test_random_unit() {
        let mut rng = rng();
        for _ in 0..100 {
            let q = Quaternion::random(&mut rng);
            assert_unit(q);
        }
    }

    #[test]
    fn test_to_from_array_roundtrip() {
        let mut rng = rng();
        let q = Quaternion::random(&mut rng);
        let arr = q.to_array();
        let q2 = Quaternion::from_array(arr);
        assert_approx_eq(q, q2, 1e-10);
    }

    fn arb_quaternion() -> impl Strategy<Value = Quaternion> {
        (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0)
            .prop_filter("norm too small to normalize stably", |(w, x, y, z)| {
                (w * w + x * x + y * y + z * z).sqrt() > 1e-3
            })
            .prop_map(|(w, x, y, z)| Quaternion::new(w, x, y, z))
    }

    proptest! {
        #[test]
        fn prop_identity_law(q in arb_quaternion()) {
            prop_assert!(q * Quaternion::identity() == q);
            prop_assert!(Quaternion::identity() * q == q);
        }

        #[test]
        fn prop_inverse_law(q in arb_quaternion()) {
            prop_assert!(q * q.inverse() == Quaternion::identity());
        }

        #[test]
        fn prop_slerp_stays_unit(
            a in arb_quaternion(),
            b in arb_quaternion(),
            t in 0.0f64..1.0,
        ) {
            let s = a.slerp(b, t);
            let norm = (s.w * s.w + s.x * s.x + s.y * s.y + s.z * s.z).sqrt();
            prop_assert!((norm - 1.0).abs() < 1e-9);
        }
    }
}
