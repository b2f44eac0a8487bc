//! Temporal interpolation of total reconstruction poles.

use crate::constants::TIME_EPSILON;
use crate::pole::RotationSample;
use crate::quaternion::Quaternion;

/// Rotation at `time` for a time-sorted sample sequence.
///
/// - empty sequence → `None`; the plate pair has no motion history and the
///   caller decides how to treat the missing plate
/// - single sample → that sample's rotation at any query time
/// - query within `TIME_EPSILON` of a sample time → that sample's rotation,
///   no interpolation error
/// - query between two samples → slerp, parameter linear in elapsed time
/// - query outside the sampled range → clamped to the nearest end sample,
///   never extrapolated
pub fn rotation_at(samples: &[RotationSample], time: f64) -> Option<Quaternion> {
    let first = samples.first()?;
    if samples.len() == 1 {
        return Some(first.rotation);
    }

    if let Some(hit) = samples
        .iter()
        .find(|s| (s.time - time).abs() <= TIME_EPSILON)
    {
        return Some(hit.rotation);
    }

    let last = &samples[samples.len() - 1];
    if time < first.time {
        return Some(first.rotation);
    }
    if time > last.time {
        return Some(last.rotation);
    }

    let bracket = samples
        .windows(2)
        .find(|w| w[0].time < time && time < w[1].time)?;
    let (lo, hi) = (&bracket[0], &bracket[1]);
    let t = (time - lo.time) / (hi.time - lo.time);
    Some(lo.rotation.slerp(hi.rotation, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn samples(points: &[(f64, Quaternion)]) -> Vec<RotationSample> {
        points
            .iter()
            .map(|&(time, rotation)| RotationSample::new(time, rotation))
            .collect()
    }

    fn pole_a() -> Quaternion {
        Quaternion::from_euler_pole(45.0, 30.0, 20.0)
    }

    #[test]
    fn test_empty_returns_none() {
        assert_eq!(rotation_at(&[], 10.0), None);
    }

    #[test]
    fn test_single_sample_any_time() {
        let s = samples(&[(10.0, pole_a())]);
        // No extrapolation beyond a single reference: the one sample wins
        // before, at, and after its own time.
        assert_eq!(rotation_at(&s, 0.0), Some(pole_a()));
        assert_eq!(rotation_at(&s, 10.0), Some(pole_a()));
        assert_eq!(rotation_at(&s, 500.0), Some(pole_a()));
    }

    #[test]
    fn test_exact_hit_no_interpolation() {
        let s = samples(&[(0.0, Quaternion::identity()), (10.0, pole_a())]);
        assert_eq!(rotation_at(&s, 0.0), Some(Quaternion::identity()));
        assert_eq!(rotation_at(&s, 10.0), Some(pole_a()));
        // Within TIME_EPSILON counts as exact
        assert_eq!(rotation_at(&s, 10.0 - TIME_EPSILON / 2.0), Some(pole_a()));
    }

    #[test]
    fn test_midpoint_is_slerp_half() {
        let s = samples(&[(0.0, Quaternion::identity()), (10.0, pole_a())]);
        let expected = Quaternion::identity().slerp(pole_a(), 0.5);
        assert_eq!(rotation_at(&s, 5.0), Some(expected));
    }

    #[test]
    fn test_interpolation_parameter_linear_in_time() {
        let s = samples(&[(10.0, Quaternion::identity()), (50.0, pole_a())]);
        let expected = Quaternion::identity().slerp(pole_a(), 0.25);
        assert_eq!(rotation_at(&s, 20.0), Some(expected));
    }

    #[test]
    fn test_interpolated_angle_scales() {
        // identity → 20° about a fixed pole; a quarter of the way in time
        // should be 5° about the same pole
        let s = samples(&[(0.0, Quaternion::identity()), (40.0, pole_a())]);
        let q = rotation_at(&s, 10.0).unwrap();
        let (lat, lon, angle) = q.to_euler_pole();
        assert_relative_eq!(lat, 45.0, epsilon = 1e-6);
        assert_relative_eq!(lon, 30.0, epsilon = 1e-6);
        assert_relative_eq!(angle, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_clamps_before_first() {
        let s = samples(&[(10.0, pole_a()), (50.0, Quaternion::identity())]);
        assert_eq!(rotation_at(&s, 2.0), Some(pole_a()));
    }

    #[test]
    fn test_clamps_after_last() {
        let s = samples(&[(0.0, Quaternion::identity()), (10.0, pole_a())]);
        assert_eq!(rotation_at(&s, 300.0), Some(pole_a()));
    }

    #[test]
    fn test_bracket_selection_among_many() {
        let q1 = Quaternion::from_euler_pole(0.0, 0.0, 10.0);
        let q2 = Quaternion::from_euler_pole(0.0, 0.0, 30.0);
        let s = samples(&[
            (0.0, Quaternion::identity()),
            (10.0, q1),
            (30.0, q2),
            (60.0, pole_a()),
        ]);
        // 20.0 lies between the (10, 30) pair
        let expected = q1.slerp(q2, 0.5);
        assert_eq!(rotation_at(&s, 20.0), Some(expected));
    }
}
