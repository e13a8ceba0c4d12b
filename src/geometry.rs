//! Orbit placement math.
//!
//! Orbits are circles in the XZ plane around the origin. Inclination is
//! approximated twice: as a height offset at spawn (`tan(i) * r`) and as a
//! single tilt of the revolution axis about +Z. There is no ascending node
//! or argument of periapsis.

use rand::Rng;

use crate::constants::{FULL_TURN_DEG, MAX_INCLINATION_DEG};
use crate::error::{OrreryError, Result};
use crate::{vec3, Num, Quat, Vec3};

/// Places a body `distance_au` away from the origin at a uniformly random azimuth
pub fn place_polar(distance_au: Num, scale: Num, rng: &mut impl Rng) -> Vec3 {
    let azimuth_deg: Num = rng.gen_range(0.0..FULL_TURN_DEG);

    place_polar_at(distance_au, scale, azimuth_deg)
}

/// Polar to cartesian on the XZ plane
pub fn place_polar_at(distance_au: Num, scale: Num, azimuth_deg: Num) -> Vec3 {
    let r = distance_au * scale;
    let azimuth = azimuth_deg.to_radians();

    vec3(azimuth.cos() * r, 0.0, azimuth.sin() * r)
}

/// Height of a body above the reference plane.
///
/// tan(i) = y / r
pub fn inclination_offset(
    distance_au: Num,
    scale: Num,
    inclination_deg: Num,
) -> Result<Num> {
    if !inclination_deg.is_finite() || inclination_deg.abs() > MAX_INCLINATION_DEG
    {
        return Err(OrreryError::DegenerateInclination { inclination_deg });
    }

    Ok(inclination_deg.to_radians().tan() * distance_au * scale)
}

/// The up axis tilted by `inclination_deg` around the forward axis
pub fn tilted_axis(inclination_deg: Num) -> Vec3 {
    Quat::from_rotation_z(inclination_deg.to_radians()) * Vec3::Y
}

/// Closed polyline approximating the orbit, `segments + 1` points long.
///
/// The last point repeats the first so the loop can be drawn as a line strip.
pub fn orbit_samples(distance_au: Num, scale: Num, segments: usize) -> Vec<Vec3> {
    if segments == 0 {
        return Vec::new();
    }

    let step = FULL_TURN_DEG / segments as Num;

    (0..=segments)
        .map(|i| place_polar_at(distance_au, scale, i as Num * step))
        .collect()
}

/// `count` points spread evenly on a circle, starting on +X
pub fn aligned_ring(radius: Num, count: usize) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }

    let step = FULL_TURN_DEG / count as Num;

    (0..count)
        .map(|i| place_polar_at(radius, 1.0, i as Num * step))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    use super::*;

    const TOLERANCE: Num = 1e-3;

    #[test_case(1.0, 100.0 ; "earth at default scale")]
    #[test_case(0.39, 100.0 ; "mercury")]
    #[test_case(30.05, 100.0 ; "neptune")]
    #[test_case(5.2, 0.5 ; "shrunk")]
    fn polar_placement_keeps_distance(distance_au: Num, scale: Num) {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..64 {
            let p = place_polar(distance_au, scale, &mut rng);

            assert_eq!(p.y, 0.0);
            let expected = distance_au * scale;
            assert!(
                (p.length() - expected).abs() < expected * 1e-5,
                "Expected {p} to be {expected} from the origin"
            );
        }
    }

    #[test_case(0.0, vec3(100.0, 0.0, 0.0))]
    #[test_case(90.0, vec3(0.0, 0.0, 100.0))]
    #[test_case(180.0, vec3(-100.0, 0.0, 0.0))]
    fn polar_placement_at_known_azimuths(azimuth_deg: Num, expected: Vec3) {
        let p = place_polar_at(1.0, 100.0, azimuth_deg);

        assert!(p.abs_diff_eq(expected, TOLERANCE), "{p} != {expected}");
    }

    #[test_case(1.0, 100.0)]
    #[test_case(30.0, 2.5)]
    fn zero_inclination_has_no_height(distance_au: Num, scale: Num) {
        assert_eq!(inclination_offset(distance_au, scale, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn inclination_height_follows_tangent() {
        let y = inclination_offset(1.0, 100.0, 45.0).unwrap();

        assert!((y - 100.0).abs() < TOLERANCE);
    }

    #[test_case(89.5)]
    #[test_case(-90.0)]
    #[test_case(Num::NAN)]
    fn steep_inclination_is_rejected(inclination_deg: Num) {
        let err = inclination_offset(1.0, 100.0, inclination_deg).unwrap_err();

        assert!(matches!(err, OrreryError::DegenerateInclination { .. }));
    }

    #[test]
    fn untilted_axis_is_up() {
        assert!(tilted_axis(0.0).abs_diff_eq(Vec3::Y, TOLERANCE));
    }

    #[test]
    fn tilted_axis_leans_towards_negative_x() {
        let axis = tilted_axis(90.0);

        assert!(axis.abs_diff_eq(Vec3::NEG_X, TOLERANCE), "{axis}");
        assert!((tilted_axis(7.0).length() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn orbit_samples_form_closed_loop() {
        let samples = orbit_samples(1.0, 100.0, 360);

        assert_eq!(samples.len(), 361);

        let first = samples[0];
        let last = samples[samples.len() - 1];
        assert!(first.abs_diff_eq(last, 0.01), "{first} != {last}");

        for p in &samples {
            assert!((p.length() - 100.0).abs() < 0.01);
        }
    }

    #[test]
    fn orbit_samples_are_restartable() {
        assert_eq!(orbit_samples(2.0, 10.0, 12), orbit_samples(2.0, 10.0, 12));
        assert!(orbit_samples(2.0, 10.0, 0).is_empty());
    }

    #[test]
    fn aligned_ring_spreads_points_evenly() {
        let ring = aligned_ring(10.0, 4);

        assert_eq!(ring.len(), 4);
        assert!(ring[0].abs_diff_eq(vec3(10.0, 0.0, 0.0), TOLERANCE));
        assert!(ring[1].abs_diff_eq(vec3(0.0, 0.0, 10.0), TOLERANCE));
        assert!(ring[2].abs_diff_eq(vec3(-10.0, 0.0, 0.0), TOLERANCE));
        assert!(ring[3].abs_diff_eq(vec3(0.0, 0.0, -10.0), TOLERANCE));
    }
}
