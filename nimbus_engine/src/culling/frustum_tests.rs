use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;
use super::*;

// ============================================================================
// make_frustum
// ============================================================================

#[test]
fn test_make_frustum_half_sizes() {
    // 90deg vertical fov: tan(45deg) = 1
    let frustum = make_frustum(FRAC_PI_2, 2.0, 0.5, 50.0);

    assert!((frustum.near_top - 0.5).abs() < 1e-6);
    assert!((frustum.near_right - 1.0).abs() < 1e-6);
    assert_eq!(frustum.near_plane, 0.5);
    assert_eq!(frustum.far_plane, 50.0);
}

// ============================================================================
// corners
// ============================================================================

#[test]
fn test_corner_order() {
    let frustum = make_frustum(FRAC_PI_2, 1.0, 1.0, 10.0);
    let c = frustum.corners();

    assert!((c[NEAR_TOP_RIGHT] - Vec3::new(1.0, 1.0, -1.0)).length() < 1e-5);
    assert!((c[NEAR_TOP_LEFT] - Vec3::new(-1.0, 1.0, -1.0)).length() < 1e-5);
    assert!((c[NEAR_BOTTOM_RIGHT] - Vec3::new(1.0, -1.0, -1.0)).length() < 1e-5);
    assert!((c[NEAR_BOTTOM_LEFT] - Vec3::new(-1.0, -1.0, -1.0)).length() < 1e-5);
    assert!((c[FAR_TOP_RIGHT] - Vec3::new(10.0, 10.0, -10.0)).length() < 1e-4);
    assert!((c[FAR_TOP_LEFT] - Vec3::new(-10.0, 10.0, -10.0)).length() < 1e-4);
    assert!((c[FAR_BOTTOM_RIGHT] - Vec3::new(10.0, -10.0, -10.0)).length() < 1e-4);
    assert!((c[FAR_BOTTOM_LEFT] - Vec3::new(-10.0, -10.0, -10.0)).length() < 1e-4);
}

#[test]
fn test_far_corners_lie_on_side_planes() {
    let frustum = make_frustum(1.0, 1.7, 0.1, 100.0);
    let c = frustum.corners();

    // Lateral edges pass through the apex: far corner = near corner * far/near
    for i in 0..4 {
        let expected = c[i] * (100.0 / 0.1);
        assert!((c[i + 4] - expected).length() < 1e-2);
    }
}

#[test]
fn test_corners_in_world_space() {
    let frustum = make_frustum(FRAC_PI_2, 1.0, 1.0, 10.0);
    let world_from_view = Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0));

    let world = frustum.corners_in(&world_from_view);

    assert!((world[NEAR_TOP_RIGHT] - Vec3::new(1.0, 1.0, 4.0)).length() < 1e-5);
    assert!((world[FAR_BOTTOM_LEFT] - Vec3::new(-10.0, -10.0, -5.0)).length() < 1e-4);
}

// ============================================================================
// contains_point
// ============================================================================

#[test]
fn test_contains_point() {
    let frustum = make_frustum(FRAC_PI_2, 1.0, 0.1, 100.0);

    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -1.0)));
    assert!(frustum.contains_point(Vec3::new(4.9, -4.9, -5.0)));
    assert!(!frustum.contains_point(Vec3::new(5.1, 0.0, -5.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 1.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -0.05)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -101.0)));
}
