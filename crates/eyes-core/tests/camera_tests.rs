// Pointer rays and hit testing against the textured quads.

use eyes_core::camera::{ndc_from_pixels, Camera, Projection, Ray};
use eyes_core::picking::{ray_quad, Quad};
use glam::{Vec2, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn perspective() -> Camera {
    let mut cam = Camera::new(
        Vec3::new(0.0, 0.0, 25.0),
        Projection::Perspective {
            fovy_radians: 75.0_f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        },
    );
    cam.set_viewport(1600.0, 900.0);
    cam
}

fn orthographic() -> Camera {
    let mut cam = Camera::new(
        Vec3::new(0.0, 0.0, 25.0),
        Projection::Orthographic {
            half_height: 15.0,
            znear: 0.1,
            zfar: 1000.0,
        },
    );
    cam.set_viewport(1200.0, 600.0);
    cam
}

#[test]
fn ndc_maps_corners_and_center() {
    assert_eq!(ndc_from_pixels(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(ndc_from_pixels(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(ndc_from_pixels(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn ndc_tolerates_zero_viewport() {
    let ndc = ndc_from_pixels(0.0, 0.0, 0.0, 0.0);
    assert!(ndc.is_finite());
}

#[test]
fn perspective_center_ray_runs_down_the_axis() {
    let cam = perspective();
    let ray = cam.ray_from_ndc(Vec2::ZERO);
    assert!(ray.origin.abs_diff_eq(Vec3::new(0.0, 0.0, 25.0), 1e-5));
    assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-4));
    assert!(approx_eq(ray.direction.length(), 1.0, 1e-5));
}

#[test]
fn perspective_edge_ray_matches_field_of_view() {
    let cam = perspective();
    let ray = cam.ray_from_ndc(Vec2::new(0.0, 1.0));
    let angle = ray.direction.y.atan2(-ray.direction.z);
    assert!(approx_eq(angle, 37.5_f32.to_radians(), 1e-3));
}

#[test]
fn orthographic_rays_are_parallel() {
    let cam = orthographic();
    let a = cam.ray_from_ndc(Vec2::new(-0.5, 0.2));
    let b = cam.ray_from_ndc(Vec2::new(0.9, -0.7));
    assert_eq!(a.direction, b.direction);
    assert!(a.direction.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    // aspect 2: horizontal half extent is 30 world units
    let edge = cam.ray_from_ndc(Vec2::new(1.0, 1.0));
    assert!(approx_eq(edge.origin.x, 30.0, 1e-3));
    assert!(approx_eq(edge.origin.y, 15.0, 1e-3));
    assert!(approx_eq(edge.origin.z, 24.9, 1e-3));
}

#[test]
fn view_projection_maps_target_to_center() {
    let cam = orthographic();
    let clip = cam.view_projection() * Vec3::new(0.0, 0.0, -5.0).extend(1.0);
    assert!(approx_eq(clip.x / clip.w, 0.0, 1e-6));
    assert!(approx_eq(clip.y / clip.w, 0.0, 1e-6));
}

#[test]
fn ray_point_at_distance() {
    let ray = Ray {
        origin: Vec3::new(1.0, 2.0, 3.0),
        direction: Vec3::NEG_Z,
    };
    assert_eq!(ray.at(17.0), Vec3::new(1.0, 2.0, -14.0));
}

#[test]
fn quad_hit_inside_and_on_edge() {
    let quad = Quad::square(Vec3::new(6.0, 0.0, -5.0), 20.0, 0.7);
    let inside = Ray {
        origin: Vec3::new(8.0, 3.0, 25.0),
        direction: Vec3::NEG_Z,
    };
    let hit = ray_quad(&inside, &quad).unwrap();
    assert!(hit.abs_diff_eq(Vec3::new(8.0, 3.0, -5.0), 1e-5));

    let edge = Ray {
        origin: Vec3::new(12.999, 0.0, 25.0),
        direction: Vec3::NEG_Z,
    };
    assert!(ray_quad(&edge, &quad).is_some());

    let outside = Ray {
        origin: Vec3::new(13.5, 0.0, 25.0),
        direction: Vec3::NEG_Z,
    };
    assert!(ray_quad(&outside, &quad).is_none());
}

#[test]
fn quad_back_face_and_behind_miss() {
    let quad = Quad::square(Vec3::new(0.0, 0.0, -5.0), 20.0, 1.0);
    let from_behind = Ray {
        origin: Vec3::new(0.0, 0.0, -20.0),
        direction: Vec3::Z,
    };
    assert!(ray_quad(&from_behind, &quad).is_none());

    let past = Ray {
        origin: Vec3::new(0.0, 0.0, -10.0),
        direction: Vec3::NEG_Z,
    };
    assert!(ray_quad(&past, &quad).is_none());

    let grazing = Ray {
        origin: Vec3::new(0.0, 0.0, 0.0),
        direction: Vec3::X,
    };
    assert!(ray_quad(&grazing, &quad).is_none());
}

#[test]
fn picking_through_perspective_camera() {
    let cam = perspective();
    let quad = Quad::square(Vec3::new(0.0, 0.0, -5.0), 20.0, 1.0);
    assert!(ray_quad(&cam.ray_from_ndc(Vec2::new(0.1, 0.1)), &quad).is_some());
    assert!(ray_quad(&cam.ray_from_ndc(Vec2::new(0.95, 0.0)), &quad).is_none());
}
