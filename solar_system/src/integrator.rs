//! Fixed-timestep Euler integration

use glam::DVec2;

use crate::body::Body;
use crate::config::TrailPolicy;

/// Advance `body` by one timestep under `force`
///
/// The velocity is updated first and the new velocity moves the position:
///
/// 1. v(t + dt) = v(t) + F/m · dt
/// 2. x(t + dt) = x(t) + v(t + dt) · dt
///
/// The new position is appended to the trail, which is then trimmed to the
/// capacity `trail` allows at the body's current distance from the primary.
pub fn integrate(body: &mut Body, force: DVec2, dt: f64, trail: &TrailPolicy) {
    body.velocity += force / body.mass() * dt;
    body.position += body.velocity * dt;

    let cap = trail.cap_for(body.radius_km(), body.distance_to_primary());
    body.record_trail_point(body.position, cap);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrailRetention;

    fn probe() -> Body {
        Body::planet(
            "Probe",
            2.0,
            6371.0,
            DVec2::new(10.0, -4.0),
            DVec2::new(1.0, 0.5),
        )
        .unwrap()
    }

    #[test]
    fn position_uses_updated_velocity() {
        let mut body = probe();
        integrate(&mut body, DVec2::new(4.0, -2.0), 0.5, &TrailPolicy::default());

        // a = (2, -1); v = (1, 0.5) + a·0.5 = (2, 0); x = (10, -4) + v·0.5
        assert_eq!(body.velocity(), DVec2::new(2.0, 0.0));
        assert_eq!(body.position(), DVec2::new(11.0, -4.0));
        assert_eq!(body.trail().back(), Some(&DVec2::new(11.0, -4.0)));
    }

    #[test]
    fn zero_force_drifts_in_a_straight_line() {
        let mut body = probe();
        for _ in 0..4 {
            integrate(&mut body, DVec2::ZERO, 1.0, &TrailPolicy::default());
        }
        assert_eq!(body.position(), DVec2::new(14.0, -2.0));
        assert_eq!(body.trail().len(), 4);
    }

    #[test]
    fn trail_is_capped_by_radius() {
        let policy = TrailPolicy {
            base_length: 3,
            ..TrailPolicy::default()
        };
        let mut body = probe();
        for _ in 0..10 {
            integrate(&mut body, DVec2::ZERO, 1.0, &policy);
        }
        assert_eq!(body.trail().len(), 3);
        assert_eq!(body.trail().front(), Some(&DVec2::new(18.0, 0.0)));
    }

    #[test]
    fn distant_bodies_keep_growing_under_near_primary_retention() {
        let policy = TrailPolicy {
            base_length: 3,
            retention: TrailRetention::NearPrimaryOnly,
            ..TrailPolicy::default()
        };
        let mut body = probe();
        body.distance_to_primary = 1.0e12;
        for _ in 0..10 {
            integrate(&mut body, DVec2::ZERO, 1.0, &policy);
        }
        assert_eq!(body.trail().len(), 10);
    }
}
