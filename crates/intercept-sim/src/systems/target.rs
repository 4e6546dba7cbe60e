//! Target flight: ballistic integration plus trail and extent bookkeeping.

use intercept_core::components::Target;
use intercept_core::constants::TRAIL_INTERVAL_SECS;
use intercept_core::profile::ConstantsProfile;
use intercept_core::types::{horizontal_distance, Vec3};

use crate::atmosphere::Atmosphere;
use crate::kinematics;

/// Advance the target by `dt` at sim time `now`. Returns true when it has
/// reached the ground.
pub fn advance(
    target: &mut Target,
    profile: &ConstantsProfile,
    atmosphere: &mut Atmosphere,
    now: f64,
    dt: f64,
) -> bool {
    let rho = atmosphere.density(target.body.position.y, profile);
    kinematics::integrate(&mut target.body, Vec3::ZERO, profile.gravity, rho, dt);

    let position = target.body.position;
    if now - target.last_trail_time >= TRAIL_INTERVAL_SECS {
        target.trail.push(position);
        target.last_trail_time = now;
    }
    target.max_height = target.max_height.max(position.y);
    target.max_distance = target
        .max_distance
        .max(horizontal_distance(target.launch_position, position));

    position.y <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::build_target;
    use intercept_core::config::TargetLaunch;
    use intercept_core::enums::AtmosphereModel;

    #[test]
    fn test_trail_and_extents() {
        let profile = ConstantsProfile::trajectory();
        let mut air = Atmosphere::new(AtmosphereModel::Exponential);
        let mut target = build_target(&TargetLaunch::default(), 0.0);
        let dt = 0.02;
        let mut now = 0.0;
        for _ in 0..100 {
            now += dt;
            assert!(!advance(&mut target, &profile, &mut air, now, dt));
        }
        // Launch point plus at most one point per 0.1 s over 2 s.
        assert!((11..=21).contains(&target.trail.len()), "{}", target.trail.len());
        assert!(target.max_height > 1000.0);
        assert!(target.max_distance > 1000.0);
        assert!(target.max_height >= target.body.position.y);
    }

    #[test]
    fn test_ground_contact_reported() {
        let profile = ConstantsProfile::trajectory();
        let mut air = Atmosphere::new(AtmosphereModel::None);
        let mut target = build_target(&TargetLaunch::default(), 0.0);
        target.body.position.y = 1.0;
        target.body.velocity.y = -100.0;
        assert!(advance(&mut target, &profile, &mut air, 0.1, 0.1));
    }
}
