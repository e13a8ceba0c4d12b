use crate::constants::FULL_TURN_DEG;
use crate::error::{OrreryError, Result};
use crate::geometry::tilted_axis;
use crate::illumination::IlluminationAimer;
use crate::spatial::SpatialState;
use crate::{Num, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    Uninitialized,
    Active,
    Paused,
    Removed,
}

/// Motion inputs captured when a body is set up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSetup {
    pub orbital_period_years: Num,
    pub inclination_deg: Num,
    pub speed_multiplier: Num,
}

/// Derived once in setup and never touched again
#[derive(Debug, Clone, Copy, PartialEq)]
struct Motion {
    /// Degrees per year
    angular_rate: Num,
    rotation_axis: Vec3,
    speed_multiplier: Num,
}

/// A body revolving on a circular orbit, carrying its compensator light along.
///
/// The orbit is integrated by rotating the current position a little every
/// tick, so there's no ever growing angle to lose precision on. The phase is
/// only kept for inspection and wraps at 360°.
///
/// The center and the anchor are read on every tick, both may move.
#[derive(Debug, Clone)]
pub struct OrbitalBody {
    name: String,
    spatial: SpatialState,
    state: BodyState,
    motion: Option<Motion>,
    aimer: Option<IlluminationAimer>,
    phase_deg: Num,
}

impl OrbitalBody {
    pub fn new(name: impl Into<String>, spatial: SpatialState) -> Self {
        Self {
            name: name.into(),
            spatial,
            state: BodyState::Uninitialized,
            motion: None,
            aimer: None,
            phase_deg: 0.0,
        }
    }

    pub fn setup(
        &mut self,
        setup: OrbitSetup,
        aimer: IlluminationAimer,
    ) -> Result<()> {
        if self.state != BodyState::Uninitialized {
            return Err(OrreryError::AlreadySetUp);
        }

        let period = setup.orbital_period_years;
        if !(period > 0.0) || !period.is_finite() {
            return Err(OrreryError::InvalidParameter {
                name: self.name.clone(),
                field: "orbital_period_years",
                value: period,
            });
        }

        self.motion = Some(Motion {
            angular_rate: FULL_TURN_DEG / period,
            rotation_axis: tilted_axis(setup.inclination_deg).normalize(),
            speed_multiplier: setup.speed_multiplier,
        });
        self.aimer = Some(aimer);
        self.state = BodyState::Active;

        Ok(())
    }

    /// Advances the orbit by `dt` seconds of real time, revolving around
    /// `center` and aiming the light away from `anchor`
    pub fn tick(&mut self, dt: Num, center: Vec3, anchor: Vec3) -> Result<()> {
        match self.state {
            BodyState::Active => {}
            BodyState::Paused => return Ok(()),
            state => return Err(OrreryError::NotActive { state }),
        }

        let (Some(motion), Some(aimer)) = (self.motion, self.aimer.as_mut()) else {
            return Err(OrreryError::NotActive { state: self.state });
        };

        aimer.tick(anchor);

        let angle_deg = motion.angular_rate * dt * motion.speed_multiplier;
        let rotation = Quat::from_axis_angle(motion.rotation_axis, angle_deg.to_radians());

        self.spatial.rotate_around(center, rotation);
        aimer.carry(center, rotation);
        aimer.retrack(self.spatial.position, anchor);

        self.phase_deg = (self.phase_deg + angle_deg).rem_euclid(FULL_TURN_DEG);

        Ok(())
    }

    pub fn pause(&mut self) {
        if self.state == BodyState::Active {
            self.state = BodyState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == BodyState::Paused {
            self.state = BodyState::Active;
        }
    }

    /// Final, a removed body never ticks again
    pub fn remove(&mut self) {
        self.state = BodyState::Removed;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> BodyState {
        self.state
    }

    pub fn spatial(&self) -> &SpatialState {
        &self.spatial
    }

    pub fn position(&self) -> Vec3 {
        self.spatial.position
    }

    pub fn aimer(&self) -> Option<&IlluminationAimer> {
        self.aimer.as_ref()
    }

    /// Degrees per year, available once set up
    pub fn angular_rate(&self) -> Option<Num> {
        self.motion.map(|m| m.angular_rate)
    }

    pub fn rotation_axis(&self) -> Option<Vec3> {
        self.motion.map(|m| m.rotation_axis)
    }

    /// Revolution travelled since setup, in [0, 360)
    pub fn phase_deg(&self) -> Num {
        self.phase_deg
    }
}

/// Self rotation about the local up axis, independent of any revolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub degrees_per_second: Num,
}

impl Spin {
    pub fn new(degrees_per_second: Num) -> Self {
        Self { degrees_per_second }
    }

    pub fn tick(&self, spatial: &mut SpatialState, dt: Num) {
        let angle = (-self.degrees_per_second * dt).to_radians();

        spatial.orientation = (spatial.orientation * Quat::from_rotation_y(angle)).normalize();
    }
}
