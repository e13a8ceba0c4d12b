use crate::Num;

#[cfg(not(feature = "f64"))]
pub use std::f32::consts::PI;
#[cfg(feature = "f64")]
pub use std::f64::consts::PI;

pub const TWO_PI: Num = 2.0 * PI;

/// Degrees in a full revolution
pub const FULL_TURN_DEG: Num = 360.0;

/// How far past the body/anchor midpoint a compensator light sits,
/// as a fraction of the anchor-to-body vector
pub const LIGHT_OFFSET_FACTOR: Num = 0.35;

/// Inclinations steeper than this make `tan(i)` blow up
pub const MAX_INCLINATION_DEG: Num = 89.0;

/// Segments used when sampling an orbit for drawing
pub const DEFAULT_ORBIT_SEGMENTS: usize = 360;

/// Scene units per astronomical unit
pub const DEFAULT_DISTANCE_SCALE: Num = 100.0;
pub const DEFAULT_SIZE_MULTIPLIER: Num = 1.0;
pub const DEFAULT_SIMULATION_SPEED: Num = 10.0;

/// Sun diameter relative to Earth
pub const SUN_RELATIVE_SIZE: Num = 109.0;

pub const LIGHT_INTENSITY: Num = 2.0;
pub const LIGHT_COLOR_TEMPERATURE_K: Num = 5000.0;
