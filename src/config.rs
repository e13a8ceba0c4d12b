//! Author-time configuration of a solar system.

use crate::constants::{
    DEFAULT_DISTANCE_SCALE, DEFAULT_SIMULATION_SPEED, DEFAULT_SIZE_MULTIPLIER,
    MAX_INCLINATION_DEG, SUN_RELATIVE_SIZE,
};
use crate::error::{OrreryError, Result};
use crate::scene::LayerId;
use crate::Num;

/// Scaling shared by every body of a system
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalScaleConfig {
    /// Scene units per astronomical unit
    pub distance_scale: Num,
    /// Multiplier for body sizes. True scale is 1, which makes planets invisible dots.
    pub size_multiplier: Num,
    /// How fast bodies move around the center
    pub simulation_speed_multiplier: Num,
}

impl Default for GlobalScaleConfig {
    fn default() -> Self {
        Self {
            distance_scale: DEFAULT_DISTANCE_SCALE,
            size_multiplier: DEFAULT_SIZE_MULTIPLIER,
            simulation_speed_multiplier: DEFAULT_SIMULATION_SPEED,
        }
    }
}

impl GlobalScaleConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.distance_scale > 0.0) {
            return Err(OrreryError::InvalidScale {
                field: "distance_scale",
                value: self.distance_scale,
            });
        }

        if !(self.size_multiplier > 0.0) {
            return Err(OrreryError::InvalidScale {
                field: "size_multiplier",
                value: self.size_multiplier,
            });
        }

        if !self.simulation_speed_multiplier.is_finite() {
            return Err(OrreryError::InvalidScale {
                field: "simulation_speed_multiplier",
                value: self.simulation_speed_multiplier,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrbitalParameters {
    pub name: String,
    /// Distance from the center in astronomical units
    pub distance_au: Num,
    /// Diameter relative to Earth (Earth = 1)
    pub relative_size: Num,
    /// Tilt of the orbit in degrees
    pub inclination_deg: Num,
    /// Earth years per revolution
    pub orbital_period_years: Num,
    pub layer_id: LayerId,
}

impl OrbitalParameters {
    pub fn new(
        name: impl Into<String>,
        distance_au: Num,
        relative_size: Num,
        inclination_deg: Num,
        orbital_period_years: Num,
        layer_id: LayerId,
    ) -> Self {
        Self {
            name: name.into(),
            distance_au,
            relative_size,
            inclination_deg,
            orbital_period_years,
            layer_id,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("distance_au", self.distance_au),
            ("relative_size", self.relative_size),
            ("orbital_period_years", self.orbital_period_years),
        ];

        for (field, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(OrreryError::InvalidParameter {
                    name: self.name.clone(),
                    field,
                    value,
                });
            }
        }

        if !(self.inclination_deg.abs() <= MAX_INCLINATION_DEG) {
            return Err(OrreryError::DegenerateInclination {
                inclination_deg: self.inclination_deg,
            });
        }

        Ok(())
    }

    /// Real planets, distances in AU and sizes relative to Earth
    pub fn real_solar_system() -> Vec<Self> {
        vec![
            Self::new("Mercury", 0.39, 0.38, 7.0, 0.24, 6),
            Self::new("Venus", 0.72, 0.95, 3.4, 0.62, 7),
            Self::new("Earth", 1.00, 1.00, 0.0, 1.00, 8),
            Self::new("Mars", 1.52, 0.53, 1.9, 1.88, 9),
            Self::new("Jupiter", 5.20, 11.21, 1.3, 11.86, 10),
            Self::new("Saturn", 9.58, 9.45, 2.5, 29.45, 11),
            Self::new("Uranus", 19.22, 4.01, 0.8, 84.02, 12),
            Self::new("Neptune", 30.05, 3.88, 1.8, 164.8, 13),
        ]
    }
}

/// One configured body and the prefab it should be built from
#[derive(Debug, Clone, PartialEq)]
pub struct BodyConfig<P> {
    pub params: OrbitalParameters,
    pub prefab: Option<P>,
}

impl<P> BodyConfig<P> {
    pub fn new(params: OrbitalParameters, prefab: Option<P>) -> Self {
        Self { params, prefab }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CentralBodyConfig<P> {
    pub prefab: Option<P>,
    /// Diameter relative to Earth. The Sun is ~109.
    pub relative_size: Num,
}

impl<P> Default for CentralBodyConfig<P> {
    fn default() -> Self {
        Self {
            prefab: None,
            relative_size: SUN_RELATIVE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolarSystemConfig<P> {
    pub scale: GlobalScaleConfig,
    pub central: CentralBodyConfig<P>,
    /// Spawned in order, no sorting or collision avoidance
    pub bodies: Vec<BodyConfig<P>>,
}

impl<P> Default for SolarSystemConfig<P> {
    fn default() -> Self {
        Self {
            scale: GlobalScaleConfig::default(),
            central: CentralBodyConfig::default(),
            bodies: Vec::new(),
        }
    }
}

impl<P: Clone> SolarSystemConfig<P> {
    /// The real solar system, every planet and the sun built from `prefab`
    pub fn real_solar_system(prefab: P) -> Self {
        Self {
            central: CentralBodyConfig {
                prefab: Some(prefab.clone()),
                relative_size: SUN_RELATIVE_SIZE,
            },
            bodies: OrbitalParameters::real_solar_system()
                .into_iter()
                .map(|params| BodyConfig::new(params, Some(prefab.clone())))
                .collect(),
            ..Default::default()
        }
    }
}
