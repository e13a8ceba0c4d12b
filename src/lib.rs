//! Procedurally generated solar systems with kinematic orbits.
//!
//! A [`SolarSystemGenerator`] places a central body and any number of orbiting
//! bodies through a [`SceneHost`], attaches a compensator light to each of them
//! and hands back a [`SolarSystem`] that advances every body once per tick.

pub mod body;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod illumination;
pub mod scene;
pub mod spatial;

#[cfg(not(feature = "f64"))]
pub type Num = f32;
#[cfg(not(feature = "f64"))]
pub use glam::{vec3, Quat, Vec3};

#[cfg(feature = "f64")]
pub type Num = f64;
#[cfg(feature = "f64")]
pub use glam::{dvec3 as vec3, DQuat as Quat, DVec3 as Vec3};

pub use body::{BodyState, OrbitSetup, OrbitalBody, Spin};
pub use config::{
    BodyConfig, CentralBodyConfig, GlobalScaleConfig, OrbitalParameters,
    SolarSystemConfig,
};
pub use constants::{PI, TWO_PI};
pub use error::{OrreryError, Result};
pub use generator::{
    BodyLayout, FixedLight, GenerationReport, SolarSystem, SolarSystemGenerator,
    SpawnedBody,
};
pub use illumination::{CompensatorLight, IlluminationAimer, LightPlacement};
pub use scene::{LayerId, NodeId, Prefab, SceneGraph, SceneHost};
pub use spatial::SpatialState;
