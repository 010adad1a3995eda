//! Canonical GPU target properties.
//!
//! Turns a raw, driver-reported device identifier into a [`TargetDescriptor`]
//! in three stages:
//! - **Name resolution:** legacy codenames collapse onto a canonical `gfx` name
//! - **Feature inference:** tri-state SRAMECC and XNACK flags, with
//!   per-architecture defaults and driver misreport corrections
//! - **Key construction:** a stable tuning-database key compatible with
//!   existing databases

pub mod config;
pub mod db_id;
pub mod descriptor;
pub mod device;
pub mod error;
pub mod feature;
pub mod name;
pub mod overrides;

pub use descriptor::{TargetDescriptor, MAX_WAVE_SCRATCH_SIZE};
pub use device::DeviceNameSource;
pub use error::{Result, TargetError};
pub use feature::{Feature, FeatureState};
pub use overrides::{EnvOverrides, Layered, NoOverrides, OverrideKey, OverrideSource};
