//! Complete target descriptor.
//!
//! Runs name resolution, feature inference and key construction in sequence
//! and freezes the result. Fields are private so the database key can never
//! drift from the name and flags it was derived from.

use serde::Serialize;

use crate::db_id::build_db_id;
use crate::device::DeviceNameSource;
use crate::feature::{infer_features, Feature, FeatureState};
use crate::name::resolve_name;
use crate::overrides::{override_value, OverrideKey, OverrideSource};

/// Maximum scratch memory per wave, in bytes.
///
/// 256 lanes of 4-byte dwords times the 13-bit per-wave scratch size field.
pub const MAX_WAVE_SCRATCH_SIZE: usize = (256 * 4) * ((1 << 13) - 1);

/// Canonical description of one GPU target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetDescriptor {
    name: String,
    sramecc: FeatureState,
    sramecc_reported: FeatureState,
    xnack: FeatureState,
    db_id: String,
}

impl TargetDescriptor {
    /// Build a descriptor from a raw device identifier, without overrides.
    pub fn from_raw(raw: &str) -> Self {
        Self::with_enforced_name(raw, None)
    }

    /// Build a descriptor whose name may be forced to `enforced`.
    ///
    /// Feature suffixes are still read from `raw`; the SRAMECC default follows
    /// the enforced name.
    pub fn with_enforced_name(raw: &str, enforced: Option<&str>) -> Self {
        let name = resolve_name(raw, enforced);
        let features = infer_features(raw, &name);
        let db_id = build_db_id(&name, features.sramecc, features.xnack);
        Self {
            name,
            sramecc: features.sramecc,
            sramecc_reported: features.sramecc_reported,
            xnack: features.xnack,
            db_id,
        }
    }

    /// Identify a device, honouring the overrides in `overrides`.
    ///
    /// `device` is queried only when no raw-identifier override is set.
    pub fn detect<D, O>(device: &D, overrides: &O) -> Self
    where
        D: DeviceNameSource + ?Sized,
        O: OverrideSource + ?Sized,
    {
        let raw = match override_value(overrides, OverrideKey::DeviceArch) {
            Some(arch) => {
                log::debug!("raw device identifier overridden with '{arch}'");
                arch
            }
            None => device.device_name(),
        };
        let enforced = override_value(overrides, OverrideKey::EnforceDevice);
        let descriptor = Self::with_enforced_name(&raw, enforced.as_deref());
        log::debug!(
            "target '{}' from '{raw}': sramecc={} (reported {}), xnack={}, db-id={}",
            descriptor.name,
            descriptor.sramecc,
            descriptor.sramecc_reported,
            descriptor.xnack,
            descriptor.db_id,
        );
        descriptor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trusted SRAMECC state.
    pub fn sramecc(&self) -> FeatureState {
        self.sramecc
    }

    /// SRAMECC state as reported by the driver. May differ from [`Self::sramecc`].
    pub fn sramecc_reported(&self) -> FeatureState {
        self.sramecc_reported
    }

    pub fn xnack(&self) -> FeatureState {
        self.xnack
    }

    /// Key into the per-architecture tuning database.
    pub fn db_id(&self) -> &str {
        &self.db_id
    }

    pub fn max_wave_scratch_size(&self) -> usize {
        MAX_WAVE_SCRATCH_SIZE
    }

    /// Target ID for code-object compilers, e.g. `gfx906:sramecc-:xnack+`.
    ///
    /// Uses the reported SRAMECC state so the compiler sees what the driver
    /// sees. Unknown features are left out.
    pub fn compiler_target_id(&self) -> String {
        let mut id = self.name.clone();
        for (feature, state) in [
            (Feature::Sramecc, self.sramecc_reported),
            (Feature::Xnack, self.xnack),
        ] {
            if let Some(sign) = state.sign() {
                id.push(':');
                id.push_str(feature.name());
                id.push(sign);
            }
        }
        id
    }
}
