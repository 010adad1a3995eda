//! Hardware feature flags and their inference from raw device identifiers.
//!
//! A raw identifier such as `gfx906:sramecc-:xnack+` carries feature suffixes
//! after the architecture name. Suffixes are found by literal substring search,
//! so their order and any unrecognized neighbours do not matter.

use std::fmt;

use serde::Serialize;

/// Architectures that ship with SRAMECC enabled unless stated otherwise.
pub const SRAMECC_ON_BY_DEFAULT: &[&str] = &["gfx906", "gfx908"];

/// Architecture whose driver always reports `sramecc-`, whatever the hardware
/// state. The reported SRAMECC value for it is discarded permanently.
pub const SRAMECC_MISREPORTED: &str = "gfx900";

/// A tri-state feature flag. `Unknown` means no assumption may be made and is
/// never treated as `Disabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureState {
    Enabled,
    Disabled,
    #[default]
    Unknown,
}

/// A feature that can appear as a `:name+` / `:name-` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// On-chip memory error correction.
    Sramecc,
    /// Memory fault retry.
    Xnack,
}

impl Feature {
    /// Suffix name as it appears in a device identifier.
    pub const fn name(self) -> &'static str {
        match self {
            Feature::Sramecc => "sramecc",
            Feature::Xnack => "xnack",
        }
    }

    /// The literal `(enabled, disabled)` markers searched for in raw identifiers.
    pub const fn markers(self) -> (&'static str, &'static str) {
        match self {
            Feature::Sramecc => (":sramecc+", ":sramecc-"),
            Feature::Xnack => (":xnack+", ":xnack-"),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FeatureState {
    /// State stated explicitly by a suffix in `raw`, if any.
    ///
    /// The enabled marker wins when both are present.
    pub fn reported(raw: &str, feature: Feature) -> Option<Self> {
        let (on, off) = feature.markers();
        if raw.contains(on) {
            Some(FeatureState::Enabled)
        } else if raw.contains(off) {
            Some(FeatureState::Disabled)
        } else {
            None
        }
    }

    pub fn is_enabled(self) -> bool {
        self == FeatureState::Enabled
    }

    /// Convert to an optional bool, `None` for `Unknown`.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            FeatureState::Enabled => Some(true),
            FeatureState::Disabled => Some(false),
            FeatureState::Unknown => None,
        }
    }

    /// Target-ID suffix sign (`+` / `-`), `None` for `Unknown`.
    pub fn sign(self) -> Option<char> {
        self.as_bool().map(|on| if on { '+' } else { '-' })
    }
}

impl From<bool> for FeatureState {
    fn from(on: bool) -> Self {
        if on {
            FeatureState::Enabled
        } else {
            FeatureState::Disabled
        }
    }
}

impl From<Option<bool>> for FeatureState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(FeatureState::Unknown, FeatureState::from)
    }
}

impl fmt::Display for FeatureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeatureState::Enabled => "enabled",
            FeatureState::Disabled => "disabled",
            FeatureState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Feature flags inferred for one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferredFeatures {
    /// Trusted SRAMECC state, derived from the architecture only.
    pub sramecc: FeatureState,
    /// SRAMECC state as reported by the driver, for toolchain interop.
    pub sramecc_reported: FeatureState,
    pub xnack: FeatureState,
}

/// Whether `name` belongs to the SRAMECC-on-by-default set.
pub fn is_sramecc_on_by_default(name: &str) -> bool {
    SRAMECC_ON_BY_DEFAULT.contains(&name)
}

/// Trusted SRAMECC state for an architecture.
///
/// Older kernel drivers may report the wrong suffix, so this never reads the
/// raw identifier.
pub fn default_sramecc(name: &str) -> FeatureState {
    if is_sramecc_on_by_default(name) {
        FeatureState::Enabled
    } else {
        FeatureState::Unknown
    }
}

/// SRAMECC state as reported in `raw`, falling back to `default`.
///
/// Forced to `Unknown` for [`SRAMECC_MISREPORTED`]. The trusted default is not
/// affected by that correction.
pub fn reported_sramecc(raw: &str, name: &str, default: FeatureState) -> FeatureState {
    if name == SRAMECC_MISREPORTED {
        if raw.contains(Feature::Sramecc.markers().1) {
            log::debug!("ignoring reported sramecc- for {name}: driver misreports it");
        }
        return FeatureState::Unknown;
    }
    FeatureState::reported(raw, Feature::Sramecc).unwrap_or(default)
}

/// XNACK state as reported in `raw`. There is no per-architecture default.
pub fn reported_xnack(raw: &str) -> FeatureState {
    FeatureState::reported(raw, Feature::Xnack).unwrap_or(FeatureState::Unknown)
}

/// Infer all feature flags from the raw identifier and the resolved name.
pub fn infer_features(raw: &str, name: &str) -> InferredFeatures {
    let sramecc = default_sramecc(name);
    InferredFeatures {
        sramecc,
        sramecc_reported: reported_sramecc(raw, name, sramecc),
        xnack: reported_xnack(raw),
    }
}
