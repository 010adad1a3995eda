//! Read-only override sources.
//!
//! Two values may be overridden: the raw device identifier and the final
//! architecture name. A value counts as set only when present and non-empty.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An overridable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverrideKey {
    /// Replaces the raw identifier normally read from the device.
    DeviceArch,
    /// Replaces the resolved architecture name, skipping alias lookup.
    EnforceDevice,
}

impl OverrideKey {
    pub const ALL: [OverrideKey; 2] = [OverrideKey::DeviceArch, OverrideKey::EnforceDevice];

    /// Environment variable consulted by [`EnvOverrides`].
    pub const fn env_var(self) -> &'static str {
        match self {
            OverrideKey::DeviceArch => "GFXTARGET_DEVICE_ARCH",
            OverrideKey::EnforceDevice => "GFXTARGET_ENFORCE_DEVICE",
        }
    }
}

/// A key-value source of override strings.
pub trait OverrideSource {
    /// Raw value for `key`, which may be empty.
    fn lookup(&self, key: OverrideKey) -> Option<String>;
}

/// Look up `key`, treating an empty value as unset.
pub fn override_value<S: OverrideSource + ?Sized>(source: &S, key: OverrideKey) -> Option<String> {
    source.lookup(key).filter(|v| !v.is_empty())
}

/// A source with nothing set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl OverrideSource for NoOverrides {
    fn lookup(&self, _key: OverrideKey) -> Option<String> {
        None
    }
}

/// Overrides read from the process environment.
///
/// Values that are not valid UTF-8 are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvOverrides;

impl OverrideSource for EnvOverrides {
    fn lookup(&self, key: OverrideKey) -> Option<String> {
        std::env::var(key.env_var()).ok()
    }
}

impl OverrideSource for HashMap<OverrideKey, String> {
    fn lookup(&self, key: OverrideKey) -> Option<String> {
        self.get(&key).cloned()
    }
}

impl<S: OverrideSource + ?Sized> OverrideSource for &S {
    fn lookup(&self, key: OverrideKey) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Several sources consulted in order; the first non-empty value wins.
#[derive(Default)]
pub struct Layered<'a> {
    layers: Vec<&'a dyn OverrideSource>,
}

impl<'a> Layered<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source with lower precedence than those already added.
    pub fn with(mut self, source: &'a dyn OverrideSource) -> Self {
        self.layers.push(source);
        self
    }
}

impl OverrideSource for Layered<'_> {
    fn lookup(&self, key: OverrideKey) -> Option<String> {
        self.layers
            .iter()
            .find_map(|layer| override_value(*layer, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(OverrideKey, &str)]) -> HashMap<OverrideKey, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn empty_value_is_unset() {
        let m = map(&[(OverrideKey::DeviceArch, "")]);
        assert_eq!(m.lookup(OverrideKey::DeviceArch).as_deref(), Some(""));
        assert_eq!(override_value(&m, OverrideKey::DeviceArch), None);
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        let m = map(&[(OverrideKey::EnforceDevice, " ")]);
        assert_eq!(override_value(&m, OverrideKey::EnforceDevice).as_deref(), Some(" "));
    }

    #[test]
    fn no_overrides() {
        for key in OverrideKey::ALL {
            assert_eq!(override_value(&NoOverrides, key), None);
        }
    }

    #[test]
    fn layered_first_non_empty_wins() {
        let top = map(&[(OverrideKey::DeviceArch, "")]);
        let middle = map(&[(OverrideKey::DeviceArch, "gfx906"), (OverrideKey::EnforceDevice, "gfx908")]);
        let bottom = map(&[(OverrideKey::DeviceArch, "gfx900")]);
        let layered = Layered::new().with(&top).with(&middle).with(&bottom);
        assert_eq!(layered.lookup(OverrideKey::DeviceArch).as_deref(), Some("gfx906"));
        assert_eq!(layered.lookup(OverrideKey::EnforceDevice).as_deref(), Some("gfx908"));
    }

    #[test]
    fn layered_empty() {
        let layered = Layered::new();
        assert_eq!(layered.lookup(OverrideKey::DeviceArch), None);
    }

    #[test]
    fn env_var_names() {
        assert_eq!(OverrideKey::DeviceArch.env_var(), "GFXTARGET_DEVICE_ARCH");
        assert_eq!(OverrideKey::EnforceDevice.env_var(), "GFXTARGET_ENFORCE_DEVICE");
    }
}
