//! Canonical architecture name resolution.
//!
//! Drivers report devices under marketing codenames, superseded ISA revisions,
//! or long-form strings. These are collapsed onto one canonical `gfx` name so
//! downstream lookups see a single identifier per architecture.

/// Legacy device names and the canonical architecture they map to.
///
/// Matching is exact and case-sensitive. Canonical names never appear on the
/// left, so resolution is idempotent.
static ALIASES: &[(&str, &str)] = &[
    ("Ellesmere", "gfx803"),
    ("Baffin", "gfx803"),
    ("RacerX", "gfx803"),
    ("Polaris10", "gfx803"),
    ("Polaris11", "gfx803"),
    ("Tonga", "gfx803"),
    ("Fiji", "gfx803"),
    ("gfx800", "gfx803"),
    ("gfx802", "gfx803"),
    ("gfx804", "gfx803"),
    ("Vega10", "gfx900"),
    ("gfx901", "gfx900"),
    ("10.3.0 Sienna_Cichlid 18", "gfx1030"),
];

/// The full alias table, in declaration order.
pub fn aliases() -> &'static [(&'static str, &'static str)] {
    ALIASES
}

/// The device part of a raw identifier: everything before the first `:`.
pub fn device_part(raw: &str) -> &str {
    raw.split_once(':').map_or(raw, |(device, _)| device)
}

/// Look up the canonical name for a legacy device name.
pub fn canonical_alias(device: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == device)
        .map(|(_, canonical)| *canonical)
}

/// Resolve the canonical architecture name.
///
/// A non-empty `enforced` name is returned verbatim without consulting the
/// alias table. Unknown device names pass through unchanged.
pub fn resolve_name(raw: &str, enforced: Option<&str>) -> String {
    if let Some(name) = enforced.filter(|s| !s.is_empty()) {
        log::debug!("using enforced device name '{name}'");
        return name.to_string();
    }

    let device = device_part(raw);
    match canonical_alias(device) {
        Some(canonical) => {
            log::debug!("device '{device}' resolved to '{canonical}'");
            canonical.to_string()
        }
        None => device.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_part_splits_at_first_colon() {
        assert_eq!(device_part("gfx906:sramecc-:xnack+"), "gfx906");
        assert_eq!(device_part("gfx1030"), "gfx1030");
        assert_eq!(device_part(""), "");
        assert_eq!(device_part(":xnack+"), "");
    }

    #[test]
    fn codenames_collapse() {
        for codename in ["Ellesmere", "Baffin", "RacerX", "Polaris10", "Polaris11", "Tonga", "Fiji"] {
            assert_eq!(resolve_name(codename, None), "gfx803", "{codename}");
        }
        assert_eq!(resolve_name("Vega10:xnack-", None), "gfx900");
        assert_eq!(resolve_name("gfx901", None), "gfx900");
        assert_eq!(resolve_name("10.3.0 Sienna_Cichlid 18", None), "gfx1030");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(resolve_name("ellesmere", None), "ellesmere");
        assert_eq!(canonical_alias("FIJI"), None);
    }

    #[test]
    fn unknown_passes_through() {
        assert_eq!(resolve_name("gfx1100:xnack-", None), "gfx1100");
        assert_eq!(resolve_name("", None), "");
    }

    #[test]
    fn enforced_name_wins() {
        assert_eq!(resolve_name("Ellesmere", Some("Fiji")), "Fiji");
        assert_eq!(resolve_name("gfx906:xnack+", Some("gfx908")), "gfx908");
        assert_eq!(resolve_name("Ellesmere", Some("")), "gfx803");
    }

    #[test]
    fn canonical_names_are_fixed_points() {
        for (_, canonical) in aliases() {
            assert_eq!(resolve_name(canonical, None), *canonical);
            assert!(canonical_alias(canonical).is_none());
        }
    }
}
