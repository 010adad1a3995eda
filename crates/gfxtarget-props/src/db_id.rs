//! Tuning-database key construction.

use crate::feature::{is_sramecc_on_by_default, FeatureState};

/// Build the tuning-database key for an architecture and its feature flags.
///
/// Legacy databases for the SRAMECC-on-by-default architectures were keyed
/// without any suffix, so for those only the non-default case is encoded as
/// `_nosramecc`. Every other architecture encodes `_sramecc` when enabled.
/// `_xnack` always comes last.
pub fn build_db_id(name: &str, sramecc: FeatureState, xnack: FeatureState) -> String {
    let mut db_id = String::from(name);
    if is_sramecc_on_by_default(name) {
        if !sramecc.is_enabled() {
            db_id.push_str("_nosramecc");
        }
    } else if sramecc.is_enabled() {
        db_id.push_str("_sramecc");
    }
    if xnack.is_enabled() {
        db_id.push_str("_xnack");
    }
    db_id
}
