//! `gfxtarget doctor` — override and environment diagnostics.

use std::path::Path;

use anyhow::Result;

use gfxtarget_props::config::find_config;
use gfxtarget_props::{EnvOverrides, OverrideKey, OverrideSource, MAX_WAVE_SCRATCH_SIZE};

/// Print where overrides would come from.
pub fn run(cwd: &Path) -> Result<()> {
    println!("=== gfxtarget Doctor ===");
    println!();

    println!("gfxtarget version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Environment ---");
    for key in OverrideKey::ALL {
        println!("  {:<26} {}", key.env_var(), describe_value(EnvOverrides.lookup(key)));
    }
    println!();

    println!("--- Config File ---");
    match find_config(cwd) {
        Ok(Some((config, path))) => {
            println!("  gfxtarget.toml: found at {}", path.display());
            for key in OverrideKey::ALL {
                println!("  {:<26} {}", format!("{key:?}"), describe_value(config.lookup(key)));
            }
        }
        Ok(None) => println!("  gfxtarget.toml: not found"),
        Err(e) => println!("  gfxtarget.toml: error — {e}"),
    }
    println!();

    println!("--- Limits ---");
    println!("  Max wave scratch size: {MAX_WAVE_SCRATCH_SIZE} bytes");

    Ok(())
}

fn describe_value(value: Option<String>) -> String {
    match value {
        None => "(unset)".to_string(),
        Some(v) if v.is_empty() => "(empty, ignored)".to_string(),
        Some(v) => format!("'{v}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_values() {
        assert_eq!(describe_value(None), "(unset)");
        assert_eq!(describe_value(Some(String::new())), "(empty, ignored)");
        assert_eq!(describe_value(Some("gfx906".into())), "'gfx906'");
    }

    #[test]
    fn run_without_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path()).is_ok());
    }
}
