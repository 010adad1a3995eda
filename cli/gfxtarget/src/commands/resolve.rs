//! `gfxtarget resolve` — build and print a target descriptor.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use gfxtarget_props::config::find_config;
use gfxtarget_props::overrides::override_value;
use gfxtarget_props::{EnvOverrides, Layered, OverrideKey, OverrideSource, TargetDescriptor};

/// Arguments of `gfxtarget resolve`.
#[derive(Debug, Default)]
pub struct ResolveArgs {
    pub raw: Option<String>,
    pub device_arch: Option<String>,
    pub enforce_device: Option<String>,
    pub format: Option<String>,
    pub no_env: bool,
}

/// Machine-readable output.
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct Report<'a> {
    #[serde(flatten)]
    target: &'a TargetDescriptor,
    compiler_target_id: String,
    max_wave_scratch_size: usize,
}

pub fn run(cwd: &Path, args: &ResolveArgs) -> Result<()> {
    let descriptor = resolve(cwd, args)?;
    print!("{}", render(&descriptor, args.format.as_deref())?);
    Ok(())
}

/// Resolve with flag, environment and config-file overrides, in that order.
pub fn resolve(cwd: &Path, args: &ResolveArgs) -> Result<TargetDescriptor> {
    let flags = flag_overrides(args);

    let config = if args.no_env {
        None
    } else {
        find_config(cwd)
            .context("reading gfxtarget.toml")?
            .map(|(config, _)| config)
    };

    let mut overrides = Layered::new().with(&flags);
    if !args.no_env {
        overrides = overrides.with(&EnvOverrides);
    }
    if let Some(config) = &config {
        overrides = overrides.with(config);
    }

    detect_with(args.raw.as_deref(), &overrides)
}

fn flag_overrides(args: &ResolveArgs) -> HashMap<OverrideKey, String> {
    let mut flags = HashMap::new();
    if let Some(arch) = &args.device_arch {
        flags.insert(OverrideKey::DeviceArch, arch.clone());
    }
    if let Some(name) = &args.enforce_device {
        flags.insert(OverrideKey::EnforceDevice, name.clone());
    }
    flags
}

/// Build a descriptor from an optional raw identifier and assembled overrides.
fn detect_with(raw: Option<&str>, overrides: &dyn OverrideSource) -> Result<TargetDescriptor> {
    let raw = match raw {
        Some(raw) => raw,
        None if override_value(overrides, OverrideKey::DeviceArch).is_some() => "",
        None => bail!(
            "no device identifier given; pass one, use --device-arch, or set {}",
            OverrideKey::DeviceArch.env_var()
        ),
    };

    Ok(TargetDescriptor::detect(raw, overrides))
}

/// Render a descriptor in the requested format (default: human).
pub fn render(descriptor: &TargetDescriptor, format: Option<&str>) -> Result<String> {
    let report = Report {
        target: descriptor,
        compiler_target_id: descriptor.compiler_target_id(),
        max_wave_scratch_size: descriptor.max_wave_scratch_size(),
    };
    match format.unwrap_or("human") {
        "human" => Ok(render_human(&report)),
        "json" => {
            let mut out = serde_json::to_string_pretty(&report)?;
            out.push('\n');
            Ok(out)
        }
        "toml" => Ok(toml::to_string_pretty(&report)?),
        other => bail!("unknown format: '{other}' (expected human, json, or toml)"),
    }
}

fn render_human(report: &Report<'_>) -> String {
    let target = report.target;
    let mut out = String::new();
    let _ = writeln!(out, "=== Target: {} ===", target.name());
    let _ = writeln!(out, "  Database key:       {}", target.db_id());
    let _ = writeln!(out, "  Compiler target ID: {}", report.compiler_target_id);
    let _ = writeln!(
        out,
        "  SRAMECC:            {} (reported: {})",
        target.sramecc(),
        target.sramecc_reported()
    );
    let _ = writeln!(out, "  XNACK:              {}", target.xnack());
    let _ = writeln!(
        out,
        "  Max wave scratch:   {} bytes",
        report.max_wave_scratch_size
    );
    out
}
