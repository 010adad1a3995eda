//! `gfxtarget aliases` — legacy device name table.

use anyhow::Result;

use gfxtarget_props::name::aliases;

/// Print every legacy device name and its canonical architecture.
pub fn run() -> Result<()> {
    println!("Device name aliases:");
    println!();
    for (alias, canonical) in aliases() {
        println!("  {alias:<28} {canonical}");
    }
    println!();
    println!("Names not listed resolve to themselves.");
    Ok(())
}
