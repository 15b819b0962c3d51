//! Configuration-time entry point.
//!
//! Probes the CPU once and writes its `#define` block to stdout, where the
//! build system captures it into the generated configuration header. An
//! unidentified CPU emits nothing and still exits 0; diagnostics go to
//! stderr through the logger.

use std::io::{self, Write};

use anyhow::Result;

use getarch::{config, cpuid};

fn main() -> Result<()> {
    pretty_env_logger::init();

    let variant = cpuid::detect();
    log::info!(
        "core {} (library {})",
        variant.core_name(),
        variant.library_name().unwrap_or("none")
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    config::emit_config(variant, &mut out)?;
    out.flush()?;
    Ok(())
}
