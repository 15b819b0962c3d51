//! # Configuration Emission
//!
//! Per-variant memory-hierarchy tables and the `#define` block the build
//! system captures into its generated configuration header.
//!
//! Each [`CpuVariant`] owns one static [`CpuConfig`] row; adding a variant
//! is a data addition, not a control-flow edit. Emission order is part of
//! the contract: some toolchains let later duplicate definitions override
//! earlier ones, so the sequence must be deterministic and byte-identical
//! across calls.

use std::io::{self, Write};

use crate::cpuid::CpuVariant;

bitflags! {
    /// Architecture-wide switches, emitted as bare `#define` lines ahead of
    /// the geometry constants.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct ArchSwitches: u32 {
        /// Baseline ARMv8 code paths apply.
        const ARMV8 = 1 << 0;
        /// ThunderX-specific code paths apply.
        const THUNDERX = 1 << 1;
    }
}

/// Memory-hierarchy geometry for one CPU variant.
pub struct CpuConfig {
    /// Architecture switches, emitted first.
    pub switches: ArchSwitches,
    /// L1 data cache size in bytes.
    pub l1_data_size: u32,
    /// L1 data cache line size in bytes.
    pub l1_data_linesize: u32,
    /// L2 cache size in bytes.
    pub l2_size: u32,
    /// L2 cache line size in bytes.
    pub l2_linesize: u32,
    /// Default data TLB entry count.
    pub dtb_default_entries: u32,
    /// Data TLB page size in bytes.
    pub dtb_size: u32,
    /// L2 cache associativity.
    pub l2_associative: u32,
}

impl CpuConfig {
    /// The named geometry constants in emission order.
    fn constants(&self) -> [(&'static str, u32); 7] {
        [
            ("L1_DATA_SIZE", self.l1_data_size),
            ("L1_DATA_LINESIZE", self.l1_data_linesize),
            ("L2_SIZE", self.l2_size),
            ("L2_LINESIZE", self.l2_linesize),
            ("DTB_DEFAULT_ENTRIES", self.dtb_default_entries),
            ("DTB_SIZE", self.dtb_size),
            ("L2_ASSOCIATIVE", self.l2_associative),
        ]
    }
}

/// Geometry of a generic ARMv8 core.
const ARMV8: CpuConfig = CpuConfig {
    switches: ArchSwitches::ARMV8,
    l1_data_size: 32768,
    l1_data_linesize: 64,
    l2_size: 262_144,
    l2_linesize: 64,
    dtb_default_entries: 64,
    dtb_size: 4096,
    l2_associative: 4,
};

/// Geometry of a Cavium ThunderX core: 128-byte lines and a 16 MiB L2.
const THUNDERX: CpuConfig = CpuConfig {
    switches: ArchSwitches::ARMV8.union(ArchSwitches::THUNDERX),
    l1_data_size: 32768,
    l1_data_linesize: 128,
    l2_size: 16_777_216,
    l2_linesize: 128,
    dtb_default_entries: 64,
    dtb_size: 4096,
    l2_associative: 16,
};

impl CpuVariant {
    /// The configuration row for this variant. `Unknown` has none; its
    /// callers fall back to whatever generic configuration they carry.
    pub fn config(self) -> Option<&'static CpuConfig> {
        match self {
            CpuVariant::Unknown => None,
            CpuVariant::Armv8 => Some(&ARMV8),
            CpuVariant::ThunderX => Some(&THUNDERX),
        }
    }

    /// Upper-case core name used by the build system.
    pub fn core_name(self) -> &'static str {
        match self {
            CpuVariant::Unknown => "UNKNOWN",
            CpuVariant::Armv8 => "ARMV8",
            CpuVariant::ThunderX => "THUNDERX",
        }
    }

    /// Subarchitecture name; spelled the same as the core name.
    pub fn subarchitecture(self) -> &'static str {
        self.core_name()
    }

    /// Lower-case suffix of the tuned library built for this variant, or
    /// `None` when no tuned library exists.
    pub fn library_name(self) -> Option<&'static str> {
        match self {
            CpuVariant::Unknown => None,
            CpuVariant::Armv8 => Some("armv8"),
            CpuVariant::ThunderX => Some("thunderx"),
        }
    }
}

/// Architecture family name.
pub fn architecture() -> &'static str {
    "ARM"
}

/// Source subdirectory holding this architecture's kernels.
pub fn subdirectory() -> &'static str {
    "arm64"
}

/// Writes the `#define` block for `variant` to `out`.
///
/// Switches come first as bare defines in bit order, then the geometry
/// constants in table order. The `Unknown` variant emits nothing and
/// succeeds.
pub fn emit_config<W: Write>(variant: CpuVariant, out: &mut W) -> io::Result<()> {
    let Some(config) = variant.config() else {
        return Ok(());
    };
    for (name, _) in config.switches.iter_names() {
        writeln!(out, "#define {}", name)?;
    }
    for (name, value) in config.constants() {
        writeln!(out, "#define {} {}", name, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitted(variant: CpuVariant) -> String {
        let mut out = Vec::new();
        emit_config(variant, &mut out).expect("in-memory write");
        String::from_utf8(out).expect("ascii output")
    }

    #[test]
    fn test_armv8_block() {
        assert_eq!(
            emitted(CpuVariant::Armv8),
            "#define ARMV8\n\
             #define L1_DATA_SIZE 32768\n\
             #define L1_DATA_LINESIZE 64\n\
             #define L2_SIZE 262144\n\
             #define L2_LINESIZE 64\n\
             #define DTB_DEFAULT_ENTRIES 64\n\
             #define DTB_SIZE 4096\n\
             #define L2_ASSOCIATIVE 4\n"
        );
    }

    #[test]
    fn test_thunderx_block() {
        assert_eq!(
            emitted(CpuVariant::ThunderX),
            "#define ARMV8\n\
             #define THUNDERX\n\
             #define L1_DATA_SIZE 32768\n\
             #define L1_DATA_LINESIZE 128\n\
             #define L2_SIZE 16777216\n\
             #define L2_LINESIZE 128\n\
             #define DTB_DEFAULT_ENTRIES 64\n\
             #define DTB_SIZE 4096\n\
             #define L2_ASSOCIATIVE 16\n"
        );
    }

    #[test]
    fn test_unknown_emits_nothing() {
        assert_eq!(emitted(CpuVariant::Unknown), "");
    }

    #[test]
    fn test_emission_is_deterministic() {
        for variant in [CpuVariant::Unknown, CpuVariant::Armv8, CpuVariant::ThunderX] {
            assert_eq!(emitted(variant), emitted(variant));
        }
    }

    #[test]
    fn test_constant_keys_are_disjoint_and_exhaustive() {
        let armv8 = ARMV8.constants();
        let thunderx = THUNDERX.constants();
        // both rows define the same key set, each key exactly once
        for (i, (name, _)) in armv8.iter().enumerate() {
            assert_eq!(*name, thunderx[i].0);
            assert_eq!(armv8.iter().filter(|(n, _)| n == name).count(), 1);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(CpuVariant::Unknown.core_name(), "UNKNOWN");
        assert_eq!(CpuVariant::Armv8.core_name(), "ARMV8");
        assert_eq!(CpuVariant::ThunderX.core_name(), "THUNDERX");
        assert_eq!(CpuVariant::Armv8.subarchitecture(), "ARMV8");
        assert_eq!(CpuVariant::Unknown.library_name(), None);
        assert_eq!(CpuVariant::Armv8.library_name(), Some("armv8"));
        assert_eq!(CpuVariant::ThunderX.library_name(), Some("thunderx"));
        assert_eq!(architecture(), "ARM");
        assert_eq!(subdirectory(), "arm64");
    }
}
