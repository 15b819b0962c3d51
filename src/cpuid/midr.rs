//! The ARM64 main identification register (MIDR).
//!
//! MIDR_EL1 packs the implementor code, variant, architecture code, part
//! number and revision of the executing core into one word. Reading the
//! register itself requires EL1, so userspace takes the value the kernel
//! mirrors into the auxiliary vector instead.

use bitfield::bitfield;

bitfield! {
    /// Decoded view of a MIDR register value.
    #[derive(Clone, Copy, Eq, PartialEq)]
    pub struct Midr(u64);
    impl Debug;
    /// Minor revision of the part.
    pub u64, revision, _: 3, 0;
    /// Implementor-assigned part number.
    pub u64, part_num, _: 15, 4;
    /// Architecture code; `0xf` means "defined by the feature registers".
    pub u64, architecture, _: 19, 16;
    /// Major variant of the part.
    pub u64, variant, _: 23, 20;
    /// Implementor code, an ASCII character assigned by ARM.
    pub u64, implementor, _: 31, 24;
}

impl From<u64> for Midr {
    fn from(raw: u64) -> Self {
        Midr(raw)
    }
}

/// Cavium's implementor code (`'C'`).
const IMPLEMENTOR_CAVIUM: u64 = 0x43;

/// ThunderX CN88xx part number.
const PART_THUNDERX: u64 = 0x0a1;

impl Midr {
    /// Whether this value carries the ThunderX identification signature.
    pub fn is_thunderx(&self) -> bool {
        self.implementor() == IMPLEMENTOR_CAVIUM && self.part_num() == PART_THUNDERX
    }
}

/// Auxiliary vector entry type carrying the boot CPU's MIDR value.
#[cfg(all(target_os = "linux", target_arch = "aarch64"))]
const AT_ARM64_MIDR: libc::c_ulong = 38;

/// Reads the executing CPU's identification register value, where the
/// platform exposes one.
#[cfg(all(target_os = "linux", target_arch = "aarch64"))]
pub fn read() -> Option<Midr> {
    // getauxval reports 0 both for an absent entry and a zero value; a zero
    // MIDR identifies nothing, so the two collapse.
    let raw = unsafe { libc::getauxval(AT_ARM64_MIDR) };
    if raw == 0 {
        None
    } else {
        Some(Midr(raw as u64))
    }
}

/// No identification register is exposed on this platform.
#[cfg(not(all(target_os = "linux", target_arch = "aarch64")))]
pub fn read() -> Option<Midr> {
    None
}
