//! # CPU Identification
//!
//! Reduces the platform's CPU descriptors to a closed set of variant tags.
//!
//! Two sources feed the classification, in priority order:
//!
//! 1. The main identification register (MIDR), read from the auxiliary
//!    vector on capable systems. An exact implementor/part-number signature
//!    match is authoritative and short-circuits textual probing.
//! 2. The textual processor description (`/proc/cpuinfo`), scanned for the
//!    first accepted model label whose value carries an architecture marker.
//!
//! Any failure to read either source degrades silently to
//! [`CpuVariant::Unknown`]: detection is an aid, not a correctness-critical
//! path, and callers must treat `Unknown` as a supported outcome.

pub mod cpuinfo;
pub mod midr;

use std::sync::OnceLock;

use self::cpuinfo::CpuInfo;
use self::midr::Midr;

/// The resolved microarchitecture class of the executing CPU.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CpuVariant {
    /// Nothing recognizable; callers fall back to generic configuration.
    Unknown,
    /// Baseline ARMv8 core.
    Armv8,
    /// Cavium ThunderX.
    ThunderX,
}

/// Labels accepted for the model line. The first line matching any of these
/// wins.
const MODEL_LABELS: &[&str] = &["model name", "Processor"];

/// Marker tokens identifying an ARMv8 core in the model line's value. Linux
/// spells the model either `AArch64 Processor ...` or `ARMv8 Processor ...`
/// depending on kernel version.
const ARCH_MARKERS: &[&str] = &["AArch64", "ARMv8"];

/// Returns the variant of the executing CPU.
///
/// The probe runs once per process; repeated calls return the cached value.
pub fn detect() -> CpuVariant {
    static DETECTED: OnceLock<CpuVariant> = OnceLock::new();
    *DETECTED.get_or_init(detect_uncached)
}

/// Runs the full identification sequence against the live platform sources.
fn detect_uncached() -> CpuVariant {
    let midr = midr::read();
    let info = match CpuInfo::open() {
        Ok(info) => Some(info),
        Err(err) => {
            log::debug!("cpu information source unavailable: {}", err);
            None
        }
    };
    let variant = classify(midr, info.as_ref());
    log::debug!("detected cpu variant {:?}", variant);
    variant
}

/// Classifies a CPU from an optional MIDR value and an optional textual
/// description. Pure function of its inputs.
fn classify(midr: Option<Midr>, info: Option<&CpuInfo>) -> CpuVariant {
    if let Some(midr) = midr {
        if midr.is_thunderx() {
            return CpuVariant::ThunderX;
        }
    }
    let Some(info) = info else {
        return CpuVariant::Unknown;
    };
    match info.value_of(MODEL_LABELS) {
        Some(model) if ARCH_MARKERS.iter().any(|marker| model.contains(marker)) => {
            CpuVariant::Armv8
        }
        _ => CpuVariant::Unknown,
    }
}

/// Reports whether `name` appears as a whole whitespace-delimited token in
/// the platform's `Features` line.
///
/// An unreadable source or a missing label reads as `false`, never an error.
pub fn has_feature(name: &str) -> bool {
    match CpuInfo::open() {
        Ok(info) => info.has_feature(name),
        Err(err) => {
            log::debug!("cpu feature source unavailable: {}", err);
            false
        }
    }
}
