//! # getarch
//!
//! Configuration-time CPU identification for ARM64 numeric kernels.
//!
//! The crate answers one question, once per build: which microarchitecture
//! variant is this machine, and which memory-hierarchy constants should the
//! tuned kernels be compiled against. The answer is immutable for the
//! lifetime of a build; there is no runtime dispatch.
//!
//! ## Structure
//!
//! - [`cpuid`] — the probe: MIDR signature match first, then a scan of the
//!   textual processor description
//! - [`config`] — per-variant constant tables and `#define` emission
//! - [`arch`] — load/store-exclusive locking, memory barriers, wall-clock
//!   timer and the division call boundary used by the kernel layer

#[macro_use]
extern crate bitflags;

pub mod arch;
pub mod config;
pub mod cpuid;

pub use config::emit_config;
pub use cpuid::{detect, has_feature, CpuVariant};
