//! CPU runtime implementation
//!
//! The CPU runtime uses standard heap allocation and serves as the reference
//! memory domain. Distinct `CpuDevice` ids model distinct host domains
//! (useful for exercising relocation without an accelerator).

mod device;
mod runtime;

pub use device::CpuDevice;
pub use runtime::CpuRuntime;
