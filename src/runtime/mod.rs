//! Runtime backends: memory domains and relocation
//!
//! This module defines the contract a compute backend must satisfy for field
//! data to live in (and move between) its memory domains. Only the contract
//! lives here; kernel dispatch and scheduling belong to collaborators.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a memory domain)
//! ├── allocate / deallocate (raw device buffers)
//! └── copy_to_device / copy_from_device (host staging)
//! Relocate (per-type capability: produce a copy in a target domain)
//! ```

pub mod cpu;

use crate::error::Result;

/// Core trait for compute backends
///
/// `Runtime` abstracts over memory domains (host CPU, accelerator devices).
/// It uses static dispatch via generics for zero-cost abstraction. Buffers
/// are addressed by opaque `u64` handles so the same storage type serves
/// every backend.
pub trait Runtime: Clone + Send + Sync + 'static {
    /// Device identifier type
    type Device: Device;

    /// Human-readable name of this runtime
    fn name() -> &'static str;

    /// Get the default device
    fn default_device() -> Self::Device;

    /// Allocate zero-initialized device memory
    ///
    /// Returns a device handle that can be passed to the copy operations.
    fn allocate(size_bytes: usize, device: &Self::Device) -> Result<u64>;

    /// Deallocate device memory
    fn deallocate(ptr: u64, size_bytes: usize, device: &Self::Device);

    /// Copy host bytes into device memory at `dst`
    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device);

    /// Copy device memory at `src` into host bytes
    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device);
}

/// Trait for device identification
pub trait Device: Clone + Send + Sync + 'static {
    /// Unique identifier for this device
    fn id(&self) -> usize;

    /// Check if two devices name the same memory domain
    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Human-readable name
    fn name(&self) -> String {
        format!("Device({})", self.id())
    }
}

/// Capability to produce a structurally identical copy in a target memory
/// domain
///
/// Every value type that may need a device-resident copy implements this:
/// grids, storages, fields, masks, and the conditional node itself. Composite
/// values relocate by relocating each constituent; nothing is special-cased.
///
/// Relocation is one-shot and synchronous. The source is not mutated, and the
/// two copies are never synchronized afterward - callers re-relocate when
/// underlying data changes.
pub trait Relocate<R: Runtime>: Sized {
    /// Produce a copy of `self` whose buffers reside on `device`
    fn to_device(&self, device: &R::Device) -> Result<Self>;
}
