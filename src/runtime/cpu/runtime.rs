//! CPU runtime implementation

use super::device::CpuDevice;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use std::alloc::{alloc_zeroed, dealloc, Layout as AllocLayout};

// SIMD-friendly buffer alignment
const ALIGN: usize = 64;

/// CPU compute runtime
///
/// Memory is allocated on the heap using the system allocator, zeroed and
/// 64-byte aligned.
#[derive(Clone, Debug, Default)]
pub struct CpuRuntime;

impl Runtime for CpuRuntime {
    type Device = CpuDevice;

    fn name() -> &'static str {
        "cpu"
    }

    fn default_device() -> Self::Device {
        CpuDevice::new()
    }

    fn allocate(size_bytes: usize, _device: &Self::Device) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }

        let layout = AllocLayout::from_size_align(size_bytes, ALIGN)
            .map_err(|_| Error::OutOfMemory { size: size_bytes })?;

        let ptr = unsafe { alloc_zeroed(layout) };
        if ptr.is_null() {
            return Err(Error::OutOfMemory { size: size_bytes });
        }

        Ok(ptr as u64)
    }

    fn deallocate(ptr: u64, size_bytes: usize, _device: &Self::Device) {
        if ptr == 0 || size_bytes == 0 {
            return;
        }

        let layout = AllocLayout::from_size_align(size_bytes, ALIGN)
            .expect("allocation layout was valid at allocate time");

        unsafe {
            dealloc(ptr as *mut u8, layout);
        }
    }

    fn copy_to_device(src: &[u8], dst: u64, _device: &Self::Device) {
        if src.is_empty() || dst == 0 {
            return;
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), dst as *mut u8, src.len());
        }
    }

    fn copy_from_device(src: u64, dst: &mut [u8], _device: &Self::Device) {
        if dst.is_empty() || src == 0 {
            return;
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src as *const u8, dst.as_mut_ptr(), dst.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_roundtrip() {
        let device = CpuDevice::new();
        let ptr = CpuRuntime::allocate(16, &device).unwrap();
        assert_ne!(ptr, 0);

        let src = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        CpuRuntime::copy_to_device(&src, ptr, &device);

        let mut dst = [0u8; 16];
        CpuRuntime::copy_from_device(ptr, &mut dst, &device);
        assert_eq!(src, dst);

        CpuRuntime::deallocate(ptr, 16, &device);
    }

    #[test]
    fn test_zero_sized_allocation() {
        let device = CpuDevice::new();
        let ptr = CpuRuntime::allocate(0, &device).unwrap();
        assert_eq!(ptr, 0);
        CpuRuntime::deallocate(ptr, 0, &device);
    }

    #[test]
    fn test_allocation_is_zeroed() {
        let device = CpuDevice::new();
        let ptr = CpuRuntime::allocate(32, &device).unwrap();

        let mut dst = [0xffu8; 32];
        CpuRuntime::copy_from_device(ptr, &mut dst, &device);
        assert!(dst.iter().all(|&b| b == 0));

        CpuRuntime::deallocate(ptr, 32, &device);
    }
}
