//! Storage: device memory with Arc-based sharing

use crate::dtype::Element;
use crate::error::Result;
use crate::runtime::{Relocate, Runtime};
use std::marker::PhantomData;
use std::sync::Arc;

/// Typed device buffer with reference counting
///
/// Storage wraps device memory behind an opaque `u64` handle, letting fields
/// share a buffer zero-copy. Memory is deallocated when the last reference is
/// dropped. Element access goes through the runtime's copy contract, so the
/// same type serves host and accelerator domains.
pub struct Storage<R: Runtime, T: Element> {
    inner: Arc<StorageInner<R>>,
    _elem: PhantomData<T>,
}

struct StorageInner<R: Runtime> {
    /// Device handle (pointer or buffer id, backend-defined)
    ptr: u64,
    /// Buffer size in bytes
    size_bytes: usize,
    /// Device where the memory is allocated
    device: R::Device,
}

impl<R: Runtime, T: Element> Storage<R, T> {
    /// Allocate zero-initialized storage for `len` elements
    pub fn new(len: usize, device: &R::Device) -> Result<Self> {
        let size_bytes = len * std::mem::size_of::<T>();
        let ptr = R::allocate(size_bytes, device)?;

        Ok(Self {
            inner: Arc::new(StorageInner {
                ptr,
                size_bytes,
                device: device.clone(),
            }),
            _elem: PhantomData,
        })
    }

    /// Create storage by copying `data` to the device
    pub fn from_slice(data: &[T], device: &R::Device) -> Result<Self> {
        let storage = Self::new(data.len(), device)?;
        R::copy_to_device(bytemuck::cast_slice(data), storage.inner.ptr, device);
        Ok(storage)
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.size_bytes / std::mem::size_of::<T>()
    }

    /// Whether the storage holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.size_bytes == 0
    }

    /// The device this buffer is allocated on
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.inner.device
    }

    /// Read one element
    ///
    /// Bounds are only checked in debug builds; the index-window machinery
    /// guarantees in-range access on the hot path.
    #[inline]
    pub fn read(&self, index: usize) -> T {
        debug_assert!(index < self.len(), "storage read out of bounds");
        let mut value = T::zeroed();
        let offset = (index * std::mem::size_of::<T>()) as u64;
        R::copy_from_device(
            self.inner.ptr + offset,
            bytemuck::bytes_of_mut(&mut value),
            &self.inner.device,
        );
        value
    }

    /// Write one element
    #[inline]
    pub fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.len(), "storage write out of bounds");
        let offset = (index * std::mem::size_of::<T>()) as u64;
        R::copy_to_device(
            bytemuck::bytes_of(&value),
            self.inner.ptr + offset,
            &self.inner.device,
        );
    }

    /// Copy the whole buffer to a host `Vec`
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = vec![T::zeroed(); self.len()];
        R::copy_from_device(
            self.inner.ptr,
            bytemuck::cast_slice_mut(&mut out),
            &self.inner.device,
        );
        out
    }

}

impl<R: Runtime, T: Element> Clone for Storage<R, T> {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _elem: PhantomData,
        }
    }
}

impl<R: Runtime, T: Element> Relocate<R> for Storage<R, T> {
    /// Copy the buffer into a target memory domain via a host bounce
    fn to_device(&self, device: &R::Device) -> Result<Self> {
        let host = self.to_vec();
        Self::from_slice(&host, device)
    }
}

impl<R: Runtime> Drop for StorageInner<R> {
    fn drop(&mut self) {
        if self.ptr != 0 {
            R::deallocate(self.ptr, self.size_bytes, &self.device);
        }
    }
}

impl<R: Runtime, T: Element> std::fmt::Debug for Storage<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("ptr", &format!("0x{:x}", self.inner.ptr))
            .field("len", &self.len())
            .field("elem", &T::NAME)
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};
    use crate::runtime::Device;

    #[test]
    fn test_from_slice_roundtrip() {
        let device = CpuDevice::new();
        let storage = Storage::<CpuRuntime, f64>::from_slice(&[1.0, 2.0, 3.0], &device).unwrap();

        assert_eq!(storage.len(), 3);
        assert_eq!(storage.read(1), 2.0);
        assert_eq!(storage.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_write() {
        let device = CpuDevice::new();
        let mut storage = Storage::<CpuRuntime, i32>::new(4, &device).unwrap();

        storage.write(2, 7);
        assert_eq!(storage.to_vec(), vec![0, 0, 7, 0]);
    }

    #[test]
    fn test_relocation_copies() {
        let device = CpuDevice::new();
        let storage = Storage::<CpuRuntime, f32>::from_slice(&[1.5, 2.5], &device).unwrap();

        let moved = storage.to_device(&CpuDevice::with_id(1)).unwrap();
        assert_eq!(moved.device().id(), 1);
        assert_eq!(moved.to_vec(), storage.to_vec());
    }
}
