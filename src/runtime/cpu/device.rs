//! CPU device implementation

use crate::runtime::Device;

/// CPU device
///
/// Device 0 is the default host domain. Additional ids name further host
/// domains; buffers never move implicitly between them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CpuDevice {
    id: usize,
}

impl CpuDevice {
    /// Create the default CPU device
    pub fn new() -> Self {
        Self { id: 0 }
    }

    /// Create a CPU device with an explicit id
    pub fn with_id(id: usize) -> Self {
        Self { id }
    }
}

impl Device for CpuDevice {
    fn id(&self) -> usize {
        self.id
    }

    fn name(&self) -> String {
        format!("cpu:{}", self.id)
    }
}
