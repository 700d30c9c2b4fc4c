//! GPU availability probe.

use tracing::{debug, info};

pub trait GpuProbe {
    /// True when a hardware-accelerated adapter can be created.
    fn gpu_available(&self) -> bool;
}

/// Asks wgpu for a non-fallback adapter. CPU adapters do not count.
pub struct WgpuProbe;

impl GpuProbe for WgpuProbe {
    fn gpu_available(&self) -> bool {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: None,
        }));

        match adapter {
            Some(adapter) => {
                let info = adapter.get_info();
                info!(
                    "GPU adapter: {} ({:?}, {:?})",
                    info.name, info.device_type, info.backend
                );
                info.device_type != wgpu::DeviceType::Cpu
            }
            None => {
                debug!("no GPU adapter available");
                false
            }
        }
    }
}

/// A probe with a fixed answer, for headless hosts and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedGpu(pub bool);

impl GpuProbe for FixedGpu {
    fn gpu_available(&self) -> bool {
        self.0
    }
}
