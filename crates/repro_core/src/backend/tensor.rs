//! Tensor runtime with per-device generator state.
//!
//! The runtime keeps one generator per [`Device`]: the CPU generator, one per
//! CUDA device and one for MPS. Each accelerator family has its own seeding
//! entry point, so seeding the CPU leaves accelerator streams untouched.
//!
//! Which accelerators exist is not probed. It is declared up front through
//! [`AcceleratorConfig`], typically read from the experiment configuration.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, OnceLock};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use serde::Deserialize;

use super::state::wrap_seed;
use super::{Accelerator, BackendKind, SeedBackend, TensorBackend};
use crate::error::SeedError;

static DEVICES: OnceLock<Mutex<HashMap<Device, StdRng>>> = OnceLock::new();

fn device_states() -> Result<MutexGuard<'static, HashMap<Device, StdRng>>, SeedError> {
    DEVICES
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .map_err(|_| SeedError::StatePoisoned {
            backend: BackendKind::Tensor.name(),
        })
}

/// A tensor device owning its own generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Cpu,
    /// CUDA device by ordinal
    Cuda(usize),
    Mps,
}

impl Device {
    /// The accelerator family, or `None` for the CPU.
    pub fn accelerator(&self) -> Option<Accelerator> {
        match self {
            Device::Cpu => None,
            Device::Cuda(_) => Some(Accelerator::Cuda),
            Device::Mps => Some(Accelerator::Mps),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(index) => write!(f, "cuda:{}", index),
            Device::Mps => write!(f, "mps"),
        }
    }
}

/// Accelerators present in this process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AcceleratorConfig {
    /// Number of CUDA devices (0 means CUDA is unavailable)
    pub cuda_devices: usize,
    /// Whether the MPS device is present
    pub mps: bool,
}

impl AcceleratorConfig {
    /// CUDA devices only.
    pub fn cuda(devices: usize) -> Self {
        Self {
            cuda_devices: devices,
            mps: false,
        }
    }

    /// MPS only.
    pub fn mps() -> Self {
        Self {
            cuda_devices: 0,
            mps: true,
        }
    }
}

/// Tensor runtime handle.
///
/// Handles are cheap; all state lives in the process-wide device table, so
/// two handles with the same configuration observe the same streams.
///
/// # Examples
///
/// ```rust
/// use repro_core::backend::{AcceleratorConfig, Device, SeedBackend, TensorBackend, TensorRuntime};
///
/// let runtime = TensorRuntime::new(AcceleratorConfig::cuda(2));
/// runtime.manual_seed(42).unwrap();
/// runtime.cuda_manual_seed_all(42).unwrap();
///
/// let a = runtime.uniform(Device::Cuda(0), 3).unwrap();
/// let b = runtime.uniform(Device::Cuda(1), 3).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TensorRuntime {
    accelerators: AcceleratorConfig,
}

impl TensorRuntime {
    pub fn new(accelerators: AcceleratorConfig) -> Self {
        Self { accelerators }
    }

    /// A runtime with no accelerator.
    pub fn cpu_only() -> Self {
        Self::default()
    }

    pub fn accelerators(&self) -> AcceleratorConfig {
        self.accelerators
    }

    /// Every device this runtime exposes, CPU first.
    pub fn devices(&self) -> Vec<Device> {
        let mut devices = vec![Device::Cpu];
        devices.extend((0..self.accelerators.cuda_devices).map(Device::Cuda));
        if self.accelerators.mps {
            devices.push(Device::Mps);
        }
        devices
    }

    fn check_device(&self, device: Device) -> Result<(), SeedError> {
        let present = match device {
            Device::Cpu => true,
            Device::Cuda(index) => index < self.accelerators.cuda_devices,
            Device::Mps => self.accelerators.mps,
        };
        match device.accelerator() {
            Some(accelerator) if !present => Err(SeedError::AcceleratorUnavailable { accelerator }),
            _ => Ok(()),
        }
    }

    fn seed_devices(&self, devices: &[Device], seed: i64) -> Result<(), SeedError> {
        let mut states = device_states()?;
        for device in devices {
            states.insert(*device, StdRng::seed_from_u64(wrap_seed(seed)));
        }
        Ok(())
    }

    fn with_device<T>(
        &self,
        device: Device,
        f: impl FnOnce(&mut StdRng) -> T,
    ) -> Result<T, SeedError> {
        self.check_device(device)?;
        let mut states = device_states()?;
        let rng = states.entry(device).or_insert_with(StdRng::from_entropy);
        Ok(f(rng))
    }

    /// `len` uniform values in [0, 1) from `device`'s generator.
    pub fn uniform(&self, device: Device, len: usize) -> Result<Vec<f64>, SeedError> {
        self.with_device(device, |rng| (0..len).map(|_| rng.gen()).collect())
    }

    /// `len` standard normal variates from `device`'s generator.
    pub fn normal(&self, device: Device, len: usize) -> Result<Vec<f64>, SeedError> {
        self.with_device(device, |rng| {
            (0..len).map(|_| StandardNormal.sample(rng)).collect()
        })
    }
}

impl SeedBackend for TensorRuntime {
    fn name(&self) -> &str {
        BackendKind::Tensor.name()
    }

    /// Seeds the CPU generator. Accelerators are seeded separately.
    fn manual_seed(&self, seed: i64) -> Result<(), SeedError> {
        self.seed_devices(&[Device::Cpu], seed)
    }
}

impl TensorBackend for TensorRuntime {
    fn cuda_is_available(&self) -> bool {
        self.accelerators.cuda_devices > 0
    }

    fn cuda_manual_seed_all(&self, seed: i64) -> Result<(), SeedError> {
        if !self.cuda_is_available() {
            return Err(SeedError::AcceleratorUnavailable {
                accelerator: Accelerator::Cuda,
            });
        }
        let devices: Vec<Device> = (0..self.accelerators.cuda_devices)
            .map(Device::Cuda)
            .collect();
        self.seed_devices(&devices, seed)
    }

    fn mps_is_available(&self) -> bool {
        self.accelerators.mps
    }

    fn mps_manual_seed(&self, seed: i64) -> Result<(), SeedError> {
        if !self.mps_is_available() {
            return Err(SeedError::AcceleratorUnavailable {
                accelerator: Accelerator::Mps,
            });
        }
        self.seed_devices(&[Device::Mps], seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::state_guard;

    #[test]
    fn test_devices_listing() {
        let runtime = TensorRuntime::new(AcceleratorConfig {
            cuda_devices: 2,
            mps: true,
        });
        assert_eq!(
            runtime.devices(),
            vec![Device::Cpu, Device::Cuda(0), Device::Cuda(1), Device::Mps]
        );
        assert_eq!(TensorRuntime::cpu_only().devices(), vec![Device::Cpu]);
    }

    #[test]
    fn test_availability_flags() {
        let cpu = TensorRuntime::cpu_only();
        assert!(!cpu.cuda_is_available());
        assert!(!cpu.mps_is_available());

        let cuda = TensorRuntime::new(AcceleratorConfig::cuda(1));
        assert!(cuda.cuda_is_available());
        assert!(!cuda.mps_is_available());

        let mps = TensorRuntime::new(AcceleratorConfig::mps());
        assert!(mps.mps_is_available());
        assert!(!mps.cuda_is_available());
    }

    #[test]
    fn test_cpu_seed_reproducibility() {
        let _guard = state_guard();
        let runtime = TensorRuntime::cpu_only();
        runtime.manual_seed(-1).unwrap();
        let a = runtime.normal(Device::Cpu, 16).unwrap();
        runtime.manual_seed(-1).unwrap();
        assert_eq!(a, runtime.normal(Device::Cpu, 16).unwrap());
    }

    #[test]
    fn test_cuda_seed_without_cuda() {
        let _guard = state_guard();
        let err = TensorRuntime::cpu_only().cuda_manual_seed_all(1).unwrap_err();
        assert!(matches!(
            err,
            SeedError::AcceleratorUnavailable {
                accelerator: Accelerator::Cuda
            }
        ));
    }

    #[test]
    fn test_mps_seed_without_mps() {
        let _guard = state_guard();
        let err = TensorRuntime::new(AcceleratorConfig::cuda(1))
            .mps_manual_seed(1)
            .unwrap_err();
        assert!(matches!(
            err,
            SeedError::AcceleratorUnavailable {
                accelerator: Accelerator::Mps
            }
        ));
    }

    #[test]
    fn test_draw_from_missing_device() {
        let _guard = state_guard();
        let runtime = TensorRuntime::new(AcceleratorConfig::cuda(1));
        assert!(runtime.uniform(Device::Cuda(0), 1).is_ok());
        assert!(runtime.uniform(Device::Cuda(1), 1).is_err());
        assert!(runtime.uniform(Device::Mps, 1).is_err());
    }

    #[test]
    fn test_cpu_seed_leaves_accelerators_alone() {
        let _guard = state_guard();
        let runtime = TensorRuntime::new(AcceleratorConfig::mps());
        runtime.mps_manual_seed(10).unwrap();
        let expected = runtime.uniform(Device::Mps, 4).unwrap();

        runtime.mps_manual_seed(10).unwrap();
        runtime.manual_seed(20).unwrap();
        assert_eq!(runtime.uniform(Device::Mps, 4).unwrap(), expected);
    }

    #[test]
    fn test_device_display() {
        assert_eq!(Device::Cpu.to_string(), "cpu");
        assert_eq!(Device::Cuda(3).to_string(), "cuda:3");
        assert_eq!(Device::Mps.to_string(), "mps");
    }
}
