#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    CPU,
    CUDA(usize),
}

/// Device family, ignoring the ordinal. Two devices of the same backend are
/// shallow-copy compatible even when their ordinals differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    CPU,
    CUDA,
}

impl Device {
    pub fn name(&self) -> String {
        match self {
            Device::CPU => "CPU".to_string(),
            Device::CUDA(id) => format!("CUDA Device {}", id),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            Device::CPU => Backend::CPU,
            Device::CUDA(_) => Backend::CUDA,
        }
    }
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::CPU => "cpu",
            Backend::CUDA => "cuda",
        }
    }
}

thread_local! {
    static DEFAULT_DEVICE: std::cell::Cell<Device> = const { std::cell::Cell::new(Device::CPU) };
}

pub fn get_default_device() -> Device {
    DEFAULT_DEVICE.with(|d| d.get())
}

pub fn set_default_device(device: Device) {
    DEFAULT_DEVICE.with(|d| d.set(device));
}
