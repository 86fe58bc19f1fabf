use gradx_core::device::{set_default_device, Device};

// Helper functions
pub fn setup_device() {
    set_default_device(Device::CPU);
}
