//! Source of raw device identifiers.

/// Supplies the raw identifier reported by the runtime for a device,
/// e.g. `gfx906:sramecc+:xnack-`.
pub trait DeviceNameSource {
    fn device_name(&self) -> String;
}

impl DeviceNameSource for str {
    fn device_name(&self) -> String {
        self.to_string()
    }
}

impl DeviceNameSource for String {
    fn device_name(&self) -> String {
        self.clone()
    }
}
