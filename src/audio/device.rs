use cpal::traits::{DeviceTrait, HostTrait};

use crate::error::CaptureError;
use crate::languages::LanguageSelection;

/// Endpoint direction as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Input,
    Output,
}

/// One audio endpoint visible to the platform.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub id: String,
    pub kind: DeviceKind,
}

/// Enumerates audio endpoints.
///
/// Production code uses [`CpalEnumerator`]; tests inject fakes so the
/// selection strategy can be exercised without hardware.
pub trait DeviceEnumerator: Send + Sync {
    fn devices(&self) -> Result<Vec<DeviceInfo>, CaptureError>;
}

/// Platform enumerator backed by the default cpal host.
pub struct CpalEnumerator;

impl DeviceEnumerator for CpalEnumerator {
    fn devices(&self) -> Result<Vec<DeviceInfo>, CaptureError> {
        let host = cpal::default_host();
        let mut found = Vec::new();

        let inputs = host
            .input_devices()
            .map_err(|e| CaptureError::Device(e.to_string()))?;
        for device in inputs {
            if let Ok(name) = device.name() {
                found.push(DeviceInfo {
                    id: name,
                    kind: DeviceKind::Input,
                });
            }
        }

        let outputs = host
            .output_devices()
            .map_err(|e| CaptureError::Device(e.to_string()))?;
        for device in outputs {
            if let Ok(name) = device.name() {
                found.push(DeviceInfo {
                    id: name,
                    kind: DeviceKind::Output,
                });
            }
        }

        Ok(found)
    }
}

/// Where a capture should read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTarget {
    /// Default microphone input
    DefaultMicrophone,
    /// A specific audio output device, for system-audio capture
    OutputDevice(String),
}

/// Decide the capture target for a selector value.
///
/// The system-audio sentinel constrains capture to the first enumerable
/// output device and fails with [`CaptureError::DeviceUnavailable`] when none
/// exists; any language selection uses the default microphone.
pub fn select_capture_target(
    selection: &LanguageSelection,
    enumerator: &dyn DeviceEnumerator,
) -> Result<CaptureTarget, CaptureError> {
    match selection {
        LanguageSelection::SystemAudio => {
            let devices = enumerator.devices()?;
            devices
                .into_iter()
                .find(|device| device.kind == DeviceKind::Output)
                .map(|device| CaptureTarget::OutputDevice(device.id))
                .ok_or(CaptureError::DeviceUnavailable)
        }
        LanguageSelection::Code(_) => Ok(CaptureTarget::DefaultMicrophone),
    }
}
