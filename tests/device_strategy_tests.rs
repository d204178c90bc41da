// Tests for capture target selection.
//
// The strategy is exercised against fake enumerators so no audio hardware
// is needed: the system-audio sentinel must pick the first output device or
// fail explicitly, while any language selection uses the microphone.

use speechpad::audio::{select_capture_target, CaptureTarget, DeviceEnumerator, DeviceInfo, DeviceKind};
use speechpad::error::CaptureError;
use speechpad::languages::LanguageSelection;

struct FakeEnumerator {
    devices: Vec<DeviceInfo>,
}

impl DeviceEnumerator for FakeEnumerator {
    fn devices(&self) -> Result<Vec<DeviceInfo>, CaptureError> {
        Ok(self.devices.clone())
    }
}

struct FailingEnumerator;

impl DeviceEnumerator for FailingEnumerator {
    fn devices(&self) -> Result<Vec<DeviceInfo>, CaptureError> {
        Err(CaptureError::Device("enumeration failed".to_string()))
    }
}

fn input(id: &str) -> DeviceInfo {
    DeviceInfo {
        id: id.to_string(),
        kind: DeviceKind::Input,
    }
}

fn output(id: &str) -> DeviceInfo {
    DeviceInfo {
        id: id.to_string(),
        kind: DeviceKind::Output,
    }
}

#[test]
fn test_language_selection_uses_default_microphone() {
    let enumerator = FakeEnumerator {
        devices: vec![input("Built-in Microphone"), output("Speakers")],
    };

    let target =
        select_capture_target(&LanguageSelection::parse("fr"), &enumerator).unwrap();

    assert_eq!(target, CaptureTarget::DefaultMicrophone);
}

#[test]
fn test_language_selection_needs_no_enumeration() {
    // The microphone path never consults the enumerator.
    let target =
        select_capture_target(&LanguageSelection::parse("en"), &FailingEnumerator).unwrap();

    assert_eq!(target, CaptureTarget::DefaultMicrophone);
}

#[test]
fn test_system_audio_picks_first_output_device() {
    let enumerator = FakeEnumerator {
        devices: vec![
            input("Built-in Microphone"),
            output("Speakers"),
            output("HDMI Audio"),
        ],
    };

    let target =
        select_capture_target(&LanguageSelection::SystemAudio, &enumerator).unwrap();

    assert_eq!(target, CaptureTarget::OutputDevice("Speakers".to_string()));
}

#[test]
fn test_system_audio_without_output_device_is_unavailable() {
    let enumerator = FakeEnumerator {
        devices: vec![input("Built-in Microphone")],
    };

    let err = select_capture_target(&LanguageSelection::SystemAudio, &enumerator).unwrap_err();

    assert!(matches!(err, CaptureError::DeviceUnavailable));
}

#[test]
fn test_system_audio_with_no_devices_is_unavailable() {
    let enumerator = FakeEnumerator { devices: vec![] };

    let err = select_capture_target(&LanguageSelection::SystemAudio, &enumerator).unwrap_err();

    assert!(matches!(err, CaptureError::DeviceUnavailable));
}

#[test]
fn test_system_audio_propagates_enumeration_failure() {
    let err =
        select_capture_target(&LanguageSelection::SystemAudio, &FailingEnumerator).unwrap_err();

    assert!(matches!(err, CaptureError::Device(_)));
}
