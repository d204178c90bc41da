//! cpal-based live capture backend.
//!
//! The cpal stream is not `Send`, so it lives on a dedicated capture thread
//! for the whole recording. Samples are normalised to 16-bit PCM in the
//! device callback and flushed as fixed-duration chunks behind one streaming
//! WAV header chunk.

use std::sync::{Arc, Mutex};
use std::thread;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use super::backend::{AudioChunk, CaptureBackend, CaptureBackendConfig};
use super::device::CaptureTarget;
use crate::error::CaptureError;

pub struct MicrophoneBackend {
    target: CaptureTarget,
    config: CaptureBackendConfig,
    capturing: bool,
    stop_tx: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl MicrophoneBackend {
    pub fn new(target: CaptureTarget, config: CaptureBackendConfig) -> Self {
        Self {
            target,
            config,
            capturing: false,
            stop_tx: None,
            thread: None,
        }
    }
}

#[async_trait::async_trait]
impl CaptureBackend for MicrophoneBackend {
    async fn start(&mut self) -> Result<mpsc::UnboundedReceiver<AudioChunk>, CaptureError> {
        if self.capturing {
            return Err(CaptureError::AlreadyRecording);
        }

        let (chunk_tx, chunk_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = oneshot::channel();
        let (stop_tx, stop_rx) = oneshot::channel();

        let target = self.target.clone();
        let config = self.config.clone();

        let handle = thread::spawn(move || {
            run_capture(target, config, chunk_tx, ready_tx, stop_rx);
        });

        match ready_rx.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = handle.join();
                return Err(e);
            }
            Err(_) => {
                let _ = handle.join();
                return Err(CaptureError::Device(
                    "capture thread exited before starting".to_string(),
                ));
            }
        }

        self.stop_tx = Some(stop_tx);
        self.thread = Some(handle);
        self.capturing = true;

        info!("Capture started on {:?}", self.target);

        Ok(chunk_rx)
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        if !self.capturing {
            return Ok(());
        }

        // Dropping the sender also unblocks the capture thread, so a missing
        // receiver on the other side is not an error.
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        if let Some(handle) = self.thread.take() {
            let joined = tokio::task::spawn_blocking(move || handle.join()).await;
            if !matches!(joined, Ok(Ok(()))) {
                warn!("Capture thread did not shut down cleanly");
            }
        }

        self.capturing = false;
        info!("Capture stopped, device released");

        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }

    fn name(&self) -> &str {
        match self.target {
            CaptureTarget::DefaultMicrophone => "cpal microphone",
            CaptureTarget::OutputDevice(_) => "cpal system audio",
        }
    }
}

/// Capture thread body: owns the cpal stream from build to drop.
fn run_capture(
    target: CaptureTarget,
    config: CaptureBackendConfig,
    chunk_tx: mpsc::UnboundedSender<AudioChunk>,
    ready_tx: oneshot::Sender<Result<(), CaptureError>>,
    stop_rx: oneshot::Receiver<()>,
) {
    let device = match resolve_device(&target) {
        Ok(device) => device,
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };

    let default_config = match device.default_input_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            let _ = ready_tx.send(Err(map_device_error(e.to_string())));
            return;
        }
    };
    let sample_format = default_config.sample_format();

    let stream_config = StreamConfig {
        channels: config.channels,
        sample_rate: SampleRate(config.sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let bytes_per_chunk = ((config.sample_rate as u64
        * config.channels as u64
        * 2
        * config.chunk_duration_ms)
        / 1000)
        .max(2) as usize;

    // The callback appends PCM bytes here; the thread flushes the tail after
    // the stream is dropped, so no chunk is lost on stop.
    let pcm_buffer: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::with_capacity(
        bytes_per_chunk * 2,
    )));

    // Header goes out before any data so verbatim concatenation of the
    // delivered chunks yields one WAV stream.
    if chunk_tx
        .send(AudioChunk {
            data: wav_stream_header(config.sample_rate, config.channels),
        })
        .is_err()
    {
        let _ = ready_tx.send(Err(CaptureError::Device(
            "chunk receiver dropped before capture started".to_string(),
        )));
        return;
    }

    let err_fn = |err| warn!("Audio stream error: {err}");

    let stream = {
        let buffer = Arc::clone(&pcm_buffer);
        let tx = chunk_tx.clone();
        match sample_format {
            SampleFormat::F32 => device.build_input_stream(
                &stream_config,
                move |data: &[f32], _| {
                    let mut buf = match buffer.lock() {
                        Ok(buf) => buf,
                        Err(_) => return,
                    };
                    extend_from_f32(&mut buf, data);
                    flush_full_chunks(&mut buf, bytes_per_chunk, &tx);
                },
                err_fn,
                None,
            ),
            SampleFormat::I16 => device.build_input_stream(
                &stream_config,
                move |data: &[i16], _| {
                    let mut buf = match buffer.lock() {
                        Ok(buf) => buf,
                        Err(_) => return,
                    };
                    extend_from_i16(&mut buf, data);
                    flush_full_chunks(&mut buf, bytes_per_chunk, &tx);
                },
                err_fn,
                None,
            ),
            SampleFormat::U16 => device.build_input_stream(
                &stream_config,
                move |data: &[u16], _| {
                    let mut buf = match buffer.lock() {
                        Ok(buf) => buf,
                        Err(_) => return,
                    };
                    extend_from_u16(&mut buf, data);
                    flush_full_chunks(&mut buf, bytes_per_chunk, &tx);
                },
                err_fn,
                None,
            ),
            other => {
                let _ = ready_tx.send(Err(CaptureError::Device(format!(
                    "unsupported input sample format {other:?}"
                ))));
                return;
            }
        }
    };

    let stream = match stream {
        Ok(stream) => stream,
        Err(e) => {
            let _ = ready_tx.send(Err(map_device_error(e.to_string())));
            return;
        }
    };

    if let Err(e) = stream.play() {
        let _ = ready_tx.send(Err(map_device_error(e.to_string())));
        return;
    }

    let _ = ready_tx.send(Ok(()));

    // Park until stop is requested or the backend is dropped.
    let _ = stop_rx.blocking_recv();

    // Dropping the stream releases the device and silences the callback;
    // whatever PCM is left becomes the final chunk.
    drop(stream);
    if let Ok(mut buf) = pcm_buffer.lock() {
        if !buf.is_empty() {
            let tail = std::mem::take(&mut *buf);
            let _ = chunk_tx.send(AudioChunk { data: tail });
        }
    };
    // chunk_tx drops here, closing the channel after the last chunk.
}

fn resolve_device(target: &CaptureTarget) -> Result<cpal::Device, CaptureError> {
    let host = cpal::default_host();
    match target {
        CaptureTarget::DefaultMicrophone => host
            .default_input_device()
            .ok_or_else(|| CaptureError::Device("no default input device available".to_string())),
        CaptureTarget::OutputDevice(id) => {
            let mut devices = host
                .devices()
                .map_err(|e| CaptureError::Device(e.to_string()))?;
            devices
                .find(|device| device.name().map(|name| &name == id).unwrap_or(false))
                .ok_or_else(|| CaptureError::Device(format!("audio device '{id}' not found")))
        }
    }
}

/// The platform reports permission denial as an opaque backend error; keep
/// the taxonomy by sniffing the message.
fn map_device_error(message: String) -> CaptureError {
    let lower = message.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") {
        CaptureError::PermissionDenied
    } else {
        CaptureError::Device(message)
    }
}

fn flush_full_chunks(
    buf: &mut Vec<u8>,
    bytes_per_chunk: usize,
    tx: &mpsc::UnboundedSender<AudioChunk>,
) {
    while buf.len() >= bytes_per_chunk {
        let data: Vec<u8> = buf.drain(..bytes_per_chunk).collect();
        let _ = tx.send(AudioChunk { data });
    }
}

fn extend_from_f32(buf: &mut Vec<u8>, data: &[f32]) {
    for &sample in data {
        let amplitude = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        buf.extend_from_slice(&amplitude.to_le_bytes());
    }
}

fn extend_from_i16(buf: &mut Vec<u8>, data: &[i16]) {
    for &sample in data {
        buf.extend_from_slice(&sample.to_le_bytes());
    }
}

fn extend_from_u16(buf: &mut Vec<u8>, data: &[u16]) {
    for &sample in data {
        let centered = (sample as i32 - 32768) as i16;
        buf.extend_from_slice(&centered.to_le_bytes());
    }
}

/// 44-byte PCM WAV header with open-ended sizes.
///
/// The recorder streams chunks without knowing the final length, so the RIFF
/// and data sizes use the streaming convention of 0xFFFFFFFF.
fn wav_stream_header(sample_rate: u32, channels: u16) -> Vec<u8> {
    let byte_rate = sample_rate * channels as u32 * 2;
    let block_align = channels * 2;

    let mut header = Vec::with_capacity(44);
    header.extend_from_slice(b"RIFF");
    header.extend_from_slice(&u32::MAX.to_le_bytes());
    header.extend_from_slice(b"WAVE");
    header.extend_from_slice(b"fmt ");
    header.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    header.extend_from_slice(&1u16.to_le_bytes()); // PCM
    header.extend_from_slice(&channels.to_le_bytes());
    header.extend_from_slice(&sample_rate.to_le_bytes());
    header.extend_from_slice(&byte_rate.to_le_bytes());
    header.extend_from_slice(&block_align.to_le_bytes());
    header.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    header.extend_from_slice(b"data");
    header.extend_from_slice(&u32::MAX.to_le_bytes());
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_stream_header_layout() {
        let header = wav_stream_header(16000, 1);

        assert_eq!(header.len(), 44);
        assert_eq!(&header[0..4], b"RIFF");
        assert_eq!(&header[8..12], b"WAVE");
        assert_eq!(&header[36..40], b"data");
        // Open-ended sizes for streaming
        assert_eq!(&header[4..8], &u32::MAX.to_le_bytes());
        assert_eq!(&header[40..44], &u32::MAX.to_le_bytes());
    }

    #[test]
    fn test_wav_stream_header_rates() {
        let header = wav_stream_header(16000, 1);

        let sample_rate = u32::from_le_bytes(header[24..28].try_into().unwrap());
        let byte_rate = u32::from_le_bytes(header[28..32].try_into().unwrap());
        assert_eq!(sample_rate, 16000);
        assert_eq!(byte_rate, 32000); // 16kHz mono 16-bit

        let channels = u16::from_le_bytes(header[22..24].try_into().unwrap());
        assert_eq!(channels, 1);
    }

    #[test]
    fn test_f32_samples_become_le_pcm() {
        let mut buf = Vec::new();
        extend_from_f32(&mut buf, &[0.0, 1.0, -1.0]);

        assert_eq!(buf.len(), 6);
        assert_eq!(i16::from_le_bytes([buf[0], buf[1]]), 0);
        assert_eq!(i16::from_le_bytes([buf[2], buf[3]]), i16::MAX);
        assert_eq!(i16::from_le_bytes([buf[4], buf[5]]), -i16::MAX);
    }

    #[test]
    fn test_u16_samples_are_centered() {
        let mut buf = Vec::new();
        extend_from_u16(&mut buf, &[32768]);

        assert_eq!(i16::from_le_bytes([buf[0], buf[1]]), 0);
    }

    #[test]
    fn test_permission_messages_map_to_permission_denied() {
        assert!(matches!(
            map_device_error("Access denied by the user".to_string()),
            CaptureError::PermissionDenied
        ));
        assert!(matches!(
            map_device_error("device disconnected".to_string()),
            CaptureError::Device(_)
        ));
    }
}
