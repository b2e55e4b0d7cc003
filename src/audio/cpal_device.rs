//! Hardware output through cpal (CoreAudio, WASAPI, ALSA, JACK, ...).

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, FromSample, SampleFormat, SizedSample, SupportedBufferSize,
};
use tracing::{debug, error, info, warn};

use crate::{
    audio::device::{AudioDevice, OutputStream, RenderFn},
    config::EngineConfig,
    error::{Error, Result},
    MAX_BLOCK_SIZE,
};

/// The default output device of the default host.
///
/// The stream is mono on our side; every rendered frame is copied to all of
/// the device's channels and converted to its native sample format.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalDevice;

impl CpalDevice {
    pub fn new() -> Self {
        Self
    }
}

impl AudioDevice for CpalDevice {
    fn name(&self) -> String {
        format!("cpal/{:?}", cpal::default_host().id())
    }

    fn open(&self, config: &EngineConfig, render: RenderFn) -> Result<Box<dyn OutputStream>> {
        let host = cpal::default_host();
        info!("Audio host: {:?}", host.id());

        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Device("no default output device available".to_string()))?;
        info!(
            "Audio device: {}",
            device.name().unwrap_or_else(|_| "<unnamed>".to_string())
        );

        let supported = device.default_output_config().map_err(device_error)?;
        let channels = supported.channels() as usize;

        let buffer_size = match supported.buffer_size() {
            SupportedBufferSize::Range { min, max }
                if (*min..=*max).contains(&config.frames_per_callback) =>
            {
                BufferSize::Fixed(config.frames_per_callback)
            }
            other => {
                warn!(
                    "device cannot use {} frames per callback ({:?}), using its default",
                    config.frames_per_callback, other
                );
                BufferSize::Default
            }
        };

        let stream_config = cpal::StreamConfig {
            channels: supported.channels(),
            sample_rate: cpal::SampleRate(config.sample_rate.round() as u32),
            buffer_size,
        };
        debug!("Audio config: {:?} ({:?})", stream_config, supported.sample_format());

        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, render, channels),
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, render, channels),
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, render, channels),
            other => Err(Error::Device(format!("unsupported sample format {other:?}"))),
        }?;

        stream.play().map_err(device_error)?;
        info!(
            "Audio stream started at {} Hz, {} channel(s)",
            stream_config.sample_rate.0, channels
        );

        Ok(Box::new(CpalStream { stream }))
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut render: RenderFn,
    channels: usize,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let mut mono = vec![0.0f32; MAX_BLOCK_SIZE];

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let frames = data.len() / channels;
                let mut written = 0;

                while written < frames {
                    let count = (frames - written).min(MAX_BLOCK_SIZE);
                    let block = &mut mono[..count];
                    render(block);

                    // Copy to output (mono to all channels)
                    let offset = written * channels;
                    for (i, &sample) in block.iter().enumerate() {
                        let value = T::from_sample(sample);
                        for channel in 0..channels {
                            data[offset + i * channels + channel] = value;
                        }
                    }

                    written += count;
                }
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )
        .map_err(device_error)
}

fn device_error(err: impl std::fmt::Display) -> Error {
    Error::Device(err.to_string())
}

struct CpalStream {
    stream: cpal::Stream,
}

impl OutputStream for CpalStream {
    fn close(self: Box<Self>) {
        if let Err(err) = self.stream.pause() {
            debug!("pausing stream before close failed: {}", err);
        }
    }
}
