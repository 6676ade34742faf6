//! Streams a rendered track to the default output device.
//!
//! The graph never crosses a thread: the main thread has already rendered,
//! and the audio callback only drains plain samples from an SPSC ring.

use std::time::Duration;

use color_eyre::eyre::{eyre, Result, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use strata_dsp::frame::Frame;

pub fn play(track: &[Frame], sample_rate: u32) -> Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let device_rate = config.sample_rate().0;
    let channels = config.channels() as usize;
    if device_rate != sample_rate {
        eprintln!("note: device runs at {device_rate} Hz, track was rendered at {sample_rate} Hz");
    }

    let samples = interleave(track, channels);

    // One second of headroom between the feeder and the callback.
    let capacity = (device_rate as usize * channels).max(1_024);
    let (mut producer, mut consumer) = rtrb::RingBuffer::<f32>::new(capacity);

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                for slot in data.iter_mut() {
                    *slot = consumer.pop().unwrap_or(0.0);
                }
            },
            |err| eprintln!("audio error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;
    stream.play().wrap_err("failed to start output stream")?;

    let mut index = 0;
    while index < samples.len() {
        match producer.push(samples[index]) {
            Ok(()) => index += 1,
            Err(_) => std::thread::sleep(Duration::from_millis(10)),
        }
    }

    // Let the ring drain before tearing the stream down.
    let per_second = (device_rate as u64 * channels as u64).max(1);
    std::thread::sleep(Duration::from_millis(capacity as u64 * 1_000 / per_second + 100));
    Ok(())
}

fn interleave(track: &[Frame], channels: usize) -> Vec<f32> {
    let mut samples = Vec::with_capacity(track.len() * channels.max(1));
    for frame in track {
        match channels {
            0 => break,
            1 => samples.push(frame.mono()),
            _ => {
                samples.push(frame.left);
                samples.push(frame.right);
                samples.extend(std::iter::repeat(0.0).take(channels - 2));
            }
        }
    }
    samples
}
