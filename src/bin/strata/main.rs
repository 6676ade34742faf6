//! strata - bounce a demo patch (or vocode a WAV file) to disk, and
//! optionally play the result.
//!
//! Usage:
//!   strata [INPUT.wav] [-o OUT.wav] [--play]
//!
//! With an input file, the demo runs it through a 16-band vocoder whose
//! carriers sweep over +/-200 cents; without one it bounces a retuning
//! triangle line through a feedback echo.

#[cfg(feature = "rtrb")]
mod playback;

use color_eyre::eyre::{eyre, Result, WrapErr};

use strata_dsp::control::{Controlled, Value};
use strata_dsp::engine::Driver;
use strata_dsp::frame::Track;
use strata_dsp::generators;
use strata_dsp::graph::{Node, Sound, Vocoder};
use strata_dsp::io::wav;
use strata_dsp::modifiers;
use strata_dsp::DEFAULT_SAMPLE_RATE;

struct Options {
    input: Option<String>,
    output: String,
    play: bool,
}

fn parse_args() -> Result<Options> {
    let mut options = Options {
        input: None,
        output: "strata-out.wav".to_owned(),
        play: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                options.output = args.next().ok_or_else(|| eyre!("-o needs a path"))?;
            }
            "--play" => options.play = true,
            _ if arg.starts_with('-') => return Err(eyre!("unknown flag {arg}")),
            _ => options.input = Some(arg),
        }
    }
    Ok(options)
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let options = parse_args()?;
    let sample_rate = DEFAULT_SAMPLE_RATE;

    let track = match &options.input {
        Some(path) => vocode_file(path, sample_rate)?,
        None => echo_demo(sample_rate)?,
    };

    wav::write(&options.output, &track, sample_rate)
        .wrap_err_with(|| format!("failed to write {}", options.output))?;
    println!("wrote {} frames to {}", track.len(), options.output);

    if options.play {
        #[cfg(feature = "rtrb")]
        playback::play(&track, sample_rate)?;
        #[cfg(not(feature = "rtrb"))]
        return Err(eyre!("--play requires the rtrb feature"));
    }

    Ok(())
}

/// Runs the recording at `path` through a 16-band vocoder, sweeping the
/// carrier offset from -200 to +200 cents over the length of the file.
fn vocode_file(path: &str, sample_rate: u32) -> Result<Track> {
    let recording =
        wav::decode_file(path).wrap_err_with(|| format!("could not load {path}"))?;
    let frames = (recording.frames.len() as u64 * u64::from(sample_rate)
        / u64::from(recording.sample_rate.max(1))) as usize;

    let source = generators::sampler(recording.frames, recording.sample_rate, sample_rate);
    let input = Node::from_generator(source);
    let mut vocoder = Vocoder::new(input, 16, sample_rate);

    let mut track = Track::with_capacity(frames);
    for n in 0..frames {
        if n % 1_024 == 0 {
            let sweep = (n as f64 / frames.max(1) as f64) * 2.0 - 1.0;
            vocoder.call_method("SetOffset", &mut [Value::Float(sweep * 200.0)])?;
        }
        track.push(vocoder.tick());
    }
    Ok(track)
}

/// Bounces three seconds of a retuning triangle line through an echo.
fn echo_demo(sample_rate: u32) -> Result<Track> {
    let osc = generators::triangle(220.0, sample_rate);
    let voice = Node::from_generator(osc.clone());
    let echo = Node::from_modifier(modifiers::echo(sample_rate as usize / 4, 0.5));
    voice.borrow_mut().add_target(&echo);

    let mut sound = Sound::new();
    sound.add_node(voice, 0, false);
    sound.add_node(echo, 1, true);
    let mut driver = Driver::new(sound);

    let mut track = Track::with_capacity(3 * sample_rate as usize);
    for pitch in [220.0, 277.18, 329.63] {
        osc.borrow_mut()
            .call_method("SetFrequency", &mut [Value::Float(pitch)])?;
        track.extend(driver.render(sample_rate as usize));
    }
    Ok(track)
}
