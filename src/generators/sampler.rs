use std::rc::Rc;

use super::Generator;
use crate::control::{Args, HasMethods, MethodTable, Value};
use crate::dsp::resampler::Resampler;
use crate::frame::{Frame, Track};

/// Plays a recorded track through a fractional-rate resampler.
///
/// The track is owned jointly with the resampler; a sampler built over an
/// empty track is permanently silent.
///
/// Registered methods: `"SetPlaybackSpeed"`, `"GetPlaybackSpeed"`,
/// `"SetLoop"` (start, end in source frames; end 0 disables), `"Reset"`.
pub struct Sampler {
    resampler: Resampler,
    methods: MethodTable<Self>,
}

impl Sampler {
    pub(crate) fn new(track: Track, source_rate: u32, sample_rate: u32) -> Self {
        let mut methods = MethodTable::new();
        methods.register("SetPlaybackSpeed", |player: &mut Self, args: &mut Args| {
            player.resampler.set_playback_speed(args.float(0)?);
            Ok(())
        });
        methods.register("GetPlaybackSpeed", |player: &mut Self, args: &mut Args| {
            args.set(0, Value::Float(player.resampler.playback_speed()))
        });
        methods.register("SetLoop", |player: &mut Self, args: &mut Args| {
            let start = args.int(0)?.max(0) as u64;
            let end = args.int(1)?.max(0) as u64;
            player.resampler.set_loop(start, end);
            Ok(())
        });
        methods.register("Reset", |player: &mut Self, _args: &mut Args| {
            player.resampler.reset();
            Ok(())
        });

        Self {
            resampler: Resampler::new(Rc::new(track), source_rate, sample_rate),
            methods,
        }
    }
}

impl HasMethods for Sampler {
    fn method_table(&self) -> &MethodTable<Self> {
        &self.methods
    }
}

impl Generator for Sampler {
    fn next_frame(&mut self) -> Frame {
        self.resampler.process()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Controlled;

    fn steps(count: usize) -> Track {
        (0..count).map(|n| Frame::splat(n as f32 * 0.125)).collect()
    }

    #[test]
    fn matching_rates_reproduce_the_track() {
        let track = steps(8);
        let mut player = Sampler::new(track.clone(), 48_000, 48_000);
        for frame in &track {
            assert_eq!(player.next_frame(), *frame);
        }
        assert_eq!(player.next_frame(), Frame::ZERO);
    }

    #[test]
    fn empty_sampler_is_permanently_silent() {
        let mut player = Sampler::new(Track::new(), 48_000, 48_000);
        for _ in 0..64 {
            assert_eq!(player.next_frame(), Frame::ZERO);
        }
    }

    #[test]
    fn speed_loop_and_reset_are_reachable_by_name() {
        let mut player = Sampler::new(steps(16), 48_000, 48_000);
        player
            .call_method("SetPlaybackSpeed", &mut [Value::Float(2.0)])
            .unwrap();
        player
            .call_method("SetLoop", &mut [Value::Int(0), Value::Int(8)])
            .unwrap();

        // Double speed through a loop of 8: 0, 2, 4, 6, 0, ...
        for expected in [0.0, 2.0, 4.0, 6.0, 0.0, 2.0] {
            assert_eq!(player.next_frame(), Frame::splat(expected * 0.125));
        }

        player.call_method("Reset", &mut []).unwrap();
        assert_eq!(player.next_frame(), Frame::splat(0.0));

        let mut slots = [Value::Float(0.0)];
        player.call_method("GetPlaybackSpeed", &mut slots).unwrap();
        assert_eq!(slots[0], Value::Float(2.0));
    }

    #[test]
    fn loop_arguments_must_be_integers() {
        let mut player = Sampler::new(steps(4), 48_000, 48_000);
        let err = player
            .call_method("SetLoop", &mut [Value::Float(0.0), Value::Float(4.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            crate::control::MethodError::TypeMismatch { index: 0, .. }
        ));
    }
}
