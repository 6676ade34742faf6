use super::node::{Node, NodeHandle};
use super::sound::Sound;
use crate::control::{Args, Controlled, HasMethods, MethodError, MethodTable, Value};
use crate::frame::Frame;
use crate::generators::{self, GenHandle};
use crate::modifiers;

/*
Channel Vocoder
===============

The classic analysis/synthesis split, assembled out of ordinary graph nodes:

  layer 0   the caller's input node (speech, a sample player, anything)
  layer 1   N band-pass nodes analyzing the input, one per band
  layer 2   N carrier nodes, each a square oscillator multiplied by an
            envelope follower tracking its band's energy (flagged as output)

Band edges sit at equal ratios in log10 space between 80 Hz and 4000 Hz,
the intelligibility band of speech. Each band's center is the geometric mean
of its edges, and every band shares the constant quality factor derived from
the first edge pair, so bands widen proportionally with frequency.

The one runtime control is the pitch offset, in cents: `"SetOffset"` scales
every carrier frequency by 2^(cents/1200) while the analysis side stays put,
shifting the synthesized voice without re-analyzing.
*/

const LOW_EDGE_HZ: f64 = 80.0;
const HIGH_EDGE_HZ: f64 = 4_000.0;

/// A vocoder assembled over its own [`Sound`].
///
/// Registered methods: `"SetOffset"`, `"GetOffset"` (cents).
pub struct Vocoder {
    sound: Sound,
    carriers: Vec<GenHandle>,
    centers: Vec<f64>,
    offset_cents: f64,
    methods: MethodTable<Self>,
}

impl Vocoder {
    /// Builds a `bands`-band vocoder analyzing the output of `input`.
    ///
    /// The input node is adopted into layer 0 of the vocoder's own sound;
    /// assembly is the only input-dependent cost and runs once, off the
    /// per-sample path.
    pub fn new(input: NodeHandle, bands: usize, sample_rate: u32) -> Self {
        let bands = bands.max(1);
        let edges = band_edges(bands);
        let quality = (edges[1] * edges[0]).sqrt() / (edges[1] - edges[0]);

        let mut sound = Sound::new();
        let mut carriers = Vec::with_capacity(bands);
        let mut centers = Vec::with_capacity(bands);

        sound.add_node(input.clone(), 0, false);

        for band in 0..bands {
            let center = (edges[band] * edges[band + 1]).sqrt();

            let analysis = Node::from_modifier(modifiers::band_pass(center, quality, sample_rate));
            let carrier = generators::square(center, sample_rate);
            let synthesis = Node::from_pair(
                carrier.clone(),
                modifiers::envelope_follower(20.0, 20_000.0, sample_rate),
            );

            input.borrow_mut().add_target(&analysis);
            analysis.borrow_mut().add_target(&synthesis);

            sound.add_node(analysis, 1, false);
            sound.add_node(synthesis, 2, true);

            carriers.push(carrier);
            centers.push(center);
        }

        let mut methods = MethodTable::new();
        methods.register("SetOffset", |vocoder: &mut Self, args: &mut Args| {
            vocoder.set_offset(args.float(0)?)
        });
        methods.register("GetOffset", |vocoder: &mut Self, args: &mut Args| {
            args.set(0, Value::Float(vocoder.offset_cents))
        });

        Self {
            sound,
            carriers,
            centers,
            offset_cents: 0.0,
            methods,
        }
    }

    pub fn band_count(&self) -> usize {
        self.carriers.len()
    }

    pub fn offset(&self) -> f64 {
        self.offset_cents
    }

    /// Retunes every carrier to `center * 2^(cents/1200)`.
    pub fn set_offset(&mut self, cents: f64) -> Result<(), MethodError> {
        let scale = (cents / 1200.0).exp2();
        for (carrier, center) in self.carriers.iter().zip(&self.centers) {
            carrier
                .borrow_mut()
                .call_method("SetFrequency", &mut [Value::Float(center * scale)])?;
        }
        self.offset_cents = cents;
        Ok(())
    }

    /// Evaluates one tick of the underlying sound.
    pub fn tick(&mut self) -> Frame {
        self.sound.tick()
    }

    /// The underlying sound, for adding post-processing nodes.
    pub fn sound_mut(&mut self) -> &mut Sound {
        &mut self.sound
    }
}

impl HasMethods for Vocoder {
    fn method_table(&self) -> &MethodTable<Self> {
        &self.methods
    }
}

/// `bands + 1` edges at equal ratios in log10 space.
fn band_edges(bands: usize) -> Vec<f64> {
    let delta = (HIGH_EDGE_HZ.log10() - LOW_EDGE_HZ.log10()) / bands as f64;
    (0..=bands)
        .map(|band| LOW_EDGE_HZ * 10f64.powf(band as f64 * delta))
        .collect()
}
