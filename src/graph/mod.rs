//! The layered signal graph.
//!
//! Nodes combine at most one generator and one modifier and fan their result
//! out to downstream input cells; a [`Sound`] owns nodes grouped into
//! strictly ordered evaluation layers and drives one full tick of the graph
//! per output frame.

/// Atomic processing unit: generator x modifier with fan-out.
pub mod node;
/// Layered evaluation driver and output mixing.
pub mod sound;
/// Band-pass bank / envelope follower / carrier composition.
pub mod vocoder;

pub use node::{Interaction, Node, NodeHandle};
pub use sound::{MixPolicy, Sound};
pub use vocoder::Vocoder;
