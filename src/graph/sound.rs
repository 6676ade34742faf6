use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::node::NodeHandle;
use crate::frame::Frame;

/// How the outputs of flagged nodes combine into the tick result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixPolicy {
    /// Plain sum of every flagged output cell.
    #[default]
    Sum,
    /// Sum divided by the number of flagged cells.
    Average,
}

/// A graph of nodes grouped into strictly ordered evaluation layers.
///
/// `tick` evaluates layers from the lowest index to the highest; the order
/// of nodes within one layer is unspecified. Every data dependency must flow
/// from a lower layer to a higher one. That invariant belongs to whoever
/// assembles the graph and is deliberately never checked here, at assembly
/// time or later. Nodes and edges may be added between ticks under the same
/// contract.
pub struct Sound {
    layers: BTreeMap<usize, Vec<NodeHandle>>,
    outputs: Vec<Rc<Cell<Frame>>>,
    policy: MixPolicy,
}

impl Sound {
    pub fn new() -> Self {
        Self {
            layers: BTreeMap::new(),
            outputs: Vec::new(),
            policy: MixPolicy::Sum,
        }
    }

    /// Inserts `node` into `layer`. A node flagged `output` contributes its
    /// output cell to the tick result.
    pub fn add_node(&mut self, node: NodeHandle, layer: usize, output: bool) {
        if output {
            self.outputs.push(node.borrow().output_cell());
        }
        self.layers.entry(layer).or_default().push(node);
    }

    pub fn set_mix_policy(&mut self, policy: MixPolicy) {
        self.policy = policy;
    }

    pub fn node_count(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// Evaluates one full tick of the graph and returns the mixed output.
    pub fn tick(&mut self) -> Frame {
        for nodes in self.layers.values() {
            for node in nodes {
                node.borrow_mut().send_sample();
            }
        }

        let mut mix = Frame::ZERO;
        for cell in &self.outputs {
            mix += cell.get();
        }
        if self.policy == MixPolicy::Average && !self.outputs.is_empty() {
            mix = mix * (1.0 / self.outputs.len() as f32);
        }
        mix
    }
}

impl Default for Sound {
    fn default() -> Self {
        Self::new()
    }
}
