use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::frame::Frame;
use crate::generators::GenHandle;
use crate::modifiers::ModHandle;

/*
One Node, One Tick
==================

A node owns up to one generator and up to one modifier, fixed for its
lifetime. Each tick, `send_sample` does three things:

  1. pull    ask the generator for a frame; run the modifier over whatever
             upstream nodes last wrote into this node's input cell
  2. combine apply the interaction function to the two results
  3. fan out write the combined frame into this node's output cell and into
             the input cell of every registered target, each getting an
             identical copy

The default interaction depends on what the node holds: generator-only
forwards the generated frame, modifier-only forwards the filtered frame, and
a node holding both multiplies them per channel (the modifier output acting
as a per-channel VCA over the generator).

Input cells are plain last-write-wins storage. If two upstream nodes target
the same cell, the later writer in that tick wins; if an upstream node is
removed, the cell keeps its stale value. Neither situation is detected here:
the per-sample path stays branch-light and infallible, and layer ordering is
the assembler's contract to uphold.
*/

/// Combines a node's generator and modifier outputs into one frame.
pub type Interaction = Box<dyn Fn(Frame, Frame) -> Frame>;

/// Shared handle to a node, as stored in a [`Sound`](crate::graph::Sound).
pub type NodeHandle = Rc<RefCell<Node>>;

pub struct Node {
    generator: Option<GenHandle>,
    modifier: Option<ModHandle>,
    interaction: Interaction,
    input: Rc<Cell<Frame>>,
    output: Rc<Cell<Frame>>,
    targets: Vec<Rc<Cell<Frame>>>,
}

impl Node {
    /// A node that forwards its generator's output.
    pub fn from_generator(generator: GenHandle) -> NodeHandle {
        Self::build(
            Some(generator),
            None,
            Box::new(|generated, _| generated),
        )
    }

    /// A node that filters its input cell through its modifier.
    pub fn from_modifier(modifier: ModHandle) -> NodeHandle {
        Self::build(None, Some(modifier), Box::new(|_, modified| modified))
    }

    /// A node combining both roles; by default the modifier output
    /// multiplies the generator output per channel.
    pub fn from_pair(generator: GenHandle, modifier: ModHandle) -> NodeHandle {
        Self::build(
            Some(generator),
            Some(modifier),
            Box::new(|generated, modified| generated * modified),
        )
    }

    fn build(
        generator: Option<GenHandle>,
        modifier: Option<ModHandle>,
        interaction: Interaction,
    ) -> NodeHandle {
        Rc::new(RefCell::new(Self {
            generator,
            modifier,
            interaction,
            input: Rc::new(Cell::new(Frame::ZERO)),
            output: Rc::new(Cell::new(Frame::ZERO)),
            targets: Vec::new(),
        }))
    }

    /// Replaces the combination rule.
    pub fn set_interaction(&mut self, interaction: Interaction) {
        self.interaction = interaction;
    }

    /// Routes this node's output into `target`'s input cell.
    ///
    /// Edges may be added at any time; one added mid-evaluation first
    /// carries a frame on the next tick that processes this node.
    pub fn add_target(&mut self, target: &NodeHandle) {
        self.targets.push(target.borrow().input.clone());
    }

    /// Routes this node's output into an external cell.
    pub fn add_output(&mut self, cell: Rc<Cell<Frame>>) {
        self.targets.push(cell);
    }

    pub fn generator(&self) -> Option<&GenHandle> {
        self.generator.as_ref()
    }

    pub fn modifier(&self) -> Option<&ModHandle> {
        self.modifier.as_ref()
    }

    /// The cell upstream nodes write into.
    pub fn input_cell(&self) -> Rc<Cell<Frame>> {
        self.input.clone()
    }

    /// The cell holding this node's most recent output.
    pub fn output_cell(&self) -> Rc<Cell<Frame>> {
        self.output.clone()
    }

    /// Runs one tick: pull, combine, fan out.
    pub fn send_sample(&mut self) {
        let generated = match &self.generator {
            Some(generator) => generator.borrow_mut().next_frame(),
            None => Frame::ZERO,
        };
        let modified = match &self.modifier {
            Some(modifier) => modifier.borrow_mut().process(self.input.get()),
            None => Frame::ZERO,
        };

        let out = (self.interaction)(generated, modified);

        self.output.set(out);
        for target in &self.targets {
            target.set(out);
        }
    }
}
