//! Choreography trait: a named, rebuildable list of steps.

use crate::step::Step;

pub trait Choreography: Send {
    fn name(&self) -> &'static str;

    /// Roster size this choreography is written for.
    fn num_bots(&self) -> usize;

    /// Clear and rebuild the step list from scratch.
    fn generate_sequence(&mut self);

    fn sequence(&self) -> &[Box<dyn Step>];

    fn sequence_mut(&mut self) -> &mut [Box<dyn Step>];

    /// Step names in execution order.
    fn step_names(&self) -> Vec<&'static str> {
        self.sequence().iter().map(|s| s.name()).collect()
    }
}
