use crate::graph::ModelGraph;

/// Slow continuous spin while the page is not being scrolled.
#[derive(Clone, Copy, Debug)]
pub struct IdleAnimator {
    pub step: f32,
}

impl IdleAnimator {
    pub fn new(step: f32) -> Self {
        Self { step }
    }

    /// Returns true when the rotation was advanced. Rendering is the caller's
    /// job and happens whatever this returns.
    pub fn tick(&self, graph: &mut ModelGraph, scrolling: bool) -> bool {
        if scrolling {
            return false;
        }
        graph.transform_mut().rotation.y += self.step;
        true
    }
}
