//! Stand-in render pass that consults the draw predicate.

use shroud_filter::{EntityHider, Renderable};

/// Per-frame draw counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Renderables that passed the predicate.
    pub drawn: usize,
    /// Renderables the predicate suppressed.
    pub culled: usize,
}

/// "Draw" one frame: ask the filter about every renderable.
pub fn render_frame(hider: &EntityHider, renderables: &[Renderable]) -> FrameStats {
    let mut stats = FrameStats::default();
    for renderable in renderables {
        if hider.should_draw(renderable, false) {
            stats.drawn += 1;
        } else {
            stats.culled += 1;
        }
    }
    stats
}
