//! A surface that records every command instead of drawing.
//! Used by tests and by headless hosts that want to inspect frames.

use crate::api::types::ViewportSize;
use crate::renderer::traits::Surface;
use crate::systems::teardrop::Teardrop;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    Resize(ViewportSize),
    Clear,
    Teardrop(Teardrop),
    Visible(bool),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: ViewportSize,
    commands: Vec<SurfaceCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Number of teardrops drawn since the last `take_commands`.
    pub fn drops_drawn(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, SurfaceCommand::Teardrop(_)))
            .count()
    }

    /// Number of `clear` calls since the last `take_commands`.
    pub fn clears(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, SurfaceCommand::Clear))
            .count()
    }

    /// Drain the command log.
    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> ViewportSize {
        self.size
    }

    fn resize(&mut self, size: ViewportSize) {
        self.size = size;
        self.commands.push(SurfaceCommand::Resize(size));
    }

    fn clear(&mut self) {
        self.commands.push(SurfaceCommand::Clear);
    }

    fn fill_teardrop(&mut self, drop: &Teardrop) {
        self.commands.push(SurfaceCommand::Teardrop(*drop));
    }

    fn set_visible(&mut self, visible: bool) {
        self.commands.push(SurfaceCommand::Visible(visible));
    }
}
