use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer that keeps the last frame for inspection.
///
/// Frames are still validated, so invalid geometry fails the render call the
/// same way it would on a drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_line_count: usize,
    pub last_text_count: usize,
    pub last_annotation_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl NullRenderer {
    /// Frozen annotation groups in the last rendered frame.
    #[must_use]
    pub fn last_frozen_count(&self) -> usize {
        self.last_frame.as_ref().map_or(0, |frame| {
            frame.annotations.iter().filter(|visual| visual.frozen).count()
        })
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_line_count = frame.lines.len();
        self.last_text_count = frame.texts.len();
        self.last_annotation_count = frame.annotations.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
