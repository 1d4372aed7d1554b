use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationId;
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CirclePrimitive, LinePrimitive, RectPrimitive, TextPrimitive};

/// Drawing parts of one annotation, grouped so they share one identity.
///
/// Removing the annotation removes the whole group: guide, marker, tooltip
/// box and tooltip text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationVisual {
    pub id: AnnotationId,
    pub frozen: bool,
    pub guide: LinePrimitive,
    pub marker: CirclePrimitive,
    pub tooltip_box: RectPrimitive,
    pub tooltip_lines: Vec<TextPrimitive>,
}

impl AnnotationVisual {
    pub fn validate(&self) -> ChartResult<()> {
        self.guide.validate()?;
        self.marker.validate()?;
        self.tooltip_box.validate()?;
        for text in &self.tooltip_lines {
            text.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Primitives are in viewport pixels and are drawn in field order:
/// rects, lines, texts, then annotation groups on top. Markers are circles
/// and only exist inside an [`AnnotationVisual`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub annotations: Vec<AnnotationVisual>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationVisual) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for annotation in &self.annotations {
            annotation.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn annotation(&self, id: AnnotationId) -> Option<&AnnotationVisual> {
        self.annotations.iter().find(|visual| visual.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
            && self.annotations.is_empty()
    }
}
