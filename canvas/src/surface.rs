//! Drawing surface abstraction.
//!
//! The render pipeline only ever talks to a [`Surface`]. The browser backend
//! lives in [`crate::web`]; [`Recorder`] captures the operations in memory so
//! the full pipeline can be exercised headless.

use std::convert::Infallible;

use crate::camera::{CanvasSize, Point};

/// Font used for a text draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// `10px monospace`: grid and RSSI labels.
    Small,
    /// `12px monospace`: scanner ids.
    Label,
    /// `bold 12px monospace`: the target label.
    Bold,
}

impl Font {
    /// CSS font shorthand for this font.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Small => "10px monospace",
            Self::Label => "12px monospace",
            Self::Bold => "bold 12px monospace",
        }
    }

    /// Pixel size of this font.
    #[must_use]
    pub fn size_px(self) -> f64 {
        match self {
            Self::Small => 10.0,
            Self::Label | Self::Bold => 12.0,
        }
    }

    #[must_use]
    pub fn is_bold(self) -> bool {
        matches!(self, Self::Bold)
    }
}

/// Horizontal anchor of a text draw relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

impl Align {
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
        }
    }
}

/// Stroke color and width for outlines and lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
}

/// Font, alignment and fill color of a text draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub align: Align,
    pub color: &'static str,
}

/// Raster drawing primitives, all in canvas pixel coordinates.
pub trait Surface {
    type Error;

    /// Set the pixel size of the surface. Clears its content.
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn resize(&mut self, size: CanvasSize) -> Result<(), Self::Error>;

    /// Fill the whole surface with `color`, discarding earlier content.
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn clear(&mut self, color: &'static str) -> Result<(), Self::Error>;

    /// Stroke a straight segment.
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<(), Self::Error>;

    /// Stroke an unfilled circle.
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) -> Result<(), Self::Error>;

    /// Fill a circle.
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn fill_circle(&mut self, center: Point, radius: f64, color: &'static str) -> Result<(), Self::Error>;

    /// Draw a single line of text anchored at `at` (alphabetic baseline).
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn text(&mut self, text: &str, at: Point, style: TextStyle) -> Result<(), Self::Error>;
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { color: &'static str },
    Line { from: Point, to: Point, stroke: Stroke },
    StrokeCircle { center: Point, radius: f64, stroke: Stroke },
    FillCircle { center: Point, radius: f64, color: &'static str },
    Text { text: String, at: Point, style: TextStyle },
}

/// In-memory surface that records every draw call in order.
///
/// `clear` drops the ops recorded before it, so after a render `ops` holds
/// exactly one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recorder {
    pub size: CanvasSize,
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts drawn so far, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    type Error = Infallible;

    fn resize(&mut self, size: CanvasSize) -> Result<(), Self::Error> {
        self.size = size;
        self.ops.clear();
        Ok(())
    }

    fn clear(&mut self, color: &'static str) -> Result<(), Self::Error> {
        self.ops.clear();
        self.ops.push(DrawOp::Clear { color });
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Line { from, to, stroke });
        Ok(())
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::StrokeCircle { center, radius, stroke });
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &'static str) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::FillCircle { center, radius, color });
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, style: TextStyle) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Text { text: text.to_owned(), at, style });
        Ok(())
    }
}
