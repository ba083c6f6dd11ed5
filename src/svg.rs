//! SVG surface — headless rendering target for the viewer binary.
//!
//! Each draw call becomes one SVG element; [`SvgSurface::document`] wraps the
//! current frame in an `<svg>` root sized to the canvas. Coordinates are
//! written with two decimals, which is finer than a device pixel.

use std::fmt::Write as _;
use std::path::Path;

use canvas::camera::{CanvasSize, Point};
use canvas::surface::{Align, Stroke, Surface, TextStyle};

/// Errors produced while emitting or saving a document.
#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    #[error("SVG formatting failed: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("writing {path} failed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    size: CanvasSize,
    elements: Vec<String>,
}

impl SvgSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current frame as a standalone SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`std::fmt::Error`] if formatting fails.
    pub fn document(&self) -> Result<String, std::fmt::Error> {
        let (w, h) = (self.size.width(), self.size.height());
        let mut doc = String::new();
        writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        for element in &self.elements {
            writeln!(doc, "  {element}")?;
        }
        writeln!(doc, "</svg>")?;
        Ok(doc)
    }

    fn push(&mut self, element: String) {
        self.elements.push(element);
    }
}

impl Surface for SvgSurface {
    type Error = std::fmt::Error;

    fn resize(&mut self, size: CanvasSize) -> Result<(), Self::Error> {
        self.size = size;
        self.elements.clear();
        Ok(())
    }

    fn clear(&mut self, color: &'static str) -> Result<(), Self::Error> {
        self.elements.clear();
        let mut el = String::new();
        write!(
            el,
            r#"<rect x="0" y="0" width="{}" height="{}" {}/>"#,
            self.size.width(),
            self.size.height(),
            paint("fill", color)
        )?;
        self.push(el);
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<(), Self::Error> {
        let mut el = String::new();
        write!(
            el,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {} stroke-width="{}"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            paint("stroke", stroke.color),
            stroke.width
        )?;
        self.push(el);
        Ok(())
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: Stroke) -> Result<(), Self::Error> {
        let mut el = String::new();
        write!(
            el,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" {} stroke-width="{}"/>"#,
            center.x,
            center.y,
            radius,
            paint("stroke", stroke.color),
            stroke.width
        )?;
        self.push(el);
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &'static str) -> Result<(), Self::Error> {
        let mut el = String::new();
        write!(
            el,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" {}/>"#,
            center.x,
            center.y,
            radius,
            paint("fill", color)
        )?;
        self.push(el);
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, style: TextStyle) -> Result<(), Self::Error> {
        let anchor = match style.align {
            Align::Left => "start",
            Align::Center => "middle",
        };
        let weight = if style.font.is_bold() { r#" font-weight="bold""# } else { "" };
        let mut el = String::new();
        write!(
            el,
            r#"<text x="{:.2}" y="{:.2}" font-family="monospace" font-size="{}"{weight} text-anchor="{anchor}" {}>{}</text>"#,
            at.x,
            at.y,
            style.font.size_px(),
            paint("fill", style.color),
            escape(text)
        )?;
        self.push(el);
        Ok(())
    }
}

/// `fill`/`stroke` attributes for a CSS color.
///
/// SVG 1.1 paint has no alpha channel, so `rgba(r, g, b, a)` is split into a
/// hex color and a matching `*-opacity` attribute. Other colors pass through.
#[must_use]
pub fn paint(attr: &str, color: &str) -> String {
    match parse_rgba(color) {
        Some((r, g, b, alpha)) => format!(r##"{attr}="#{r:02x}{g:02x}{b:02x}" {attr}-opacity="{alpha}""##),
        None => format!(r#"{attr}="{}""#, escape(color)),
    }
}

fn parse_rgba(color: &str) -> Option<(u8, u8, u8, f64)> {
    let inner = color.trim().strip_prefix("rgba(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = parts.next()?.parse().ok()?;
    let g = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    let alpha: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(0.0..=1.0).contains(&alpha) {
        return None;
    }
    Some((r, g, b, alpha))
}

/// Escape the five XML special characters.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Replace `path` with `contents` so readers never observe a partial file.
///
/// Writes a sibling temp file, then renames it over the target.
///
/// # Errors
///
/// Returns [`SvgError::Io`] if either step fails.
pub async fn write_atomic(path: &Path, contents: &str) -> Result<(), SvgError> {
    let io_err = |source| SvgError::Io { path: path.display().to_string(), source };

    let mut tmp_name = path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    tokio::fs::write(&tmp, contents).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
#[path = "svg_test.rs"]
mod tests;
