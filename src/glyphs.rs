use std::fmt;
use std::fs;
use std::path::Path;

use owned_ttf_parser::{AsFaceRef, OwnedFace};
use thiserror::Error;
use ttf_parser::OutlineBuilder;

#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("failed to load font resource '{path}': {reason}")]
    FontLoad { path: String, reason: String },
    #[error("font has no glyph for character '{0}'")]
    MissingGlyph(char),
    #[error("font reports no units-per-em; cannot scale outlines")]
    UnscalableFont,
}

/// One drawing instruction of a glyph outline, in document units with the
/// pen origin at the glyph's baseline start. Y grows upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    QuadTo { x1: f32, y1: f32, x: f32, y: f32 },
    CurveTo { x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32 },
    Close,
}

/// Outline and metrics of a single character at a requested size.
///
/// `advance` and `bbox_width` are both optional so the composer can apply
/// its fallback chain: advance width, then bounding-box width, then a
/// fixed number of bar modules.
#[derive(Debug, Clone, Default)]
pub struct GlyphOutline {
    pub segments: Vec<PathSegment>,
    pub advance: Option<f32>,
    pub bbox_width: Option<f32>,
}

/// Capability interface for extracting character outlines from a font
/// resource. Injected into the document composer at construction time,
/// so a missing provider is a configuration error rather than a runtime
/// probe.
pub trait GlyphSource: Send + Sync {
    /// Outline `ch` scaled so the font's em square spans `size` document units.
    fn outline(&self, ch: char, size: f32) -> Result<GlyphOutline, GlyphError>;
}

/// `GlyphSource` backed by a TrueType/OpenType font file.
///
/// The face is parsed exactly once, at construction; per-glyph lookups
/// only walk the already-parsed tables.
pub struct TtfGlyphSource {
    face: OwnedFace,
    path: String,
    units_per_em: u16,
}

impl TtfGlyphSource {
    /// Load and validate a font file. Failure here is fatal to the
    /// submission; nothing has been composed yet.
    pub fn load(path: &Path) -> Result<Self, GlyphError> {
        let data = fs::read(path).map_err(|err| GlyphError::FontLoad {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_bytes(data, path.display().to_string())
    }

    pub fn from_bytes(data: Vec<u8>, path: String) -> Result<Self, GlyphError> {
        let face = OwnedFace::from_vec(data, 0).map_err(|err| GlyphError::FontLoad {
            path: path.clone(),
            reason: err.to_string(),
        })?;
        let units_per_em = face.as_face_ref().units_per_em();
        if units_per_em == 0 {
            return Err(GlyphError::UnscalableFont);
        }
        Ok(Self {
            face,
            path,
            units_per_em,
        })
    }
}

impl fmt::Debug for TtfGlyphSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtfGlyphSource")
            .field("path", &self.path)
            .field("units_per_em", &self.units_per_em)
            .finish_non_exhaustive()
    }
}

impl GlyphSource for TtfGlyphSource {
    fn outline(&self, ch: char, size: f32) -> Result<GlyphOutline, GlyphError> {
        let face = self.face.as_face_ref();
        let glyph = face
            .glyph_index(ch)
            .ok_or(GlyphError::MissingGlyph(ch))?;
        let scale = size / self.units_per_em as f32;

        let mut builder = SegmentCollector {
            scale,
            segments: Vec::new(),
        };
        let bbox_width = face
            .outline_glyph(glyph, &mut builder)
            .map(|rect| (rect.x_max - rect.x_min) as f32 * scale);
        let advance = face
            .glyph_hor_advance(glyph)
            .map(|units| units as f32 * scale);

        Ok(GlyphOutline {
            segments: builder.segments,
            advance,
            bbox_width,
        })
    }
}

struct SegmentCollector {
    scale: f32,
    segments: Vec<PathSegment>,
}

impl OutlineBuilder for SegmentCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.segments.push(PathSegment::MoveTo {
            x: x * self.scale,
            y: y * self.scale,
        });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.segments.push(PathSegment::LineTo {
            x: x * self.scale,
            y: y * self.scale,
        });
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.segments.push(PathSegment::QuadTo {
            x1: x1 * self.scale,
            y1: y1 * self.scale,
            x: x * self.scale,
            y: y * self.scale,
        });
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.segments.push(PathSegment::CurveTo {
            x1: x1 * self.scale,
            y1: y1 * self.scale,
            x2: x2 * self.scale,
            y2: y2 * self.scale,
            x: x * self.scale,
            y: y * self.scale,
        });
    }

    fn close(&mut self) {
        self.segments.push(PathSegment::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_font_bytes() {
        let err = TtfGlyphSource::from_bytes(vec![0u8; 16], "garbage.ttf".into()).unwrap_err();
        assert!(matches!(err, GlyphError::FontLoad { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = TtfGlyphSource::load(Path::new("definitely-missing.ttf")).unwrap_err();
        match err {
            GlyphError::FontLoad { path, .. } => assert_eq!(path, "definitely-missing.ttf"),
            other => panic!("expected FontLoad, got {other:?}"),
        }
    }
}
