//! Fixed-layout vector label composition.
//!
//! Walks the 95-module symbol twice (main bars, then the taller guard-bar
//! extensions) and places the human-readable digits glyph by glyph using an
//! injected [`GlyphSource`]. Built on printpdf 0.8's data-oriented API:
//! pages are `Vec<Op>` operation lists serialized via `PdfDocument::save`.

use printpdf::{
    Color, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point,
    Polygon, PolygonRing, Rgb, WindingOrder,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::encoding::{Ean13, EncodeError, guard_mask};
use crate::glyphs::{GlyphError, GlyphOutline, GlyphSource, PathSegment};

/// Label page size, landscape.
pub const PAGE_WIDTH_MM: f32 = 29.832;
pub const PAGE_HEIGHT_MM: f32 = 18.552;
/// Width of one symbol module.
pub const MODULE_WIDTH_MM: f32 = 0.264;
/// Height of the main bar field.
pub const BAR_HEIGHT_MM: f32 = 15.296;
/// Height of the guard-bar extensions drawn below the main field.
pub const GUARD_BAR_HEIGHT_MM: f32 = 2.992;
/// Left edge of the bar field (quiet zone to its left).
pub const BAR_FIELD_LEFT_MM: f32 = 2.9;

// Vertical placement, measured from the top edge as in the source layout.
const BAR_TOP_MM: f32 = 0.264;
const GUARD_TOP_MM: f32 = 15.56;

// Human-readable digit rendering.
const FONT_SIZE_PT: f32 = 8.75;
const FONT_SIZE_SCALE: f32 = 0.35;
const LETTER_SPACING_MM: f32 = 0.15;
const BASELINE_OFFSET_MM: f32 = 0.523;
const FALLBACK_ADVANCE_MM: f32 = MODULE_WIDTH_MM * 4.0;

/// The 13 digits split into their printed groups: leading digit alone in
/// the left quiet zone, then the two six-digit halves under the bars.
const TEXT_GROUPS: [(usize, usize, f32); 3] = [(0, 1, 0.052), (1, 7, 4.082), (7, 13, 16.34)];

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Glyph(#[from] GlyphError),
}

/// Named binary output of one successful composition.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Composes one single-page label document per identifier.
///
/// The glyph provider is injected at construction; its absence is a
/// configuration error, never a mid-batch probe.
pub struct Composer<'a> {
    glyphs: &'a dyn GlyphSource,
}

impl<'a> Composer<'a> {
    pub fn new(glyphs: &'a dyn GlyphSource) -> Self {
        Self { glyphs }
    }

    /// Compose the label for one identifier and serialize it to bytes.
    ///
    /// Any failure is local to this identifier; the caller decides how to
    /// aggregate it. The artifact is named after the canonical 13-digit
    /// form, check digit included.
    pub fn compose(&self, identifier: &str) -> Result<Artifact, ComposeError> {
        let id = Ean13::parse(identifier)?;
        let symbol = id.symbol()?;

        let mut ops = Vec::new();

        // Opaque white background; some viewers default to a transparent canvas.
        ops.push(Op::SetFillColor {
            col: rgb(1.0, 1.0, 1.0),
        });
        ops.push(filled_rect(0.0, 0.0, PAGE_WIDTH_MM, PAGE_HEIGHT_MM));

        ops.push(Op::SetFillColor {
            col: rgb(0.0, 0.0, 0.0),
        });

        // Main bar field.
        let mut x = BAR_FIELD_LEFT_MM;
        for ink in symbol.modules() {
            if ink {
                ops.push(filled_rect(x, BAR_TOP_MM, MODULE_WIDTH_MM, BAR_HEIGHT_MM));
            }
            x += MODULE_WIDTH_MM;
        }

        // Guard-bar extensions, same stepping, taller and lower.
        let mut x = BAR_FIELD_LEFT_MM;
        for byte in guard_mask().bytes() {
            if byte == b'1' {
                ops.push(filled_rect(
                    x,
                    GUARD_TOP_MM,
                    MODULE_WIDTH_MM,
                    GUARD_BAR_HEIGHT_MM,
                ));
            }
            x += MODULE_WIDTH_MM;
        }

        self.draw_digits(&mut ops, id.as_str())?;

        let mut doc = PdfDocument::new(id.as_str());
        doc.with_pages(vec![PdfPage::new(
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            ops,
        )]);
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let data = doc.save(&PdfSaveOptions::default(), &mut warnings);
        debug!(identifier = id.as_str(), bytes = data.len(), "composed label");

        Ok(Artifact {
            filename: format!("{}.ai", id.as_str()),
            data,
        })
    }

    fn draw_digits(&self, ops: &mut Vec<Op>, digits: &str) -> Result<(), ComposeError> {
        let size = FONT_SIZE_PT * FONT_SIZE_SCALE;
        for &(start, end, group_x) in &TEXT_GROUPS {
            let mut pen_x = group_x;
            for ch in digits[start..end].chars() {
                let outline = self.glyphs.outline(ch, size)?;
                if outline.segments.is_empty() {
                    warn!(character = %ch, "glyph has no outline data; skipping");
                    continue;
                }
                for polygon in glyph_polygons(&outline, pen_x, BASELINE_OFFSET_MM) {
                    ops.push(Op::DrawPolygon { polygon });
                }
                let advance = outline
                    .advance
                    .or(outline.bbox_width)
                    .unwrap_or(FALLBACK_ADVANCE_MM);
                pen_x += advance + LETTER_SPACING_MM;
            }
        }
        Ok(())
    }
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb {
        r,
        g,
        b,
        icc_profile: None,
    })
}

/// Filled axis-aligned rectangle. Inputs use the layout's top-left origin;
/// PDF user space is bottom-left, so y flips here and nowhere else.
fn filled_rect(x: f32, y_top: f32, width: f32, height: f32) -> Op {
    let y = PAGE_HEIGHT_MM - y_top - height;
    let corners = [
        (x, y),
        (x + width, y),
        (x + width, y + height),
        (x, y + height),
    ];
    Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: corners
                    .iter()
                    .map(|&(px, py)| LinePoint {
                        p: Point::new(Mm(px), Mm(py)),
                        bezier: false,
                    })
                    .collect(),
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        },
    }
}

/// Convert a glyph outline into filled polygons at the given pen position.
/// One polygon per closed contour; quadratic segments are elevated to
/// cubic so every curve fits the two-control-point form.
fn glyph_polygons(outline: &GlyphOutline, pen_x: f32, baseline_y: f32) -> Vec<Polygon> {
    let mut polygons = Vec::new();
    let mut ring: Vec<LinePoint> = Vec::new();
    let (mut cur_x, mut cur_y) = (0.0f32, 0.0f32);

    let mut flush = |ring: &mut Vec<LinePoint>| {
        if !ring.is_empty() {
            polygons.push(Polygon {
                rings: vec![PolygonRing {
                    points: std::mem::take(ring),
                }],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }
    };

    for segment in &outline.segments {
        match *segment {
            PathSegment::MoveTo { x, y } => {
                flush(&mut ring);
                ring.push(point(x + pen_x, y + baseline_y, false));
                (cur_x, cur_y) = (x, y);
            }
            PathSegment::LineTo { x, y } => {
                ring.push(point(x + pen_x, y + baseline_y, false));
                (cur_x, cur_y) = (x, y);
            }
            PathSegment::QuadTo { x1, y1, x, y } => {
                // Degree elevation: cubic controls sit two thirds of the
                // way from each endpoint to the quadratic control.
                let c1x = cur_x + 2.0 / 3.0 * (x1 - cur_x);
                let c1y = cur_y + 2.0 / 3.0 * (y1 - cur_y);
                let c2x = x + 2.0 / 3.0 * (x1 - x);
                let c2y = y + 2.0 / 3.0 * (y1 - y);
                ring.push(point(c1x + pen_x, c1y + baseline_y, true));
                ring.push(point(c2x + pen_x, c2y + baseline_y, true));
                ring.push(point(x + pen_x, y + baseline_y, false));
                (cur_x, cur_y) = (x, y);
            }
            PathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                ring.push(point(x1 + pen_x, y1 + baseline_y, true));
                ring.push(point(x2 + pen_x, y2 + baseline_y, true));
                ring.push(point(x + pen_x, y + baseline_y, false));
                (cur_x, cur_y) = (x, y);
            }
            PathSegment::Close => {
                flush(&mut ring);
            }
        }
    }
    flush(&mut ring);
    polygons
}

fn point(x: f32, y: f32, bezier: bool) -> LinePoint {
    LinePoint {
        p: Point::new(Mm(x), Mm(y)),
        bezier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::SYMBOL_MODULES;
    use crate::glyphs::GlyphOutline;

    /// Draws every digit as a small filled box with a fixed advance.
    struct BoxGlyphs;

    impl GlyphSource for BoxGlyphs {
        fn outline(&self, _ch: char, size: f32) -> Result<GlyphOutline, GlyphError> {
            let w = size * 0.5;
            Ok(GlyphOutline {
                segments: vec![
                    PathSegment::MoveTo { x: 0.0, y: 0.0 },
                    PathSegment::LineTo { x: w, y: 0.0 },
                    PathSegment::LineTo { x: w, y: size },
                    PathSegment::LineTo { x: 0.0, y: size },
                    PathSegment::Close,
                ],
                advance: Some(w),
                bbox_width: Some(w),
            })
        }
    }

    /// Simulates a glyph provider whose font lacks the requested glyphs.
    struct NoGlyphs;

    impl GlyphSource for NoGlyphs {
        fn outline(&self, ch: char, _size: f32) -> Result<GlyphOutline, GlyphError> {
            Err(GlyphError::MissingGlyph(ch))
        }
    }

    #[test]
    fn composes_pdf_artifact() {
        let glyphs = BoxGlyphs;
        let artifact = Composer::new(&glyphs).compose("4006381333931").unwrap();
        assert_eq!(artifact.filename, "4006381333931.ai");
        assert!(artifact.data.starts_with(b"%PDF"));
    }

    #[test]
    fn twelve_digit_input_is_named_after_canonical_form() {
        let glyphs = BoxGlyphs;
        let artifact = Composer::new(&glyphs).compose("400638133393").unwrap();
        assert_eq!(artifact.filename, "4006381333931.ai");
    }

    #[test]
    fn encoding_failure_is_local_to_the_document() {
        let glyphs = BoxGlyphs;
        let err = Composer::new(&glyphs).compose("not-a-number").unwrap_err();
        assert!(matches!(err, ComposeError::Encode(_)));
    }

    #[test]
    fn glyph_failure_is_local_to_the_document() {
        let glyphs = NoGlyphs;
        let err = Composer::new(&glyphs).compose("4006381333931").unwrap_err();
        assert!(matches!(err, ComposeError::Glyph(_)));
    }

    #[test]
    fn bar_field_fits_the_page() {
        let field = BAR_FIELD_LEFT_MM + SYMBOL_MODULES as f32 * MODULE_WIDTH_MM;
        assert!((field - 27.98).abs() < 1e-3);
        assert!(field < PAGE_WIDTH_MM);
    }

    #[test]
    fn guard_extensions_reach_the_bottom_edge() {
        assert!((GUARD_TOP_MM + GUARD_BAR_HEIGHT_MM - PAGE_HEIGHT_MM).abs() < 1e-3);
    }

    #[test]
    fn quad_segments_are_elevated_to_cubic() {
        let outline = GlyphOutline {
            segments: vec![
                PathSegment::MoveTo { x: 0.0, y: 0.0 },
                PathSegment::QuadTo {
                    x1: 1.0,
                    y1: 2.0,
                    x: 2.0,
                    y: 0.0,
                },
                PathSegment::Close,
            ],
            advance: None,
            bbox_width: None,
        };
        let polygons = glyph_polygons(&outline, 0.0, 0.0);
        assert_eq!(polygons.len(), 1);
        let points = &polygons[0].rings[0].points;
        // move endpoint + two control points + curve endpoint
        assert_eq!(points.len(), 4);
        assert!(points[1].bezier && points[2].bezier);
        assert!(!points[3].bezier);
    }
}
