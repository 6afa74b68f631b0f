use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
    Polygon, Rgb,
};

use super::gauge::{self, Rgb8, BANDS};
use super::{profile_summary, Assessment, METHODOLOGY_NOTE};
use crate::models::RiskClass;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 18.0;
const HDR_H: f32 = 48.0; // header band height

// ── Palette ───────────────────────────────────────────────────────────────────
const BG:           (f32, f32, f32) = (1.00, 1.00, 1.00);
const PANEL:        (f32, f32, f32) = (1.00, 1.00, 1.00);
const PANEL_ALT:    (f32, f32, f32) = (0.95, 0.96, 0.97);
const PANEL_BORDER: (f32, f32, f32) = (0.85, 0.87, 0.90);
const HDR_FROM:     (f32, f32, f32) = (0.17, 0.24, 0.31); // #2c3e50
const HDR_TO:       (f32, f32, f32) = (0.20, 0.29, 0.37); // #34495e
const TEXT_PRI:     (f32, f32, f32) = (0.17, 0.24, 0.31);
const TEXT_SEC:     (f32, f32, f32) = (0.36, 0.40, 0.46);
const TEXT_MUT:     (f32, f32, f32) = (0.58, 0.62, 0.67);
const WHITE:        (f32, f32, f32) = (1.00, 1.00, 1.00);
const WHITE_DIM:    (f32, f32, f32) = (0.82, 0.86, 0.91);

const LOW_BG:  (f32, f32, f32) = (0.83, 0.93, 0.85);
const LOW_FG:  (f32, f32, f32) = (0.08, 0.34, 0.14);
const HIGH_BG: (f32, f32, f32) = (0.97, 0.84, 0.85);
const HIGH_FG: (f32, f32, f32) = (0.45, 0.11, 0.14);

const R_PANEL: f32 = 2.5;
const R_BADGE: f32 = 1.5;

// ── Gauge layout ──────────────────────────────────────────────────────────────
const GAUGE_CX: f32 = PAGE_W / 2.0;
const GAUGE_CY: f32 = 150.0;
const GAUGE_OUTER: f32 = 45.0;
const GAUGE_INNER: f32 = 28.0;
const GAUGE_BAR_INSET: f32 = 5.5;
const ARC_SEGS: usize = 48;

// ── Lower tables ──────────────────────────────────────────────────────────────
const TABLES_TOP: f32 = 108.0;
const COL_SPLIT: f32 = 104.0;
const PROFILE_ROW_H: f32 = 6.0;
const FEATURE_ROW_H: f32 = 4.1;
const NOTE_WRAP: usize = 46;
const REC_WRAP: usize = 80;

/// Render a one-page PDF report for a single prediction.
pub fn render(assessment: &Assessment<'_>, output_path: &Path, status: &mut dyn Write) -> Result<()> {
    let doc = PdfDocument::empty("Attrition Risk Report");
    let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Prediction");
    let layer = doc.get_page(page_idx).get_layer(layer_idx);

    let font_b = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let font_r = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    fill_rect(&layer, 0.0, 0.0, PAGE_W, PAGE_H, BG);
    draw_header(&layer, assessment, &font_r, &font_b);
    draw_prediction(&layer, assessment, &font_r, &font_b);
    draw_profile(&layer, assessment, &font_r, &font_b);
    draw_features(&layer, assessment, &font_r, &font_b);

    // Footer
    draw_line(&layer, (MARGIN, 22.0), (PAGE_W - MARGIN, 22.0), PANEL_BORDER, 0.3);
    set_color(&layer, TEXT_MUT);
    layer.use_text(
        format!("Generated by hr-attrition v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(MARGIN), Mm(15.0), &font_r,
    );
    layer.use_text(today(), 7.5, Mm(PAGE_W - MARGIN - 16.0), Mm(15.0), &font_r);

    let bytes = doc.save_to_bytes()?;
    std::fs::write(output_path, &bytes)
        .with_context(|| format!("Failed to write PDF to {}", output_path.display()))?;

    tracing::info!(path = %output_path.display(), "pdf report written");
    writeln!(status, "PDF report written to: {}", output_path.display())?;
    Ok(())
}

fn draw_header(
    layer: &PdfLayerReference,
    assessment: &Assessment<'_>,
    font_r: &IndirectFontRef,
    font_b: &IndirectFontRef,
) {
    let hdr_bot = PAGE_H - HDR_H;
    fill_gradient_h(layer, 0.0, hdr_bot, PAGE_W, HDR_H, HDR_FROM, HDR_TO, 28);

    set_color(layer, WHITE_DIM);
    layer.use_text(
        format!("hr-attrition v{}", env!("CARGO_PKG_VERSION")),
        7.5, Mm(PAGE_W - MARGIN - 26.0), Mm(PAGE_H - 10.5), font_r,
    );

    set_color(layer, WHITE);
    layer.use_text("HR Analytics", 26.0, Mm(MARGIN), Mm(PAGE_H - 24.0), font_b);
    set_color(layer, WHITE_DIM);
    layer.use_text("Attrition Prediction", 18.0, Mm(MARGIN), Mm(PAGE_H - 36.0), font_b);

    // Model chip
    let chip_y = hdr_bot - 18.0;
    let chip_h = 12.0f32;
    let chip_w = 106.0f32;
    fill_rounded_rect(layer, MARGIN, chip_y, chip_w, chip_h, R_BADGE, PANEL);
    stroke_rounded_rect(layer, MARGIN, chip_y, chip_w, chip_h, R_BADGE, PANEL_BORDER);
    fill_rect(layer, MARGIN, chip_y, 2.5, chip_h, HDR_FROM);

    set_color(layer, TEXT_MUT);
    layer.use_text("MODEL", 6.0, Mm(MARGIN + 5.0), Mm(chip_y + chip_h - 3.8), font_b);
    set_color(layer, TEXT_PRI);
    layer.use_text(truncate(assessment.model, 40), 9.5, Mm(MARGIN + 5.0), Mm(chip_y + 2.8), font_b);

    set_color(layer, TEXT_SEC);
    layer.use_text(format!("Assessed  {}", today()), 9.0, Mm(MARGIN), Mm(chip_y - 8.0), font_r);

    let rule_y = chip_y - 14.0;
    draw_line(layer, (MARGIN, rule_y), (PAGE_W - MARGIN, rule_y), PANEL_BORDER, 0.3);
    set_color(layer, TEXT_MUT);
    layer.use_text("PREDICTION ANALYSIS", 6.5, Mm(MARGIN), Mm(rule_y - 7.0), font_b);
}

fn draw_prediction(
    layer: &PdfLayerReference,
    assessment: &Assessment<'_>,
    font_r: &IndirectFontRef,
    font_b: &IndirectFontRef,
) {
    let prediction = assessment.prediction;
    let pct = prediction.percentage();
    let center = (GAUGE_CX as f64, GAUGE_CY as f64);

    set_color(layer, TEXT_PRI);
    centered_text(layer, gauge::TITLE, 11.0, GAUGE_CX, GAUGE_CY + GAUGE_OUTER + 6.0, font_b);

    for band in BANDS.iter() {
        let ring = gauge::ring_segment(
            center, GAUGE_OUTER as f64, GAUGE_INNER as f64, band.from, band.to, ARC_SEGS,
        );
        fill_ring(layer, &ring, rgb8(band.color));
    }

    if pct > 0.0 {
        let bar = gauge::ring_segment(
            center,
            (GAUGE_OUTER - GAUGE_BAR_INSET) as f64,
            (GAUGE_INNER + GAUGE_BAR_INSET) as f64,
            0.0,
            pct,
            ARC_SEGS,
        );
        fill_ring(layer, &bar, rgb8(gauge::BAR_COLOR));
    }

    let outline = gauge::ring_segment(center, GAUGE_OUTER as f64, GAUGE_INNER as f64, 0.0, 100.0, ARC_SEGS);
    stroke_ring(layer, &outline, rgb8(gauge::BORDER_COLOR));

    // Threshold marker at the computed probability
    let from = gauge::point_at(center, (GAUGE_INNER - 2.0) as f64, pct);
    let to = gauge::point_at(center, (GAUGE_OUTER + 2.0) as f64, pct);
    draw_line(
        layer,
        (from.0 as f32, from.1 as f32),
        (to.0 as f32, to.1 as f32),
        rgb8(gauge::THRESHOLD_COLOR),
        1.4,
    );

    set_color(layer, TEXT_PRI);
    centered_text(layer, &prediction.display_percentage(), 20.0, GAUGE_CX, GAUGE_CY + 4.0, font_b);

    set_color(layer, TEXT_MUT);
    for tick in [0.0, 50.0, 100.0] {
        let (x, _) = gauge::point_at(center, ((GAUGE_OUTER + GAUGE_INNER) / 2.0) as f64, tick);
        centered_text(layer, &format!("{}", tick), 7.0, x as f32, GAUGE_CY - 5.0, font_r);
    }

    // Risk badge
    let (bg, fg) = match prediction.risk_class {
        RiskClass::High => (HIGH_BG, HIGH_FG),
        RiskClass::Low => (LOW_BG, LOW_FG),
    };
    let badge_w = 90.0f32;
    let badge_h = 10.0f32;
    let badge_x = GAUGE_CX - badge_w / 2.0;
    let badge_y = 128.0f32;
    fill_rounded_rect(layer, badge_x, badge_y, badge_w, badge_h, R_BADGE, bg);
    set_color(layer, fg);
    centered_text(
        layer,
        &format!("ATTRITION RISK: {} ({})", prediction.risk_class, prediction.display_percentage()),
        10.0, GAUGE_CX, badge_y + 3.4, font_b,
    );

    set_color(layer, TEXT_PRI);
    layer.use_text("Recommendation:", 9.0, Mm(MARGIN), Mm(119.0), font_b);
    set_color(layer, TEXT_SEC);
    for (i, line) in wrap_text(prediction.message, REC_WRAP).iter().enumerate() {
        layer.use_text(line.as_str(), 9.0, Mm(MARGIN + 29.0), Mm(119.0 - i as f32 * 4.6), font_r);
    }
}

fn draw_profile(
    layer: &PdfLayerReference,
    assessment: &Assessment<'_>,
    font_r: &IndirectFontRef,
    font_b: &IndirectFontRef,
) {
    draw_line(layer, (MARGIN, TABLES_TOP), (PAGE_W - MARGIN, TABLES_TOP), PANEL_BORDER, 0.3);
    set_color(layer, TEXT_MUT);
    layer.use_text("PROFILE SUMMARY", 6.5, Mm(MARGIN), Mm(TABLES_TOP - 7.0), font_b);

    let rows = profile_summary(assessment.record);
    let col_w = COL_SPLIT - MARGIN - 4.0;
    let first_y = TABLES_TOP - 14.0;

    for (i, (metric, value)) in rows.iter().enumerate() {
        let row_y = first_y - i as f32 * PROFILE_ROW_H;
        if i % 2 == 0 {
            fill_rect(layer, MARGIN, row_y - 1.8, col_w, PROFILE_ROW_H, PANEL_ALT);
        }
        set_color(layer, TEXT_SEC);
        layer.use_text(*metric, 8.0, Mm(MARGIN + 2.0), Mm(row_y), font_r);
        set_color(layer, TEXT_PRI);
        layer.use_text(truncate(value, 28), 8.0, Mm(MARGIN + 30.0), Mm(row_y), font_b);
    }

    // Methodology note panel
    let note_lines = wrap_text(METHODOLOGY_NOTE, NOTE_WRAP);
    let note_h = 8.0 + note_lines.len() as f32 * 3.8;
    let note_top = first_y - rows.len() as f32 * PROFILE_ROW_H - 4.0;
    let note_y = note_top - note_h;
    fill_rounded_rect(layer, MARGIN, note_y, col_w, note_h, R_PANEL, PANEL);
    stroke_rounded_rect(layer, MARGIN, note_y, col_w, note_h, R_PANEL, PANEL_BORDER);
    set_color(layer, TEXT_PRI);
    layer.use_text("Note on Methodology", 7.5, Mm(MARGIN + 3.0), Mm(note_top - 4.5), font_b);
    set_color(layer, TEXT_SEC);
    for (i, line) in note_lines.iter().enumerate() {
        layer.use_text(
            line.as_str(), 7.0, Mm(MARGIN + 3.0), Mm(note_top - 8.5 - i as f32 * 3.8), font_r,
        );
    }
}

fn draw_features(
    layer: &PdfLayerReference,
    assessment: &Assessment<'_>,
    font_r: &IndirectFontRef,
    font_b: &IndirectFontRef,
) {
    let x = COL_SPLIT + 2.0;
    let w = PAGE_W - MARGIN - x;
    set_color(layer, TEXT_MUT);
    layer.use_text("MODEL INPUT", 6.5, Mm(x), Mm(TABLES_TOP - 7.0), font_b);

    let first_y = TABLES_TOP - 14.0;
    for (i, (name, value)) in assessment.features.iter().enumerate() {
        let row_y = first_y - i as f32 * FEATURE_ROW_H;
        if i % 2 == 0 {
            fill_rect(layer, x, row_y - 1.2, w, FEATURE_ROW_H, PANEL_ALT);
        }
        let (name_color, value_font) = if value != 0.0 {
            (TEXT_PRI, font_b)
        } else {
            (TEXT_MUT, font_r)
        };
        set_color(layer, name_color);
        layer.use_text(truncate(name, 34), 7.0, Mm(x + 2.0), Mm(row_y), font_r);
        layer.use_text(format!("{}", value), 7.0, Mm(x + w - 10.0), Mm(row_y), value_font);
    }
}

// ── Drawing helpers ───────────────────────────────────────────────────────────

fn rgb8((r, g, b): Rgb8) -> (f32, f32, f32) {
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

fn set_color(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
             color: (f32, f32, f32)) {
    fill_polygon(layer, vec![(x, y), (x + w, y), (x + w, y + h), (x, y + h)], color);
}

fn fill_polygon(layer: &PdfLayerReference, points: Vec<(f32, f32)>,
                (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
    layer.add_polygon(Polygon {
        rings: vec![points
            .into_iter()
            .map(|(x, y)| (Point::new(Mm(x), Mm(y)), false))
            .collect()],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
}

fn fill_ring(layer: &PdfLayerReference, points: &[(f64, f64)], color: (f32, f32, f32)) {
    fill_polygon(layer, points.iter().map(|&(x, y)| (x as f32, y as f32)).collect(), color);
}

fn stroke_ring(layer: &PdfLayerReference, points: &[(f64, f64)],
               (r, g, b): (f32, f32, f32)) {
    layer.set_outline_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
    layer.set_outline_thickness(0.6);
    layer.add_line(Line {
        points: points
            .iter()
            .map(|&(x, y)| (Point::new(Mm(x as f32), Mm(y as f32)), false))
            .collect(),
        is_closed: true,
    });
    layer.set_outline_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
    layer.set_outline_thickness(1.0);
}

/// Clockwise polygon ring approximating a rounded rectangle,
/// 8 segments per quarter-circle corner.
fn rounded_rect_ring(x: f32, y: f32, w: f32, h: f32, r: f32) -> Vec<(Point, bool)> {
    let r = r.min(w / 2.0).min(h / 2.0);
    const SEGS: usize = 8;
    let mut pts = Vec::with_capacity(4 * (SEGS + 1));

    let corners = [
        (x + w - r, y + r,     270.0f32, 360.0f32),
        (x + w - r, y + h - r, 0.0f32,   90.0f32),
        (x + r,     y + h - r, 90.0f32,  180.0f32),
        (x + r,     y + r,     180.0f32, 270.0f32),
    ];

    for (cx, cy, start, end) in &corners {
        for i in 0..=SEGS {
            let t = i as f32 / SEGS as f32;
            let angle = (start + (end - start) * t).to_radians();
            pts.push((
                Point::new(Mm(cx + r * angle.cos()), Mm(cy + r * angle.sin())),
                false,
            ));
        }
    }
    pts
}

fn fill_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
                     r: f32, (cr, cg, cb): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb { r: cr, g: cg, b: cb, icc_profile: None }));
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
}

fn stroke_rounded_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32,
                       r: f32, (cr, cg, cb): (f32, f32, f32)) {
    layer.set_outline_color(Color::Rgb(Rgb { r: cr, g: cg, b: cb, icc_profile: None }));
    layer.set_outline_thickness(0.4);
    layer.add_polygon(Polygon {
        rings: vec![rounded_rect_ring(x, y, w, h, r)],
        mode: PaintMode::Stroke,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_outline_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
    layer.set_outline_thickness(1.0);
}

fn draw_line(layer: &PdfLayerReference, (x1, y1): (f32, f32), (x2, y2): (f32, f32),
             (r, g, b): (f32, f32, f32), thickness: f32) {
    layer.set_outline_color(Color::Rgb(Rgb { r, g, b, icc_profile: None }));
    layer.set_outline_thickness(thickness);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y2)), false),
        ],
        is_closed: false,
    });
    layer.set_outline_color(Color::Rgb(Rgb { r: 0.0, g: 0.0, b: 0.0, icc_profile: None }));
    layer.set_outline_thickness(1.0);
}

/// Fill a left-to-right gradient rectangle using `steps` vertical strips.
#[allow(clippy::too_many_arguments)]
fn fill_gradient_h(
    layer: &PdfLayerReference,
    x: f32, y: f32, w: f32, h: f32,
    from: (f32, f32, f32),
    to: (f32, f32, f32),
    steps: usize,
) {
    let step_w = w / steps as f32;
    for i in 0..steps {
        let t = i as f32 / (steps - 1).max(1) as f32;
        let color = (
            from.0 + (to.0 - from.0) * t,
            from.1 + (to.1 - from.1) * t,
            from.2 + (to.2 - from.2) * t,
        );
        // Overlap strips slightly to prevent rounding gaps
        fill_rect(layer, x + i as f32 * step_w, y, step_w + 0.6, h, color);
    }
}

// ── Text helpers ──────────────────────────────────────────────────────────────

/// Helvetica averages roughly half an em per glyph; 1 pt = 0.3528 mm.
fn approx_text_width(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * 0.5 * 0.3528
}

fn centered_text(layer: &PdfLayerReference, text: &str, size_pt: f32, cx: f32, y: f32,
                 font: &IndirectFontRef) {
    let x = cx - approx_text_width(text, size_pt) / 2.0;
    layer.use_text(text, size_pt, Mm(x), Mm(y), font);
}

fn truncate(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max {
        format!("{}…", chars[..max - 1].iter().collect::<String>())
    } else {
        s.to_string()
    }
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.len() <= max_chars {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ── Date helper ───────────────────────────────────────────────────────────────

/// Today's UTC date as `YYYY-MM-DD`.
fn today() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let (y, m, d) = civil_from_days((secs / 86_400) as i64);
    format!("{:04}-{:02}-{:02}", y, m, d)
}

/// Days since 1970-01-01 to a proleptic Gregorian date.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let y = yoe + era * 400 + i64::from(m <= 2);
    (y, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::encode;
    use crate::models::InputRecord;
    use crate::predict::{Prediction, HIGH_RISK_MESSAGE};

    #[test]
    fn test_civil_from_days() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_days(20_745), (2026, 10, 19));
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("Initiate retention interview immediately.", 20);
        assert_eq!(lines, vec!["Initiate retention", "interview", "immediately."]);
        assert_eq!(wrap_text("short", 20), vec!["short"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Research & Development", 10), "Research …");
        assert_eq!(truncate("Sales", 10), "Sales");
    }

    #[test]
    fn test_render_writes_pdf() {
        let record = InputRecord::default();
        let prediction = Prediction {
            probability: 0.73,
            risk_class: RiskClass::High,
            message: HIGH_RISK_MESSAGE,
            features: encode(&record),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        let mut status = Vec::new();
        render(&Assessment::new("stub", &record, &prediction), &path, &mut status).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(String::from_utf8(status).unwrap().starts_with("PDF report written to:"));
    }
}
