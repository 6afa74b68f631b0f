use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::gauge::{self, Rgb8, BANDS};
use crate::predict::Prediction;

const WIDTH: u32 = 600;
const HEIGHT: u32 = 340;
const CENTER: (i32, i32) = (300, 280);
const OUTER: f64 = 220.0;
const INNER: f64 = 140.0;
/// The value bar is a thinner ring in the middle of the band ring.
const BAR_INSET: f64 = 25.0;
const ARC_SEGMENTS: usize = 96;

/// Render the probability gauge to a PNG file. The status line goes to
/// `status`, never to the report stream.
pub fn render(prediction: &Prediction, output_path: &Path, status: &mut dyn Write) -> Result<()> {
    {
        let root = BitMapBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
        draw_gauge(&root, prediction.percentage())
            .map_err(|e| anyhow!("Failed to draw gauge to {}: {}", output_path.display(), e))?;
        root.present()
            .map_err(|e| anyhow!("Failed to write gauge to {}: {}", output_path.display(), e))?;
    }

    tracing::info!(path = %output_path.display(), "gauge written");
    writeln!(status, "Gauge written to: {}", output_path.display())?;
    Ok(())
}

fn draw_gauge<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    pct: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    for band in BANDS.iter() {
        let ring = gauge::ring_segment((0.0, 0.0), OUTER, INNER, band.from, band.to, ARC_SEGMENTS);
        root.draw(&Polygon::new(to_pixels(&ring), rgb(band.color).filled()))?;
    }

    if pct > 0.0 {
        let bar = gauge::ring_segment(
            (0.0, 0.0),
            OUTER - BAR_INSET,
            INNER + BAR_INSET,
            0.0,
            pct,
            ARC_SEGMENTS,
        );
        root.draw(&Polygon::new(to_pixels(&bar), rgb(gauge::BAR_COLOR).filled()))?;
    }

    let mut outline = to_pixels(&gauge::ring_segment((0.0, 0.0), OUTER, INNER, 0.0, 100.0, ARC_SEGMENTS));
    if let Some(&first) = outline.first() {
        outline.push(first);
    }
    root.draw(&PathElement::new(outline, rgb(gauge::BORDER_COLOR).stroke_width(2)))?;

    let marker = vec![
        to_pixel(gauge::point_at((0.0, 0.0), INNER - 6.0, pct)),
        to_pixel(gauge::point_at((0.0, 0.0), OUTER + 6.0, pct)),
    ];
    root.draw(&PathElement::new(marker, rgb(gauge::THRESHOLD_COLOR).stroke_width(4)))?;

    // Labels need a system font; the gauge stays readable without them.
    let labels = [
        (format!("{:.1}%", pct), (CENTER.0, CENTER.1 - 40), 40),
        (gauge::TITLE.to_string(), (CENTER.0, 24), 20),
    ];
    for (text, pos, size) in labels {
        let style = ("sans-serif", size)
            .into_font()
            .color(&rgb(gauge::BAR_COLOR))
            .pos(Pos::new(HPos::Center, VPos::Center));
        if let Err(e) = root.draw(&Text::new(text, pos, style)) {
            tracing::warn!(error = %e, "gauge label skipped");
        }
    }

    Ok(())
}

fn rgb((r, g, b): Rgb8) -> RGBColor {
    RGBColor(r, g, b)
}

/// Gauge coordinates are centred on the pivot with y up; pixels have y down.
fn to_pixel((x, y): (f64, f64)) -> (i32, i32) {
    (CENTER.0 + x.round() as i32, CENTER.1 - y.round() as i32)
}

fn to_pixels(points: &[(f64, f64)]) -> Vec<(i32, i32)> {
    points.iter().copied().map(to_pixel).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buf: &[u8], (x, y): (i32, i32)) -> Rgb8 {
        let i = (y as usize * WIDTH as usize + x as usize) * 3;
        (buf[i], buf[i + 1], buf[i + 2])
    }

    #[test]
    fn test_to_pixel_flips_y() {
        assert_eq!(to_pixel((0.0, 0.0)), CENTER);
        assert_eq!(to_pixel((10.0, 20.0)), (CENTER.0 + 10, CENTER.1 - 20));
    }

    #[test]
    fn test_bands_and_bar_land_where_expected() {
        let mut buf = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (WIDTH, HEIGHT)).into_drawing_area();
            draw_gauge(&root, 20.0).unwrap();
            root.present().unwrap();
        }

        let mid = (OUTER + INNER) / 2.0;
        let edge = INNER + 8.0;
        // Inside the value bar.
        assert_eq!(pixel(&buf, to_pixel(gauge::point_at((0.0, 0.0), mid, 10.0))), gauge::BAR_COLOR);
        // Band colour outside the bar.
        assert_eq!(pixel(&buf, to_pixel(gauge::point_at((0.0, 0.0), edge, 10.0))), BANDS[0].color);
        assert_eq!(pixel(&buf, to_pixel(gauge::point_at((0.0, 0.0), mid, 62.0))), BANDS[1].color);
        assert_eq!(pixel(&buf, to_pixel(gauge::point_at((0.0, 0.0), mid, 90.0))), BANDS[2].color);
        // Outside the ring.
        assert_eq!(pixel(&buf, (5, HEIGHT as i32 - 5)), (255, 255, 255));
    }
}
