use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use super::gauge::{self, Rgb8, BANDS};
use super::{profile_summary, Assessment, METHODOLOGY_NOTE};
use crate::features::FEATURE_LAYOUT;
use crate::models::RiskClass;

const GAUGE_WIDTH: usize = 50;

/// Render a colored terminal report.
pub fn render(assessment: &Assessment<'_>, verbose: bool, quiet: bool) -> Result<()> {
    let prediction = assessment.prediction;
    let pct = prediction.display_percentage();

    if quiet {
        let risk = match prediction.risk_class {
            RiskClass::High => prediction.risk_class.to_string().red(),
            RiskClass::Low => prediction.risk_class.to_string().green(),
        };
        println!("Risk: {}  Probability: {}", risk, pct);
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "hr-attrition".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Model: {}\n", assessment.model);

    // Result banner
    let banner = format!("ATTRITION RISK: {} ({})", prediction.risk_class, pct);
    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<49} │", "RESULT");
    println!(" │  {:<49} │", banner);
    println!(" └────────────────────────────────────────────────────┘");
    let banner_tag = match prediction.risk_class {
        RiskClass::High => "[HIGH]".red().bold(),
        RiskClass::Low => "[LOW]".green().bold(),
    };
    println!(" {} {}\n", banner_tag, prediction.message);

    println!(" {}\n", gauge::TITLE.bold());
    for line in gauge_lines(prediction.percentage(), GAUGE_WIDTH) {
        println!(" {}", line);
    }
    println!("  {}\n", band_legend());

    println!(" {}\n", "Profile Summary".bold());
    render_profile(assessment);
    println!();
    println!(" {} {}\n", "Note on Methodology:".bold(), METHODOLOGY_NOTE);

    if verbose {
        println!(" {} Encoded model input:\n", "[MODEL INPUT]".cyan().bold());
        render_features(assessment);
        println!();
    }

    Ok(())
}

/// Marker row, bar row and scale row of the horizontal gauge.
fn gauge_lines(pct: f64, width: usize) -> [String; 3] {
    let filled = gauge::filled_cells(pct, width);
    let marker_col = filled.saturating_sub(1).min(width - 1);
    let (mr, mg, mb) = gauge::THRESHOLD_COLOR;

    let marker = format!(
        " {}{}",
        " ".repeat(marker_col),
        "▼".truecolor(mr, mg, mb)
    );

    let mut bar = String::from("[");
    for i in 0..width {
        let (r, g, b) = gauge::band_for(gauge::cell_midpoint(i, width)).color;
        let cell = if i < filled {
            let (br, bg, bb) = gauge::BAR_COLOR;
            "█".truecolor(br, bg, bb).on_truecolor(r, g, b)
        } else {
            "░".truecolor(r, g, b)
        };
        bar.push_str(&cell.to_string());
    }
    bar.push_str(&format!("] {:.1}%", pct));

    [marker, bar, scale_line(width)]
}

/// Tick labels at 0, 25, 50, 75 and 100 percent.
fn scale_line(width: usize) -> String {
    let mut line = vec![' '; width + 4];
    for tick in [0usize, 25, 50, 75, 100] {
        let label = tick.to_string();
        let col = (1 + tick * width / 100).min(line.len() - label.len());
        for (offset, ch) in label.chars().enumerate() {
            line[col + offset] = ch;
        }
    }
    line.into_iter().collect::<String>().trim_end().to_string()
}

fn render_profile(assessment: &Assessment<'_>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

    for (metric, value) in profile_summary(assessment.record) {
        table.add_row(vec![Cell::new(metric), Cell::new(value)]);
    }

    println!("{}", table);
}

fn render_features(assessment: &Assessment<'_>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Feature").add_attribute(Attribute::Bold),
            Cell::new("Block").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

    let values = assessment.features.as_slice();
    for (i, (column, value)) in FEATURE_LAYOUT.iter().zip(values).enumerate() {
        table.add_row(vec![
            Cell::new(i),
            Cell::new(column.name),
            Cell::new(column.rule.block().unwrap_or("-")),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}

/// `■ 0-50 low   ■ 50-75 elevated   ■ 75-100 critical`, each swatch in its band colour.
fn band_legend() -> String {
    BANDS
        .iter()
        .map(|b| {
            let (r, g, bl): Rgb8 = b.color;
            format!("{} {}-{} {}", "■".truecolor(r, g, bl), b.from, b.to, b.label)
        })
        .collect::<Vec<_>>()
        .join("   ")
}
