//! Rendering of a `ColorReport` for the terminal.

use crate::core_modules::pixel::pixel::to_hex_prefixed;
use crate::pipeline::ColorReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `R G B`
    #[default]
    Rgb,
    /// `RRGGBB`
    Hex,
    /// `H S V`
    Hsv,
    /// Human-readable sentence with all three forms.
    Verbose,
}

impl OutputFormat {
    /// Resolves the format switches; the first one set wins, in this order.
    pub fn from_flags(rgb: bool, hex: bool, hsv: bool, verbose: bool) -> Self {
        if rgb {
            OutputFormat::Rgb
        } else if hex {
            OutputFormat::Hex
        } else if hsv {
            OutputFormat::Hsv
        } else if verbose {
            OutputFormat::Verbose
        } else {
            OutputFormat::default()
        }
    }
}

pub fn render(report: &ColorReport, format: OutputFormat) -> String {
    let color = report.color;
    match format {
        OutputFormat::Rgb => format!("{} {} {}", color.red, color.green, color.blue),
        OutputFormat::Hex => color.to_hex(),
        OutputFormat::Hsv => {
            let hsv = report.hsv();
            format!("{} {} {}", hsv.hue, hsv.saturation, hsv.value)
        }
        OutputFormat::Verbose => render_verbose(report),
    }
}

fn render_verbose(report: &ColorReport) -> String {
    let color = report.color;
    let summary = format!(
        "{} (RGB) / {} (Hex) / {} (HSV)",
        color,
        to_hex_prefixed(color),
        report.hsv()
    );

    if report.brightened {
        let original = report.aggregate;
        format!(
            "The \"Brightened\" {} color across all images is: {}\nOriginal color (RGB): {} / (Hex): {} / (HSV): {}",
            report.reduction,
            summary,
            original,
            to_hex_prefixed(original),
            report.aggregate_hsv()
        )
    } else {
        format!("The {} color across all images is: {}", report.reduction, summary)
    }
}
