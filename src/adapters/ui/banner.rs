//! Startup banner: EQUILIBRIO in figlet's standard font, shaded left to right.

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{self, Write, stdout};

const TITLE: &str = "EQUILIBRIO";
/// Column shading runs from the first stop to the last.
const STOPS: [Color; 3] = [
    Color::Rgb { r: 0x00, g: 0x79, b: 0x6b },
    Color::Rgb { r: 0x4d, g: 0xb6, b: 0xac },
    Color::Rgb { r: 0xff, g: 0xc1, b: 0x07 },
];

/// Stop for column `col` of a `width`-wide figure; stops cover equal bands.
fn shade(col: usize, width: usize) -> Color {
    let band = (col * STOPS.len()) / width.max(1);
    STOPS[band.min(STOPS.len() - 1)]
}

/// Plain title when the figlet font cannot render.
fn render_title() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|figure| figure.to_string()))
        .unwrap_or_else(|| TITLE.to_string())
}

fn write_banner(out: &mut impl Write) -> io::Result<()> {
    let art = render_title();
    let width = art.lines().map(|l| l.chars().count()).max().unwrap_or(0);

    for line in art.lines() {
        for (col, ch) in line.chars().enumerate() {
            queue!(out, SetForegroundColor(shade(col, width)), Print(ch))?;
        }
        queue!(out, ResetColor, Print("\r\n"))?;
    }
    queue!(
        out,
        SetForegroundColor(STOPS[STOPS.len() - 1]),
        Print(format!("v{}  income, expenses, balance\r\n", env!("CARGO_PKG_VERSION"))),
        ResetColor
    )?;
    out.flush()
}

/// Prints the banner to stdout. A terminal that rejects the escape codes only loses the banner.
pub fn print_welcome() {
    let _ = write_banner(&mut stdout());
}
