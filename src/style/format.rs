//! 解決済みスタイルからrust_xlsxwriterの`Format`への変換

use rust_xlsxwriter::{Format, FormatBorder, FormatPattern, FormatUnderline};

use crate::style::resolver::{BorderEdge, BorderLine, FontStyle, LineStyle, ResolvedStyle};

impl From<LineStyle> for FormatBorder {
    fn from(style: LineStyle) -> Self {
        match style {
            LineStyle::Thin => FormatBorder::Thin,
            LineStyle::Medium => FormatBorder::Medium,
            LineStyle::Thick => FormatBorder::Thick,
            LineStyle::Double => FormatBorder::Double,
            LineStyle::Hair => FormatBorder::Hair,
            LineStyle::Dashed => FormatBorder::Dashed,
            LineStyle::Dotted => FormatBorder::Dotted,
            LineStyle::MediumDashed => FormatBorder::MediumDashed,
            LineStyle::DashDot => FormatBorder::DashDot,
            LineStyle::MediumDashDot => FormatBorder::MediumDashDot,
            LineStyle::DashDotDot => FormatBorder::DashDotDot,
            LineStyle::MediumDashDotDot => FormatBorder::MediumDashDotDot,
            LineStyle::SlantDashDot => FormatBorder::SlantDashDot,
        }
    }
}

impl ResolvedStyle {
    /// セルに適用する`Format`を生成する
    pub(crate) fn to_format(&self) -> Format {
        let mut format = Format::new();

        if let Some(font) = &self.font {
            format = apply_font(format, font);
        }

        // 単色塗りつぶし（開始色 = 終了色）
        if let Some(fill) = self.fill {
            format = format
                .set_pattern(FormatPattern::Solid)
                .set_background_color(fill)
                .set_foreground_color(fill);
        }

        if let Some(border) = &self.border {
            for (edge, line) in &border.sides {
                format = apply_border(format, *edge, line);
            }
        }

        format
    }
}

fn apply_font(mut format: Format, font: &FontStyle) -> Format {
    if font.bold == Some(true) {
        format = format.set_bold();
    }
    if font.italic == Some(true) {
        format = format.set_italic();
    }
    if let Some(size) = font.size {
        format = format.set_font_size(size);
    }
    if let Some(name) = &font.name {
        format = format.set_font_name(name);
    }
    if let Some(color) = font.color {
        format = format.set_font_color(color);
    }
    if font.underline {
        format = format.set_underline(FormatUnderline::Single);
    }
    if font.strike == Some(true) {
        format = format.set_font_strikethrough();
    }
    format
}

fn apply_border(format: Format, edge: BorderEdge, line: &BorderLine) -> Format {
    let style = line.style.map_or(FormatBorder::None, FormatBorder::from);

    let format = match edge {
        BorderEdge::Left => format.set_border_left(style),
        BorderEdge::Right => format.set_border_right(style),
        BorderEdge::Top => format.set_border_top(style),
        BorderEdge::Bottom => format.set_border_bottom(style),
        BorderEdge::Diagonal => format.set_border_diagonal(style),
    };

    match (edge, line.color) {
        (_, None) => format,
        (BorderEdge::Left, Some(color)) => format.set_border_left_color(color),
        (BorderEdge::Right, Some(color)) => format.set_border_right_color(color),
        (BorderEdge::Top, Some(color)) => format.set_border_top_color(color),
        (BorderEdge::Bottom, Some(color)) => format.set_border_bottom_color(color),
        (BorderEdge::Diagonal, Some(color)) => format.set_border_diagonal_color(color),
    }
}
