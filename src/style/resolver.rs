//! Style Resolver
//!
//! 緩く型付けされたスタイル記述子（[`StyleSpec`]）を、検証済みの
//! [`ResolvedStyle`]へ変換する。
//!
//! 適用順序はフォント属性 → フォント色 → 背景色 → 罫線 → 下線 → 取り消し線。
//! 色の検証失敗は[`StyleWarnings`]に記録して該当要素のみスキップし、
//! それ以外の不整合は[`StyleError`]として呼び出し元に返す。

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::api::{FontMode, WarningSink};
use crate::error::{StyleError, StyleWarning};
use crate::style::color::{normalize_color, ArgbColor};
use crate::types::StyleSpec;

/// 変換1回分の警告コンテキスト
///
/// 同じ値に対する警告は1度だけ記録されます。フォント色と罫線色は同じキー空間を共有します。
/// プロセス全体で共有されることはなく、変換ごとに新しく生成されます。
#[derive(Debug, Default)]
pub(crate) struct StyleWarnings {
    seen: HashSet<String>,
    emitted: Vec<StyleWarning>,
    sink: Option<WarningSink>,
}

impl StyleWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初出の警告を記録時に通知先へ渡すコンテキストを生成する
    pub fn with_sink(sink: Option<WarningSink>) -> Self {
        Self {
            sink,
            ..Self::default()
        }
    }

    /// 警告を記録する（初出の値のみ）
    ///
    /// 新しく記録された場合は`true`を返します。
    pub fn record(&mut self, warning: StyleWarning) -> bool {
        if !self.seen.insert(warning.value().to_string()) {
            return false;
        }
        log::warn!("{}", warning);
        if let Some(sink) = &self.sink {
            sink.notify(&warning);
        }
        self.emitted.push(warning);
        true
    }

    pub fn len(&self) -> usize {
        self.emitted.len()
    }

    pub fn into_vec(self) -> Vec<StyleWarning> {
        self.emitted
    }
}

/// 解決済みのフォント
///
/// `None`の属性は書式のデフォルト値になります。
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FontStyle {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub size: Option<f64>,
    pub name: Option<String>,
    pub color: Option<ArgbColor>,
    pub underline: bool,
    pub strike: Option<bool>,
}

/// 罫線の線種
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineStyle {
    Thin,
    Medium,
    Thick,
    Double,
    Hair,
    Dashed,
    Dotted,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

impl LineStyle {
    /// SpreadsheetMLの線種名から変換（大文字小文字を区別）
    fn from_name(name: &str) -> Option<Self> {
        let style = match name {
            "thin" => LineStyle::Thin,
            "medium" => LineStyle::Medium,
            "thick" => LineStyle::Thick,
            "double" => LineStyle::Double,
            "hair" => LineStyle::Hair,
            "dashed" => LineStyle::Dashed,
            "dotted" => LineStyle::Dotted,
            "mediumDashed" => LineStyle::MediumDashed,
            "dashDot" => LineStyle::DashDot,
            "mediumDashDot" => LineStyle::MediumDashDot,
            "dashDotDot" => LineStyle::DashDotDot,
            "mediumDashDotDot" => LineStyle::MediumDashDotDot,
            "slantDashDot" => LineStyle::SlantDashDot,
            _ => return None,
        };
        Some(style)
    }
}

/// 罫線の辺
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BorderEdge {
    Left,
    Right,
    Top,
    Bottom,
    Diagonal,
}

/// 1辺分の罫線（線種`None`は線なし）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BorderLine {
    pub style: Option<LineStyle>,
    pub color: Option<ArgbColor>,
}

/// 正常に構築できた辺の集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BorderStyle {
    pub sides: Vec<(BorderEdge, BorderLine)>,
}

/// セル1つ分の解決済みスタイル
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ResolvedStyle {
    pub font: Option<FontStyle>,
    pub fill: Option<ArgbColor>,
    pub border: Option<BorderStyle>,
}

/// スタイル記述子の解決器
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StyleResolver {
    font_mode: FontMode,
}

impl StyleResolver {
    pub fn new(font_mode: FontMode) -> Self {
        Self { font_mode }
    }

    /// スタイル記述子を解決する
    ///
    /// # 戻り値
    ///
    /// * `Ok(None)` - 記述子が存在しない、または空の場合
    /// * `Ok(Some(ResolvedStyle))` - 解決に成功した場合（一部の要素は警告付きでスキップされ得る）
    /// * `Err(StyleError)` - 背景色が不正、罫線定義が不正な場合
    pub fn resolve(
        &self,
        spec: Option<&StyleSpec>,
        warnings: &mut StyleWarnings,
    ) -> Result<Option<ResolvedStyle>, StyleError> {
        let spec = match spec {
            Some(spec) if !spec.is_empty() => spec,
            _ => return Ok(None),
        };

        let mut font = self.resolve_font(spec, warnings);

        let fill = spec.bgcolor.as_deref().map(resolve_fill).transpose()?;

        let border = spec
            .border
            .as_ref()
            .map(|sides| resolve_border(sides, warnings))
            .transpose()?;

        match self.font_mode {
            // 下線・取り消し線はフォント全体を置き換える
            FontMode::LastWins => {
                if spec.underline == Some(true) {
                    font = Some(FontStyle {
                        underline: true,
                        ..FontStyle::default()
                    });
                }
                if let Some(strike) = spec.strike {
                    font = Some(FontStyle {
                        strike: Some(strike),
                        ..FontStyle::default()
                    });
                }
            }
            FontMode::Merge => {
                if spec.underline == Some(true) {
                    font.get_or_insert_with(FontStyle::default).underline = true;
                }
                if let Some(strike) = spec.strike {
                    font.get_or_insert_with(FontStyle::default).strike = Some(strike);
                }
            }
        }

        Ok(Some(ResolvedStyle { font, fill, border }))
    }

    /// フォント属性とフォント色からフォントを構築する
    fn resolve_font(&self, spec: &StyleSpec, warnings: &mut StyleWarnings) -> Option<FontStyle> {
        let mut font = FontStyle::default();
        let mut present = false;

        if let Some(attrs) = &spec.font {
            font.italic = attrs.italic;
            font.bold = attrs.bold;
            font.size = attrs.size;
            font.name = attrs.name.clone();
            present = attrs.italic.is_some()
                || attrs.bold.is_some()
                || attrs.size.is_some()
                || attrs.name.is_some();
        }

        if let Some(raw) = &spec.color {
            let normalized = normalize_color(raw);
            match ArgbColor::parse(&normalized) {
                Some(color) => {
                    font.color = Some(color);
                    present = true;
                }
                None => {
                    warnings.record(StyleWarning::InvalidFontColor(normalized.into_owned()));
                    if self.font_mode == FontMode::LastWins {
                        // フォントは色を含めて一括構築されるため、全体が適用されない
                        return None;
                    }
                }
            }
        }

        present.then_some(font)
    }
}

/// 背景色を解決する（不正な値は致命的）
fn resolve_fill(raw: &str) -> Result<ArgbColor, StyleError> {
    let normalized = normalize_color(raw);
    ArgbColor::parse(&normalized)
        .ok_or_else(|| StyleError::InvalidFillColor(normalized.into_owned()))
}

fn border_edge(side: &str) -> Result<Option<BorderEdge>, StyleError> {
    let edge = match side {
        "left" | "start" => BorderEdge::Left,
        "right" | "end" => BorderEdge::Right,
        "top" => BorderEdge::Top,
        "bottom" => BorderEdge::Bottom,
        "diagonal" => BorderEdge::Diagonal,
        // セル単位の書式では表現できない
        "vertical" | "horizontal" => return Ok(None),
        _ => return Err(StyleError::UnknownBorderSide(side.to_string())),
    };
    Ok(Some(edge))
}

/// 罫線を解決する
///
/// 各辺は`[線種, 色]`。色または線種が不正な辺は警告を記録してスキップする。
fn resolve_border(
    sides: &Map<String, Value>,
    warnings: &mut StyleWarnings,
) -> Result<BorderStyle, StyleError> {
    let mut border = BorderStyle::default();

    for (side, data) in sides {
        let edge = border_edge(side)?;

        let (style_value, color_value) = match data.as_array().map(Vec::as_slice) {
            Some([style, color, ..]) => (style, color),
            _ => return Err(StyleError::MalformedBorder(side.clone())),
        };
        let raw_color = color_value
            .as_str()
            .ok_or_else(|| StyleError::MalformedBorder(side.clone()))?;

        let style = match style_value {
            Value::Null => None,
            Value::String(name) if name == "none" => None,
            Value::String(name) => match LineStyle::from_name(name) {
                Some(style) => Some(style),
                None => {
                    warnings.record(StyleWarning::InvalidBorderStyle(name.clone()));
                    continue;
                }
            },
            _ => return Err(StyleError::MalformedBorder(side.clone())),
        };

        let normalized = normalize_color(raw_color);
        let color = match ArgbColor::parse(&normalized) {
            Some(color) => color,
            None => {
                warnings.record(StyleWarning::InvalidBorderColor(normalized.into_owned()));
                continue;
            }
        };

        match edge {
            Some(edge) => border.sides.push((
                edge,
                BorderLine {
                    style,
                    color: Some(color),
                },
            )),
            None => log::debug!("Ignoring border side '{}' on a single cell", side),
        }
    }

    Ok(border)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(value: Value) -> StyleSpec {
        serde_json::from_value(value).unwrap()
    }

    fn resolve(mode: FontMode, value: Value) -> (Option<ResolvedStyle>, Vec<StyleWarning>) {
        let mut warnings = StyleWarnings::new();
        let style = StyleResolver::new(mode)
            .resolve(Some(&spec(value)), &mut warnings)
            .unwrap();
        (style, warnings.into_vec())
    }

    fn color(hex: &str) -> ArgbColor {
        ArgbColor::parse(hex).unwrap()
    }

    #[test]
    fn test_absent_or_empty_style_is_noop() {
        let resolver = StyleResolver::default();
        let mut warnings = StyleWarnings::new();

        assert_eq!(resolver.resolve(None, &mut warnings).unwrap(), None);
        assert_eq!(
            resolver
                .resolve(Some(&StyleSpec::default()), &mut warnings)
                .unwrap(),
            None
        );
        assert_eq!(warnings.len(), 0);
    }

    #[test]
    fn test_font_attributes() {
        let (style, warnings) = resolve(
            FontMode::LastWins,
            json!({"font": {"bold": true, "italic": false, "size": 14, "name": "Arial"}}),
        );
        let font = style.unwrap().font.unwrap();

        assert_eq!(font.bold, Some(true));
        assert_eq!(font.italic, Some(false));
        assert_eq!(font.size, Some(14.0));
        assert_eq!(font.name.as_deref(), Some("Arial"));
        assert_eq!(font.color, None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_empty_font_object_sets_no_font() {
        let (style, _) = resolve(FontMode::LastWins, json!({"font": {}}));
        assert_eq!(style.unwrap().font, None);
    }

    #[test]
    fn test_font_color_normalized() {
        let (style, _) = resolve(FontMode::LastWins, json!({"color": "#0000FF"}));
        let font = style.unwrap().font.unwrap();
        assert_eq!(font.color, Some(color("FF0000FF")));
        assert_eq!(font.bold, None);
    }

    #[test]
    fn test_invalid_font_color_drops_font_and_warns() {
        let (style, warnings) = resolve(
            FontMode::LastWins,
            json!({"font": {"bold": true}, "color": "#GGGGGG", "bgcolor": "#FF0000"}),
        );
        let style = style.unwrap();

        assert_eq!(style.font, None);
        // 他の要素は継続して適用される
        assert_eq!(style.fill, Some(color("FFFF0000")));
        assert_eq!(
            warnings,
            vec![StyleWarning::InvalidFontColor("FFGGGGGG".to_string())]
        );
    }

    #[test]
    fn test_invalid_font_color_merge_keeps_other_attributes() {
        let (style, warnings) = resolve(
            FontMode::Merge,
            json!({"font": {"bold": true}, "color": "blue"}),
        );
        let font = style.unwrap().font.unwrap();

        assert_eq!(font.bold, Some(true));
        assert_eq!(font.color, None);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_fill() {
        let (style, _) = resolve(FontMode::LastWins, json!({"bgcolor": "#FF0000"}));
        let style = style.unwrap();
        assert_eq!(style.fill, Some(color("FFFF0000")));
        assert_eq!(style.font, None);
        assert_eq!(style.border, None);
    }

    #[test]
    fn test_invalid_fill_is_fatal() {
        let mut warnings = StyleWarnings::new();
        let result = StyleResolver::default()
            .resolve(Some(&spec(json!({"bgcolor": "yellow"}))), &mut warnings);
        assert_eq!(
            result,
            Err(StyleError::InvalidFillColor("yellow".to_string()))
        );
    }

    #[test]
    fn test_bold_lost_when_underline_present() {
        // フォント共有による上書き挙動の回帰テスト
        let (style, _) = resolve(
            FontMode::LastWins,
            json!({"font": {"bold": true}, "color": "#FF0000", "underline": true}),
        );
        let font = style.unwrap().font.unwrap();

        assert!(font.underline);
        assert_eq!(font.bold, None);
        assert_eq!(font.color, None);
    }

    #[test]
    fn test_strike_replaces_underline() {
        let (style, _) = resolve(FontMode::LastWins, json!({"underline": true, "strike": true}));
        let font = style.unwrap().font.unwrap();
        assert!(!font.underline);
        assert_eq!(font.strike, Some(true));
    }

    #[test]
    fn test_strike_false_still_replaces_font() {
        let (style, _) = resolve(
            FontMode::LastWins,
            json!({"font": {"italic": true}, "strike": false}),
        );
        let font = style.unwrap().font.unwrap();
        assert_eq!(font.italic, None);
        assert_eq!(font.strike, Some(false));
    }

    #[test]
    fn test_underline_false_is_ignored() {
        let (style, _) = resolve(
            FontMode::LastWins,
            json!({"font": {"bold": true}, "underline": false}),
        );
        let font = style.unwrap().font.unwrap();
        assert_eq!(font.bold, Some(true));
        assert!(!font.underline);
    }

    #[test]
    fn test_merge_mode_accumulates_font() {
        let (style, _) = resolve(
            FontMode::Merge,
            json!({
                "font": {"bold": true, "size": 9},
                "color": "#00FF00",
                "underline": true,
                "strike": true
            }),
        );
        let font = style.unwrap().font.unwrap();

        assert_eq!(font.bold, Some(true));
        assert_eq!(font.size, Some(9.0));
        assert_eq!(font.color, Some(color("FF00FF00")));
        assert!(font.underline);
        assert_eq!(font.strike, Some(true));
    }

    #[test]
    fn test_border_sides() {
        let (style, warnings) = resolve(
            FontMode::LastWins,
            json!({"border": {
                "top": ["thin", "#000000"],
                "bottom": ["double", "FF00FF00"],
                "left": [null, "#123456"]
            }}),
        );
        let border = style.unwrap().border.unwrap();

        assert_eq!(
            border.sides,
            vec![
                (
                    BorderEdge::Top,
                    BorderLine {
                        style: Some(LineStyle::Thin),
                        color: Some(color("FF000000")),
                    }
                ),
                (
                    BorderEdge::Bottom,
                    BorderLine {
                        style: Some(LineStyle::Double),
                        color: Some(color("FF00FF00")),
                    }
                ),
                (
                    BorderEdge::Left,
                    BorderLine {
                        style: None,
                        color: Some(color("FF123456")),
                    }
                ),
            ]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_invalid_border_color_skips_only_that_side() {
        let (style, warnings) = resolve(
            FontMode::LastWins,
            json!({"border": {
                "top": ["thin", "black"],
                "right": ["medium", "#FFFFFF"]
            }}),
        );
        let border = style.unwrap().border.unwrap();

        assert_eq!(border.sides.len(), 1);
        assert_eq!(border.sides[0].0, BorderEdge::Right);
        assert_eq!(
            warnings,
            vec![StyleWarning::InvalidBorderColor("black".to_string())]
        );
    }

    #[test]
    fn test_invalid_line_style_skips_side() {
        let (style, warnings) = resolve(
            FontMode::LastWins,
            json!({"border": {"top": ["wavy", "#000000"]}}),
        );
        assert!(style.unwrap().border.unwrap().sides.is_empty());
        assert_eq!(
            warnings,
            vec![StyleWarning::InvalidBorderStyle("wavy".to_string())]
        );
    }

    #[test]
    fn test_line_style_names_are_case_sensitive() {
        assert_eq!(LineStyle::from_name("mediumDashDot"), Some(LineStyle::MediumDashDot));
        assert_eq!(LineStyle::from_name("MediumDashDot"), None);
    }

    #[test]
    fn test_border_unrepresentable_sides_ignored() {
        let (style, warnings) = resolve(
            FontMode::LastWins,
            json!({"border": {"vertical": ["thin", "#000000"], "end": ["thin", "#000000"]}}),
        );
        let border = style.unwrap().border.unwrap();
        assert_eq!(border.sides.len(), 1);
        assert_eq!(border.sides[0].0, BorderEdge::Right);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_border_unknown_side_is_fatal() {
        let mut warnings = StyleWarnings::new();
        let result = StyleResolver::default().resolve(
            Some(&spec(json!({"border": {"middle": ["thin", "#000000"]}}))),
            &mut warnings,
        );
        assert_eq!(result, Err(StyleError::UnknownBorderSide("middle".to_string())));
    }

    #[test]
    fn test_border_malformed_entry_is_fatal() {
        let resolver = StyleResolver::default();
        for data in [json!(["thin"]), json!("thin"), json!([1, "#000000"]), json!(["thin", 0])] {
            let mut warnings = StyleWarnings::new();
            let result = resolver.resolve(
                Some(&spec(json!({"border": {"top": data}}))),
                &mut warnings,
            );
            assert_eq!(result, Err(StyleError::MalformedBorder("top".to_string())));
        }
    }

    #[test]
    fn test_warnings_deduplicated_across_font_and_border() {
        let resolver = StyleResolver::default();
        let mut warnings = StyleWarnings::new();
        let bad = spec(json!({"color": "FFXXXXXX", "border": {"top": ["thin", "FFXXXXXX"]}}));

        for _ in 0..3 {
            resolver.resolve(Some(&bad), &mut warnings).unwrap();
        }

        assert_eq!(
            warnings.into_vec(),
            vec![StyleWarning::InvalidFontColor("FFXXXXXX".to_string())]
        );
    }

    #[test]
    fn test_record_returns_first_occurrence() {
        let mut warnings = StyleWarnings::new();
        assert!(warnings.record(StyleWarning::InvalidFontColor("a".to_string())));
        assert!(!warnings.record(StyleWarning::InvalidFontColor("a".to_string())));
        assert!(warnings.record(StyleWarning::InvalidBorderColor("b".to_string())));
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_sink_notified_once_per_value() {
        use std::sync::{Arc, Mutex};

        let received = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&received);
        let sink = WarningSink::new(move |w: &StyleWarning| {
            captured.lock().unwrap().push(w.to_string());
        });

        let mut warnings = StyleWarnings::with_sink(Some(sink));
        warnings.record(StyleWarning::InvalidFontColor("FFGGGGGG".to_string()));
        warnings.record(StyleWarning::InvalidFontColor("FFGGGGGG".to_string()));
        warnings.record(StyleWarning::InvalidBorderColor("FFGGGGGG".to_string()));

        assert_eq!(
            *received.lock().unwrap(),
            vec!["Invalid font color 'FFGGGGGG'.".to_string()]
        );
    }
}
