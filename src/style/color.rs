//! 色の正規化と検証
//!
//! ドキュメントの色は通常`#RRGGBB`形式で記述されるが、xlsxはアルファ付きの
//! `AARRGGBB`形式を要求する。

use std::borrow::Cow;
use std::fmt;

/// `#RRGGBB`を`FFRRGGBB`に変換する
///
/// 7文字かつ`#`で始まる文字列のみを変換し、それ以外はそのまま返します。
/// 16進数かどうかはここでは検証しません（[`ArgbColor::parse`]で検証）。
///
/// # 使用例
///
/// ```rust
/// use md2xlsx::normalize_color;
///
/// assert_eq!(normalize_color("#FF0000"), "FFFF0000");
/// assert_eq!(normalize_color("FFFF0000"), "FFFF0000");
/// assert_eq!(normalize_color("red"), "red");
/// ```
pub fn normalize_color(raw: &str) -> Cow<'_, str> {
    match raw.strip_prefix('#') {
        Some(hex) if raw.chars().count() == 7 => Cow::Owned(format!("FF{}", hex)),
        _ => Cow::Borrowed(raw),
    }
}

/// aRGB形式の色（`0xAARRGGBB`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgbColor(u32);

impl ArgbColor {
    /// 6桁または8桁の16進文字列を解析する
    ///
    /// 6桁の場合はアルファ`00`として扱います。`#`付きの文字列や色名は受け付けません。
    pub fn parse(value: &str) -> Option<Self> {
        let len = value.len();
        if (len != 6 && len != 8) || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(value, 16).ok().map(ArgbColor)
    }

    /// `0xAARRGGBB`
    pub fn argb(self) -> u32 {
        self.0
    }

    /// `0xRRGGBB`（アルファを除く）
    pub fn rgb(self) -> u32 {
        self.0 & 0x00FF_FFFF
    }
}

impl fmt::Display for ArgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl From<ArgbColor> for rust_xlsxwriter::Color {
    fn from(color: ArgbColor) -> Self {
        rust_xlsxwriter::Color::RGB(color.rgb())
    }
}
