//! Style Module
//!
//! スタイル記述子の解決（色の正規化、警告の重複排除、フォントの合成）と、
//! rust_xlsxwriterの書式への変換を提供します。

mod color;
mod format;
mod resolver;

pub use color::{normalize_color, ArgbColor};
pub(crate) use resolver::{ResolvedStyle, StyleResolver, StyleWarnings};
