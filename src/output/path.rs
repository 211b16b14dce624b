//! 出力パスの導出

use std::path::{Path, PathBuf};

/// 入力パスから出力パスを導出する
///
/// 拡張子`.md`/`.markdown`（大文字小文字を区別しない）を`.xlsx`に置き換えます。
/// それ以外の拡張子の場合は**入力パスをそのまま返す**ため、呼び出し側は
/// 変換元を上書きしないよう注意する必要があります（`Converter::convert_file`は
/// デフォルトでこの上書きを拒否します）。
///
/// # 使用例
///
/// ```rust
/// use md2xlsx::derive_output_path;
/// use std::path::Path;
///
/// assert_eq!(derive_output_path("report.md"), Path::new("report.xlsx"));
/// assert_eq!(derive_output_path("notes.txt"), Path::new("notes.txt"));
/// ```
pub fn derive_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    match input.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown") => {
            input.with_extension("xlsx")
        }
        _ => input.to_path_buf(),
    }
}
