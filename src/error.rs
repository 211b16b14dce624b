//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。
//!
//! 変換を中断する致命的なエラー（[`MdToXlsxError`]）と、ログに記録して
//! 処理を継続するスタイル警告（[`StyleWarning`]）を明確に分離している。

use thiserror::Error;

/// md2xlsxクレート全体で使用するエラー型
///
/// ドキュメントの読み込み、シート構築、Excelファイルの書き出し中に発生する
/// すべての致命的エラーを統一的に扱うために使用されます。
/// 色の検証失敗のみが回復可能であり、それらは[`StyleWarning`]として扱われます。
///
/// # 使用例
///
/// ```rust,no_run
/// use md2xlsx::{ConverterBuilder, MdToXlsxError};
///
/// # fn main() -> Result<(), MdToXlsxError> {
/// let converter = ConverterBuilder::new().build()?;
/// match converter.convert_file("report.md") {
///     Ok(report) => println!("{} cells written", report.cells_written()),
///     Err(MdToXlsxError::MissingJsonArray) => eprintln!("JSON配列が見つかりません"),
///     Err(e) => return Err(e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum MdToXlsxError {
    /// I/O操作中に発生したエラー
    ///
    /// 入力ファイルの読み込み失敗、出力ファイルの書き込み失敗など。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ドキュメント内にJSON配列（最初の`[`から最後の`]`まで）が見つからない
    #[error("No JSON array found in document")]
    MissingJsonArray,

    /// JSON配列の解析に失敗したエラー
    ///
    /// 構文エラーのほか、ドキュメントモデルに適合しない値（例: `style`が整数でない）も含みます。
    #[error("Failed to parse document JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// ドキュメントにシートが1つも含まれていない
    #[error("Document contains no sheets")]
    EmptyDocument,

    /// 行キーまたは列キーが非負整数として解釈できない
    #[error("Invalid {axis} key '{key}' in sheet '{sheet}'")]
    InvalidIndexKey {
        /// シート名
        sheet: String,
        /// `"row"` または `"column"`
        axis: &'static str,
        /// 元のキー文字列
        key: String,
    },

    /// セル座標がExcelの上限を超えている
    #[error("Cell (row {row}, column {col}) in sheet '{sheet}' exceeds worksheet limits")]
    CellOutOfRange {
        /// シート名
        sheet: String,
        /// 行インデックス（0始まり）
        row: u64,
        /// 列インデックス（0始まり）
        col: u64,
    },

    /// 行データまたはセルデータがドキュメントモデルに適合しない
    #[error("Malformed entry at sheet '{sheet}', {location}: {source}")]
    MalformedEntry {
        /// シート名
        sheet: String,
        /// 位置の説明（例: `row '3'`）
        location: String,
        /// デコードエラー
        source: serde_json::Error,
    },

    /// セルの値として書き込めないJSON値（配列・オブジェクト）
    #[error("Unsupported cell value at sheet '{sheet}', cell {cell}")]
    UnsupportedCellValue {
        /// シート名
        sheet: String,
        /// セル座標（A1記法）
        cell: String,
    },

    /// スタイルインデックスがシートの`styles`の範囲外
    ///
    /// `-1`は「スタイルなし」を表すため、このエラーにはなりません。
    #[error(
        "Style index {index} out of range at sheet '{sheet}', cell {cell} ({len} styles defined)"
    )]
    StyleIndexOutOfRange {
        /// シート名
        sheet: String,
        /// セル座標（A1記法）
        cell: String,
        /// 指定されたインデックス
        index: i64,
        /// 定義済みスタイル数
        len: usize,
    },

    /// スタイル記述子の解決に失敗した致命的エラー
    #[error("Invalid style at sheet '{sheet}', cell {cell}: {source}")]
    Style {
        /// シート名
        sheet: String,
        /// セル座標（A1記法）
        cell: String,
        /// 原因
        source: StyleError,
    },

    /// rust_xlsxwriterがワークブックの構築・保存を拒否したエラー
    ///
    /// 不正なシート名、重複したシート名、文字列長の上限超過などが原因となります。
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力サイズの上限超過や、入力ファイル自身への上書きなど。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

/// スタイル記述子の致命的な不整合
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// 背景色が有効なaRGB値でない
    #[error("Invalid fill color '{0}'")]
    InvalidFillColor(String),

    /// 未知の罫線位置
    #[error("Unknown border side '{0}'")]
    UnknownBorderSide(String),

    /// 罫線定義が`[線種, 色]`の形式でない
    #[error("Malformed border definition for side '{0}'")]
    MalformedBorder(String),
}

/// 回復可能なスタイル警告
///
/// 該当する書式要素のみをスキップし、変換は継続されます。
/// 同一の値に対する警告は1回の変換につき1度だけ記録されます。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleWarning {
    /// フォント色が不正（フォント全体が適用されない）
    #[error("Invalid font color '{0}'.")]
    InvalidFontColor(String),

    /// 罫線色が不正（その辺のみスキップ）
    #[error("Invalid border color '{0}'.")]
    InvalidBorderColor(String),

    /// 罫線の線種が不正（その辺のみスキップ）
    #[error("Invalid border style '{0}'.")]
    InvalidBorderStyle(String),
}

impl StyleWarning {
    /// 重複排除に使用するキー（失敗した値そのもの）
    pub fn value(&self) -> &str {
        match self {
            StyleWarning::InvalidFontColor(v)
            | StyleWarning::InvalidBorderColor(v)
            | StyleWarning::InvalidBorderStyle(v) => v,
        }
    }
}
