//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! 入力ドキュメントのモデル（`Document` / `SheetSpec` / `StyleSpec` ...）と、
//! シート構築時に使用するセル座標・セル値を含みます。

use serde::Deserialize;
use serde_json::{Map, Value};

/// ワークシートの最大行数（1,048,576行）
pub(crate) const MAX_ROWS: u64 = 1_048_576;

/// ワークシートの最大列数（16,384列、XFD）
pub(crate) const MAX_COLS: u64 = 16_384;

/// 行マップ内でスキップされる非行キー
pub(crate) const SENTINEL_ROW_KEY: &str = "len";

/// `SheetSpec::name`が省略された場合のシート名
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 空セル
    Empty,
}

impl CellValue {
    /// JSONの`text`値からセル値を生成する
    ///
    /// 配列・オブジェクトはセル値として表現できないため`None`を返します。
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(CellValue::Empty),
            Value::String(s) => Some(CellValue::String(s.clone())),
            Value::Bool(b) => Some(CellValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(CellValue::Number),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// 値が空かどうかを判定（空文字列も空とみなす）
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// セル座標（0始まり）
///
/// ドキュメント上のインデックスをそのまま保持します。
/// rust_xlsxwriterのAPIは0始まりのため書き込み時の変換は不要で、
/// ワークシート上の表示位置は `(row + 1, col + 1)` になります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct CellCoord {
    pub row: u32,
    pub col: u16,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// A1形式の文字列に変換（例: (0, 0) -> "A1"）
    #[allow(clippy::wrong_self_convention)]
    pub fn to_a1_notation(&self) -> String {
        let col_str = Self::col_index_to_letter(u32::from(self.col));
        format!("{}{}", col_str, u64::from(self.row) + 1)
    }

    /// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
    fn col_index_to_letter(mut col: u32) -> String {
        let mut result = String::new();
        loop {
            let remainder = col % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        result
    }
}

/// 入力ドキュメント（シート記述子の順序付きリスト）
///
/// 読み込み後は変更されません。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Document {
    sheets: Vec<SheetSpec>,
}

impl Document {
    /// シート記述子のリストからドキュメントを生成
    pub fn new(sheets: Vec<SheetSpec>) -> Self {
        Self { sheets }
    }

    /// シート記述子（ドキュメント順）
    pub fn sheets(&self) -> &[SheetSpec] {
        &self.sheets
    }

    /// シートが1つも含まれていないか
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// シート記述子
///
/// `rows`はキー順を保持したまま保持され、構築時に1行ずつデコードされます。
/// `"len"`キーは行ではないためスキップされます。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetSpec {
    /// シート名（省略時はコンバーターのデフォルト名）
    #[serde(default)]
    pub name: Option<String>,

    /// 行インデックス文字列 → 行データ
    #[serde(default)]
    pub rows: Map<String, Value>,

    /// シート内で共有されるスタイル記述子
    #[serde(default)]
    pub styles: Vec<Option<StyleSpec>>,
}

/// 行データ
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RowSpec {
    /// 列インデックス文字列 → セルデータ
    #[serde(default)]
    pub cells: Map<String, Value>,
}

fn default_text() -> Value {
    Value::String(String::new())
}

fn no_style() -> i64 {
    -1
}

/// セルデータ
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CellSpec {
    /// セルの値（省略時は空文字列）
    #[serde(default = "default_text")]
    pub text: Value,

    /// `styles`へのインデックス（`-1`または省略時はスタイルなし）
    #[serde(default = "no_style")]
    pub style: i64,
}

/// フォント記述子
///
/// 各属性は明示的に指定された場合のみ適用されます（省略 ≠ false）。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FontSpec {
    #[serde(default)]
    pub italic: Option<bool>,
    #[serde(default)]
    pub bold: Option<bool>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// スタイル記述子
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StyleSpec {
    /// フォント属性
    #[serde(default)]
    pub font: Option<FontSpec>,

    /// フォント色（`#RRGGBB`またはaRGB）
    #[serde(default)]
    pub color: Option<String>,

    /// 背景色（単色塗りつぶし）
    #[serde(default)]
    pub bgcolor: Option<String>,

    /// 辺の名前 → `[線種, 色]`
    #[serde(default)]
    pub border: Option<Map<String, Value>>,

    /// 一重下線
    #[serde(default)]
    pub underline: Option<bool>,

    /// 取り消し線
    #[serde(default)]
    pub strike: Option<bool>,
}

impl StyleSpec {
    /// 認識される属性が1つも指定されていないか
    pub fn is_empty(&self) -> bool {
        self.font.is_none()
            && self.color.is_none()
            && self.bgcolor.is_none()
            && self.border.is_none()
            && self.underline.is_none()
            && self.strike.is_none()
    }
}
