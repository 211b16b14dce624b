//! Grid Module
//!
//! シート記述子（スパースな行・列マップ）から、座標・値・解決済みスタイルを持つ
//! セルのリストを構築するモジュール（シートビルダー）。
//! rust_xlsxwriterへの書き込みは`output`モジュールが担当します。

use serde::Deserialize;

use crate::api::StyleIndexPolicy;
use crate::builder::ConversionConfig;
use crate::error::MdToXlsxError;
use crate::style::{ResolvedStyle, StyleResolver, StyleWarnings};
use crate::types::{
    CellCoord, CellSpec, CellValue, RowSpec, SheetSpec, StyleSpec, MAX_COLS, MAX_ROWS,
    SENTINEL_ROW_KEY,
};

/// 構築済みセル
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GridCell {
    /// セル座標（0始まり）
    pub coord: CellCoord,

    /// セルの値
    pub value: CellValue,

    /// 解決済みスタイル（スタイルなしの場合は`None`）
    pub style: Option<ResolvedStyle>,
}

/// 1シート分の構築結果
#[derive(Debug, Clone)]
pub(crate) struct SheetGrid {
    /// シート名
    name: String,

    /// ドキュメント順のセル
    cells: Vec<GridCell>,
}

impl SheetGrid {
    /// シート記述子からグリッドを構築する
    ///
    /// # 引数
    ///
    /// * `sheet` - シート記述子
    /// * `config` - 変換設定（デフォルトシート名、スタイルインデックスの扱い）
    /// * `resolver` - スタイル解決器
    /// * `warnings` - 変換全体で共有する警告コンテキスト
    ///
    /// # 戻り値
    ///
    /// * `Ok(SheetGrid)` - 構築に成功した場合
    /// * `Err(MdToXlsxError)` - 行・列キーが不正、スタイルインデックスが範囲外などの構造エラー
    pub fn build(
        sheet: &SheetSpec,
        config: &ConversionConfig,
        resolver: &StyleResolver,
        warnings: &mut StyleWarnings,
    ) -> Result<Self, MdToXlsxError> {
        let name = sheet
            .name
            .clone()
            .unwrap_or_else(|| config.default_sheet_name.clone());
        let mut cells = Vec::new();

        for (row_key, row_value) in &sheet.rows {
            if row_key == SENTINEL_ROW_KEY {
                continue;
            }

            let row = parse_index(row_key, "row", &name)?;
            let row_spec =
                RowSpec::deserialize(row_value).map_err(|source| MdToXlsxError::MalformedEntry {
                    sheet: name.clone(),
                    location: format!("row '{}'", row_key),
                    source,
                })?;

            for (col_key, cell_value) in &row_spec.cells {
                let col = parse_index(col_key, "column", &name)?;
                let coord = to_coord(row, col, &name)?;

                let cell = CellSpec::deserialize(cell_value).map_err(|source| {
                    MdToXlsxError::MalformedEntry {
                        sheet: name.clone(),
                        location: format!("cell {}", coord.to_a1_notation()),
                        source,
                    }
                })?;

                let value = CellValue::from_json(&cell.text).ok_or_else(|| {
                    MdToXlsxError::UnsupportedCellValue {
                        sheet: name.clone(),
                        cell: coord.to_a1_notation(),
                    }
                })?;

                let style_spec = lookup_style(sheet, cell.style, config.style_index_policy)
                    .map_err(|len| MdToXlsxError::StyleIndexOutOfRange {
                        sheet: name.clone(),
                        cell: coord.to_a1_notation(),
                        index: cell.style,
                        len,
                    })?;

                let style = resolver.resolve(style_spec, warnings).map_err(|source| {
                    MdToXlsxError::Style {
                        sheet: name.clone(),
                        cell: coord.to_a1_notation(),
                        source,
                    }
                })?;

                cells.push(GridCell {
                    coord,
                    value,
                    style,
                });
            }
        }

        log::debug!("Built sheet '{}' with {} cells", name, cells.len());

        Ok(Self { name, cells })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }
}

/// 行・列キーを非負整数として解釈する
fn parse_index(key: &str, axis: &'static str, sheet: &str) -> Result<u64, MdToXlsxError> {
    key.trim()
        .parse::<u64>()
        .map_err(|_| MdToXlsxError::InvalidIndexKey {
            sheet: sheet.to_string(),
            axis,
            key: key.to_string(),
        })
}

fn to_coord(row: u64, col: u64, sheet: &str) -> Result<CellCoord, MdToXlsxError> {
    if row >= MAX_ROWS || col >= MAX_COLS {
        return Err(MdToXlsxError::CellOutOfRange {
            sheet: sheet.to_string(),
            row,
            col,
        });
    }
    // 上限チェック済みのため変換は失敗しない
    Ok(CellCoord::new(row as u32, col as u16))
}

/// スタイルインデックスを解決する
///
/// `-1`はスタイルなし。範囲外の場合、`Strict`では定義済みスタイル数を`Err`で返す。
fn lookup_style(
    sheet: &SheetSpec,
    index: i64,
    policy: StyleIndexPolicy,
) -> Result<Option<&StyleSpec>, usize> {
    if index == -1 {
        return Ok(None);
    }

    match usize::try_from(index).ok().and_then(|i| sheet.styles.get(i)) {
        Some(entry) => Ok(entry.as_ref()),
        None => match policy {
            StyleIndexPolicy::Strict => Err(sheet.styles.len()),
            StyleIndexPolicy::Lenient => {
                log::warn!(
                    "Style index {} out of range ({} styles defined); writing unstyled cell",
                    index,
                    sheet.styles.len()
                );
                Ok(None)
            }
        },
    }
}
