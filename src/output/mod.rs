//! Output Module
//!
//! 構築済みグリッドをrust_xlsxwriterのワークブックへ書き込むモジュール（ワークブックアセンブラ）。
//!
//! rust_xlsxwriterのワークブックはシートを持たない状態で生成されるため、
//! 既定シートの削除は不要で、ドキュメントのシートだけがドキュメント順に追加されます。

mod path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::grid::SheetGrid;
use crate::style::ResolvedStyle;
use crate::types::CellValue;

pub use path::derive_output_path;

/// グリッドからワークブックを組み立てる
///
/// # 戻り値
///
/// * `Ok((Workbook, usize))` - ワークブックと書き込んだセル数
/// * `Err(XlsxError)` - シート名が不正、文字列が長すぎる場合など
pub(crate) fn assemble_workbook(grids: &[SheetGrid]) -> Result<(Workbook, usize), XlsxError> {
    let mut workbook = Workbook::new();
    let mut cells_written = 0;

    for grid in grids {
        let (worksheet, written) = render_worksheet(grid)?;
        workbook.push_worksheet(worksheet);
        cells_written += written;
    }

    Ok((workbook, cells_written))
}

/// 1シート分のワークシートを生成する
///
/// 値が空でスタイルもないセルは書き込まない。
fn render_worksheet(grid: &SheetGrid) -> Result<(Worksheet, usize), XlsxError> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(grid.name())?;

    let mut written = 0;
    for cell in grid.cells() {
        let row = cell.coord.row;
        let col = cell.coord.col;
        let format = cell.style.as_ref().map(ResolvedStyle::to_format);

        match (&cell.value, &format) {
            (value, None) if value.is_empty() => continue,
            (value, Some(format)) if value.is_empty() => {
                worksheet.write_blank(row, col, format)?;
            }
            (CellValue::String(text), Some(format)) => {
                worksheet.write_string_with_format(row, col, text, format)?;
            }
            (CellValue::String(text), None) => {
                worksheet.write_string(row, col, text)?;
            }
            (CellValue::Number(number), Some(format)) => {
                worksheet.write_number_with_format(row, col, *number, format)?;
            }
            (CellValue::Number(number), None) => {
                worksheet.write_number(row, col, *number)?;
            }
            (CellValue::Bool(boolean), Some(format)) => {
                worksheet.write_boolean_with_format(row, col, *boolean, format)?;
            }
            (CellValue::Bool(boolean), None) => {
                worksheet.write_boolean(row, col, *boolean)?;
            }
            // is_empty()で処理済み
            (CellValue::Empty, _) => continue,
        }
        written += 1;
    }

    Ok((worksheet, written))
}
