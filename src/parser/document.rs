//! Document Loader
//!
//! テキスト中の最初の`[`から最後の`]`までを JSON 配列として解析する。
//! スキーマ検証は行わず、構造上の不整合はシート構築時に検出される。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::MdToXlsxError;
use crate::security::{check_input_size, SecurityConfig};
use crate::types::Document;

/// テキストから JSON 配列部分（`[` ... `]`、両端を含む）を切り出す
///
/// # 戻り値
///
/// * `Ok(&str)` - 切り出した部分文字列
/// * `Err(MdToXlsxError::MissingJsonArray)` - `[`または`]`が存在しない、または`]`が`[`より前にある場合
pub(crate) fn extract_json_array(text: &str) -> Result<&str, MdToXlsxError> {
    let start = text.find('[').ok_or(MdToXlsxError::MissingJsonArray)?;
    let end = text.rfind(']').ok_or(MdToXlsxError::MissingJsonArray)?;

    if end < start {
        return Err(MdToXlsxError::MissingJsonArray);
    }

    Ok(&text[start..=end])
}

/// テキストを解析してドキュメントモデルを生成する
///
/// # 引数
///
/// * `text` - JSON 配列を含むテキスト（Markdown など）
///
/// # 戻り値
///
/// * `Ok(Document)` - 解析に成功した場合
/// * `Err(MdToXlsxError::MissingJsonArray)` - JSON 配列が見つからない場合
/// * `Err(MdToXlsxError::Json)` - JSON として不正、またはドキュメントモデルに適合しない場合
///
/// # 使用例
///
/// ```rust
/// use md2xlsx::load_document;
///
/// let text = "# Report\n\n```json\n[{\"name\": \"S1\"}]\n```\n";
/// let document = load_document(text).unwrap();
/// assert_eq!(document.sheets().len(), 1);
/// ```
pub fn load_document(text: &str) -> Result<Document, MdToXlsxError> {
    let json = extract_json_array(text)?;
    let document = serde_json::from_str(json)?;
    Ok(document)
}

/// ファイルを読み込んでドキュメントモデルを生成する
///
/// デフォルトの入力サイズ上限（100MB）が適用されます。
///
/// # 戻り値
///
/// * `Err(MdToXlsxError::Io)` - ファイルが読めない、またはUTF-8でない場合
/// * `Err(MdToXlsxError::SecurityViolation)` - サイズ上限を超える場合
/// * その他は[`load_document`]と同じ
pub fn load_document_file<P: AsRef<Path>>(path: P) -> Result<Document, MdToXlsxError> {
    load_document_file_with(path.as_ref(), &SecurityConfig::default())
}

pub(crate) fn load_document_file_with(
    path: &Path,
    config: &SecurityConfig,
) -> Result<Document, MdToXlsxError> {
    let source = read_document_source(File::open(path)?, config)?;
    load_document(&source)
}

/// リーダーからドキュメントのテキストを読み込む
///
/// 上限 + 1 バイトまでしか読み込まないため、巨大な入力でもメモリを使い切らない。
pub(crate) fn read_document_source<R: Read>(
    reader: R,
    config: &SecurityConfig,
) -> Result<String, MdToXlsxError> {
    let mut buffer = Vec::new();
    let bytes_read = reader
        .take(config.max_input_file_size.saturating_add(1))
        .read_to_end(&mut buffer)?;
    check_input_size(bytes_read as u64, config)?;

    String::from_utf8(buffer)
        .map_err(|e| MdToXlsxError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
