//! Security Module
//!
//! 入力サイズの上限と、入力ファイル自身への上書き防止を提供するモジュール。

use std::path::{Path, PathBuf};

use crate::error::MdToXlsxError;

/// デフォルトの入力ファイルサイズ上限: 100MB
pub(crate) const DEFAULT_MAX_INPUT_SIZE: u64 = 104_857_600;

/// セキュリティ設定
///
/// ドキュメントは全体をメモリに読み込むため、読み込み量に上限を設ける。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_file_size: u64,

    /// 出力先が入力ファイルと同一でも書き込むか
    pub allow_overwrite_input: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: DEFAULT_MAX_INPUT_SIZE,
            allow_overwrite_input: false,
        }
    }
}

/// 読み込んだバイト数が上限以内かを検証
pub(crate) fn check_input_size(
    bytes_read: u64,
    config: &SecurityConfig,
) -> Result<(), MdToXlsxError> {
    if bytes_read > config.max_input_file_size {
        return Err(MdToXlsxError::SecurityViolation(format!(
            "Input file size exceeds maximum: {} bytes (max: {} bytes)",
            bytes_read, config.max_input_file_size
        )));
    }
    Ok(())
}

/// 出力パスが入力ファイル自身を指していないかを検証
///
/// 拡張子が`.md`でない入力では出力パスが入力パスと一致するため、
/// 明示的に許可されない限り変換元の上書きを拒否する。
pub(crate) fn check_output_path(
    input: &Path,
    output: &Path,
    config: &SecurityConfig,
) -> Result<(), MdToXlsxError> {
    if config.allow_overwrite_input {
        return Ok(());
    }

    if resolve(input) == resolve(output) {
        return Err(MdToXlsxError::SecurityViolation(format!(
            "Output path would overwrite the input file: {}",
            output.display()
        )));
    }

    Ok(())
}

/// 比較用にパスを正規化する（出力ファイルは未作成の場合があるため親ディレクトリで解決）
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            parent
                .canonicalize()
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}
