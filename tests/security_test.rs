//! Security Tests
//!
//! 入力サイズ上限と変換元ファイルの上書き防止を検証します。

use md2xlsx::{ConverterBuilder, MdToXlsxError};
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

const SMALL_DOCUMENT: &str = r#"[{"name":"S","rows":{"0":{"cells":{"0":{"text":"x"}}}}}]"#;

/// 上限を超える入力は読み込みの段階で拒否される
#[test]
fn test_input_exceeds_size_limit() {
    let converter = ConverterBuilder::new()
        .with_max_input_size(16)
        .build()
        .unwrap();
    let result = converter.convert(Cursor::new(SMALL_DOCUMENT), &mut Vec::new());

    match result {
        Err(MdToXlsxError::SecurityViolation(msg)) => {
            assert!(msg.contains("exceeds maximum"));
        }
        other => panic!("Expected SecurityViolation, got {:?}", other),
    }
}

/// 上限ちょうどの入力は受け付ける
#[test]
fn test_input_at_size_limit() {
    let converter = ConverterBuilder::new()
        .with_max_input_size(SMALL_DOCUMENT.len() as u64)
        .build()
        .unwrap();
    assert!(converter.convert_to_buffer(SMALL_DOCUMENT).is_ok());
}

/// 上限を超えるファイルからは出力が生成されない
#[test]
fn test_oversized_file_produces_no_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("big.md");
    fs::write(&input, SMALL_DOCUMENT).unwrap();

    let converter = ConverterBuilder::new()
        .with_max_input_size(8)
        .build()
        .unwrap();
    let result = converter.convert_file(&input);

    assert!(matches!(result, Err(MdToXlsxError::SecurityViolation(_))));
    assert!(!dir.path().join("big.xlsx").exists());
}

/// 拡張子が`.md`でない入力は出力パスが入力と一致するため、既定では拒否される
#[test]
fn test_non_markdown_input_is_not_clobbered() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, SMALL_DOCUMENT).unwrap();

    let converter = ConverterBuilder::new().build().unwrap();
    let result = converter.convert_file(&input);

    match result {
        Err(MdToXlsxError::SecurityViolation(msg)) => {
            assert!(msg.contains("overwrite the input file"));
        }
        other => panic!("Expected SecurityViolation, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(&input).unwrap(), SMALL_DOCUMENT);
}

/// 明示的に許可した場合は入力ファイルをxlsxで置き換える
#[test]
fn test_overwrite_input_when_allowed() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, SMALL_DOCUMENT).unwrap();

    let converter = ConverterBuilder::new()
        .allow_overwrite_input(true)
        .build()
        .unwrap();
    let report = converter.convert_file(&input).unwrap();

    assert_eq!(report.output_path(), Some(input.as_path()));
    assert!(fs::read(&input).unwrap().starts_with(b"PK"));
}

/// 相対パス表記の違いでも同一ファイルとして検出する
#[test]
fn test_same_file_via_different_spelling() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, SMALL_DOCUMENT).unwrap();
    let alias = dir.path().join("sub").join("..").join("notes.txt");

    let converter = ConverterBuilder::new().build().unwrap();
    let result = converter.convert_file_to(&input, &alias);

    assert!(matches!(result, Err(MdToXlsxError::SecurityViolation(_))));
}

/// 存在しない入力ファイル
#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();
    let result = converter.convert_file(dir.path().join("absent.md"));

    match result {
        Err(MdToXlsxError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("Expected Io error, got {:?}", other),
    }
}
