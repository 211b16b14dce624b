//! Parser Module
//!
//! Markdownファイルに埋め込まれたJSON配列を抽出し、ドキュメントモデルへ変換する。

mod document;

pub use document::{load_document, load_document_file};
pub(crate) use document::{load_document_file_with, read_document_source};
