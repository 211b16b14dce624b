//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

use crate::api::{FontMode, StyleIndexPolicy, WarningSink};
use crate::error::{MdToXlsxError, StyleWarning};
use crate::grid::SheetGrid;
use crate::output::{assemble_workbook, derive_output_path};
use crate::parser::{load_document, load_document_file_with, read_document_source};
use crate::security::{check_output_path, SecurityConfig};
use crate::style::{StyleResolver, StyleWarnings};
use crate::types::{Document, DEFAULT_SHEET_NAME};

/// シート名の最大文字数（Excelの制限）
const MAX_SHEET_NAME_LEN: usize = 31;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// フォント属性の合成方式
    pub font_mode: FontMode,

    /// 範囲外スタイルインデックスの扱い
    pub style_index_policy: StyleIndexPolicy,

    /// `name`が省略されたシートの名前
    pub default_sheet_name: String,

    /// 入力サイズ上限・上書き防止
    pub security: SecurityConfig,

    /// 警告の即時通知先
    pub warning_sink: Option<WarningSink>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            font_mode: FontMode::LastWins,
            style_index_policy: StyleIndexPolicy::Strict,
            default_sheet_name: DEFAULT_SHEET_NAME.to_string(),
            security: SecurityConfig::default(),
            warning_sink: None,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use md2xlsx::{ConverterBuilder, FontMode, StyleIndexPolicy};
///
/// # fn main() -> Result<(), md2xlsx::MdToXlsxError> {
/// let converter = ConverterBuilder::new()
///     .with_font_mode(FontMode::Merge)
///     .with_style_index_policy(StyleIndexPolicy::Lenient)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - フォント合成: 後勝ち（`FontMode::LastWins`）
    /// - 範囲外スタイルインデックス: エラー（`StyleIndexPolicy::Strict`）
    /// - デフォルトシート名: `Sheet1`
    /// - 入力サイズ上限: 100MB
    /// - 入力ファイルへの上書き: 拒否
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// フォント属性の合成方式を指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use md2xlsx::{ConverterBuilder, FontMode};
    ///
    /// // 太字と下線を同時に適用する
    /// let builder = ConverterBuilder::new().with_font_mode(FontMode::Merge);
    /// ```
    pub fn with_font_mode(mut self, mode: FontMode) -> Self {
        self.config.font_mode = mode;
        self
    }

    /// 範囲外スタイルインデックスの扱いを指定する
    pub fn with_style_index_policy(mut self, policy: StyleIndexPolicy) -> Self {
        self.config.style_index_policy = policy;
        self
    }

    /// `name`が省略されたシートに使用する名前を指定する
    ///
    /// # 制約
    ///
    /// * 1〜31文字で、`[ ] : * ? / \`を含まないこと
    /// * 制約違反の場合、`build()`時に`MdToXlsxError::Config`を返す
    pub fn with_default_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.config.default_sheet_name = name.into();
        self
    }

    /// 入力ドキュメントの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 出力パスが入力ファイルと同一の場合に上書きを許可するかを指定する
    ///
    /// 拡張子が`.md`でない入力では導出された出力パスが入力パスと一致します。
    /// デフォルトでは変換元を保護するため、この場合はエラーになります。
    pub fn allow_overwrite_input(mut self, allow: bool) -> Self {
        self.config.security.allow_overwrite_input = allow;
        self
    }

    /// スタイル警告を記録時に受け取るハンドラを指定する
    ///
    /// ハンドラは値ごとに1度だけ、警告が記録された時点で呼び出されます。
    /// 後続のセルで変換が失敗した場合も、それまでの警告は通知済みです。
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use md2xlsx::ConverterBuilder;
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_warning_handler(|warning| println!("Warning: {}", warning));
    /// ```
    pub fn with_warning_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&StyleWarning) + Send + Sync + 'static,
    {
        self.config.warning_sink = Some(WarningSink::new(handler));
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `MdToXlsxError::Config(String)`: 設定の検証に失敗した場合
    ///   * デフォルトシート名が空、長すぎる、または使用できない文字を含む
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Converter, MdToXlsxError> {
        // 1. デフォルトシート名の検証
        let name = &self.config.default_sheet_name;
        if name.is_empty() {
            return Err(MdToXlsxError::Config(
                "Default sheet name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(MdToXlsxError::Config(format!(
                "Default sheet name exceeds {} characters: '{}'",
                MAX_SHEET_NAME_LEN, name
            )));
        }
        if name.contains(['[', ']', ':', '*', '?', '/', '\\']) {
            return Err(MdToXlsxError::Config(format!(
                "Default sheet name contains invalid characters: '{}'",
                name
            )));
        }

        // 2. 入力サイズ上限の検証
        if self.config.security.max_input_file_size == 0 {
            return Err(MdToXlsxError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換結果のサマリー
#[derive(Debug, Clone)]
pub struct ConversionReport {
    output_path: Option<PathBuf>,
    sheet_names: Vec<String>,
    cells_written: usize,
    warnings: Vec<StyleWarning>,
}

impl ConversionReport {
    /// 書き出したファイルのパス（ストリーム変換の場合は`None`）
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// 生成したシート名（ドキュメント順）
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// 書き込んだセル数
    pub fn cells_written(&self) -> usize {
        self.cells_written
    }

    /// 記録されたスタイル警告（値ごとに1件、発生順）
    pub fn warnings(&self) -> &[StyleWarning] {
        &self.warnings
    }
}

/// 変換処理のファサード
///
/// JSON埋め込みMarkdownをExcelファイルに変換するためのメインエントリーポイントです。
/// 警告の重複排除コンテキストは変換呼び出しごとに生成されるため、
/// 同じ`Converter`を複数スレッドから同時に使用できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use md2xlsx::ConverterBuilder;
///
/// # fn main() -> Result<(), md2xlsx::MdToXlsxError> {
/// let converter = ConverterBuilder::new().build()?;
/// let report = converter.convert_file("report.md")?; // -> report.xlsx
/// for warning in report.warnings() {
///     println!("Warning: {}", warning);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// スタイル解決器
    resolver: StyleResolver,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            resolver: StyleResolver::new(config.font_mode),
            config,
        }
    }

    /// ファイルを変換し、拡張子を`.xlsx`に置き換えたパスへ保存する
    ///
    /// # 処理フロー
    ///
    /// 1. 出力パスの導出（`.md` → `.xlsx`）と上書き防止チェック
    /// 2. 入力ファイルの読み込みとドキュメントの解析
    /// 3. 各シートの構築
    /// 4. ワークブックの保存（既存ファイルは上書き）
    ///
    /// # 戻り値
    ///
    /// * `Ok(ConversionReport)` - 変換に成功した場合
    /// * `Err(MdToXlsxError)` - 読み込み・解析・構造・書き込みのいずれかで失敗した場合。
    ///   失敗時に出力ファイルが生成・更新されることはありません
    pub fn convert_file<P: AsRef<Path>>(&self, input: P) -> Result<ConversionReport, MdToXlsxError> {
        let input = input.as_ref();
        let output = derive_output_path(input);
        self.convert_file_to(input, output)
    }

    /// ファイルを変換し、指定したパスへ保存する
    pub fn convert_file_to<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConversionReport, MdToXlsxError> {
        let input = input.as_ref();
        let output = output.as_ref();
        check_output_path(input, output, &self.config.security)?;

        let document = load_document_file_with(input, &self.config.security)?;
        let (mut workbook, mut report) = self.build_workbook(&document)?;

        workbook.save(output)?;
        log::debug!("Saved workbook to {}", output.display());

        report.output_path = Some(output.to_path_buf());
        Ok(report)
    }

    /// リーダーから読み込んだドキュメントを変換し、xlsxバイト列をライターへ書き出す
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use md2xlsx::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), md2xlsx::MdToXlsxError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let markdown = r#"[{"name": "S1", "rows": {"0": {"cells": {"0": {"text": "Hi"}}}}}]"#;
    /// let mut xlsx = Vec::new();
    /// let report = converter.convert(markdown.as_bytes(), &mut xlsx)?;
    /// assert_eq!(report.sheet_names(), ["S1"]);
    /// assert!(xlsx.starts_with(b"PK"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<ConversionReport, MdToXlsxError> {
        let source = read_document_source(input, &self.config.security)?;
        let document = load_document(&source)?;
        let (mut workbook, report) = self.build_workbook(&document)?;

        let buffer = workbook.save_to_buffer()?;
        output.write_all(&buffer)?;
        output.flush()?;

        Ok(report)
    }

    /// ドキュメントのテキストを変換し、xlsxのバイト列を返す
    pub fn convert_to_buffer(&self, text: &str) -> Result<Vec<u8>, MdToXlsxError> {
        let mut buffer = Vec::new();
        self.convert(text.as_bytes(), &mut buffer)?;
        Ok(buffer)
    }

    /// 解析済みドキュメントからワークブックを構築する
    ///
    /// 警告コンテキストはこの呼び出しの中で生成・破棄される。
    fn build_workbook(
        &self,
        document: &Document,
    ) -> Result<(Workbook, ConversionReport), MdToXlsxError> {
        if document.is_empty() {
            return Err(MdToXlsxError::EmptyDocument);
        }

        let mut warnings = StyleWarnings::with_sink(self.config.warning_sink.clone());
        let grids = document
            .sheets()
            .iter()
            .map(|sheet| SheetGrid::build(sheet, &self.config, &self.resolver, &mut warnings))
            .collect::<Result<Vec<_>, _>>()?;

        let (workbook, cells_written) = assemble_workbook(&grids)?;
        log::debug!(
            "Assembled {} sheets, {} cells, {} style warnings",
            grids.len(),
            cells_written,
            warnings.len()
        );

        let report = ConversionReport {
            output_path: None,
            sheet_names: grids.iter().map(|grid| grid.name().to_string()).collect(),
            cells_written,
            warnings: warnings.into_vec(),
        };

        Ok((workbook, report))
    }
}
