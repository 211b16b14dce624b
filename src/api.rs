//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use std::fmt;
use std::sync::Arc;

use crate::error::StyleWarning;

/// フォント属性の合成方式
///
/// スタイル記述子に複数のフォント関連属性（`bold`、`color`、`underline`、`strike`など）が
/// 含まれる場合に、最終的なセルのフォントをどう決定するかを指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum FontMode {
    /// 後勝ち（デフォルト）
    ///
    /// フォントは1つのオブジェクトとして丸ごと置き換えられます。
    /// `underline`および`strike`はそれぞれ新しいフォントを設定するため、
    /// 同じ記述子内の`bold`・`italic`・`size`・`name`・`color`は失われます。
    ///
    /// # 例
    ///
    /// `{"font": {"bold": true}, "underline": true}` → 下線のみ（太字は失われる）
    #[default]
    LastWins,

    /// 累積
    ///
    /// すべてのフォント属性を1つの構造に集約してから、セルごとに1度だけフォントを構築します。
    /// 不正なフォント色は色のみがスキップされ、その他の属性は保持されます。
    ///
    /// # 例
    ///
    /// `{"font": {"bold": true}, "underline": true}` → 太字 + 下線
    Merge,
}

/// 範囲外スタイルインデックスの扱い
///
/// セルの`style`が`-1`以外で、シートの`styles`の範囲外を指している場合の動作を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum StyleIndexPolicy {
    /// 変換全体をエラーで中断する（デフォルト）
    #[default]
    Strict,

    /// `-1`と同様に「スタイルなし」として扱い、警告ログを出力する
    Lenient,
}

/// スタイル警告の通知先
///
/// 警告は記録された時点で（値ごとに1度だけ）呼び出されます。
/// 変換が後続のセルで致命的エラーになった場合でも、それまでの警告は通知済みです。
#[derive(Clone)]
pub(crate) struct WarningSink(Arc<dyn Fn(&StyleWarning) + Send + Sync>);

impl WarningSink {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&StyleWarning) + Send + Sync + 'static,
    {
        Self(Arc::new(handler))
    }

    pub fn notify(&self, warning: &StyleWarning) {
        (self.0)(warning)
    }
}

impl fmt::Debug for WarningSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WarningSink")
    }
}
