//! Range Module
//!
//! A1記法が表す矩形範囲のモデルと、テキストへのフォーマットを提供します。

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::column::{is_cell_name, CellName};
use crate::error::A1NotationError;
use crate::parser::{self, Fragments};

/// スプレッドシート上の矩形範囲
///
/// 列・行の境界はすべて1始まりで、`None`はその方向に範囲が無制限であることを表します。
///
/// - 列だけを持つ範囲は列全体（例: `A:A`）
/// - 行だけを持つ範囲は行全体（例: `1:2`）
/// - 境界を持たずシート名だけを持つ範囲はシート全体（例: `Sheet1`）
///
/// 構築後は変更できません。`left <= right`や`top <= bottom`の順序は検証しません。
///
/// # 使用例
///
/// ```rust
/// use a1notation::Range;
///
/// # fn main() -> Result<(), a1notation::A1NotationError> {
/// let range = Range::new(Some("Sheet1"), Some(3), Some(2), None, None)?;
/// assert_eq!(range.format(), "Sheet1!C2");
///
/// let parsed: Range = "Sheet1!A1:B2".parse()?;
/// assert_eq!(parsed.right(), Some(2));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RangeFields")]
pub struct Range {
    #[serde(skip_serializing_if = "Option::is_none")]
    sheet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    left: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    right: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom: Option<u32>,
}

impl Range {
    /// 明示的な境界値から範囲を生成する
    ///
    /// `right`と`bottom`の両方が省略された場合、`right = left`、`bottom = top`として
    /// 単一セル（または単一の列・行）の範囲になります。
    ///
    /// # エラー
    ///
    /// 以下の場合に`A1NotationError::InvalidRange`を返します。
    ///
    /// - シート名が空文字列
    /// - いずれかの境界値が`0`
    /// - `left`なしで`right`を指定、または`top`なしで`bottom`を指定
    pub fn new(
        sheet_name: Option<&str>,
        left: Option<u32>,
        top: Option<u32>,
        right: Option<u32>,
        bottom: Option<u32>,
    ) -> Result<Self, A1NotationError> {
        Self::validated(sheet_name.map(str::to_string), left, top, right, bottom)
    }

    /// 範囲を段階的に構築するビルダーを返す
    pub fn builder() -> RangeBuilder {
        RangeBuilder::new()
    }

    fn validated(
        sheet_name: Option<String>,
        left: Option<u32>,
        top: Option<u32>,
        right: Option<u32>,
        bottom: Option<u32>,
    ) -> Result<Self, A1NotationError> {
        match Self::resolve_bounds(sheet_name.as_deref(), left, top, right, bottom) {
            Ok((right, bottom)) => Ok(Self {
                sheet_name,
                left,
                top,
                right,
                bottom,
            }),
            Err(msg) => {
                tracing::debug!("rejected range construction: {}", msg);
                Err(A1NotationError::InvalidRange(msg))
            }
        }
    }

    /// 引数を検証し、確定した`(right, bottom)`を返す
    fn resolve_bounds(
        sheet_name: Option<&str>,
        left: Option<u32>,
        top: Option<u32>,
        right: Option<u32>,
        bottom: Option<u32>,
    ) -> Result<(Option<u32>, Option<u32>), String> {
        if sheet_name == Some("") {
            return Err("sheet name must not be empty".to_string());
        }

        for (field, value) in [
            ("left", left),
            ("top", top),
            ("right", right),
            ("bottom", bottom),
        ] {
            if value == Some(0) {
                return Err(format!("{} must be 1 or greater, got 0", field));
            }
        }

        // 右端・下端がともに省略された場合は単一セル
        let (right, bottom) = if right.is_none() && bottom.is_none() {
            (left, top)
        } else {
            (right, bottom)
        };

        if right.is_some() && left.is_none() {
            return Err("right is set without left".to_string());
        }
        if bottom.is_some() && top.is_none() {
            return Err("bottom is set without top".to_string());
        }
        Ok((right, bottom))
    }

    /// パーサーの中間結果から範囲を生成する
    pub(crate) fn from_fragments(fragments: Fragments) -> Result<Self, A1NotationError> {
        let decode = |fragment: Option<parser::Fragment>| -> Result<CellName, A1NotationError> {
            match fragment {
                Some(f) => CellName::decode(&f.text, f.position),
                None => Ok(CellName {
                    col: None,
                    row: None,
                }),
            }
        };

        let cell1 = decode(fragments.cell1)?;
        let cell2 = decode(fragments.cell2)?;

        Self::validated(
            fragments.sheet_name,
            cell1.col,
            cell1.row,
            cell2.col,
            cell2.row,
        )
    }

    /// シート名（`None`は現在のシート）
    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }

    /// 左端の列番号（1始まり）
    pub fn left(&self) -> Option<u32> {
        self.left
    }

    /// 上端の行番号（1始まり）
    pub fn top(&self) -> Option<u32> {
        self.top
    }

    /// 右端の列番号（1始まり）
    pub fn right(&self) -> Option<u32> {
        self.right
    }

    /// 下端の行番号（1始まり）
    pub fn bottom(&self) -> Option<u32> {
        self.bottom
    }

    /// 4つの境界がすべて指定され、1つのセルだけを表すかどうか
    pub fn is_single_cell(&self) -> bool {
        match (self.left, self.top, self.right, self.bottom) {
            (Some(l), Some(t), Some(r), Some(b)) => l == r && t == b,
            _ => false,
        }
    }

    /// A1記法の文字列に変換する
    ///
    /// 境界もシート名も持たない範囲は空文字列になります。
    ///
    /// # 出力例
    ///
    /// - `Sheet1!A1:B2`
    /// - `'My Sheet'!A:A`
    /// - `C2`
    /// - `1:3`
    pub fn format(&self) -> String {
        let cell1 = CellName::render(self.left, self.top);
        let cell2 = CellName::render(self.right, self.bottom);

        let cells = if self.is_single_cell() {
            cell1
        } else if !cell1.is_empty() && !cell2.is_empty() {
            format!("{}:{}", cell1, cell2)
        } else if cell1.is_empty() {
            cell2
        } else {
            cell1
        };

        match &self.sheet_name {
            Some(name) if cells.is_empty() => escape_sheet_name(name).into_owned(),
            Some(name) => format!("{}!{}", escape_sheet_name(name), cells),
            None => cells,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for Range {
    type Err = A1NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}

/// デシリアライズ用の未検証フィールド
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RangeFields {
    sheet_name: Option<String>,
    left: Option<u32>,
    top: Option<u32>,
    right: Option<u32>,
    bottom: Option<u32>,
}

impl TryFrom<RangeFields> for Range {
    type Error = A1NotationError;

    fn try_from(fields: RangeFields) -> Result<Self, Self::Error> {
        Range::validated(
            fields.sheet_name,
            fields.left,
            fields.top,
            fields.right,
            fields.bottom,
        )
    }
}

/// シート名をA1記法で使える形にエスケープする
///
/// - 英数字のみで、セル参照の形（例: `A1`）でない名前はそのまま
/// - セル参照の形の名前は、再解析でセル参照と誤認されないよう引用符で囲む
/// - それ以外（空白や記号、`'`を含む名前）は引用符で囲み、`'`を`''`に置き換える
///
/// # 使用例
///
/// ```rust
/// use a1notation::escape_sheet_name;
///
/// assert_eq!(escape_sheet_name("Sheet1"), "Sheet1");
/// assert_eq!(escape_sheet_name("A1"), "'A1'");
/// assert_eq!(escape_sheet_name("Bob's Sheet"), "'Bob''s Sheet'");
/// ```
pub fn escape_sheet_name(name: &str) -> Cow<'_, str> {
    let is_plain = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric())
        && !is_cell_name(name);

    if is_plain {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("'{}'", name.replace('\'', "''")))
    }
}

/// `Range`を段階的に構築するビルダー
///
/// すべての境界はデフォルトで未指定です。検証は`build()`時に行われます。
///
/// # 使用例
///
/// ```rust
/// use a1notation::RangeBuilder;
///
/// # fn main() -> Result<(), a1notation::A1NotationError> {
/// let range = RangeBuilder::new()
///     .with_sheet_name("Data")
///     .with_columns(1, 3)
///     .build()?;
/// assert_eq!(range.format(), "Data!A:C");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RangeBuilder {
    sheet_name: Option<String>,
    left: Option<u32>,
    top: Option<u32>,
    right: Option<u32>,
    bottom: Option<u32>,
}

impl RangeBuilder {
    /// すべて未指定のビルダーを生成する
    pub fn new() -> Self {
        Self::default()
    }

    /// シート名を指定する
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// 左端の列番号を指定する
    pub fn with_left(mut self, left: u32) -> Self {
        self.left = Some(left);
        self
    }

    /// 上端の行番号を指定する
    pub fn with_top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    /// 右端の列番号を指定する
    pub fn with_right(mut self, right: u32) -> Self {
        self.right = Some(right);
        self
    }

    /// 下端の行番号を指定する
    pub fn with_bottom(mut self, bottom: u32) -> Self {
        self.bottom = Some(bottom);
        self
    }

    /// 列の範囲（左端と右端）を指定する
    pub fn with_columns(self, left: u32, right: u32) -> Self {
        self.with_left(left).with_right(right)
    }

    /// 行の範囲（上端と下端）を指定する
    pub fn with_rows(self, top: u32, bottom: u32) -> Self {
        self.with_top(top).with_bottom(bottom)
    }

    /// 設定を検証して`Range`を生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Range)` - 構築成功
    /// * `Err(A1NotationError::InvalidRange)` - 設定が無効な場合（`Range::new()`と同じ規則）
    pub fn build(self) -> Result<Range, A1NotationError> {
        Range::validated(
            self.sheet_name,
            self.left,
            self.top,
            self.right,
            self.bottom,
        )
    }
}
