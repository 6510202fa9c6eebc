//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーメッセージのフォーマットを実現する。

use thiserror::Error;

/// a1notationクレート全体で使用するエラー型
///
/// A1記法の解析と、範囲の明示的な構築で発生するすべてのエラーを
/// 統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Parse`: 入力文字列がA1記法として不正な場合
/// - `InvalidRange`: 範囲の構築引数が不正な場合（0の境界値、対のない右端・下端など）
///
/// # 使用例
///
/// ```rust
/// use a1notation::{parse, A1NotationError};
///
/// match parse("Sheet1?") {
///     Err(A1NotationError::Parse { position, message }) => {
///         assert_eq!(position, 6);
///         assert!(message.contains("expected"));
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum A1NotationError {
    /// A1記法の解析中に発生したエラー
    ///
    /// 期待したトークン（文字）と実際に見つかった文字（または`EOF`）が
    /// メッセージに含まれます。`position`は失敗した位置（0始まりの文字オフセット）です。
    #[error("Parse error at position {position}: {message}")]
    Parse {
        /// エラーが発生した位置（Unicodeコードポイント単位）
        position: usize,
        /// エラーの詳細メッセージ
        message: String,
    },

    /// 範囲の構築に失敗したエラー
    ///
    /// `Range::new()`または`RangeBuilder::build()`で引数を検証し、
    /// 無効な組み合わせが検出された場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust
    /// use a1notation::{A1NotationError, Range};
    ///
    /// let result = Range::new(None, Some(0), Some(1), None, None);
    /// assert!(matches!(result, Err(A1NotationError::InvalidRange(_))));
    /// ```
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

impl A1NotationError {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        A1NotationError::Parse {
            position,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let error = A1NotationError::parse(3, "unexpected EOF");

        match error {
            A1NotationError::Parse { position, message } => {
                assert_eq!(position, 3);
                assert_eq!(message, "unexpected EOF");
            }
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let error = A1NotationError::parse(6, "expected \"!\" or \":\" but found \"?\"");
        let error_msg = error.to_string();

        assert!(error_msg.starts_with("Parse error at position 6"));
        assert!(error_msg.contains("expected \"!\" or \":\""));
    }

    #[test]
    fn test_invalid_range_error_display() {
        let error = A1NotationError::InvalidRange("left must be 1 or greater".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.starts_with("Invalid range"));
        assert!(error_msg.contains("left must be 1 or greater"));
    }

    // ?演算子で伝播できることの確認
    #[test]
    fn test_error_propagation_with_question_mark() {
        fn build() -> Result<crate::Range, A1NotationError> {
            let range = crate::Range::new(Some(""), None, None, None, None)?;
            Ok(range)
        }

        match build() {
            Err(A1NotationError::InvalidRange(msg)) => assert!(msg.contains("sheet name")),
            other => panic!("Expected InvalidRange error, got {:?}", other),
        }
    }
}
