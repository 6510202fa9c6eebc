//! Parser Module
//!
//! A1記法（例: `Sheet1!A1:B2`, `'My Sheet'!A:A`, `A1`）の再帰下降パーサーを提供します。
//!
//! # 文法
//!
//! ```text
//! notation    := quoted_ref | bare_ref
//! quoted_ref  := "'" quoted_name "'" [ "!" cell_ref ]
//! bare_ref    := name [ ( "!" cell_ref ) | ( ":" name ) ]
//! cell_ref    := name [ ":" name ]
//! name        := [A-Za-z0-9]+
//! quoted_name := "'"以外の任意の文字（"''"は"'"1文字を表す）
//! ```

use crate::column::is_cell_name;
use crate::error::A1NotationError;
use crate::range::Range;
use crate::scanner::Scanner;

/// A1記法の文字列を解析して`Range`を生成する
///
/// # 引数
///
/// * `text` - A1記法の文字列
///
/// # 戻り値
///
/// * `Ok(Range)` - 解析成功
/// * `Err(A1NotationError::Parse)` - 文法に違反している場合
/// * `Err(A1NotationError::InvalidRange)` - 解析結果が範囲として不正な場合（例: `A0`）
///
/// # 使用例
///
/// ```rust
/// use a1notation::parse;
///
/// # fn main() -> Result<(), a1notation::A1NotationError> {
/// let range = parse("'My Custom Sheet'!A:A")?;
/// assert_eq!(range.sheet_name(), Some("My Custom Sheet"));
/// assert_eq!(range.left(), Some(1));
/// assert_eq!(range.top(), None);
/// # Ok(())
/// # }
/// ```
pub fn parse(text: &str) -> Result<Range, A1NotationError> {
    let result = NotationParser::new(text)
        .parse()
        .and_then(Range::from_fragments);

    if let Err(e) = &result {
        tracing::debug!("failed to parse A1 notation {:?}: {}", text, e);
    }
    result
}

/// 入力中のセル名の断片と、その開始位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fragment {
    pub text: String,
    pub position: usize,
}

/// パーサーの中間結果（まだ数値に変換されていない文字列の断片）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Fragments {
    pub sheet_name: Option<String>,
    pub cell1: Option<Fragment>,
    pub cell2: Option<Fragment>,
}

/// A1記法パーサー
///
/// 1回の解析ごとに自身のカーソルを所有します。
pub(crate) struct NotationParser {
    scanner: Scanner,
}

impl NotationParser {
    /// 新しいNotationParserを生成
    pub fn new(text: &str) -> Self {
        Self {
            scanner: Scanner::new(text),
        }
    }

    /// 入力全体を解析して中間結果を返す
    pub fn parse(mut self) -> Result<Fragments, A1NotationError> {
        let fragments = match self.scanner.peek() {
            Some('\'') => self.quoted_ref()?,
            Some(c) if c.is_ascii_alphanumeric() => self.bare_ref()?,
            Some(c) => {
                return Err(A1NotationError::parse(
                    self.scanner.position(),
                    format!("unexpected character {}", describe(Some(c))),
                ))
            }
            None => {
                return Err(A1NotationError::parse(
                    self.scanner.position(),
                    "unexpected EOF",
                ))
            }
        };

        tracing::trace!(
            sheet_name = ?fragments.sheet_name,
            cell1 = ?fragments.cell1.as_ref().map(|f| f.text.as_str()),
            cell2 = ?fragments.cell2.as_ref().map(|f| f.text.as_str()),
            "parsed A1 notation fragments"
        );
        Ok(fragments)
    }

    /// `'...'`で始まる参照（必ずシート名）
    fn quoted_ref(&mut self) -> Result<Fragments, A1NotationError> {
        let sheet_name = self.quoted_name()?;

        match self.scanner.peek() {
            None => Ok(Fragments {
                sheet_name: Some(sheet_name),
                ..Fragments::default()
            }),
            Some('!') => {
                self.scanner.advance();
                self.cell_ref(Some(sheet_name))
            }
            found => Err(self.expected("\"!\"", found)),
        }
    }

    /// 英数字で始まる参照
    ///
    /// 最初の名前がシート名かセル名かは、その直後の文字で決まります。
    fn bare_ref(&mut self) -> Result<Fragments, A1NotationError> {
        let first = self.name()?;

        match self.scanner.peek() {
            None if is_cell_name(&first.text) => Ok(Fragments {
                sheet_name: None,
                cell1: Some(first.clone()),
                cell2: Some(first),
            }),
            None => Ok(Fragments {
                sheet_name: Some(first.text),
                ..Fragments::default()
            }),
            Some('!') => {
                self.scanner.advance();
                self.cell_ref(Some(first.text))
            }
            Some(':') => {
                self.scanner.advance();
                let second = self.name()?;
                self.expect_eof()?;
                Ok(Fragments {
                    sheet_name: None,
                    cell1: Some(first),
                    cell2: Some(second),
                })
            }
            found => Err(self.expected("\"!\" or \":\"", found)),
        }
    }

    /// `!`の後のセル参照（`name [":" name]`）
    fn cell_ref(&mut self, sheet_name: Option<String>) -> Result<Fragments, A1NotationError> {
        let cell1 = self.name()?;

        let cell2 = match self.scanner.peek() {
            None => cell1.clone(),
            Some(':') => {
                self.scanner.advance();
                let cell2 = self.name()?;
                self.expect_eof()?;
                cell2
            }
            found => return Err(self.expected("\":\"", found)),
        };

        Ok(Fragments {
            sheet_name,
            cell1: Some(cell1),
            cell2: Some(cell2),
        })
    }

    /// 引用符で囲まれたシート名（`''`は`'`として扱う）
    fn quoted_name(&mut self) -> Result<String, A1NotationError> {
        let start = self.scanner.position();
        let invalid = || A1NotationError::parse(start, "invalid sheet name");

        if !self.scanner.eat('\'') {
            return Err(invalid());
        }

        let mut name = String::new();
        loop {
            match self.scanner.peek() {
                None => return Err(invalid()),
                Some('\'') => {
                    self.scanner.advance();
                    if self.scanner.eat('\'') {
                        name.push('\'');
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    name.push(c);
                    self.scanner.advance();
                }
            }
        }

        if name.is_empty() {
            return Err(invalid());
        }
        Ok(name)
    }

    /// 英数字の連続（1文字以上）
    fn name(&mut self) -> Result<Fragment, A1NotationError> {
        let position = self.scanner.position();
        let mut text = String::new();

        while let Some(c) = self.scanner.peek().filter(char::is_ascii_alphanumeric) {
            text.push(c);
            self.scanner.advance();
        }

        if text.is_empty() {
            return Err(A1NotationError::parse(
                position,
                format!(
                    "invalid cell name: expected a letter or digit but found {}",
                    describe(self.scanner.peek())
                ),
            ));
        }
        Ok(Fragment { text, position })
    }

    /// 入力の終端であることを確認
    fn expect_eof(&self) -> Result<(), A1NotationError> {
        match self.scanner.peek() {
            None => Ok(()),
            found => Err(self.expected("EOF", found)),
        }
    }

    fn expected(&self, what: &str, found: Option<char>) -> A1NotationError {
        A1NotationError::parse(
            self.scanner.position(),
            format!("expected {} but found {}", what, describe(found)),
        )
    }
}

/// エラーメッセージ用の文字表現（終端は`EOF`）
fn describe(ch: Option<char>) -> String {
    match ch {
        Some(c) => format!("{:?}", c.to_string()),
        None => "EOF".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(text: &str) -> Fragments {
        NotationParser::new(text).parse().unwrap()
    }

    fn cells(f: &Fragments) -> (Option<&str>, Option<&str>) {
        (
            f.cell1.as_ref().map(|c| c.text.as_str()),
            f.cell2.as_ref().map(|c| c.text.as_str()),
        )
    }

    fn error_message(text: &str) -> (usize, String) {
        match NotationParser::new(text).parse() {
            Err(A1NotationError::Parse { position, message }) => (position, message),
            other => panic!("Expected Parse error for {:?}, got {:?}", text, other),
        }
    }

    #[test]
    fn test_sheet_with_range() {
        let f = fragments("Sheet1!A1:B2");
        assert_eq!(f.sheet_name.as_deref(), Some("Sheet1"));
        assert_eq!(cells(&f), (Some("A1"), Some("B2")));
        assert_eq!(f.cell2.unwrap().position, 10);
    }

    #[test]
    fn test_sheet_with_single_cell() {
        let f = fragments("Sheet1!C3");
        assert_eq!(f.sheet_name.as_deref(), Some("Sheet1"));
        assert_eq!(cells(&f), (Some("C3"), Some("C3")));
    }

    #[test]
    fn test_bare_cell_is_single_cell() {
        let f = fragments("A1");
        assert_eq!(f.sheet_name, None);
        assert_eq!(cells(&f), (Some("A1"), Some("A1")));
    }

    #[test]
    fn test_bare_non_cell_is_sheet_name() {
        for text in ["Sheet1", "A", "ABCD1", "1A"] {
            let f = fragments(text);
            assert_eq!(f.sheet_name.as_deref(), Some(text));
            assert_eq!(cells(&f), (None, None));
        }
    }

    #[test]
    fn test_bare_range_without_sheet() {
        let f = fragments("A:C");
        assert_eq!(f.sheet_name, None);
        assert_eq!(cells(&f), (Some("A"), Some("C")));

        let f = fragments("1:2");
        assert_eq!(cells(&f), (Some("1"), Some("2")));
    }

    #[test]
    fn test_quoted_sheet_name() {
        let f = fragments("'My Custom Sheet'!A:A");
        assert_eq!(f.sheet_name.as_deref(), Some("My Custom Sheet"));
        assert_eq!(cells(&f), (Some("A"), Some("A")));
    }

    #[test]
    fn test_quoted_sheet_only() {
        let f = fragments("'A1'");
        assert_eq!(f.sheet_name.as_deref(), Some("A1"));
        assert_eq!(cells(&f), (None, None));
    }

    #[test]
    fn test_quoted_escaped_quote() {
        let f = fragments("'Bob''s Sheet'!B2");
        assert_eq!(f.sheet_name.as_deref(), Some("Bob's Sheet"));

        let f = fragments("''''");
        assert_eq!(f.sheet_name.as_deref(), Some("'"));
    }

    #[test]
    fn test_quoted_keeps_case_and_unicode() {
        let f = fragments("'売上 2024'!a1");
        assert_eq!(f.sheet_name.as_deref(), Some("売上 2024"));
        assert_eq!(cells(&f), (Some("a1"), Some("a1")));
    }

    #[test]
    fn test_empty_input() {
        let (position, message) = error_message("");
        assert_eq!(position, 0);
        assert_eq!(message, "unexpected EOF");
    }

    #[test]
    fn test_unexpected_leading_character() {
        let (position, message) = error_message("!A1:B2");
        assert_eq!(position, 0);
        assert_eq!(message, "unexpected character \"!\"");
    }

    #[test]
    fn test_missing_cell_after_bang() {
        let (position, message) = error_message("Sheet1!");
        assert_eq!(position, 7);
        assert!(message.starts_with("invalid cell name"));
        assert!(message.ends_with("EOF"));
    }

    #[test]
    fn test_trailing_range_part() {
        let (position, message) = error_message("A1:B2:C3");
        assert_eq!(position, 5);
        assert_eq!(message, "expected EOF but found \":\"");

        let (_, message) = error_message("Sheet1!A1:B2:C3");
        assert_eq!(message, "expected EOF but found \":\"");
    }

    #[test]
    fn test_unexpected_separator() {
        let (position, message) = error_message("Sheet1?");
        assert_eq!(position, 6);
        assert_eq!(message, "expected \"!\" or \":\" but found \"?\"");
    }

    #[test]
    fn test_unexpected_after_quoted_name() {
        let (position, message) = error_message("'My Sheet':A1");
        assert_eq!(position, 10);
        assert_eq!(message, "expected \"!\" but found \":\"");
    }

    #[test]
    fn test_unexpected_after_cell() {
        let (_, message) = error_message("Sheet1!A1 ");
        assert_eq!(message, "expected \":\" but found \" \"");
    }

    #[test]
    fn test_invalid_quoted_names() {
        for text in ["''!A1:B2", "''", "'unterminated", "'abc''"] {
            let (position, message) = error_message(text);
            assert_eq!(position, 0, "{}", text);
            assert_eq!(message, "invalid sheet name", "{}", text);
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(Some('!')), "\"!\"");
        assert_eq!(describe(Some('"')), "\"\\\"\"");
        assert_eq!(describe(None), "EOF");
    }
}
