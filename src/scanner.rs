//! Scanner Module
//!
//! 入力文字列をUnicodeコードポイントの列として扱うカーソルを提供します。

/// 1文字先読みのカーソル
///
/// `peek()`は現在位置の文字を返し、入力の終端では`None`（EOF）を返します。
/// カーソルは1回の解析呼び出しの中だけで使用されます。
#[derive(Debug, Clone)]
pub(crate) struct Scanner {
    /// 入力のコードポイント列
    chars: Vec<char>,

    /// 現在位置
    pos: usize,
}

impl Scanner {
    /// 新しいScannerを生成
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// 現在位置の文字を返す（終端では`None`）
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// カーソルを1文字進める
    ///
    /// EOFで呼び出してはならない。
    pub fn advance(&mut self) {
        debug_assert!(self.pos < self.chars.len(), "advance() called at EOF");
        self.pos += 1;
    }

    /// 現在位置（0始まり）
    pub fn position(&self) -> usize {
        self.pos
    }

    /// 現在位置の文字が`ch`であれば消費して`true`を返す
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.advance();
            true
        } else {
            false
        }
    }
}
