//! Column Module
//!
//! 列番号と列文字（A, B, ..., Z, AA, ...）の相互変換、
//! およびセル名（例: "B12"）の分解を提供します。

use crate::error::A1NotationError;

/// セル名の列文字部分の最大長（"ZZZ" = 18278）
pub(crate) const MAX_COLUMN_LETTERS: usize = 3;

/// 1始まりの列番号を列文字に変換（1 -> "A", 26 -> "Z", 27 -> "AA"）
///
/// 全単射26進数で変換するため、0を表す文字はありません。
/// `0`を渡した場合は空文字列を返します。
///
/// # 使用例
///
/// ```rust
/// use a1notation::encode_column;
///
/// assert_eq!(encode_column(1), "A");
/// assert_eq!(encode_column(28), "AB");
/// assert_eq!(encode_column(18278), "ZZZ");
/// ```
pub fn encode_column(mut n: u32) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// 列文字を1始まりの列番号に変換（"A" -> 1, "aa" -> 27）
///
/// 大文字小文字は区別しません。空文字列、英字以外の文字、
/// `u32`に収まらない値の場合は`None`を返します。
pub fn decode_column(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }

    let mut value: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let index = (ch.to_ascii_uppercase() as u8 - b'A') as u32;
        value = value.checked_mul(26)?.checked_add(index + 1)?;
    }
    Some(value)
}

/// 文字列がセル参照の形（英字0〜3文字 + 数字1文字以上）かどうかを判定
///
/// `"A1"`, `"zz10"`, `"12"`は該当し、`"A"`, `"ABCD1"`, `"1A"`は該当しません。
pub(crate) fn is_cell_name(s: &str) -> bool {
    let letters = s.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    let digits = &s[letters..];
    letters <= MAX_COLUMN_LETTERS
        && !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
}

/// 分解済みのセル名
///
/// 列・行のどちらかが欠けている場合、その方向は範囲が無制限であることを表します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellName {
    /// 1始まりの列番号
    pub col: Option<u32>,

    /// 1始まりの行番号
    pub row: Option<u32>,
}

impl CellName {
    /// セル名を列文字部分と行番号部分に分解する
    ///
    /// # 引数
    ///
    /// * `fragment` - セル名（例: "B12", "A", "3"）
    /// * `position` - 入力中の`fragment`の開始位置（エラー報告用）
    ///
    /// # 戻り値
    ///
    /// * `Ok(CellName)` - 分解成功
    /// * `Err(A1NotationError::Parse)` - `letters{0,3} digits*`の形でない場合
    pub fn decode(fragment: &str, position: usize) -> Result<Self, A1NotationError> {
        let invalid =
            || A1NotationError::parse(position, format!("invalid cell name {:?}", fragment));

        let split = fragment
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(fragment.len());
        let (letters, digits) = fragment.split_at(split);

        if letters.len() > MAX_COLUMN_LETTERS || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if letters.is_empty() && digits.is_empty() {
            return Err(invalid());
        }

        let col = if letters.is_empty() {
            None
        } else {
            Some(decode_column(letters).ok_or_else(invalid)?)
        };
        let row = if digits.is_empty() {
            None
        } else {
            Some(digits.parse::<u32>().map_err(|_| invalid())?)
        };

        Ok(Self { col, row })
    }

    /// 列番号と行番号からセル名の文字列を組み立てる（欠けている部分は省略）
    pub fn render(col: Option<u32>, row: Option<u32>) -> String {
        let mut out = col.map(encode_column).unwrap_or_default();
        if let Some(row) = row {
            out.push_str(&row.to_string());
        }
        out
    }
}
