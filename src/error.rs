//! 条码错误类型

use thiserror::Error;

/// 条码编解码错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BarcodeError {
    /// 输入不是指定长度的纯十进制数字串
    #[error("invalid barcode input {input:?}: expected exactly {expected} decimal digits")]
    InvalidInput { input: String, expected: &'static str },
}

impl BarcodeError {
    pub(crate) fn invalid(input: &str, expected: &'static str) -> Self {
        BarcodeError::InvalidInput {
            input: input.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = BarcodeError::invalid("12a", "12");
        assert_eq!(
            err.to_string(),
            "invalid barcode input \"12a\": expected exactly 12 decimal digits"
        );
    }
}
