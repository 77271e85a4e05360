//! EAN-13 条码校验模块
//!
//! 12 位主体通过加权求和得到校验位：奇数位（从 1 开始计）权重 1，偶数位权重 3，
//! 校验位 = (10 - 总和 mod 10) mod 10。
//!
//! ```
//! use food_keeper::barcode;
//!
//! assert_eq!(barcode::check_digit("400638133393").unwrap(), 1);
//! assert!(barcode::is_valid("4006381333931"));
//! assert_eq!(barcode::normalize("400638133393").unwrap().as_str(), "4006381333931");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BarcodeError;

fn all_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// 12 位数字主体（不含校验位）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digit12(String);

impl Digit12 {
    pub fn parse(input: &str) -> Result<Self, BarcodeError> {
        if all_digits(input, 12) {
            Ok(Self(input.to_string()))
        } else {
            Err(BarcodeError::invalid(input, "12"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 计算校验位
    pub fn check_digit(&self) -> u8 {
        let (odd, even) = self
            .0
            .bytes()
            .map(|b| u32::from(b - b'0'))
            .enumerate()
            .fold((0u32, 0u32), |(odd, even), (i, d)| {
                // i 从 0 开始，所以 i 为偶数时对应第 1、3、5... 位
                if i % 2 == 0 {
                    (odd + d, even)
                } else {
                    (odd, even + d)
                }
            });
        let total = odd + 3 * even;
        ((10 - total % 10) % 10) as u8
    }

    /// 追加校验位，得到完整 EAN-13
    pub fn with_check_digit(&self) -> Digit13 {
        let mut code = self.0.clone();
        code.push(char::from(b'0' + self.check_digit()));
        Digit13(code)
    }
}

/// 13 位完整条码
///
/// 只保证格式为 13 位数字，不保证校验位正确；需要校验时使用 [`Digit13::is_valid`]。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digit13(String);

impl Digit13 {
    pub fn parse(input: &str) -> Result<Self, BarcodeError> {
        if all_digits(input, 13) {
            Ok(Self(input.to_string()))
        } else {
            Err(BarcodeError::invalid(input, "13"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 前 12 位主体
    pub fn body(&self) -> Digit12 {
        Digit12(self.0[..12].to_string())
    }

    /// 第 13 位（携带的校验位）
    pub fn check(&self) -> u8 {
        self.0.as_bytes()[12] - b'0'
    }

    pub fn is_valid(&self) -> bool {
        self.body().check_digit() == self.check()
    }
}

macro_rules! digits_string_impls {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $ty {
            type Err = BarcodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = BarcodeError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::parse(&s)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }
    };
}

digits_string_impls!(Digit12);
digits_string_impls!(Digit13);

/// 计算 12 位主体的校验位
///
/// 输入不是恰好 12 位十进制数字时返回 `InvalidInput`。
pub fn check_digit(d12: &str) -> Result<u8, BarcodeError> {
    Ok(Digit12::parse(d12)?.check_digit())
}

/// 检查 13 位条码的校验位是否正确
///
/// 任何非 13 位数字的输入都返回 false，不会报错。
pub fn is_valid(d13: &str) -> bool {
    Digit13::parse(d13).map(|code| code.is_valid()).unwrap_or(false)
}

/// 规范化为 13 位条码
///
/// - 12 位：追加计算出的校验位
/// - 13 位：原样返回，不重新校验
/// - 其他：`InvalidInput`
pub fn normalize(input: &str) -> Result<Digit13, BarcodeError> {
    if all_digits(input, 13) {
        return Ok(Digit13(input.to_string()));
    }
    Digit12::parse(input)
        .map(|d12| d12.with_check_digit())
        .map_err(|_| BarcodeError::invalid(input, "12 or 13"))
}
