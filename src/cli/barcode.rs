//! Barcode 命令 - 计算、校验、规范化 EAN-13

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use super::output::format_output;
use crate::barcode;

/// Barcode 子命令
#[derive(Subcommand, Debug)]
pub enum BarcodeCommand {
    /// 计算 12 位主体的校验位
    CheckDigit {
        /// 12 位数字
        digits: String,
    },
    /// 校验 13 位条码
    Validate {
        /// 13 位数字
        code: String,
    },
    /// 12 位补齐校验位，13 位原样返回
    Normalize {
        /// 12 或 13 位数字
        input: String,
    },
}

/// Barcode 命令输出
#[derive(Debug, Serialize, PartialEq)]
pub struct BarcodeOutput {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_digit: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

impl BarcodeOutput {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            check_digit: None,
            code: None,
            valid: None,
        }
    }
}

/// 执行 barcode 子命令，输入非法时返回错误
pub fn run_barcode(command: &BarcodeCommand) -> Result<BarcodeOutput> {
    let output = match command {
        BarcodeCommand::CheckDigit { digits } => BarcodeOutput {
            check_digit: Some(barcode::check_digit(digits)?),
            ..BarcodeOutput::new(digits)
        },
        BarcodeCommand::Validate { code } => BarcodeOutput {
            valid: Some(barcode::is_valid(code)),
            ..BarcodeOutput::new(code)
        },
        BarcodeCommand::Normalize { input } => BarcodeOutput {
            code: Some(barcode::normalize(input)?.to_string()),
            ..BarcodeOutput::new(input)
        },
    };
    Ok(output)
}

/// 处理 barcode 命令
pub fn handle_barcode(command: BarcodeCommand, json: bool) -> Result<()> {
    let output = run_barcode(&command)?;
    println!(
        "{}",
        format_output(&output, json, |o| {
            if let Some(d) = o.check_digit {
                d.to_string()
            } else if let Some(code) = &o.code {
                code.clone()
            } else if o.valid == Some(true) {
                "valid".to_string()
            } else {
                "invalid".to_string()
            }
        })
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_check_digit() {
        let out = run_barcode(&BarcodeCommand::CheckDigit {
            digits: "400638133393".to_string(),
        })
        .unwrap();
        assert_eq!(out.check_digit, Some(1));
    }

    #[test]
    fn test_run_validate_never_errors() {
        let out = run_barcode(&BarcodeCommand::Validate {
            code: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(out.valid, Some(false));
    }

    #[test]
    fn test_run_normalize_invalid_input_is_error() {
        let err = run_barcode(&BarcodeCommand::Normalize {
            input: "123".to_string(),
        })
        .unwrap_err();
        assert!(err.to_string().contains("invalid barcode input"));
    }
}
