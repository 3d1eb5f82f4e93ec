//! # 错误类型模块
//!
//! 定义隐写编解码核心可能返回的所有错误。
//! 这些错误都是终止性的：一次编码或解码要么完整成功，
//! 要么立即以一个明确的错误类型结束，不存在部分结果。

use std::fmt;
use std::string::FromUtf8Error;

/// 隐写编码或解码过程中可能出现的错误。
#[derive(Debug)]
pub enum StegoError {
    /// 消息所需的载荷比特数超过了图像能提供的容量。
    CapacityExceeded { required: u64, available: u64 },

    /// 图像的像素数不足 32 个，放不下长度头。
    HeaderUnreadable { pixels: u64 },

    /// 长度头声明的字节数超过了图像实际能承载的上限。
    TruncatedData { declared: u64, capacity: u64 },

    /// 还原出的字节序列不是合法的 UTF-8 文本。
    InvalidEncoding(FromUtf8Error),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                required,
                available,
            } => write!(
                f,
                "The message needs {required} payload bits but the image only provides {available}."
            ),
            Self::HeaderUnreadable { pixels } => write!(
                f,
                "The image has {pixels} pixels, fewer than the 32 required by the length header."
            ),
            Self::TruncatedData { declared, capacity } => write!(
                f,
                "The length header declares {declared} hidden bytes but the image can hold at most {capacity}."
            ),
            Self::InvalidEncoding(e) => {
                write!(f, "The recovered bytes are not valid UTF-8: {e}.")
            }
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEncoding(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FromUtf8Error> for StegoError {
    fn from(e: FromUtf8Error) -> Self {
        Self::InvalidEncoding(e)
    }
}
