//! # lsb_cloak 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：
//! 把一段 UTF-8 文本写入图像像素颜色通道的最低有效位，
//! 之后再从图像中原样恢复出来。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod error;
pub mod grid;
pub mod handler;
pub mod steganography;
