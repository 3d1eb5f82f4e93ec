//! # 隐写编解码核心模块
//!
//! 纯函数式的比特级编解码：`encode` 把消息的 UTF-8 字节流藏进
//! 像素颜色通道的最低有效位，`decode` 按完全相同的规则逆向还原。
//!
//! 图像被划分为两个编址方式不同的区域：
//! - 长度头：扫描位置 0..32，每个比特独占一个像素，
//!   只修改由 `i % 3` 选出的那一个通道；
//! - 载荷区：扫描位置 32 起，每个像素按 R、G、B 的顺序
//!   连续承载最多 3 个比特。
//!
//! 这两套编址规则刻意分开命名和实现，不要把它们合并。

use crate::constants::{LENGTH_HEADER_BITS, LSB_CLEAR_MASK, PAYLOAD_BITS_PER_PIXEL};
use crate::error::StegoError;
use crate::grid::{PixelGrid, Rgba};

/// 把一段 UTF-8 文本编码进像素网格的副本并返回该副本。
///
/// 源网格不会被修改；返回的网格与源网格尺寸相同，
/// 除了被替换的最低有效位之外所有通道值保持不变，
/// Alpha 通道完全不被触碰。
///
/// # Errors
///
/// * [`StegoError::HeaderUnreadable`] - 网格的像素数不足 32，放不下长度头。
/// * [`StegoError::CapacityExceeded`] - 消息的比特数超出载荷区容量。
///   该检查在任何写入发生之前完成，绝不会截断消息或越界写入。
pub fn encode<G: PixelGrid + Clone>(source: &G, message: &str) -> Result<G, StegoError> {
    let pixels = pixel_count(source);
    if pixels < LENGTH_HEADER_BITS {
        return Err(StegoError::HeaderUnreadable { pixels });
    }

    // str::len() 给出的就是 UTF-8 编码后的字节数，而不是字符数
    let byte_len = message.len() as u64;
    let required = byte_len.saturating_mul(8);
    let available = payload_capacity_bits(source.width(), source.height());
    if required > available || byte_len > u64::from(u32::MAX) {
        return Err(StegoError::CapacityExceeded {
            required,
            available,
        });
    }

    let mut encoded = source.clone();
    write_length_header(&mut encoded, byte_len as u32);
    write_payload(&mut encoded, message.as_bytes());

    Ok(encoded)
}

/// 从编码过的像素网格中还原隐藏的文本。
///
/// 必须与 [`encode`] 的比特放置规则严格互逆：
/// 先按长度头的编址方式读出 32 位大端字节长度，
/// 再从载荷区恰好读出这么多字节。
/// 要么完整还原消息，要么返回一个明确的错误，绝不返回残缺的文本。
///
/// # Errors
///
/// * [`StegoError::HeaderUnreadable`] - 网格的像素数不足 32，读不到长度头。
/// * [`StegoError::TruncatedData`] - 长度头声明的字节数超过网格的实际容量。
/// * [`StegoError::InvalidEncoding`] - 还原出的字节不是合法的 UTF-8。
pub fn decode<G: PixelGrid>(grid: &G) -> Result<String, StegoError> {
    let pixels = pixel_count(grid);
    if pixels < LENGTH_HEADER_BITS {
        return Err(StegoError::HeaderUnreadable { pixels });
    }

    let declared = u64::from(read_length_header(grid));
    let capacity = capacity_bytes(grid.width(), grid.height());
    if declared > capacity {
        return Err(StegoError::TruncatedData { declared, capacity });
    }

    let bytes = read_payload(grid, declared as usize);
    String::from_utf8(bytes).map_err(StegoError::from)
}

/// 给定尺寸的图像最多能隐藏多少字节的消息。
pub fn capacity_bytes(width: u32, height: u32) -> u64 {
    payload_capacity_bits(width, height) / 8
}

/// 载荷区可承载的比特数。
/// 长度头独占前 32 个像素，其余每个像素可写入 3 个比特。
fn payload_capacity_bits(width: u32, height: u32) -> u64 {
    let pixels = u64::from(width) * u64::from(height);
    pixels
        .saturating_sub(LENGTH_HEADER_BITS)
        .saturating_mul(PAYLOAD_BITS_PER_PIXEL)
}

fn pixel_count<G: PixelGrid>(grid: &G) -> u64 {
    u64::from(grid.width()) * u64::from(grid.height())
}

/// 把消息的字节长度以 32 位大端整数的形式写入长度头。
///
/// 第 i 个比特独占扫描位置为 i 的整个像素
/// (`x = i % width`, `y = i / width`)，
/// 只修改由 `i % 3` 选出的通道（R→G→B 循环），
/// 同一像素的另外两个通道保持原样。
fn write_length_header<G: PixelGrid>(grid: &mut G, byte_len: u32) {
    let width = u64::from(grid.width());

    for i in 0..LENGTH_HEADER_BITS {
        let x = (i % width) as u32;
        let y = (i / width) as u32;
        let bit = ((byte_len >> (31 - i)) & 1) as u8;

        let mut px = grid.pixel(x, y);
        replace_channel_lsb(&mut px, (i % 3) as usize, bit);
        grid.set_pixel(x, y, px);
    }
}

/// 按与 [`write_length_header`] 完全相同的编址规则读出 32 位字节长度。
fn read_length_header<G: PixelGrid>(grid: &G) -> u32 {
    let width = u64::from(grid.width());
    let mut byte_len = 0u32;

    for i in 0..LENGTH_HEADER_BITS {
        let x = (i % width) as u32;
        let y = (i / width) as u32;

        let px = grid.pixel(x, y);
        let channel = match i % 3 {
            0 => px.r,
            1 => px.g,
            _ => px.b,
        };
        byte_len = (byte_len << 1) | u32::from(channel & 1);
    }

    byte_len
}

/// 把消息的比特流写入长度头之后的像素。
///
/// 按行优先顺序扫描整个网格，跳过扫描位置小于 32 的像素；
/// 每个像素依次在 R、G、B 通道各写入一个比特。
/// 比特流耗尽时立即停止，最后一个像素可能只被修改了部分通道。
fn write_payload<G: PixelGrid>(grid: &mut G, bytes: &[u8]) {
    let width = u64::from(grid.width());
    let pixels = pixel_count(grid);

    // 每个字节按最高位在前的顺序展开为 8 个比特
    let mut bits = bytes
        .iter()
        .flat_map(|&byte| (0..8u8).map(move |k| (byte >> (7 - k)) & 1))
        .peekable();

    for pos in LENGTH_HEADER_BITS..pixels {
        if bits.peek().is_none() {
            return;
        }

        let x = (pos % width) as u32;
        let y = (pos / width) as u32;
        let mut px = grid.pixel(x, y);

        for channel in 0..3 {
            let Some(bit) = bits.next() else { break };
            replace_channel_lsb(&mut px, channel, bit);
        }

        grid.set_pixel(x, y, px);
    }
}

/// 从载荷区读出恰好 `byte_len` 个字节。
///
/// 调用方必须事先保证网格容量足够（见 [`decode`] 的截断检查）。
fn read_payload<G: PixelGrid>(grid: &G, byte_len: usize) -> Vec<u8> {
    let width = u64::from(grid.width());
    let pixels = pixel_count(grid);

    let mut bytes = Vec::with_capacity(byte_len);
    let mut acc = 0u8;
    let mut filled = 0u8;

    for pos in LENGTH_HEADER_BITS..pixels {
        if bytes.len() == byte_len {
            break;
        }

        let x = (pos % width) as u32;
        let y = (pos / width) as u32;
        let px = grid.pixel(x, y);

        for channel in [px.r, px.g, px.b] {
            acc = (acc << 1) | (channel & 1);
            filled += 1;

            if filled == 8 {
                bytes.push(acc);
                acc = 0;
                filled = 0;
                if bytes.len() == byte_len {
                    break;
                }
            }
        }
    }

    bytes
}

fn replace_lsb(value: u8, bit: u8) -> u8 {
    (value & LSB_CLEAR_MASK) | bit
}

fn replace_channel_lsb(px: &mut Rgba, channel: usize, bit: u8) {
    match channel {
        0 => px.r = replace_lsb(px.r, bit),
        1 => px.g = replace_lsb(px.g, bit),
        _ => px.b = replace_lsb(px.b, bit),
    }
}
