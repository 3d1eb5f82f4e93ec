/// 长度头占用的比特数。
/// 消息的 UTF-8 字节长度以 32 位大端无符号整数的形式写入，
/// 每个比特独占一个像素（扫描位置 0..32），
/// 因此单条消息最长可达 2^32 - 1 字节。
pub const LENGTH_HEADER_BITS: u64 = 32;

/// 载荷阶段每个像素可承载的比特数。
/// R、G、B 三个通道各写入一个比特，Alpha 通道永远不被修改。
pub const PAYLOAD_BITS_PER_PIXEL: u64 = 3;

/// 用于清除颜色通道最低有效位的掩码 (0b1111_1110)。
/// `(value & LSB_CLEAR_MASK) | bit` 保留高 7 位，只替换最低位。
pub const LSB_CLEAR_MASK: u8 = 0xFE;
