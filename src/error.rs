use thiserror::Error;

/// 隐写编解码器可能返回的错误。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StegoError {
    /// 载体尺寸为零，或比特容量超出 `usize` 范围。
    #[error("invalid carrier dimensions {width}x{height}")]
    InvalidCarrier { width: u32, height: u32 },

    /// 载荷加结束标记所需的比特数超过载体容量。
    #[error(
        "payload needs {required_bits} bits (including the end marker) but the carrier only has {available_bits}"
    )]
    CapacityExceeded {
        required_bits: usize,
        available_bits: usize,
    },

    /// 扫描完全部像素仍未遇到结束标记。
    #[error("no end-of-data marker found after scanning {scanned_bits} bits")]
    SentinelNotFound { scanned_bits: usize },
}
