//! # 容量计算模块
//!
//! 根据载体尺寸计算可隐藏的比特数与字节数。像素内容与容量无关。

use crate::constants::{CHANNELS_PER_PIXEL, SENTINEL_BITS};
use crate::error::StegoError;

/// 载体可用的 LSB 总数，即 `W * H * 3`。
///
/// # Errors
///
/// 宽或高为零、或乘积溢出时返回 [`StegoError::InvalidCarrier`]。
pub fn capacity_bits(width: u32, height: u32) -> Result<usize, StegoError> {
    let invalid = StegoError::InvalidCarrier { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }

    usize::try_from(width)
        .ok()
        .zip(usize::try_from(height).ok())
        .and_then(|(w, h)| w.checked_mul(h))
        .and_then(|pixels| pixels.checked_mul(CHANNELS_PER_PIXEL))
        .ok_or(invalid)
}

/// 载体容量 (字节)：`floor(W * H * 3 / 8)`。
pub fn capacity_bytes(width: u32, height: u32) -> Result<usize, StegoError> {
    capacity_bits(width, height).map(|bits| bits / 8)
}

/// 加上 16 bit 结束标记后仍能放入载体的最大载荷长度 (字节)。
pub fn max_payload_bytes(width: u32, height: u32) -> Result<usize, StegoError> {
    capacity_bits(width, height).map(|bits| bits.saturating_sub(SENTINEL_BITS) / 8)
}

/// 成帧后的比特流长度：`8 * len + 16`。溢出时饱和，保证后续容量检查失败。
pub fn framed_bits(payload_len: usize) -> usize {
    payload_len.saturating_mul(8).saturating_add(SENTINEL_BITS)
}

/// 检查长度为 `payload_len` 的载荷能否放入给定尺寸的载体。
///
/// # Errors
///
/// * [`StegoError::InvalidCarrier`] - 尺寸无效。
/// * [`StegoError::CapacityExceeded`] - `8 * len + 16 > W * H * 3`。
pub fn ensure_fits(width: u32, height: u32, payload_len: usize) -> Result<(), StegoError> {
    let available_bits = capacity_bits(width, height)?;
    let required_bits = framed_bits(payload_len);

    if required_bits > available_bits {
        return Err(StegoError::CapacityExceeded {
            required_bits,
            available_bits,
        });
    }

    Ok(())
}
