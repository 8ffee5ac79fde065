//! # 比特成帧模块
//!
//! [`frame`] 把载荷展开为 "载荷比特 + 结束标记" 的比特流 (每字节高位在前)，
//! [`Unframer`] 则逐比特接收，识别结束标记并还原出之前的字节。

use crate::capacity::framed_bits;
use crate::constants::{SENTINEL, SENTINEL_BITS};

/// 惰性的比特流迭代器，每次产出一个 `0` 或 `1`。
#[derive(Debug, Clone)]
pub struct Bitstream<'a> {
    payload: &'a [u8],
    cursor: usize,
    len: usize,
}

/// 为 `payload` 构造以结束标记收尾的比特流，长度恰为 `8 * len + 16`。
pub fn frame(payload: &[u8]) -> Bitstream<'_> {
    Bitstream {
        payload,
        cursor: 0,
        len: framed_bits(payload.len()),
    }
}

impl Iterator for Bitstream<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.cursor >= self.len {
            return None;
        }

        let payload_bits = self.len - SENTINEL_BITS;
        let bit = if self.cursor < payload_bits {
            (self.payload[self.cursor / 8] >> (7 - self.cursor % 8)) & 1
        } else {
            let i = self.cursor - payload_bits;
            ((SENTINEL >> (SENTINEL_BITS - 1 - i)) & 1) as u8
        };

        self.cursor += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bitstream<'_> {}

/// 逐比特解帧器。
///
/// 已完成的字节随读随存，识别到结束标记后再截掉属于标记的部分。
#[derive(Debug, Default)]
pub struct Unframer {
    bytes: Vec<u8>,
    current: u8,
    window: u16,
    bits_read: usize,
}

impl Unframer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个比特，若最近的 16 个比特恰好构成结束标记则返回 `true`。
    pub fn push(&mut self, bit: u8) -> bool {
        let bit = bit & 1;
        self.current = (self.current << 1) | bit;
        self.window = (self.window << 1) | u16::from(bit);
        self.bits_read += 1;

        if self.bits_read % 8 == 0 {
            self.bytes.push(self.current);
            self.current = 0;
        }

        self.bits_read >= SENTINEL_BITS && self.window == SENTINEL
    }

    /// 目前为止读取的比特数。
    pub fn bits_read(&self) -> usize {
        self.bits_read
    }

    /// 返回结束标记之前的全部完整字节。
    ///
    /// 若标记前的比特数不是 8 的倍数，末尾不足一字节的比特被丢弃。
    /// 仅应在 [`Unframer::push`] 返回 `true` 之后调用。
    pub fn finish(mut self) -> Vec<u8> {
        let payload_bits = self.bits_read.saturating_sub(SENTINEL_BITS);
        self.bytes.truncate(payload_bits / 8);
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_single_byte() {
        let bits: Vec<u8> = frame(b"A").collect();
        let expected = [
            0, 1, 0, 0, 0, 0, 0, 1, // 'A'
            1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0,
        ];
        assert_eq!(bits, expected);
    }

    #[test]
    fn frame_empty_is_only_sentinel() {
        let stream = frame(b"");
        assert_eq!(stream.len(), SENTINEL_BITS);
        let bits: Vec<u8> = stream.collect();
        assert_eq!(&bits[..15], &[1; 15]);
        assert_eq!(bits[15], 0);
    }

    #[test]
    fn unframe_inverts_frame() {
        let payload = b"hello, carrier";
        let mut unframer = Unframer::new();
        let mut found = false;
        for bit in frame(payload) {
            assert!(!found, "marker reported before the end of the stream");
            found = unframer.push(bit);
        }
        assert!(found);
        assert_eq!(unframer.finish(), payload);
    }

    #[test]
    fn unaligned_marker_drops_partial_byte() {
        let mut unframer = Unframer::new();
        for bit in [1, 0, 1] {
            assert!(!unframer.push(bit));
        }
        let found = frame(b"").fold(false, |_, bit| unframer.push(bit));
        assert!(found);
        assert_eq!(unframer.bits_read(), 19);
        assert!(unframer.finish().is_empty());
    }
}
