//! # LSB 编解码核心
//!
//! 按行优先 (先 y 后 x) 遍历像素，每个像素依次使用 R、G、B 三个通道的最低有效位。
//! 嵌入与提取必须使用完全相同的扫描顺序。

use crate::capacity::ensure_fits;
use crate::error::StegoError;
use crate::framer::{Unframer, frame};
use crate::progress::ProgressReporter;
use image::RgbImage;
use log::{debug, warn};

/// 把 `payload` 嵌入 `carrier` 的副本并返回隐写后的图像。
///
/// 原图保持不变。
///
/// # Errors
///
/// 见 [`embed_in_place`]。
pub fn embed(carrier: &RgbImage, payload: &[u8]) -> Result<RgbImage, StegoError> {
    let mut stego = carrier.clone();
    embed_in_place(&mut stego, payload)?;
    Ok(stego)
}

/// 直接在 `carrier` 上嵌入 `payload`。
///
/// 所有检查都在修改任何像素之前完成：失败时 `carrier` 保持原样。
/// 比特流耗尽后，剩余通道的值原样保留。
///
/// # Errors
///
/// * [`StegoError::InvalidCarrier`] - 图像宽或高为零。
/// * [`StegoError::CapacityExceeded`] - `8 * len + 16` 超过 `W * H * 3`。
pub fn embed_in_place(carrier: &mut RgbImage, payload: &[u8]) -> Result<(), StegoError> {
    let (width, height) = carrier.dimensions();
    ensure_fits(width, height, payload.len())?;

    let mut bits = frame(payload);
    let total_bits = bits.len();

    // `pixels_mut` 按行优先产出像素，与提取顺序一致。
    'pixels: for pixel in carrier.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            let Some(bit) = bits.next() else {
                break 'pixels;
            };
            *channel = (*channel & !1) | bit;
        }
    }

    debug!(
        "embedded {} payload bytes ({} bits) into {}x{} carrier",
        payload.len(),
        total_bits,
        width,
        height
    );

    Ok(())
}

/// 从隐写图像中提取载荷。
///
/// 每处理完一个像素调用一次 `reporter`，百分比单调不减；
/// 一旦最近的 16 个比特构成结束标记就立即停止扫描。
/// 报告器返回的错误只记录日志，不影响提取结果。
///
/// # Errors
///
/// 读完全部 `3 * W * H` 个比特仍未找到结束标记时返回 [`StegoError::SentinelNotFound`]。
pub fn extract<R>(stego: &RgbImage, reporter: &mut R) -> Result<Vec<u8>, StegoError>
where
    R: ProgressReporter + ?Sized,
{
    let (width, height) = stego.dimensions();
    let total_pixels = u64::from(width) * u64::from(height);

    let mut unframer = Unframer::new();
    let mut reporter_failed = false;

    for (processed, pixel) in (1u64..).zip(stego.pixels()) {
        let found = pixel.0.iter().any(|&channel| unframer.push(channel & 1));

        let percent = (processed * 100 / total_pixels) as u8;
        if let Err(err) = reporter.report(percent) {
            if !reporter_failed {
                warn!("progress reporter failed, continuing without it: {err:#}");
                reporter_failed = true;
            }
        }

        if found {
            debug!(
                "end marker found after {} bits ({} of {} pixels)",
                unframer.bits_read(),
                processed,
                total_pixels
            );
            return Ok(unframer.finish());
        }
    }

    let scanned_bits = unframer.bits_read();
    debug!(
        "scanned {} bits of a {}x{} image without an end marker",
        scanned_bits, width, height
    );
    Err(StegoError::SentinelNotFound { scanned_bits })
}
