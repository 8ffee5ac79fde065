//! # 图像读写
//!
//! 读取任意受支持格式的图像并转换为 RGB8；写出时只允许无损格式，
//! 有损压缩会破坏嵌入的最低有效位。

use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, RgbImage};
use std::path::Path;

/// 打开图像并转换为 RGB8 像素网格 (丢弃 alpha 通道)。
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to decode image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    Ok(image.into_rgb8())
}

/// 判断格式是否以无损方式保存像素。
pub fn is_lossless(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::WebP
            | ImageFormat::Qoi
    )
}

/// 确认 `path` 的扩展名对应无损格式。
pub fn ensure_lossless(path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path).with_context(|| {
        format!(
            "Cannot determine an image format from the extension of: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        is_lossless(format),
        "Output format {:?} is lossy and would destroy the hidden bits. \nUse PNG, BMP, TIFF, WebP or QOI instead: {}",
        format,
        path.to_string_lossy().red().bold()
    );

    Ok(format)
}

/// 以无损格式保存图像。
pub fn save_lossless(image: &RgbImage, path: &Path) -> Result<()> {
    let format = ensure_lossless(path)?;
    image.save_with_format(path, format).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}
