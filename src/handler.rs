//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::capacity::{capacity_bits, capacity_bytes, framed_bits, max_payload_bytes};
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::COVER_IMAGE_MIN_SIZE;
use crate::image_io::{ensure_lossless, load_rgb, save_lossless};
use crate::paths::{default_extracted_path, default_stego_path};
use crate::progress::ConsoleProgress;
use crate::steganography::{embed, extract};
use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体图像和载荷文件、检查载体大小与隐写空间、调用嵌入核心函数，
/// 最后以无损格式写出结果图像。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Returns
///
/// 实际写出的隐写图像路径。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取载体图像或载荷文件。
/// * 载体文件小于 1 KiB，或图像没有足够的空间。
/// * 输出文件已存在且未指定 `--force`，或输出格式不是无损格式。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<PathBuf> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_stego_path(&args.image, args.kind));
    ensure_writable(&dest, args.force)?;
    ensure_lossless(&dest)?;

    let cover_size = fs::metadata(&args.image)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?
        .len();
    anyhow::ensure!(
        cover_size >= COVER_IMAGE_MIN_SIZE,
        "The cover image is too small. \nMinimum size: {} KB, Actual: {} KB",
        format!("{:.2}", COVER_IMAGE_MIN_SIZE as f64 / 1024.0).green().bold(),
        format!("{:.2}", cover_size as f64 / 1024.0).red().bold()
    );

    let cover = load_rgb(&args.image)?;

    let payload = fs::read(&args.payload).with_context(|| {
        format!(
            "Unable to read payload file: {}",
            args.payload.to_string_lossy().red().bold()
        )
    })?;

    let (width, height) = cover.dimensions();
    let required_space = framed_bits(payload.len());
    let available_space = capacity_bits(width, height).with_context(|| {
        format!(
            "Image has unusable dimensions: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    debug!(
        "hiding {} bytes of {} data: {} bits required, {} bits available",
        payload.len(),
        args.kind.name(),
        required_space,
        available_space
    );

    anyhow::ensure!(
        available_space >= required_space,
        "Not enough space in the image to hide the {} file. \nRequired: {} bits, Available: {} bits",
        args.kind.name(),
        required_space.to_string().red().bold(),
        available_space.to_string().green().bold()
    );

    let stego = embed(&cover, &payload).with_context(|| {
        format!(
            "Failed to hide {} in the image.",
            args.payload.to_string_lossy().red().bold()
        )
    })?;

    save_lossless(&stego, &dest)?;

    println!(
        "The {} file has been successfully hidden and saved: {}",
        args.kind.name(),
        dest.to_string_lossy().green().bold()
    );

    Ok(dest)
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取隐写图像、在终端显示扫描进度、调用提取核心函数，
/// 最后将恢复的内容写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `RecoverArgs` 结构体。
///
/// # Returns
///
/// 实际写出的文件路径。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中找不到结束标记 (未隐藏数据或已被有损压缩破坏)。
/// * 输出文件已存在且未指定 `--force`，或无法写入。
pub fn handle_recover(args: RecoverArgs) -> Result<PathBuf> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_extracted_path(&args.image, args.kind));
    ensure_writable(&output, args.force)?;

    let stego = load_rgb(&args.image)?;

    let result = if args.quiet {
        extract(&stego, &mut |_: u8| {})
    } else {
        let mut progress = ConsoleProgress::new();
        let result = extract(&stego, &mut progress);
        progress.finish();
        result
    };

    let recovered = result.with_context(|| {
        format!(
            "Failed to recover hidden data from '{}'. \nThe image may not contain a hidden file or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&output, &recovered).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} bytes of {} data have been successfully recovered and saved: {}",
        recovered.len().to_string().green(),
        args.kind.name(),
        output.to_string_lossy().green().bold()
    );

    Ok(output)
}

/// 处理 'Capacity' 命令的执行逻辑：打印图像尺寸与可隐藏的载荷大小。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let cover = load_rgb(&args.image)?;
    let (width, height) = cover.dimensions();

    let capacity = capacity_bytes(width, height).with_context(|| {
        format!(
            "Image has unusable dimensions: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let max_payload = max_payload_bytes(width, height)?;

    println!(
        "{}: {}x{} pixels",
        args.image.to_string_lossy().bold(),
        width,
        height
    );
    println!(
        "Capacity: {} bytes ({} KB)",
        capacity.to_string().green().bold(),
        format!("{:.2}", capacity as f64 / 1024.0).green()
    );
    println!(
        "Largest payload including the end marker: {} bytes",
        max_payload.to_string().green().bold()
    );

    Ok(())
}

/// 目标文件已存在且未强制覆盖时返回错误。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}
