use image::{ImageBuffer, Rgb, RgbImage};
use lsb_sentinel::{
    cli::{CapacityArgs, HideArgs, RecoverArgs},
    handler::{handle_capacity, handle_hide, handle_recover},
    payload::PayloadKind,
};
use rand::RngCore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf: RgbImage = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(3))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgb([chunk[0], chunk[1], chunk[2]]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

fn hide_args(image: &Path, payload: &Path, dest: Option<PathBuf>) -> HideArgs {
    HideArgs {
        image: image.to_path_buf(),
        payload: payload.to_path_buf(),
        kind: PayloadKind::Text,
        dest,
        force: false,
    }
}

fn recover_args(image: &Path, output: Option<PathBuf>) -> RecoverArgs {
    RecoverArgs {
        image: image.to_path_buf(),
        kind: PayloadKind::Text,
        output,
        force: false,
        quiet: true,
    }
}

/// 验证从隐藏到恢复的完整流程
#[test]
fn test_handle_hide_and_recover_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let hidden_image_path = dir.path().join("hidden.png");
    let source_text_path = dir.path().join("source.txt");
    let recovered_text_path = dir.path().join("recovered.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_text = "This is a test message for the handler! 这是一个给处理器的测试信息！";
    fs::write(&source_text_path, original_text)?;

    // 2. 测试 handle_hide
    let written = handle_hide(hide_args(
        &original_image_path,
        &source_text_path,
        Some(hidden_image_path.clone()),
    ))?;
    assert_eq!(written, hidden_image_path);
    assert!(
        hidden_image_path.exists(),
        "Hidden image should be created."
    );

    // 3. 测试 handle_recover (显示进度)
    let mut args = recover_args(&hidden_image_path, Some(recovered_text_path.clone()));
    args.quiet = false;
    handle_recover(args)?;
    assert!(
        recovered_text_path.exists(),
        "Recovered text file should be created."
    );

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&recovered_text_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text must match the original."
    );

    Ok(())
}

/// 验证当用户不提供输出路径时，是否能正确生成默认路径并完成操作
#[test]
fn test_handle_hide_and_recover_with_defaults() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let source_text_path = dir.path().join("source.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_text = "Testing default path generation. 测试默认路径生成。";
    fs::write(&source_text_path, original_text)?;

    // 2. 测试 handle_hide，不提供 dest 路径
    let hidden = handle_hide(hide_args(&original_image_path, &source_text_path, None))?;

    let expected_hidden_path = dir.path().join("stego(txt)_image.png");
    assert_eq!(hidden, expected_hidden_path);
    assert!(
        expected_hidden_path.exists(),
        "Default hidden image should be created at: {:?}",
        expected_hidden_path
    );

    // 3. 测试 handle_recover，不提供输出路径
    let recovered = handle_recover(recover_args(&expected_hidden_path, None))?;

    let expected_recovered_path = dir.path().join("extracted_text.txt");
    assert_eq!(recovered, expected_recovered_path);

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&expected_recovered_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text from default file must match the original."
    );

    // 5. 再次执行时默认路径不会覆盖已有文件
    let second = handle_hide(hide_args(&original_image_path, &source_text_path, None))?;
    assert_eq!(second, dir.path().join("stego(txt)_image_1.png"));

    Ok(())
}

/// 隐藏一张嵌套图像，按图像类型命名并逐字节恢复
#[test]
fn test_hide_and_recover_nested_image() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let cover_path = dir.path().join("cover.png");
    let secret_path = dir.path().join("secret.png");

    create_test_image(&cover_path, 120, 120);
    create_test_image(&secret_path, 8, 8);
    let secret_bytes = fs::read(&secret_path)?;

    let mut args = hide_args(&cover_path, &secret_path, None);
    args.kind = PayloadKind::Image;
    let hidden = handle_hide(args)?;
    assert_eq!(hidden, dir.path().join("stego(img)_image.png"));

    let mut args = recover_args(&hidden, None);
    args.kind = PayloadKind::Image;
    let recovered = handle_recover(args)?;
    assert_eq!(recovered, dir.path().join("extracted_image.png"));

    // PNG 数据可能恰好包含结束标记，此时只能恢复出前缀
    let recovered_bytes = fs::read(&recovered)?;
    assert!(secret_bytes.starts_with(&recovered_bytes));

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let text_path = dir.path().join("text.txt");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);
    fs::write(&text_path, "some text")?;

    // 2. 场景一：测试覆盖保护
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;
    assert!(dest_path.exists());

    let result = handle_hide(hide_args(&image_path, &text_path, Some(dest_path.clone())));
    assert!(result.is_err(), "Execution should fail without --force when file exists.");
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 3. 场景二：测试强制覆盖
    let mut args = hide_args(&image_path, &text_path, Some(dest_path.clone()));
    args.force = true;
    let result = handle_hide(args);
    assert!(result.is_ok(), "Execution should succeed with --force when file exists.");

    let dummy_content = fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");

    // 4. recover 同样受保护
    let result = handle_recover(recover_args(&dest_path, Some(text_path.clone())));
    assert!(result.is_err());

    let mut args = recover_args(&dest_path, Some(text_path.clone()));
    args.force = true;
    handle_recover(args)?;
    assert_eq!(fs::read_to_string(&text_path)?, "some text");

    Ok(())
}

/// 验证空间不足时的错误处理
#[test]
fn test_handle_hide_not_enough_space() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let text_path = dir.path().join("large.txt");
    let dest_path = dir.path().join("dest.png");

    // 40x40 的随机图像只能容纳 598 字节
    create_test_image(&image_path, 40, 40);
    fs::write(&text_path, "a".repeat(5000))?;

    let result = handle_hide(hide_args(&image_path, &text_path, Some(dest_path.clone())));

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Not enough space"));
    }
    assert!(!dest_path.exists());

    Ok(())
}

/// 载体文件小于 1 KiB 时拒绝隐藏
#[test]
fn test_handle_hide_rejects_tiny_cover() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("tiny.png");
    let text_path = dir.path().join("text.txt");

    RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])).save(&image_path)?;
    fs::write(&text_path, "hi")?;

    let err = handle_hide(hide_args(&image_path, &text_path, None)).unwrap_err();
    assert!(err.to_string().contains("too small"));

    Ok(())
}

/// 输出为有损格式时拒绝隐藏
#[test]
fn test_handle_hide_rejects_lossy_destination() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let text_path = dir.path().join("text.txt");
    let dest_path = dir.path().join("dest.jpg");

    create_test_image(&image_path, 50, 50);
    fs::write(&text_path, "hi")?;

    let err = handle_hide(hide_args(&image_path, &text_path, Some(dest_path.clone()))).unwrap_err();
    assert!(err.to_string().contains("lossy"));
    assert!(!dest_path.exists());

    Ok(())
}

/// 没有隐藏数据的图像无法恢复
#[test]
fn test_handle_recover_without_hidden_data() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("clean.png");
    let output_path = dir.path().join("out.txt");

    RgbImage::from_pixel(32, 32, Rgb([128, 64, 32])).save(&image_path)?;

    let err = handle_recover(recover_args(&image_path, Some(output_path.clone()))).unwrap_err();
    assert!(err.to_string().contains("Failed to recover hidden data"));
    assert!(!output_path.exists());

    Ok(())
}

#[test]
fn test_handle_capacity() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    create_test_image(&image_path, 20, 20);

    handle_capacity(CapacityArgs { image: image_path })?;

    let missing = handle_capacity(CapacityArgs {
        image: dir.path().join("missing.png"),
    });
    assert!(missing.is_err());

    Ok(())
}
