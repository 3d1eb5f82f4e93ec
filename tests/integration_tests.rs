//! `hide` / `recover` 两条命令的端到端测试：
//! 经由真实的 PNG 文件完成隐藏与恢复的完整流程。

use image::{Rgba, RgbaImage};
use lsb_cloak::{
    cli::{HideArgs, RecoverArgs},
    handler::{handle_hide, handle_recover},
};
use rand::Rng;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一张带随机像素的测试图像并保存到磁盘
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut rng = rand::rng();
    let img = RgbaImage::from_fn(width, height, |_, _| {
        Rgba([rng.random(), rng.random(), rng.random(), 255])
    });

    img.save(path).expect("Failed to create test image.");
}

/// 验证从隐藏到恢复的完整流程，消息混合 ASCII、中文和 Emoji
#[test]
fn test_hide_and_recover_roundtrip() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("cover.png");
    let hidden_image_path = dir.path().join("hidden.png");
    let source_text_path = dir.path().join("secret.txt");
    let recovered_text_path = dir.path().join("recovered.txt");

    create_test_image(&original_image_path, 120, 80);
    let original_text = "Ho! Ho! Ho! 🎅 圣诞快乐！Nothing to see here.";
    fs::write(&source_text_path, original_text)?;

    // 2. 隐藏
    handle_hide(HideArgs {
        image: original_image_path,
        text: source_text_path,
        dest: Some(hidden_image_path.clone()),
        force: false,
    })?;
    assert!(hidden_image_path.exists(), "Hidden image should be created.");

    // 3. 恢复
    handle_recover(RecoverArgs {
        image: hidden_image_path,
        text: Some(recovered_text_path.clone()),
        force: false,
    })?;

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&recovered_text_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text must match the original."
    );

    Ok(())
}

/// 验证不提供输出路径时能正确生成缺省路径并完成整个流程
#[test]
fn test_default_output_paths() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let source_text_path = dir.path().join("source.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_text = "Default paths should just work. 缺省路径应当开箱即用。";
    fs::write(&source_text_path, original_text)?;

    // hide 不提供 dest：应在输入图像旁生成 doctored_original.png
    handle_hide(HideArgs {
        image: original_image_path,
        text: source_text_path,
        dest: None,
        force: false,
    })?;
    let expected_hidden_path = dir.path().join("doctored_original.png");
    assert!(
        expected_hidden_path.exists(),
        "Default hidden image should be created at: {:?}",
        expected_hidden_path
    );

    // recover 不提供 text：应生成 recovered_doctored_original.txt
    handle_recover(RecoverArgs {
        image: expected_hidden_path,
        text: None,
        force: false,
    })?;
    let expected_recovered_path = dir.path().join("recovered_doctored_original.txt");
    assert!(
        expected_recovered_path.exists(),
        "Default recovered text file should be created at: {:?}",
        expected_recovered_path
    );

    let recovered_text = fs::read_to_string(&expected_recovered_path)?;
    assert_eq!(original_text, recovered_text);

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let text_path = dir.path().join("text.txt");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);
    fs::write(&text_path, "some text")?;

    // 先占住目标文件，模拟输出文件已存在的场景
    fs::write(&dest_path, "placeholder that must not be clobbered")?;

    // 不带 --force：操作必须失败
    let result = handle_hide(HideArgs {
        image: image_path.clone(),
        text: text_path.clone(),
        dest: Some(dest_path.clone()),
        force: false,
    });
    assert!(
        result.is_err(),
        "Execution should fail without --force when file exists."
    );
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }
    assert_eq!(
        fs::read(&dest_path)?,
        b"placeholder that must not be clobbered",
        "The existing file must be left alone on failure."
    );

    // 带 --force：操作必须成功并真正覆盖文件
    handle_hide(HideArgs {
        image: image_path,
        text: text_path,
        dest: Some(dest_path.clone()),
        force: true,
    })?;
    assert_ne!(fs::read(&dest_path)?, b"placeholder that must not be clobbered");

    Ok(())
}

/// 验证图像空间不足时的错误处理
#[test]
fn test_hide_not_enough_space() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let text_path = dir.path().join("large.txt");
    let dest_path = dir.path().join("dest.png");

    // 10x10 的图像最多只能承载 25 字节
    create_test_image(&image_path, 10, 10);
    fs::write(&text_path, "a".repeat(5000))?;

    let result = handle_hide(HideArgs {
        image: image_path,
        text: text_path,
        dest: Some(dest_path.clone()),
        force: false,
    });

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Not enough space"));
    }
    assert!(!dest_path.exists(), "No output may be produced on failure.");

    Ok(())
}
