//! # 输出路径工具

use crate::constants::{EXTRACTED_PREFIX, STEGO_IMAGE_SUFFIX};
use crate::payload::PayloadKind;
use std::path::{Path, PathBuf};

/// 返回 `dir/file_name`；若已存在，则依次尝试 `stem_1.ext`、`stem_2.ext`……
pub fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = name.extension().map(|e| e.to_string_lossy().into_owned());

    (1u32..)
        .map(|n| match &ext {
            Some(ext) => dir.join(format!("{stem}_{n}.{ext}")),
            None => dir.join(format!("{stem}_{n}")),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// 文件所在目录；没有父目录时为当前目录。
pub fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// `hide` 的默认输出路径，与载体位于同一目录。
pub fn default_stego_path(cover: &Path, kind: PayloadKind) -> PathBuf {
    let file_name = format!("{}{}", kind.stego_prefix(), STEGO_IMAGE_SUFFIX);
    unique_path(parent_dir(cover), &file_name)
}

/// `recover` 的默认输出路径，与隐写图像位于同一目录。
pub fn default_extracted_path(stego: &Path, kind: PayloadKind) -> PathBuf {
    let file_name = format!("{EXTRACTED_PREFIX}{}.{}", kind.name(), kind.extension());
    unique_path(parent_dir(stego), &file_name)
}
