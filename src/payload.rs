//! # 载荷类型
//!
//! 编解码器只处理字节；载荷类型仅决定默认输出文件的命名。

use clap::ValueEnum;

/// 被隐藏文件的类型。
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadKind {
    /// 文本或任意二进制数据。
    #[default]
    Text,
    /// 嵌套图像。
    Image,
    /// 音频文件。
    Audio,
    /// 视频文件。
    Video,
}

impl PayloadKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    /// 隐写图像文件名前缀，例如 `stego(txt)`。
    pub fn stego_prefix(self) -> &'static str {
        match self {
            Self::Text => "stego(txt)",
            Self::Image => "stego(img)",
            Self::Audio => "stego(audio)",
            Self::Video => "stego(video)",
        }
    }

    /// 提取结果的文件扩展名。
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Image => "png",
            Self::Audio => "wav",
            Self::Video => "mp4",
        }
    }
}
