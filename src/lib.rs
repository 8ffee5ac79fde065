//! # lsb_sentinel 库
//!
//! 本库包含以结束标记定界的 LSB 隐写编解码器，以及命令行工具使用的文件处理逻辑。
//!
//! 编解码器本身只处理内存中的 [`image::RgbImage`] 与字节切片：
//! [`embed`] 写入 "载荷比特 + `0xFFFE` 结束标记"，[`extract`] 读取直至遇到结束标记。

// 声明库包含的所有模块。

pub mod capacity;
pub mod cli;
pub mod constants;
pub mod error;
pub mod framer;
pub mod handler;
pub mod image_io;
pub mod paths;
pub mod payload;
pub mod progress;
pub mod steganography;

pub use error::StegoError;
pub use progress::ProgressReporter;
pub use steganography::{embed, embed_in_place, extract};
