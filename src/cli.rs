//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::payload::PayloadKind;
use clap::Parser;
use std::path::PathBuf;

/// 基于 LSB (最低有效位) 隐写术的命令行工具，可在无损格式图像中隐藏任意文件，并以结束标记定位数据末尾。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "基于 LSB (最低有效位) 隐写术的命令行工具，可在无损格式图像 (如 PNG, BMP) 中隐藏文本、图像、音频或视频文件。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏一个文件。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文件。
    Recover(RecoverArgs),

    /// 显示图像可容纳的载荷大小。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用作载体的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文件路径。
    #[arg(short, long)]
    pub payload: PathBuf,

    /// 被隐藏文件的类型，决定默认输出文件名。
    #[arg(short, long, value_enum, default_value_t)]
    pub kind: PayloadKind,

    /// 结果图像的保存路径，必须是无损格式。缺省时在载体所在目录生成。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 隐藏了数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 被隐藏文件的类型，决定默认输出文件名。
    #[arg(short, long, value_enum, default_value_t)]
    pub kind: PayloadKind,

    /// 恢复内容的保存路径。缺省时在图像所在目录生成。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    /// 不显示扫描进度。
    #[arg(short, long)]
    pub quiet: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 载体图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
