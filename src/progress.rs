//! # 进度报告模块
//!
//! 提取过程中每处理完一个像素就推送一次完成百分比。
//! 报告器只是观察者：它返回的错误会被记录并忽略，不会中断提取。

use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};

/// 提取进度的观察者。
pub trait ProgressReporter {
    /// 接收 `0..=100` 的完成百分比。
    fn report(&mut self, percent: u8) -> Result<()>;
}

impl<F> ProgressReporter for F
where
    F: FnMut(u8),
{
    fn report(&mut self, percent: u8) -> Result<()> {
        self(percent);
        Ok(())
    }
}

/// 在终端 (stderr) 上原地刷新百分比的报告器。
///
/// 百分比不变时不重复输出。
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    last: Option<u8>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// 结束进度行。只有输出过进度时才换行。
    pub fn finish(&self) {
        if self.last.is_some() {
            eprintln!();
        }
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&mut self, percent: u8) -> Result<()> {
        if self.last == Some(percent) {
            return Ok(());
        }
        self.last = Some(percent);

        let mut stderr = io::stderr().lock();
        write!(
            stderr,
            "\rScanning stego image: {}",
            format!("{percent:>3}%").cyan().bold()
        )?;
        stderr.flush()?;
        Ok(())
    }
}
