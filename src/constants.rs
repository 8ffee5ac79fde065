/// 数据结束标记：`1111111111111110`。
/// 提取时一旦最近读取的 16 个比特等于该值，即停止扫描。
pub const SENTINEL: u16 = 0xFFFE;

/// 结束标记占用的比特数。
pub const SENTINEL_BITS: usize = 16;

/// 每个像素可用于隐写的通道数 (R, G, B)，每个通道存储 1 bit。
pub const CHANNELS_PER_PIXEL: usize = 3;

/// 载体图像文件在磁盘上的最小字节数 (1 KiB)。
pub const COVER_IMAGE_MIN_SIZE: u64 = 1024;

/// `hide` 未指定输出路径时使用的文件名后缀，前缀取决于载荷类型。
pub const STEGO_IMAGE_SUFFIX: &str = "_image.png";

/// `recover` 未指定输出路径时使用的文件名前缀。
pub const EXTRACTED_PREFIX: &str = "extracted_";
