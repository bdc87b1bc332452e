//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 库内部只返回 `WallpaperError`；命令行入口需要额外处理参数文件读取等 I/O，
//! 因此在最外层定义 `AppError`，并负责映射到进程退出码。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `WallpaperError` / `std::io::Error` 提供 `From` 转换，无需手动 map。

use crate::wallpaper::WallpaperError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 壁纸生成流水线错误（加载 / 合成 / 写盘）
    #[error("{0}")]
    Wallpaper(#[from] WallpaperError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 参数不合法
    #[error("参数错误: {0}")]
    Usage(String),

    /// 结果序列化失败
    #[error("输出序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AppError {
    /// 进程退出码：参数类问题为 2，其余为 1。
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Wallpaper(WallpaperError::UnknownPhoneCode(_)) => 2,
            Self::Wallpaper(_) | Self::Io(_) | Self::Serialize(_) => 1,
        }
    }
}
