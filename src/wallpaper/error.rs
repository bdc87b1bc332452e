//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载壁纸生成链路中的所有错误来源，避免进程级 `exit` 式处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配，
//! 由外层（CLI 或其他宿主）决定中止还是继续。

/// 壁纸生成统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum WallpaperError {
    #[error("无法打开源图片：{0}")]
    SourceOpen(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("未知机型代码：{0}")]
    UnknownPhoneCode(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error(
        "缩放后图片超出画布：缩放尺寸 {scaled_width}x{scaled_height}px，\
         画布尺寸 {canvas_width}x{canvas_height}px"
    )]
    Overflow {
        scaled_width: u32,
        scaled_height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },

    #[error("缩放错误：{0}")]
    Resize(String),

    #[error("无法创建输出目录：{0}")]
    CreateOutputDir(String),

    #[error("无法创建输出文件：{0}")]
    CreateOutputFile(String),

    #[error("编码错误：{0}")]
    Encode(String),
}

impl WallpaperError {
    /// 稳定的机器可读错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::SourceOpen(_) => "source_open",
            Self::InvalidFormat(_) => "invalid_format",
            Self::Decode(_) => "decode",
            Self::UnknownPhoneCode(_) => "unknown_phone_code",
            Self::ResourceLimit(_) => "resource_limit",
            Self::Overflow { .. } => "overflow",
            Self::Resize(_) => "resize",
            Self::CreateOutputDir(_) => "create_output_dir",
            Self::CreateOutputFile(_) => "create_output_file",
            Self::Encode(_) => "encode",
        }
    }

    /// 错误所处的流水线阶段（用于日志与诊断）。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::SourceOpen(_) | Self::InvalidFormat(_) | Self::Decode(_) => "load",
            Self::UnknownPhoneCode(_) => "lookup",
            Self::ResourceLimit(_) => "load",
            Self::Overflow { .. } | Self::Resize(_) => "compose",
            Self::CreateOutputDir(_) | Self::CreateOutputFile(_) | Self::Encode(_) => "write",
        }
    }
}
