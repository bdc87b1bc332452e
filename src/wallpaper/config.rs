//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `WallpaperConfig`，默认值即历史行为：
//! Lanczos3 缩放、越界不拦截、竖图不合成。
//!
//! ## 实现思路
//!
//! - `Default` 提供与旧实现一致的配置。
//! - `OverflowPolicy` / `PortraitStrategy` 负责策略字符串解析与反向输出。
//! - 资源上限沿用加载阶段“尽早失败”的思路。

use image::imageops::FilterType;

use super::WallpaperError;

/// 壁纸生成配置。
#[derive(Debug, Clone)]
pub struct WallpaperConfig {
    /// 缩放滤镜。降采样必须使用 Lanczos 级别滤镜，否则锯齿明显。
    pub resize_filter: FilterType,
    /// 源文件允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 画布与缩放图的像素上限，尺寸表可由外部 JSON 提供，分配前必须检查。
    pub max_canvas_pixels: u64,
    /// 缩放结果超出画布（横图超高或竖图超宽）时的处理方式。
    pub overflow_policy: OverflowPolicy,
    /// 竖图处理策略。
    pub portrait_strategy: PortraitStrategy,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            resize_filter: FilterType::Lanczos3,
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_canvas_pixels: 40_000_000,
            overflow_policy: OverflowPolicy::Clip,
            portrait_strategy: PortraitStrategy::Skip,
        }
    }
}

/// 缩放后图片超出画布时的策略。
///
/// - `Clip`：照常按偏移绘制，画布外的部分被裁掉（历史行为）
/// - `Reject`：直接返回 `WallpaperError::Overflow`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    #[default]
    Clip,
    Reject,
}

impl OverflowPolicy {
    /// 从外部字符串解析策略。
    pub fn from_str(policy: &str) -> Result<Self, WallpaperError> {
        match policy.trim().to_lowercase().as_str() {
            "clip" => Ok(Self::Clip),
            "reject" => Ok(Self::Reject),
            other => Err(WallpaperError::InvalidFormat(format!(
                "未知越界策略：{}（可选：clip / reject）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clip => "clip",
            Self::Reject => "reject",
        }
    }
}

/// 竖图（高 > 宽）处理策略。
///
/// - `Skip`：不合成，输出仅有背景色（历史行为，功能未完成）
/// - `FitHeight`：缩放到画布高度并水平居中
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortraitStrategy {
    #[default]
    Skip,
    FitHeight,
}

impl PortraitStrategy {
    /// 从外部字符串解析策略。
    ///
    /// # 示例
    /// ```
    /// use wallpaperize::wallpaper::PortraitStrategy;
    ///
    /// let s = PortraitStrategy::from_str("fit-height")?;
    /// assert_eq!(s.as_str(), "fit-height");
    /// # Ok::<(), wallpaperize::wallpaper::WallpaperError>(())
    /// ```
    pub fn from_str(strategy: &str) -> Result<Self, WallpaperError> {
        match strategy.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fit-height" | "fit_height" => Ok(Self::FitHeight),
            other => Err(WallpaperError::InvalidFormat(format!(
                "未知竖图策略：{}（可选：skip / fit-height）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::FitHeight => "fit-height",
        }
    }
}
