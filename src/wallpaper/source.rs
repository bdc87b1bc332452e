//! # 请求与中间模型
//!
//! ## 设计思路
//!
//! 将“外部请求”和“流水线中间结果”解耦：
//! - `WallpaperRequest` 表示调用方传入的四个参数
//! - `SourceImage` 表示已解码、不可变的源图
//! - `WallpaperOutput` 表示写盘后的结果摘要

use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use serde::Serialize;

use super::align::Orientation;
use super::phone::PhoneSize;

/// 一次壁纸生成请求。
#[derive(Debug, Clone)]
pub struct WallpaperRequest {
    /// 源 PNG 路径。
    pub src_file_name: PathBuf,
    /// 机型代码（尺寸表的键）。
    pub phone_code: String,
    /// 对齐代码，原样写入输出文件名。
    pub align: String,
    /// 输出目录。
    pub out_dir: PathBuf,
}

impl WallpaperRequest {
    pub fn new(
        src_file_name: impl Into<PathBuf>,
        phone_code: impl Into<String>,
        align: impl Into<String>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            src_file_name: src_file_name.into(),
            phone_code: phone_code.into(),
            align: align.into(),
            out_dir: out_dir.into(),
        }
    }
}

/// 加载阶段输出：解码后的 RGBA 源图。
pub(crate) struct SourceImage {
    pub(crate) pixels: RgbaImage,
}

impl SourceImage {
    pub(crate) fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// 左上角像素即背景色。
    pub(crate) fn background_color(&self) -> Rgba<u8> {
        *self.pixels.get_pixel(0, 0)
    }
}

/// 缩放图在画布上的落点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// 写盘结果摘要。
#[derive(Debug, Clone, Serialize)]
pub struct WallpaperOutput {
    /// 输出 PNG 的完整路径。
    pub path: PathBuf,
    pub canvas: PhoneSize,
    pub orientation: Orientation,
    /// 未合成（竖图默认策略）时为 `None`。
    pub placement: Option<Placement>,
}
