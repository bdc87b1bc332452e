//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 在“尽可能早”的阶段执行输入校验，尽快失败，减少不必要的内存与 CPU 消耗。
//! 文件句柄只在加载作用域内持有，任何返回路径上都会被释放。
//!
//! ## 实现思路
//!
//! 1. 打开文件 + metadata 体积限制
//! 2. 读取字节后用 `infer` 校验 PNG 签名
//! 3. 读取 header 尺寸，按像素上限快速拒绝
//! 4. 按 PNG 格式完整解码并转换为 RGBA

use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use image::{ImageFormat, ImageReader};

use super::source::SourceImage;
use super::{WallpaperConfig, WallpaperError, WallpaperHandler};

const PNG_MIME: &str = "image/png";

impl WallpaperHandler<'_> {
    /// 从本地路径加载并解码源图。
    pub(crate) fn load_source(
        path: &Path,
        config: &WallpaperConfig,
    ) -> Result<SourceImage, WallpaperError> {
        log::info!("📁 开始读取源图片 - 路径: {}", path.display());

        let bytes = Self::read_source_bytes(path, config)?;
        Self::validate_png_signature(&bytes)?;

        let (header_width, header_height) = Self::inspect_dimensions(&bytes)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;

        let decoded = ImageReader::with_format(Cursor::new(&bytes), ImageFormat::Png)
            .decode()
            .map_err(|e| WallpaperError::Decode(format!("PNG 解码失败：{}", e)))?;

        let pixels = decoded.to_rgba8();
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(WallpaperError::Decode(format!("源图片尺寸无效：{}x{}", width, height)));
        }

        log::info!("✅ 源图片解码成功 - 尺寸: {}x{}", width, height);
        Ok(SourceImage { pixels })
    }

    fn read_source_bytes(path: &Path, config: &WallpaperConfig) -> Result<Vec<u8>, WallpaperError> {
        let file = File::open(path).map_err(|e| {
            WallpaperError::SourceOpen(format!("{}：{}", path.display(), e))
        })?;

        let metadata = file
            .metadata()
            .map_err(|e| WallpaperError::SourceOpen(format!("无法读取文件信息：{}", e)))?;

        if !metadata.is_file() {
            return Err(WallpaperError::SourceOpen(format!(
                "不是普通文件：{}",
                path.display()
            )));
        }

        if metadata.len() > config.max_file_size {
            return Err(WallpaperError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let mut bytes = Vec::with_capacity(metadata.len() as usize);
        BufReader::new(file)
            .read_to_end(&mut bytes)
            .map_err(|e| WallpaperError::SourceOpen(format!("无法读取图片文件：{}", e)))?;

        Ok(bytes)
    }

    /// 只接受 PNG：其他图片格式与非图片内容都按格式错误处理。
    pub(crate) fn validate_png_signature(bytes: &[u8]) -> Result<(), WallpaperError> {
        match infer::get(bytes) {
            Some(kind) if kind.mime_type() == PNG_MIME => Ok(()),
            Some(kind) => Err(WallpaperError::InvalidFormat(format!(
                "源文件不是 PNG：{}",
                kind.mime_type()
            ))),
            None => Err(WallpaperError::InvalidFormat("无法识别源文件类型".to_string())),
        }
    }

    /// 仅通过 header 读取宽高，用于在完整解码前做像素限制检查。
    fn inspect_dimensions(bytes: &[u8]) -> Result<(u32, u32), WallpaperError> {
        ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png)
            .into_dimensions()
            .map_err(|e| WallpaperError::Decode(format!("无法读取图片尺寸：{}", e)))
    }

    fn validate_pixel_limits(
        config: &WallpaperConfig,
        width: u32,
        height: u32,
    ) -> Result<(), WallpaperError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| WallpaperError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(WallpaperError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }
}
