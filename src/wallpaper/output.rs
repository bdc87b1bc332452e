//! # 输出命名与写盘
//!
//! 文件名规则：`{源文件名去扩展名}-{机型代码}-{对齐代码}.png`，放在输出目录下。
//! 输出目录不存在时自动创建；同名文件直接覆盖。

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use super::source::WallpaperRequest;
use super::WallpaperError;

/// 去掉目录与扩展名后的文件名。
///
/// ```
/// use wallpaperize::wallpaper::file_name_without_ext;
///
/// assert_eq!(file_name_without_ext("photo.png"), "photo");
/// assert_eq!(file_name_without_ext("shots/beach.v2.png"), "beach.v2");
/// ```
pub fn file_name_without_ext(file_name: impl AsRef<Path>) -> String {
    file_name
        .as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 输出文件名（不含目录）。
pub fn output_file_name(src_file_name: impl AsRef<Path>, phone_code: &str, align: &str) -> String {
    format!(
        "{}-{}-{}.png",
        file_name_without_ext(src_file_name),
        phone_code,
        align
    )
}

/// 请求对应的完整输出路径。
pub fn output_path(request: &WallpaperRequest) -> PathBuf {
    request.out_dir.join(output_file_name(
        &request.src_file_name,
        &request.phone_code,
        &request.align,
    ))
}

/// 输出目录不存在时创建（含缺失的父目录）。
pub(crate) fn ensure_out_dir(out_dir: &Path) -> Result<(), WallpaperError> {
    if out_dir.is_dir() {
        return Ok(());
    }

    log::info!("📂 创建输出目录: {}", out_dir.display());
    fs::create_dir_all(out_dir)
        .map_err(|e| WallpaperError::CreateOutputDir(format!("{}：{}", out_dir.display(), e)))
}

/// 以 PNG 编码写出画布，覆盖已有文件。
pub(crate) fn write_png(canvas: &RgbaImage, path: &Path) -> Result<(), WallpaperError> {
    let file = File::create(path)
        .map_err(|e| WallpaperError::CreateOutputFile(format!("{}：{}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);

    let (width, height) = canvas.dimensions();
    PngEncoder::new(&mut writer)
        .write_image(canvas.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| WallpaperError::Encode(format!("PNG 编码失败：{}", e)))?;

    writer
        .flush()
        .map_err(|e| WallpaperError::Encode(format!("写入输出文件失败：{}", e)))
}
