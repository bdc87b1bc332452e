//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `WallpaperHandler` 只负责流程编排，不直接与 CLI 绑定。
//! 处理链路固定为：
//! 1. 查询机型尺寸并检查画布像素上限（两者都在读文件前失败）
//! 2. 加载并解码源图
//! 3. 取 (0,0) 像素作为背景色，构建画布
//! 4. 缩放并按对齐方式合成
//! 5. 创建输出目录并写出 PNG
//!
//! ## 实现思路
//!
//! - 尺寸表按引用持有，多个处理器可共享同一张只读表。
//! - 每一步的错误都原样返回，由调用方决定中止还是继续。
//! - 记录 `load/compose/write/total` 阶段耗时，便于性能诊断。

use std::path::Path;
use std::time::Instant;

use super::align::{Alignment, Orientation};
use super::output;
use super::pipeline::{create_filled_canvas, ensure_pixel_budget};
use super::source::{WallpaperOutput, WallpaperRequest};
use super::{PhoneSizeTable, WallpaperConfig, WallpaperError};

/// 壁纸生成器。
pub struct WallpaperHandler<'a> {
    config: WallpaperConfig,
    table: &'a PhoneSizeTable,
}

impl<'a> WallpaperHandler<'a> {
    /// 根据配置与尺寸表创建处理器。
    ///
    /// # 示例
    /// ```
    /// use wallpaperize::wallpaper::{PhoneSizeTable, WallpaperConfig, WallpaperHandler};
    ///
    /// let handler = WallpaperHandler::new(WallpaperConfig::default(), PhoneSizeTable::builtin());
    /// assert_eq!(handler.table().len(), 15);
    /// ```
    pub fn new(config: WallpaperConfig, table: &'a PhoneSizeTable) -> Self {
        Self { config, table }
    }

    pub fn config(&self) -> &WallpaperConfig {
        &self.config
    }

    pub fn table(&self) -> &'a PhoneSizeTable {
        self.table
    }

    /// 处理主入口：生成壁纸并写盘，返回结果摘要。
    pub fn process(&self, request: &WallpaperRequest) -> Result<WallpaperOutput, WallpaperError> {
        let total_start = Instant::now();

        let canvas_size = self.table.lookup(&request.phone_code)?;
        ensure_pixel_budget(
            "画布",
            canvas_size.width,
            canvas_size.height,
            self.config.max_canvas_pixels,
        )?;
        let alignment = Alignment::from_code(&request.align);

        let load_start = Instant::now();
        let source = Self::load_source(&request.src_file_name, &self.config)?;
        let load_elapsed = load_start.elapsed();

        let compose_start = Instant::now();
        let background = source.background_color();
        log::debug!("🎨 背景色（0,0 像素）: {:?}", background.0);

        let mut canvas = create_filled_canvas(canvas_size.width, canvas_size.height, background);
        let (src_width, src_height) = source.dimensions();
        let orientation = Orientation::of(src_width, src_height);
        let placement = Self::compose(&source, &mut canvas, alignment, &self.config)?;
        drop(source);
        let compose_elapsed = compose_start.elapsed();

        let write_start = Instant::now();
        let path = output::output_path(request);
        output::ensure_out_dir(&request.out_dir)?;
        output::write_png(&canvas, &path)?;
        let write_elapsed = write_start.elapsed();

        log::info!(
            "✅ 壁纸生成完成 - {} ({}x{}, {:?}) load={}ms compose={}ms write={}ms total={}ms",
            path.display(),
            canvas_size.width,
            canvas_size.height,
            orientation,
            load_elapsed.as_millis(),
            compose_elapsed.as_millis(),
            write_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(WallpaperOutput {
            path,
            canvas: canvas_size,
            orientation,
            placement,
        })
    }
}

/// 使用内置尺寸表与默认配置生成壁纸。
///
/// 输出写到 `<out_dir>/<源文件名>-<phone_code>-<align>.png`。
pub fn wallpaperize(
    src_file_name: impl AsRef<Path>,
    phone_code: &str,
    align: &str,
    out_dir: impl AsRef<Path>,
) -> Result<WallpaperOutput, WallpaperError> {
    let request = WallpaperRequest::new(
        src_file_name.as_ref(),
        phone_code,
        align,
        out_dir.as_ref(),
    );
    WallpaperHandler::new(WallpaperConfig::default(), PhoneSizeTable::builtin()).process(&request)
}
