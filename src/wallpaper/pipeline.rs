//! # 缩放与合成流水线
//!
//! ## 设计思路
//!
//! 画布构建、等比缩放、对齐合成三步集中在此，全部作用于独占的 RGBA 缓冲。
//! 缩放优先走 `fast_image_resize`，失败时回退 `image::imageops::resize`。
//!
//! ## 实现思路
//!
//! 1. 以背景色填满目标尺寸画布（分配前先检查像素上限）
//! 2. 横图：缩放到画布宽度，按对齐方式计算垂直偏移
//! 3. 竖图：默认不合成；`FitHeight` 策略下缩放到画布高度并水平居中
//! 4. alpha-over 合成，画布外像素由 `overlay` 裁剪

use std::borrow::Cow;

use fast_image_resize as fr;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba, RgbaImage};

use super::align::{self, Alignment, Orientation};
use super::source::{Placement, SourceImage};
use super::{OverflowPolicy, PortraitStrategy, WallpaperConfig, WallpaperError, WallpaperHandler};

/// 创建以 `color` 填满的画布。
///
/// 不做尺寸检查，来自外部尺寸表的画布应先检查像素上限。
pub fn create_filled_canvas(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

/// 将 `layer` 以 alpha-over 方式合成到 `canvas` 的 `(x, y)` 处，越界部分被裁掉。
pub fn composite_over(canvas: &mut RgbaImage, layer: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(canvas, layer, x, y);
}

/// 分配 `width x height` 的 RGBA 缓冲前检查像素上限。
pub(crate) fn ensure_pixel_budget(
    label: &str,
    width: u32,
    height: u32,
    max_pixels: u64,
) -> Result<(), WallpaperError> {
    let pixels = (width as u64)
        .checked_mul(height as u64)
        .ok_or_else(|| WallpaperError::ResourceLimit(format!("{}像素数溢出", label)))?;

    if pixels > max_pixels {
        return Err(WallpaperError::ResourceLimit(format!(
            "{}过大：{}x{}，共 {} 像素（限制：{} 像素）",
            label, width, height, pixels, max_pixels
        )));
    }

    Ok(())
}

impl WallpaperHandler<'_> {
    /// 在画布上合成源图，返回落点；未合成时返回 `None`。
    pub(crate) fn compose(
        source: &SourceImage,
        canvas: &mut RgbaImage,
        alignment: Alignment,
        config: &WallpaperConfig,
    ) -> Result<Option<Placement>, WallpaperError> {
        let (src_width, src_height) = source.dimensions();
        let (canvas_width, canvas_height) = canvas.dimensions();

        let placement = match Orientation::of(src_width, src_height) {
            Orientation::Landscape => {
                let scaled_height =
                    align::scaled_height_for_width(src_width, src_height, canvas_width);
                Placement {
                    x: 0,
                    y: alignment.vertical_offset(canvas_height, scaled_height),
                    width: canvas_width,
                    height: scaled_height,
                }
            }
            Orientation::Portrait => match config.portrait_strategy {
                PortraitStrategy::Skip => {
                    log::warn!(
                        "⚠️ 竖图暂不支持合成，输出仅包含背景色 - 尺寸: {}x{}",
                        src_width,
                        src_height
                    );
                    return Ok(None);
                }
                PortraitStrategy::FitHeight => {
                    let scaled_width =
                        align::scaled_width_for_height(src_width, src_height, canvas_height);
                    Placement {
                        x: (canvas_width as i64 - scaled_width as i64) / 2,
                        y: 0,
                        width: scaled_width,
                        height: canvas_height,
                    }
                }
            },
        };

        let overflows = placement.width > canvas_width || placement.height > canvas_height;
        if overflows && config.overflow_policy == OverflowPolicy::Reject {
            return Err(WallpaperError::Overflow {
                scaled_width: placement.width,
                scaled_height: placement.height,
                canvas_width,
                canvas_height,
            });
        }

        ensure_pixel_budget(
            "缩放图",
            placement.width,
            placement.height,
            config.max_canvas_pixels,
        )?;

        let scaled = Self::resize_source(
            &source.pixels,
            placement.width,
            placement.height,
            config.resize_filter,
        )?;
        composite_over(canvas, &scaled, placement.x, placement.y);

        log::debug!(
            "🧩 合成完成 - {}x{} -> {}x{} @ ({}, {})",
            src_width,
            src_height,
            placement.width,
            placement.height,
            placement.x,
            placement.y
        );

        Ok(Some(placement))
    }

    /// 等比缩放源图到指定尺寸；尺寸一致时直接借用源缓冲。
    pub(crate) fn resize_source(
        source: &RgbaImage,
        target_width: u32,
        target_height: u32,
        filter: FilterType,
    ) -> Result<Cow<'_, RgbaImage>, WallpaperError> {
        if source.dimensions() == (target_width, target_height) {
            return Ok(Cow::Borrowed(source));
        }

        match Self::resize_with_fast_image_resize(source, target_width, target_height, filter) {
            Ok(resized) => Ok(Cow::Owned(resized)),
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}",
                    err
                );
                Ok(Cow::Owned(imageops::resize(
                    source,
                    target_width,
                    target_height,
                    filter,
                )))
            }
        }
    }

    fn resize_with_fast_image_resize(
        source: &RgbaImage,
        target_width: u32,
        target_height: u32,
        filter: FilterType,
    ) -> Result<RgbaImage, WallpaperError> {
        let (src_width, src_height) = source.dimensions();

        let src_image =
            fr::images::ImageRef::new(src_width, src_height, source.as_raw(), fr::PixelType::U8x4)
                .map_err(|e| WallpaperError::Resize(format!("构建源图像视图失败：{}", e)))?;

        let mut dst_image =
            fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(Self::to_fast_filter(filter)));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| WallpaperError::Resize(format!("fast_image_resize 执行失败：{}", e)))?;

        ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
            target_width,
            target_height,
            dst_image.into_vec(),
        )
        .ok_or_else(|| WallpaperError::Resize("fast_image_resize 输出缓冲长度异常".to_string()))
    }

    fn to_fast_filter(filter: FilterType) -> fr::FilterType {
        match filter {
            FilterType::Nearest => fr::FilterType::Box,
            FilterType::Triangle => fr::FilterType::Bilinear,
            FilterType::CatmullRom => fr::FilterType::CatmullRom,
            FilterType::Gaussian => fr::FilterType::Mitchell,
            FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn close_to(actual: &Rgba<u8>, expected: Rgba<u8>) -> bool {
        actual
            .0
            .iter()
            .zip(expected.0.iter())
            .all(|(a, e)| a.abs_diff(*e) <= 2)
    }

    fn solid_source(width: u32, height: u32, color: Rgba<u8>) -> SourceImage {
        SourceImage {
            pixels: RgbaImage::from_pixel(width, height, color),
        }
    }

    #[test]
    fn filled_canvas_has_uniform_color() {
        let canvas = create_filled_canvas(7, 5, RED);
        assert_eq!(canvas.dimensions(), (7, 5));
        assert!(canvas.pixels().all(|p| *p == RED));
    }

    #[test]
    fn resize_preserves_requested_dimensions() {
        let source = RgbaImage::from_pixel(200, 100, BLUE);
        let resized = WallpaperHandler::resize_source(&source, 117, 59, FilterType::Lanczos3)
            .expect("resize should succeed");

        assert_eq!(resized.dimensions(), (117, 59));
        assert!(close_to(resized.get_pixel(58, 29), BLUE));
    }

    #[test]
    fn same_size_resize_borrows_source() {
        let source = RgbaImage::from_pixel(30, 20, BLUE);
        let resized = WallpaperHandler::resize_source(&source, 30, 20, FilterType::Lanczos3)
            .expect("resize should succeed");

        assert!(matches!(resized, Cow::Borrowed(_)));
    }

    #[test]
    fn pixel_budget_rejects_oversized_buffers() {
        assert!(ensure_pixel_budget("画布", 1170, 2532, 40_000_000).is_ok());
        assert!(matches!(
            ensure_pixel_budget("画布", 100_000, 100_000, 40_000_000),
            Err(WallpaperError::ResourceLimit(_))
        ));
        assert!(matches!(
            ensure_pixel_budget("画布", u32::MAX, u32::MAX, 40_000_000),
            Err(WallpaperError::ResourceLimit(_))
        ));
    }

    #[test]
    fn landscape_top_alignment_draws_at_origin() {
        let source = solid_source(200, 100, BLUE);
        let mut canvas = create_filled_canvas(100, 300, RED);

        let placement = WallpaperHandler::compose(
            &source,
            &mut canvas,
            Alignment::Top,
            &WallpaperConfig::default(),
        )
        .expect("compose should succeed")
        .expect("landscape should be placed");

        assert_eq!(placement, Placement { x: 0, y: 0, width: 100, height: 50 });
        assert!(close_to(canvas.get_pixel(50, 10), BLUE));
        assert_eq!(*canvas.get_pixel(50, 60), RED);
    }

    #[test]
    fn landscape_bottom_alignment_draws_at_bottom() {
        let source = solid_source(200, 100, BLUE);
        let mut canvas = create_filled_canvas(100, 300, RED);

        let placement = WallpaperHandler::compose(
            &source,
            &mut canvas,
            Alignment::Bottom,
            &WallpaperConfig::default(),
        )
        .expect("compose should succeed")
        .expect("landscape should be placed");

        assert_eq!(placement.y, 250);
        assert_eq!(*canvas.get_pixel(50, 249), RED);
        assert!(close_to(canvas.get_pixel(50, 299), BLUE));
    }

    #[test]
    fn portrait_is_skipped_by_default() {
        let source = solid_source(100, 200, BLUE);
        let mut canvas = create_filled_canvas(50, 100, RED);

        let placement = WallpaperHandler::compose(
            &source,
            &mut canvas,
            Alignment::Middle,
            &WallpaperConfig::default(),
        )
        .expect("compose should succeed");

        assert!(placement.is_none());
        assert!(canvas.pixels().all(|p| *p == RED));
    }

    #[test]
    fn portrait_fit_height_centers_horizontally() {
        let source = solid_source(100, 200, BLUE);
        let mut canvas = create_filled_canvas(100, 100, RED);
        let config = WallpaperConfig {
            portrait_strategy: PortraitStrategy::FitHeight,
            ..WallpaperConfig::default()
        };

        let placement = WallpaperHandler::compose(&source, &mut canvas, Alignment::Top, &config)
            .expect("compose should succeed")
            .expect("fit-height should place the source");

        assert_eq!(placement, Placement { x: 25, y: 0, width: 50, height: 100 });
        assert_eq!(*canvas.get_pixel(10, 50), RED);
        assert!(close_to(canvas.get_pixel(50, 50), BLUE));
        assert_eq!(*canvas.get_pixel(90, 50), RED);
    }

    #[test]
    fn oversized_content_is_clipped_by_default() {
        // 正方形源图缩放到 100 宽后高 100，画布只有 60 高
        let source = solid_source(40, 40, BLUE);
        let mut canvas = create_filled_canvas(100, 60, RED);

        let placement = WallpaperHandler::compose(
            &source,
            &mut canvas,
            Alignment::Bottom,
            &WallpaperConfig::default(),
        )
        .expect("compose should succeed")
        .expect("landscape should be placed");

        assert_eq!(placement.y, -40);
        assert!(canvas.pixels().all(|p| close_to(p, BLUE)));
    }

    #[test]
    fn oversized_content_rejected_when_configured() {
        let source = solid_source(40, 40, BLUE);
        let mut canvas = create_filled_canvas(100, 60, RED);
        let config = WallpaperConfig {
            overflow_policy: OverflowPolicy::Reject,
            ..WallpaperConfig::default()
        };

        let result = WallpaperHandler::compose(&source, &mut canvas, Alignment::Bottom, &config);
        assert!(matches!(
            result,
            Err(WallpaperError::Overflow {
                scaled_width: 100,
                scaled_height: 100,
                canvas_width: 100,
                canvas_height: 60,
            })
        ));
        assert!(canvas.pixels().all(|p| *p == RED));
    }

    #[test]
    fn fit_height_wider_than_canvas_rejected_when_configured() {
        // 接近正方形的竖图缩放到 100 高后宽 99，超出 50 宽的画布
        let source = solid_source(100, 101, BLUE);
        let mut canvas = create_filled_canvas(50, 100, RED);
        let config = WallpaperConfig {
            overflow_policy: OverflowPolicy::Reject,
            portrait_strategy: PortraitStrategy::FitHeight,
            ..WallpaperConfig::default()
        };

        let result = WallpaperHandler::compose(&source, &mut canvas, Alignment::Middle, &config);
        assert!(matches!(
            result,
            Err(WallpaperError::Overflow {
                scaled_width: 99,
                scaled_height: 100,
                canvas_width: 50,
                canvas_height: 100,
            })
        ));
    }

    #[test]
    fn fit_height_wider_than_canvas_is_clipped_by_default() {
        let source = solid_source(100, 101, BLUE);
        let mut canvas = create_filled_canvas(50, 100, RED);
        let config = WallpaperConfig {
            portrait_strategy: PortraitStrategy::FitHeight,
            ..WallpaperConfig::default()
        };

        let placement = WallpaperHandler::compose(&source, &mut canvas, Alignment::Middle, &config)
            .expect("compose should succeed")
            .expect("fit-height should place the source");

        assert_eq!(placement, Placement { x: -24, y: 0, width: 99, height: 100 });
        assert!(canvas.pixels().all(|p| close_to(p, BLUE)));
    }

    #[test]
    fn oversized_scaled_layer_hits_pixel_budget() {
        let source = solid_source(40, 40, BLUE);
        let mut canvas = create_filled_canvas(100, 60, RED);
        let config = WallpaperConfig {
            max_canvas_pixels: 6_000,
            ..WallpaperConfig::default()
        };

        let result = WallpaperHandler::compose(&source, &mut canvas, Alignment::Top, &config);
        assert!(matches!(result, Err(WallpaperError::ResourceLimit(_))));
    }

    #[test]
    fn transparent_source_keeps_background() {
        let source = solid_source(20, 10, Rgba([0, 0, 0, 0]));
        let mut canvas = create_filled_canvas(20, 40, RED);

        WallpaperHandler::compose(
            &source,
            &mut canvas,
            Alignment::Middle,
            &WallpaperConfig::default(),
        )
        .expect("compose should succeed");

        assert!(canvas.pixels().all(|p| *p == RED));
    }

    #[test]
    fn half_transparent_source_blends_over_background() {
        // 40x20 -> 20x10 走 fast_image_resize，半透明蓝叠在不透明红上
        let source = solid_source(40, 20, Rgba([0, 0, 255, 128]));
        let mut canvas = create_filled_canvas(20, 40, RED);

        let placement = WallpaperHandler::compose(
            &source,
            &mut canvas,
            Alignment::Middle,
            &WallpaperConfig::default(),
        )
        .expect("compose should succeed")
        .expect("landscape should be placed");

        assert_eq!(placement, Placement { x: 0, y: 15, width: 20, height: 10 });
        assert!(close_to(canvas.get_pixel(10, 20), Rgba([127, 0, 128, 255])));
        assert_eq!(*canvas.get_pixel(10, 5), RED);
        assert_eq!(*canvas.get_pixel(10, 30), RED);
    }
}
