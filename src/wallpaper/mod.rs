//! # 壁纸生成模块（wallpaper）
//!
//! ## 设计思路
//!
//! 该模块将“机型尺寸查询 → 加载校验 → 画布构建 → 缩放对齐合成 → 写出 PNG”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：编排整条处理流水线
//! - `phone`：机型代码 → 画布尺寸的只读表
//! - `loader`：文件加载、PNG 签名与资源上限校验
//! - `align`：方向判断、等比尺寸与对齐偏移（纯函数）
//! - `pipeline`：画布填充、缩放、alpha 合成
//! - `output`：输出命名、目录创建与 PNG 编码
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! wallpaperize() / WallpaperHandler::process
//!    ↓
//! phone.rs（机型尺寸，未知代码立即失败）
//!    ↓
//! loader.rs（读取 + 签名 + 像素上限 + 解码）
//!    ↓
//! pipeline.rs（背景画布 + 缩放 + 对齐合成）
//!    ↓
//! output.rs（建目录 + 写 PNG）
//!    ↓
//! 返回 WallpaperOutput / WallpaperError
//! ```

mod align;
mod config;
mod error;
mod handler;
mod loader;
mod output;
mod phone;
mod pipeline;
mod source;

pub use align::{
    is_landscape, scaled_height_for_width, scaled_width_for_height, Alignment, Orientation,
};
pub use config::{OverflowPolicy, PortraitStrategy, WallpaperConfig};
pub use error::WallpaperError;
pub use handler::{wallpaperize, WallpaperHandler};
pub use output::{file_name_without_ext, output_file_name, output_path};
pub use phone::{PhoneSize, PhoneSizeTable};
pub use pipeline::{composite_over, create_filled_canvas};
pub use source::{Placement, WallpaperOutput, WallpaperRequest};
