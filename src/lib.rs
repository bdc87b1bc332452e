//! # 手机壁纸生成工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 命令行 (main.rs, clap)                    │
//! │   参数解析 ── 自定义尺寸表 ── 退出码映射 (AppError)       │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕ Result<WallpaperOutput, WallpaperError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            库 (Rust)                              │
//! │                                                          │
//! │  ┌─ error ────── AppError (应用级错误 + 退出码)            │
//! │  │                                                       │
//! │  └─ wallpaper ── 壁纸生成流水线                            │
//! │      ├─ phone     机型尺寸表（只读）                       │
//! │      ├─ loader    PNG 加载与校验                           │
//! │      ├─ pipeline  画布·缩放·合成                           │
//! │      └─ output    命名与写盘                               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 应用级错误类型 `AppError`，命令行入口的返回类型 |
//! | [`wallpaper`] | 按机型尺寸生成壁纸：取背景色、等比缩放、对齐合成、写出 PNG |

pub mod error;
pub mod wallpaper;

pub use wallpaper::wallpaperize;
