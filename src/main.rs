//! # 手机壁纸生成工具 — 命令行入口
//!
//! 本文件仅负责参数解析、日志初始化与退出码映射。
//! 业务逻辑在 `wallpaper` 模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use wallpaperize::error::AppError;
use wallpaperize::wallpaper::{
    OverflowPolicy, PhoneSizeTable, PortraitStrategy, WallpaperConfig, WallpaperHandler,
    WallpaperRequest,
};

#[derive(Parser, Debug)]
#[command(name = "wallpaperize")]
#[command(version, about = "Scale a picture onto a phone-sized wallpaper canvas")]
struct Cli {
    /// Source PNG file
    #[arg(required_unless_present = "list")]
    src: Option<PathBuf>,

    /// Phone model code (see --list)
    #[arg(required_unless_present = "list")]
    phone_code: Option<String>,

    /// Vertical alignment: "t" top, "m" middle, anything else bottom
    #[arg(short, long, default_value = "b")]
    align: String,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = "out")]
    out_dir: PathBuf,

    /// JSON file with extra phone sizes, e.g. {"i_15": [1179, 2556]}
    #[arg(long)]
    sizes: Option<PathBuf>,

    /// What to do when the scaled picture does not fit the canvas: clip or reject
    #[arg(long, default_value = "clip")]
    overflow: String,

    /// Portrait sources: skip (background only) or fit-height
    #[arg(long, default_value = "skip")]
    portrait: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// List known phone codes and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("壁纸生成失败: {err}");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let table = load_table(cli.sizes.as_ref())?;

    if cli.list {
        for (code, size) in table.iter() {
            println!("{code:<8} {}x{}", size.width, size.height);
        }
        return Ok(());
    }

    let (Some(src), Some(phone_code)) = (cli.src, cli.phone_code) else {
        return Err(AppError::Usage("缺少 SRC 或 PHONE_CODE 参数".to_string()));
    };

    let config = WallpaperConfig {
        overflow_policy: OverflowPolicy::from_str(&cli.overflow).map_err(usage)?,
        portrait_strategy: PortraitStrategy::from_str(&cli.portrait).map_err(usage)?,
        ..WallpaperConfig::default()
    };

    let request = WallpaperRequest::new(src, phone_code, cli.align, cli.out_dir);
    let output = WallpaperHandler::new(config, &table).process(&request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output.path.display());
    }

    Ok(())
}

fn load_table(sizes: Option<&PathBuf>) -> Result<PhoneSizeTable, AppError> {
    let builtin = PhoneSizeTable::builtin();
    let Some(path) = sizes else {
        return Ok(builtin.clone());
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::Usage(format!("无法读取尺寸表 {}：{}", path.display(), e)))?;
    let custom = PhoneSizeTable::from_json_str(&content).map_err(usage)?;
    log::info!("📐 已加载自定义尺寸表: {}（{} 项）", path.display(), custom.len());
    Ok(builtin.merged_with(&custom))
}

// 参数取值错误按用法错误上报（退出码 2）
fn usage(err: impl std::fmt::Display) -> AppError {
    AppError::Usage(err.to_string())
}
