//! # 对齐与几何计算
//!
//! 纯函数：输入为源图尺寸、画布尺寸与对齐方式，输出唯一坐标，便于测试。
//! 偏移量使用 `i64`，缩放结果高于画布时允许为负（由合成阶段裁剪）。

use serde::Serialize;

/// 缩放图在画布上的垂直对齐方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Top,
    Middle,
    Bottom,
}

impl Alignment {
    /// 解析对齐代码：`"t"` 顶部，`"m"` 居中，其他任何值都按底部处理。
    pub fn from_code(code: &str) -> Self {
        match code {
            "t" => Self::Top,
            "m" => Self::Middle,
            _ => Self::Bottom,
        }
    }

    /// 计算缩放图的垂直偏移。
    ///
    /// 居中使用向零截断的整数除法，奇数差值时偏上 1px。
    pub fn vertical_offset(self, canvas_height: u32, scaled_height: u32) -> i64 {
        let gap = canvas_height as i64 - scaled_height as i64;
        match self {
            Self::Top => 0,
            Self::Middle => gap / 2,
            Self::Bottom => gap,
        }
    }
}

/// 源图方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn of(width: u32, height: u32) -> Self {
        if is_landscape(width, height) {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// 宽 ≥ 高 即为横图，正方形也算横图。
pub fn is_landscape(width: u32, height: u32) -> bool {
    width >= height
}

/// 按目标宽度等比缩放后的高度：四舍五入，最小为 1。
pub fn scaled_height_for_width(src_width: u32, src_height: u32, target_width: u32) -> u32 {
    scale_side(src_height, target_width, src_width)
}

/// 按目标高度等比缩放后的宽度：四舍五入，最小为 1。
pub fn scaled_width_for_height(src_width: u32, src_height: u32, target_height: u32) -> u32 {
    scale_side(src_width, target_height, src_height)
}

// round(side * target / reference)，整数运算避免浮点误差；
// 分子最大约 2^66，需用 u128 承载
fn scale_side(side: u32, target: u32, reference: u32) -> u32 {
    if reference == 0 {
        return 1;
    }
    let numerator = side as u128 * target as u128 * 2 + reference as u128;
    let scaled = numerator / (reference as u128 * 2);
    scaled.clamp(1, u32::MAX as u128) as u32
}
