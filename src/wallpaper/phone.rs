//! # 机型尺寸表
//!
//! ## 设计思路
//!
//! 尺寸表是一个不可变值，构建后按引用传入流水线，不存在可变全局状态。
//! 内置表通过 `Lazy` 只初始化一次，之后只读。
//!
//! 未知机型必须得到显式的“未找到”结果，调用方无法绕过。

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::WallpaperError;

/// 内置 iPhone 壁纸分辨率（宽, 高）。
const BUILTIN_SIZES: [(&str, u32, u32); 15] = [
    ("i_xr", 828, 1792),
    ("i_xsx", 1242, 2688),
    ("i_xs", 1125, 2436),
    ("i_x", 1125, 2436),
    ("i_11px", 1242, 2688),
    ("i_11p", 1125, 2436),
    ("i_11", 828, 1792),
    ("i_12pm", 1284, 2778),
    ("i_12p", 1170, 2532),
    ("i_12m", 1125, 2436),
    ("i_12", 1170, 2532),
    ("i_13pm", 1284, 2778),
    ("i_13p", 1170, 2532),
    ("i_13m", 1080, 2340),
    ("i_13", 1170, 2532),
];

static BUILTIN_TABLE: Lazy<PhoneSizeTable> = Lazy::new(|| PhoneSizeTable {
    sizes: BUILTIN_SIZES
        .iter()
        .map(|&(code, width, height)| (code.to_string(), PhoneSize { width, height }))
        .collect(),
});

/// 目标画布尺寸（像素）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneSize {
    pub width: u32,
    pub height: u32,
}

/// 机型代码 → 画布尺寸的只读映射。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneSizeTable {
    sizes: BTreeMap<String, PhoneSize>,
}

impl PhoneSizeTable {
    /// 内置的 15 款机型表。
    pub fn builtin() -> &'static PhoneSizeTable {
        &BUILTIN_TABLE
    }

    /// 按代码查询，未知代码返回 `None`。
    pub fn get(&self, code: &str) -> Option<PhoneSize> {
        self.sizes.get(code).copied()
    }

    /// 按代码查询，未知代码直接报错。
    ///
    /// # 示例
    /// ```
    /// use wallpaperize::wallpaper::PhoneSizeTable;
    ///
    /// let size = PhoneSizeTable::builtin().lookup("i_13")?;
    /// assert_eq!((size.width, size.height), (1170, 2532));
    /// # Ok::<(), wallpaperize::wallpaper::WallpaperError>(())
    /// ```
    pub fn lookup(&self, code: &str) -> Result<PhoneSize, WallpaperError> {
        self.get(code)
            .ok_or_else(|| WallpaperError::UnknownPhoneCode(code.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// 按代码字典序遍历。
    pub fn iter(&self) -> impl Iterator<Item = (&str, PhoneSize)> {
        self.sizes.iter().map(|(code, size)| (code.as_str(), *size))
    }

    /// 解析自定义尺寸表。
    ///
    /// 格式与旧版映射一致：`{"i_15": [1179, 2556]}`。
    pub fn from_json_str(json: &str) -> Result<Self, WallpaperError> {
        let raw: BTreeMap<String, [u32; 2]> = serde_json::from_str(json)
            .map_err(|e| WallpaperError::InvalidFormat(format!("解析尺寸表失败：{}", e)))?;

        let mut sizes = BTreeMap::new();
        for (code, [width, height]) in raw {
            if width == 0 || height == 0 {
                return Err(WallpaperError::InvalidFormat(format!(
                    "机型 {} 的尺寸必须为正数：{}x{}",
                    code, width, height
                )));
            }
            sizes.insert(code, PhoneSize { width, height });
        }

        Ok(Self { sizes })
    }

    /// 以 `self` 为基础叠加 `overrides`，同名代码以 `overrides` 为准。
    pub fn merged_with(&self, overrides: &PhoneSizeTable) -> PhoneSizeTable {
        let mut sizes = self.sizes.clone();
        sizes.extend(overrides.sizes.iter().map(|(code, size)| (code.clone(), *size)));
        PhoneSizeTable { sizes }
    }
}

impl Default for PhoneSizeTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
