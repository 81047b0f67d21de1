//! 颜色场
//!
//! 把位置、相位和年龄映射到 RGB。三个通道是相位错开的正弦波，
//! 红色随 x 变化，绿色随 y 变化，蓝色随 x + y 变化，因此颜色在空间
//! 和时间上都是连续的。函数没有隐藏状态，相同输入总是得到相同输出。

use serde::{Deserialize, Serialize};

/// 空间频率（每像素弧度）
const SPATIAL_FREQUENCY: f64 = 0.01;
/// 时间频率（每秒弧度）
const TEMPORAL_FREQUENCY: f64 = 0.01;

/// 8位 RGB 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 每个通道乘以 `factor`，向零截断并饱和到 [0, 255]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            r: clamp255(self.r as f64 * factor),
            g: clamp255(self.g as f64 * factor),
            b: clamp255(self.b as f64 * factor),
        }
    }

    /// RGBA8 像素（不透明）
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// 向零截断并饱和到 [0, 255]
///
/// NaN 映射为 0。
pub fn clamp255(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.trunc().clamp(0.0, 255.0) as u8
}

/// 单通道：`255 × (0.5 + 0.5 × sin(phase + offset×0.01 + age×0.01))`
fn channel(offset: f64, phase: f64, age: f64) -> u8 {
    let wave = (phase + offset * SPATIAL_FREQUENCY + age * TEMPORAL_FREQUENCY).sin();
    clamp255(255.0 * (0.5 + 0.5 * wave))
}

/// 计算采样点的颜色
///
/// # 参数
///
/// * `x`, `y` - 采样点坐标（像素）
/// * `phase` - 星体当前旋转相位（弧度）
/// * `age` - 星体年龄（秒）
pub fn color_at(x: f64, y: f64, phase: f64, age: f64) -> Rgb {
    Rgb {
        r: channel(x, phase, age),
        g: channel(y, phase, age),
        b: channel(x + y, phase, age),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_clamp255_truncates_and_saturates() {
        assert_eq!(clamp255(254.99), 254);
        assert_eq!(clamp255(-3.0), 0);
        assert_eq!(clamp255(300.0), 255);
        assert_eq!(clamp255(f64::NAN), 0);
    }

    #[test]
    fn test_color_at_origin_zero_phase() {
        // sin(0) = 0 => 255 * 0.5 = 127.5 => 127
        assert_eq!(color_at(0.0, 0.0, 0.0, 0.0), Rgb::new(127, 127, 127));
    }

    #[test]
    fn test_color_at_peak() {
        // sin(π/2) = 1 => 255
        assert_eq!(color_at(0.0, 0.0, FRAC_PI_2, 0.0), Rgb::WHITE);
    }

    #[test]
    fn test_channels_use_distinct_offsets() {
        let c = color_at(100.0, 0.0, 0.0, 0.0);
        // 红色和蓝色偏移都是 100，绿色偏移为 0
        assert_eq!(c.r, c.b);
        assert_eq!(c.g, 127);
        assert_ne!(c.r, c.g);
    }

    #[test]
    fn test_color_is_pure() {
        let a = color_at(321.0, 87.0, 1.7, 4.2);
        let b = color_at(321.0, 87.0, 1.7, 4.2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scaled_half() {
        assert_eq!(Rgb::new(200, 100, 50).scaled(0.5), Rgb::new(100, 50, 25));
        assert_eq!(Rgb::new(200, 100, 50).scaled(0.0), Rgb::BLACK);
        assert_eq!(Rgb::new(200, 100, 50).scaled(2.0), Rgb::new(255, 200, 100));
    }
}
