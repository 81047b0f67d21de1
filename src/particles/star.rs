//! 星体（发射器）数据与生命周期
//!
//! 星体只保存出生时采样的参数；长度、不透明度和旋转相位都是年龄的
//! 纯函数，每帧由 `Star::snapshot` 推导，从不写回。
//!
//! ```text
//! Spawned ──> Growing / SteadyRotating（按年龄重叠） ──> Expired（移除）
//! ```

use super::trail::TrailBuffer;
use crate::config::StarConfig;
use glam::IVec2;

/// 星体类别
///
/// 目前仅作标签，三种类别的行为完全相同。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarKind {
    Growing,
    Exploding,
    Unreal,
}

impl StarKind {
    pub const ALL: [StarKind; 3] = [StarKind::Growing, StarKind::Exploding, StarKind::Unreal];
}

/// 生命周期常量
///
/// 从 `StarConfig` 中提取的、与单个星体无关的参数。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarLaws {
    /// 淡入/淡出时长（秒）
    pub fade_duration: f64,
    /// 旋转角速度（弧度/秒）
    pub rotation_speed: f64,
}

impl Default for StarLaws {
    fn default() -> Self {
        Self {
            fade_duration: 2.0,
            rotation_speed: 0.1,
        }
    }
}

impl From<&StarConfig> for StarLaws {
    fn from(config: &StarConfig) -> Self {
        Self {
            fade_duration: config.fade_duration,
            rotation_speed: config.rotation_speed,
        }
    }
}

/// 单帧快照
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    /// 年龄（秒）
    pub age: f64,
    /// 当前旋转相位（弧度）
    pub phase: f64,
    /// 当前辐条长度
    pub length: f64,
    /// 不透明度 [0, 1]
    pub opacity: f64,
}

impl FrameSnapshot {
    /// 本帧的径向步数
    pub fn steps(&self) -> u32 {
        self.length.max(0.0).floor() as u32
    }
}

/// 出生参数
///
/// 由 `StarSpawner` 在配置范围内采样；`Star::new` 原样保存，不做修正。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarParams {
    pub kind: StarKind,
    pub origin: IVec2,
    pub side_count: u32,
    pub lifetime_seconds: u32,
    pub target_length: u32,
    pub stroke_width: u32,
}

crate::impl_default!(StarParams {
    kind: StarKind::Growing,
    origin: IVec2::ZERO,
    side_count: 4,
    lifetime_seconds: 10,
    target_length: 20,
    stroke_width: 1,
});

/// 星体
#[derive(Debug, Clone)]
pub struct Star {
    /// 类别标签
    pub kind: StarKind,
    /// 中心点，生命周期内固定
    pub origin: IVec2,
    /// 基础旋转相位
    pub phase: f64,
    /// 各通道颜色相位（保留）
    pub color_phase: [f64; 3],
    /// 辐条数量，为 0 时不绘制辐条
    pub side_count: u32,
    /// 寿命（秒）
    pub lifetime_seconds: u32,
    /// 出生时间
    pub spawn_time: f64,
    /// 目标辐条长度
    pub target_length: u32,
    /// 出生时的辐条长度（`target_length / 5`）
    pub start_length: f64,
    /// 线宽 [1, 3]
    pub stroke_width: u32,
    /// 拖尾
    pub trail: TrailBuffer,
}

impl Star {
    /// 以给定参数构造星体，起始长度取目标长度的五分之一
    pub fn new(params: StarParams, spawn_time: f64, trail: TrailBuffer) -> Self {
        Self {
            kind: params.kind,
            origin: params.origin,
            phase: 0.0,
            color_phase: [0.0; 3],
            side_count: params.side_count,
            lifetime_seconds: params.lifetime_seconds,
            spawn_time,
            target_length: params.target_length,
            start_length: params.target_length as f64 / 5.0,
            stroke_width: params.stroke_width,
            trail,
        }
    }

    /// 设置基础相位
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// 设置颜色相位
    pub fn with_color_phase(mut self, color_phase: [f64; 3]) -> Self {
        self.color_phase = color_phase;
        self
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.spawn_time
    }

    /// 年龄达到寿命即过期
    pub fn is_expired(&self, now: f64) -> bool {
        self.age(now) >= self.lifetime_seconds as f64
    }

    /// 生长时长：寿命的一半
    pub fn grow_duration(&self) -> f64 {
        self.lifetime_seconds as f64 / 2.0
    }

    /// 当前辐条长度
    ///
    /// 在生长窗口内线性插值，之后保持为目标长度，永不收缩。
    pub fn length_at(&self, age: f64) -> f64 {
        let target = self.target_length as f64;
        let t = (age.max(0.0) / self.grow_duration()).min(1.0);
        if t >= 1.0 {
            return target;
        }
        self.start_length + (target - self.start_length) * t
    }

    /// 不透明度：前 `fade` 秒淡入，最后 `fade` 秒淡出
    pub fn opacity_at(&self, age: f64, fade_duration: f64) -> f64 {
        let lifetime = self.lifetime_seconds as f64;
        let opacity = if age < fade_duration {
            age / fade_duration
        } else if age > lifetime - fade_duration {
            (lifetime - age) / fade_duration
        } else {
            1.0
        };
        opacity.clamp(0.0, 1.0)
    }

    /// 当前旋转相位
    pub fn phase_at(&self, age: f64, rotation_speed: f64) -> f64 {
        self.phase + age * rotation_speed
    }

    /// 辐条 `side` 的角度，`side` 取值 `0..side_count`
    pub fn spoke_angle(&self, side: u32, phase: f64) -> f64 {
        side as f64 * (std::f64::consts::TAU / self.side_count as f64) + phase
    }

    /// 计算本帧快照；过期的星体返回 `None`
    pub fn snapshot(&self, now: f64, laws: &StarLaws) -> Option<FrameSnapshot> {
        if self.is_expired(now) {
            return None;
        }
        let age = self.age(now);
        Some(FrameSnapshot {
            age,
            phase: self.phase_at(age, laws.rotation_speed),
            length: self.length_at(age),
            opacity: self.opacity_at(age, laws.fade_duration),
        })
    }
}

/// 第 `j` 个径向步的偏移：偶数为正，奇数为负
pub fn step_offset(j: u32) -> f64 {
    if j % 2 == 0 {
        j as f64
    } else {
        -(j as f64)
    }
}
