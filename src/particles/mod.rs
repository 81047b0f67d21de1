//! 星体粒子系统
//!
//! - `star` - 星体参数与按年龄推导的生命周期
//! - `spawn` - 出生参数的随机采样
//! - `trail` - 带淡出与容量上限的拖尾缓冲
//! - `population` - 种群数量向目标值漂移

pub mod population;
pub mod spawn;
pub mod star;
pub mod trail;

// 重新导出主要类型
pub use population::{Population, PopulationChange};
pub use spawn::StarSpawner;
pub use star::{FrameSnapshot, Star, StarKind, StarLaws, StarParams};
pub use trail::{TrailBuffer, TrailRenderStats, TrailSample};
