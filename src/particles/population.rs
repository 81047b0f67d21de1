//! 种群管理器
//!
//! 持有所有存活星体。每隔 `retarget_interval` 秒重新抽取目标数量，
//! 每帧最多向目标靠近一个星体（不足时生成一个，过多时随机淘汰一个），
//! 因此数量平滑漂移而不是跳变。

use super::spawn::StarSpawner;
use super::star::Star;
use crate::config::{ConfigResult, PopulationConfig};
use crate::platform::surface::Viewport;
use rand::Rng;

/// 单帧数量调整结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationChange {
    /// 生成了一个星体
    Spawned,
    /// 随机淘汰了一个星体
    Evicted,
    /// 已达到目标
    Unchanged,
}

/// 种群管理器
#[derive(Debug)]
pub struct Population {
    stars: Vec<Star>,
    spawner: StarSpawner,
    config: PopulationConfig,
    target: usize,
    last_retarget: f64,
}

impl Population {
    /// 创建空种群
    ///
    /// 目标数量为 0，直到重定目标或调用 `set_target`。
    ///
    /// # 错误
    ///
    /// 数量范围为空或重定目标间隔无效时返回 `ConfigError::ValidationError`。
    pub fn empty(
        spawner: StarSpawner,
        config: &PopulationConfig,
        now: f64,
    ) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            stars: Vec::new(),
            spawner,
            config: config.clone(),
            target: 0,
            last_retarget: now,
        })
    }

    /// 创建初始种群：随机抽取初始数量并一次性生成
    pub fn new<R: Rng + ?Sized>(
        spawner: StarSpawner,
        config: &PopulationConfig,
        viewport: Viewport,
        now: f64,
        rng: &mut R,
    ) -> ConfigResult<Self> {
        let mut population = Self::empty(spawner, config, now)?;
        let initial = population.sample_target(rng);
        population.target = initial;
        population.stars.reserve(initial);
        for _ in 0..initial {
            let star = population.spawner.spawn(rng, viewport, now);
            population.stars.push(star);
        }
        tracing::info!(target: "particles", initial, "Spawned initial population");
        Ok(population)
    }

    fn sample_target<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.config.min_stars..=self.config.max_stars) as usize
    }

    /// 到达间隔时重新抽取目标数量
    ///
    /// 返回是否发生了重定目标。
    pub fn maybe_retarget<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> bool {
        if now - self.last_retarget > self.config.retarget_interval {
            self.last_retarget = now;
            self.target = self.sample_target(rng);
            tracing::debug!(
                target: "particles",
                target_stars = self.target,
                live = self.stars.len(),
                "Population retargeted"
            );
            return true;
        }
        false
    }

    /// 向目标数量靠近一步
    pub fn nudge<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        viewport: Viewport,
        rng: &mut R,
    ) -> PopulationChange {
        if self.stars.len() < self.target {
            let star = self.spawner.spawn(rng, viewport, now);
            self.stars.push(star);
            PopulationChange::Spawned
        } else if self.stars.len() > self.target {
            let index = rng.gen_range(0..self.stars.len());
            self.stars.swap_remove(index);
            PopulationChange::Evicted
        } else {
            PopulationChange::Unchanged
        }
    }

    /// 每帧调用：必要时重定目标，然后最多调整一个星体
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        viewport: Viewport,
        rng: &mut R,
    ) -> PopulationChange {
        self.maybe_retarget(now, rng);
        self.nudge(now, viewport, rng)
    }

    /// 移除所有年龄达到寿命的星体，返回移除数量
    pub fn retire_expired(&mut self, now: f64) -> usize {
        let before = self.stars.len();
        self.stars.retain(|star| !star.is_expired(now));
        before - self.stars.len()
    }

    /// 直接加入一个星体（不受目标数量约束）
    pub fn insert(&mut self, star: Star) {
        self.stars.push(star);
    }

    /// 强制设置目标数量
    pub fn set_target(&mut self, target: usize) {
        self.target = target;
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn stars_mut(&mut self) -> &mut [Star] {
        &mut self.stars
    }

    pub fn spawner(&self) -> &StarSpawner {
        &self.spawner
    }

    /// 所有星体拖尾采样点总数
    pub fn trail_samples(&self) -> usize {
        self.stars.iter().map(|s| s.trail.len()).sum()
    }

    /// 存活星体因容量上限丢弃的拖尾采样点总数
    pub fn trail_dropped(&self) -> u64 {
        self.stars.iter().map(|s| s.trail.dropped()).sum()
    }
}
