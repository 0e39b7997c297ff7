//! 系统熵源适配器
//!
//! 用线程本地 RNG 与系统时钟实现 EntropySource。

use chrono::Utc;
use rand::Rng;

use crate::domain::EntropySource;

/// 系统熵源
#[derive(Debug, Clone, Default)]
pub struct SystemEntropy;

impl EntropySource for SystemEntropy {
    fn random_u31(&self) -> u32 {
        rand::thread_rng().gen_range(0..=2_147_483_647u32)
    }

    fn random_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn now_millis(&self) -> u64 {
        Utc::now().timestamp_millis().max(0) as u64
    }
}
