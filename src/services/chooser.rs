//! 应答选择器
//!
//! 所有"随机选一条应答"的地方都通过这里，测试可以注入固定或带种子的实现。

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

pub trait ResponseChooser: Send + Sync {
    /// 返回 `0..len` 内的下标，调用方保证 `len > 0`
    fn choose_index(&self, len: usize) -> usize;
}

/// 从候选中选一条；候选为空时返回 None
pub fn choose<'a>(chooser: &dyn ResponseChooser, items: &'a [String]) -> Option<&'a str> {
    if items.is_empty() {
        return None;
    }
    let index = chooser.choose_index(items.len()).min(items.len() - 1);
    Some(items[index].as_str())
}

/// 线程本地随机数
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngChooser;

impl ResponseChooser for ThreadRngChooser {
    fn choose_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// 带种子的随机数，同一种子产生同一序列
pub struct SeededChooser {
    rng: Mutex<StdRng>,
}

impl SeededChooser {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ResponseChooser for SeededChooser {
    fn choose_index(&self, len: usize) -> usize {
        self.rng.lock().gen_range(0..len)
    }
}

/// 总是选同一位置（超出范围时取模）
#[derive(Debug, Clone, Copy)]
pub struct FixedChooser(pub usize);

impl ResponseChooser for FixedChooser {
    fn choose_index(&self, len: usize) -> usize {
        self.0 % len
    }
}

pub fn create_response_chooser(seed: Option<u64>) -> Arc<dyn ResponseChooser> {
    match seed {
        Some(seed) => Arc::new(SeededChooser::new(seed)),
        None => Arc::new(ThreadRngChooser),
    }
}
