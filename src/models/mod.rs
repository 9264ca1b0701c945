//! 核心数据模型模块
//!
//! 定义 Radha 的静态数据：人称映射表、情绪词典、模式规则，以及承载三者的应答表。

pub mod emotion;
pub mod pattern;
pub mod reflection;
pub mod tables;

pub use emotion::{EmotionEntry, EmotionLabel, EmotionLexicon};
pub use pattern::{PatternRule, PatternRuleDef, render_template};
pub use reflection::{Reflection, ReflectionTable};
pub use tables::ResponderTables;
