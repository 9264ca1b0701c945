//! 人称映射表
//!
//! 在把用户原话嵌入应答模板之前，将第一/第二人称互换（"i" → "you"）。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 单条人称映射
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    /// 原词（匹配时不区分大小写）
    pub from: String,
    /// 替换词
    pub to: String,
}

impl Reflection {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// 人称映射表，启动后不可变
#[derive(Debug, Clone, Default)]
pub struct ReflectionTable {
    entries: HashMap<String, String>,
}

impl ReflectionTable {
    /// 构建映射表；同一原词出现多次时后者覆盖前者
    pub fn new(reflections: impl IntoIterator<Item = Reflection>) -> Self {
        let entries = reflections
            .into_iter()
            .map(|r| (r.from.to_lowercase(), r.to))
            .collect();
        Self { entries }
    }

    /// 对片段做人称互换
    ///
    /// 小写化后按空白切分，逐词查表替换，再用单个空格拼接。
    /// 不在表中的词原样保留；空串返回空串。
    pub fn reflect(&self, fragment: &str) -> String {
        fragment
            .to_lowercase()
            .split_whitespace()
            .map(|token| {
                self.entries
                    .get(token)
                    .map(String::as_str)
                    .unwrap_or(token)
            })
            .collect::<Vec<&str>>()
            .join(" ")
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tables::ResponderTables;
    use rstest::rstest;

    fn builtin() -> ReflectionTable {
        ReflectionTable::new(ResponderTables::builtin().reflections)
    }

    #[rstest]
    #[case("i am happy", "you are happy")]
    #[case("I AM Happy", "you are happy")]
    #[case("my car was fast", "your car were fast")]
    #[case("you told me", "me told you")]
    #[case("i'll  go   home", "you will go home")]
    #[case("", "")]
    #[case("   ", "")]
    fn test_reflect(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(builtin().reflect(input), expected);
    }

    #[test]
    fn test_reflect_is_fixed_point_without_keys() {
        let table = builtin();
        let once = table.reflect("to go home");
        assert_eq!(once, "to go home");
        assert_eq!(table.reflect(&once), once);
    }

    #[test]
    fn test_later_entry_overrides_earlier() {
        let table = ReflectionTable::new(vec![
            Reflection::new("I", "you"),
            Reflection::new("i", "thou"),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.reflect("I am"), "thou am");
        assert!(table.contains("I"));
    }

    #[test]
    fn test_empty_table_lowercases_only() {
        let table = ReflectionTable::default();
        assert!(table.is_empty());
        assert_eq!(table.reflect("Hello  World"), "hello world");
    }
}
