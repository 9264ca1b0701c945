//! 模式规则数据模型
//!
//! 一条规则由正则和若干应答模板组成，模板里用 `{0}`、`{1}` 引用捕获组。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("valid regex"));

/// 规则的声明形式（可从 TOML 读取）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRuleDef {
    /// 正则表达式，只需匹配语句前缀
    pub pattern: String,
    /// 应答模板
    pub responses: Vec<String>,
}

impl PatternRuleDef {
    pub fn new(pattern: &str, responses: &[&str]) -> Self {
        Self {
            pattern: pattern.to_string(),
            responses: responses.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// 编译后的规则
#[derive(Debug, Clone)]
pub struct PatternRule {
    source: String,
    regex: Regex,
    responses: Vec<String>,
}

impl PatternRule {
    /// 编译并校验规则
    ///
    /// 正则被锚定在语句开头；模板至少一条，且占位符下标必须小于捕获组数。
    pub fn compile(def: &PatternRuleDef) -> Result<Self> {
        if def.responses.is_empty() {
            return Err(AppError::Validation(format!(
                "pattern '{}' has no responses",
                def.pattern
            )));
        }

        let regex = Regex::new(&format!("^(?:{})", def.pattern))?;
        let groups = regex.captures_len() - 1;

        for template in &def.responses {
            if let Some(index) = max_placeholder(template) {
                if index >= groups {
                    return Err(AppError::Validation(format!(
                        "template '{}' references group {} but pattern '{}' has {} group(s)",
                        template, index, def.pattern, groups
                    )));
                }
            }
        }

        Ok(Self {
            source: def.pattern.clone(),
            regex,
            responses: def.responses.clone(),
        })
    }

    /// 匹配语句前缀，返回各捕获组文本；未参与匹配的组为空串
    pub fn captures(&self, statement: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(statement)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }
}

/// 用位置参数填充模板中的 `{N}` 占位符
pub fn render_template(template: &str, args: &[String]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

fn max_placeholder(template: &str) -> Option<usize> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps[1].parse::<usize>().ok())
        .max()
}
