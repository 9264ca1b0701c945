//! 模式应答服务

use std::sync::Arc;
use tracing::trace;

use crate::error::Result;
use crate::models::{PatternRule, ReflectionTable, ResponderTables, render_template};
use crate::services::chooser::{ResponseChooser, choose};

/// 按顺序匹配的模式规则，捕获组先做人称反转再填入模板。首条命中即返回。
pub struct PatternResponder {
    reflections: ReflectionTable,
    rules: Vec<PatternRule>,
    chooser: Arc<dyn ResponseChooser>,
}

impl PatternResponder {
    pub fn new(
        reflections: ReflectionTable,
        rules: Vec<PatternRule>,
        chooser: Arc<dyn ResponseChooser>,
    ) -> Self {
        Self {
            reflections,
            rules,
            chooser,
        }
    }

    pub fn from_tables(tables: &ResponderTables, chooser: Arc<dyn ResponseChooser>) -> Result<Self> {
        Ok(Self::new(
            ReflectionTable::new(tables.reflections.clone()),
            tables.compile_patterns()?,
            chooser,
        ))
    }

    pub fn reflect(&self, fragment: &str) -> String {
        self.reflections.reflect(fragment)
    }

    /// 去掉末尾的 '.' 和 '!' 后逐条匹配规则，无命中返回 None
    pub fn match_statement(&self, statement: &str) -> Option<String> {
        let stripped = statement.trim_end_matches(&['.', '!'][..]);

        for rule in &self.rules {
            let Some(groups) = rule.captures(stripped) else {
                continue;
            };
            trace!("pattern '{}' matched", rule.source());

            let template = choose(self.chooser.as_ref(), rule.responses())?;
            let args: Vec<String> = groups.iter().map(|g| self.reflect(g)).collect();
            return Some(render_template(template, &args));
        }

        None
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
