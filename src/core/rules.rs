// File: src/core/rules.rs
use crate::core::types::{fresh_id, AffixRule, AffixRulePatch, NewAffixRule};
use crate::error::{GlotError, Result};
use chrono::Utc;
use tracing::debug;

/// The user's affix rules, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffixRuleBook {
    rules: Vec<AffixRule>,
}

impl AffixRuleBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: Vec<AffixRule>) -> Self {
        Self { rules }
    }

    pub fn all(&self) -> &[AffixRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn add(&mut self, rule: NewAffixRule) -> &AffixRule {
        let rule = AffixRule::from_new(fresh_id("affix", Utc::now()), rule);
        debug!(id = %rule.id, name = %rule.name, "affix rule added");
        self.rules.push(rule);
        &self.rules[self.rules.len() - 1]
    }

    /// Merges the patch and recompiles the replacement template.
    pub fn update(&mut self, id: &str, patch: AffixRulePatch) -> Result<&AffixRule> {
        let rule = self
            .rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| GlotError::RuleNotFound(id.to_string()))?;
        patch.apply_to(rule);
        debug!(id, "affix rule updated");
        Ok(&*rule)
    }

    pub fn delete(&mut self, id: &str) -> Result<AffixRule> {
        let idx = self
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| GlotError::RuleNotFound(id.to_string()))?;
        debug!(id, "affix rule deleted");
        Ok(self.rules.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&AffixRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Resolves ids in the order given; any unknown id fails the lookup.
    pub fn select(&self, ids: &[String]) -> Result<Vec<&AffixRule>> {
        ids.iter()
            .map(|id| self.get(id).ok_or_else(|| GlotError::RuleNotFound(id.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::affix::AffixPattern;
    use crate::core::types::AffixType;

    #[test]
    fn patching_replacement_recompiles() {
        let mut book = AffixRuleBook::new();
        let id = book.add(NewAffixRule::new("nominal", AffixType::Suffix, "$ROOT-an")).id.clone();
        assert!(id.starts_with("affix-"));

        let patch = AffixRulePatch {
            affix_type: Some(AffixType::Prefix),
            replacement: Some("ber-$ROOT".into()),
            ..AffixRulePatch::default()
        };
        let rule = book.update(&id, patch).unwrap();
        assert_eq!(rule.compiled(), &AffixPattern::Prefix("ber".into()));
        assert_eq!(rule.name, "nominal");
    }

    #[test]
    fn select_keeps_requested_order() {
        let mut book = AffixRuleBook::new();
        let a = book.add(NewAffixRule::new("a", AffixType::Prefix, "a-$ROOT")).id.clone();
        let b = book.add(NewAffixRule::new("b", AffixType::Prefix, "b-$ROOT")).id.clone();
        let picked = book.select(&[b.clone(), a]).unwrap();
        assert_eq!(picked[0].id, b);
        assert!(matches!(book.select(&["missing".into()]), Err(GlotError::RuleNotFound(_))));
    }

    #[test]
    fn delete_removes_rule() {
        let mut book = AffixRuleBook::new();
        let id = book.add(NewAffixRule::new("a", AffixType::Infix, "-um-")).id.clone();
        assert_eq!(book.delete(&id).unwrap().name, "a");
        assert!(book.is_empty());
        assert!(book.get(&id).is_none());
    }
}
