//! Ordered collection of domain rules.
//!
//! Rules are kept in insertion order and looked up first-match-wins: when
//! two rules share a PLMN, the one added first is used and the later one is
//! shadowed.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::rule::{DomainRule, Plmn};

/// An owned, ordered set of [`DomainRule`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainRules {
    rules: Vec<DomainRule>,
}

impl DomainRules {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from rules in iteration order.
    #[must_use]
    pub fn from_rules(rules: impl IntoIterator<Item = DomainRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Append a rule after all existing ones.
    pub fn push(&mut self, rule: DomainRule) {
        trace!(rule = %rule, "Adding domain rule");
        self.rules.push(rule);
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, DomainRule> {
        self.rules.iter()
    }

    /// Drop every rule.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Replace the whole rule set, as on a configuration reload.
    pub fn replace(&mut self, rules: impl IntoIterator<Item = DomainRule>) {
        self.rules = rules.into_iter().collect();
        debug!(count = self.rules.len(), "Replaced domain rules");
    }

    /// Find the first rule matching the given codes.
    #[must_use]
    pub fn lookup(&self, mcc: u16, mnc: u16) -> Option<&DomainRule> {
        let found = self.rules.iter().find(|rule| rule.matches(mcc, mnc));
        match found {
            Some(rule) => debug!(mcc, mnc, domain = %rule.domain, "Domain rule matched"),
            None => trace!(mcc, mnc, "No domain rule matched"),
        }
        found
    }

    /// Domain of the first rule matching the given codes.
    #[must_use]
    pub fn domain_for(&self, mcc: u16, mnc: u16) -> Option<&str> {
        self.lookup(mcc, mnc).map(|rule| rule.domain.as_str())
    }

    /// PLMNs that appear in more than one rule, in order of first repeat.
    #[must_use]
    pub fn duplicates(&self) -> Vec<Plmn> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for plmn in self.rules.iter().map(DomainRule::plmn) {
            if !seen.insert(plmn) && reported.insert(plmn) {
                duplicates.push(plmn);
            }
        }
        duplicates
    }
}

impl FromIterator<DomainRule> for DomainRules {
    fn from_iter<I: IntoIterator<Item = DomainRule>>(iter: I) -> Self {
        Self::from_rules(iter)
    }
}

impl Extend<DomainRule> for DomainRules {
    fn extend<I: IntoIterator<Item = DomainRule>>(&mut self, iter: I) {
        for rule in iter {
            self.push(rule);
        }
    }
}

impl IntoIterator for DomainRules {
    type Item = DomainRule;
    type IntoIter = std::vec::IntoIter<DomainRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a DomainRules {
    type Item = &'a DomainRule;
    type IntoIter = std::slice::Iter<'a, DomainRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DomainRules {
        DomainRules::from_rules([
            DomainRule::new(310, 410, "first.example"),
            DomainRule::new(244, 91, "fi.example"),
            DomainRule::new(310, 410, "second.example"),
        ])
    }

    #[test]
    fn test_empty() {
        let rules = DomainRules::new();
        assert!(rules.is_empty());
        assert_eq!(rules.len(), 0);
        assert!(rules.lookup(310, 410).is_none());
    }

    #[test]
    fn test_iter_preserves_insertion_order() {
        let rules = sample();
        let domains: Vec<_> = rules.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, ["first.example", "fi.example", "second.example"]);
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let rules = sample();
        assert_eq!(rules.domain_for(310, 410), Some("first.example"));
        assert_eq!(rules.domain_for(244, 91), Some("fi.example"));
        assert_eq!(rules.domain_for(244, 5), None);
    }

    #[test]
    fn test_push_appends() {
        let mut rules = DomainRules::new();
        rules.push(DomainRule::new(1, 1, "a.example"));
        rules.push(DomainRule::new(1, 1, "b.example"));
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.domain_for(1, 1), Some("a.example"));
    }

    #[test]
    fn test_replace_and_clear() {
        let mut rules = sample();
        rules.replace([DomainRule::new(262, 1, "de.example")]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.domain_for(310, 410), None);
        assert_eq!(rules.domain_for(262, 1), Some("de.example"));

        rules.clear();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_duplicates() {
        let mut rules = sample();
        rules.push(DomainRule::new(310, 410, "third.example"));
        assert_eq!(rules.duplicates(), vec![Plmn::new(310, 410)]);
        assert!(DomainRules::new().duplicates().is_empty());
    }

    #[test]
    fn test_collect_and_extend() {
        let mut rules: DomainRules = vec![DomainRule::new(1, 2, "x.example")]
            .into_iter()
            .collect();
        rules.extend([DomainRule::new(3, 4, "y.example")]);
        assert_eq!(rules.len(), 2);

        let owned: Vec<DomainRule> = rules.into_iter().collect();
        assert_eq!(owned[1].domain, "y.example");
    }
}
