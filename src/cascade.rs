// src/cascade.rs - Ordered first-match-wins rule lists

/// One guarded outcome in a cascade
pub struct Rule<I, T> {
    /// Stable name used in logs and tests
    pub name: &'static str,
    pub predicate: fn(&I) -> bool,
    pub outcome: T,
}

/// An ordered list of rules with an unconditional fallback.
///
/// Rules are tried in slice order and the first predicate that holds decides
/// the result; later rules are never consulted. Predicates may overlap, so
/// reordering the slice changes behaviour. The fallback makes evaluation
/// total.
pub struct Cascade<I: 'static, T: 'static> {
    pub name: &'static str,
    pub rules: &'static [Rule<I, T>],
    pub fallback: T,
}

/// Which branch of a cascade produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision<'a, T> {
    /// Rule name, or `"fallback"` when no predicate held
    pub rule: &'static str,
    pub outcome: &'a T,
}

pub const FALLBACK_RULE: &str = "fallback";

impl<I: 'static, T: 'static> Cascade<I, T> {
    /// Evaluate the cascade against one input
    pub fn decide(&self, input: &I) -> Decision<'_, T> {
        let decision = self
            .rules
            .iter()
            .find(|rule| (rule.predicate)(input))
            .map(|rule| Decision { rule: rule.name, outcome: &rule.outcome })
            .unwrap_or(Decision { rule: FALLBACK_RULE, outcome: &self.fallback });

        log::debug!("{} cascade -> {}", self.name, decision.rule);
        decision
    }

    /// Shorthand for `decide(input).outcome`
    pub fn evaluate(&self, input: &I) -> &T {
        self.decide(input).outcome
    }

    /// Every outcome the cascade can produce, rules first then the fallback
    pub fn outcomes(&self) -> impl Iterator<Item = &T> + '_ {
        self.rules.iter().map(|rule| &rule.outcome).chain(std::iter::once(&self.fallback))
    }

    /// Look a rule up by name
    pub fn rule(&self, name: &str) -> Option<&Rule<I, T>> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SIGN: Cascade<i32, &str> = Cascade {
        name: "sign",
        rules: &[
            Rule { name: "big", predicate: |x| *x > 100, outcome: "big" },
            Rule { name: "positive", predicate: |x| *x > 0, outcome: "positive" },
        ],
        fallback: "non-positive",
    };

    #[test]
    fn first_matching_rule_wins() {
        // 500 satisfies both rules; the earlier one decides
        let decision = SIGN.decide(&500);
        assert_eq!(decision.rule, "big");
        assert_eq!(*decision.outcome, "big");
        assert_eq!(*SIGN.evaluate(&5), "positive");
    }

    #[test]
    fn fallback_when_nothing_matches() {
        let decision = SIGN.decide(&-3);
        assert_eq!(decision.rule, FALLBACK_RULE);
        assert_eq!(*decision.outcome, "non-positive");
    }

    struct Reading {
        level: u8,
    }

    static LEVEL: Cascade<Reading, Vec<&str>> = Cascade {
        name: "level",
        rules: &[Rule { name: "high", predicate: |r| r.level > 200, outcome: Vec::new() }],
        fallback: Vec::new(),
    };

    #[test]
    fn struct_inputs_and_owned_outcomes() {
        assert_eq!(LEVEL.decide(&Reading { level: 250 }).rule, "high");
        assert_eq!(LEVEL.decide(&Reading { level: 10 }).rule, FALLBACK_RULE);
        assert!(LEVEL.evaluate(&Reading { level: 10 }).is_empty());
    }

    #[test]
    fn outcomes_lists_fallback_last() {
        let all: Vec<_> = SIGN.outcomes().copied().collect();
        assert_eq!(all, vec!["big", "positive", "non-positive"]);
        assert!(SIGN.rule("positive").is_some());
        assert!(SIGN.rule("missing").is_none());
    }
}
