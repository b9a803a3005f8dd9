//! Unit tests for tc-trigger.

#[cfg(test)]
fn script(values: &[bool]) -> impl FnMut() -> bool + 'static {
    let mut iter = values.to_vec().into_iter();
    move || iter.next().unwrap_or(false)
}

/// 1-based ticks on which `trigger` fired over `n` polls.
#[cfg(test)]
fn fired_ticks(trigger: &mut crate::Trigger, n: usize) -> Vec<usize> {
    (1..=n).filter(|_| trigger.poll().is_some()).collect()
}

#[cfg(test)]
mod edge_tests {
    use crate::{EdgeDetector, EdgePolicy, Transition};

    const SEQ: [bool; 6] = [false, false, true, true, false, true];

    fn fires(policy: EdgePolicy) -> Vec<(usize, Transition)> {
        let mut d = EdgeDetector::new(policy);
        SEQ.iter()
            .enumerate()
            .filter_map(|(i, &v)| d.poll(v).map(|t| (i + 1, t)))
            .collect()
    }

    #[test]
    fn rising_fires_once_per_edge() {
        assert_eq!(fires(EdgePolicy::Rising), vec![(3, Transition::Rising), (6, Transition::Rising)]);
    }

    #[test]
    fn falling_fires_on_release_only() {
        assert_eq!(fires(EdgePolicy::Falling), vec![(5, Transition::Falling)]);
    }

    #[test]
    fn changed_reports_direction() {
        assert_eq!(
            fires(EdgePolicy::Changed),
            vec![(3, Transition::Rising), (5, Transition::Falling), (6, Transition::Rising)]
        );
    }

    #[test]
    fn level_policies() {
        let high: Vec<usize> = fires(EdgePolicy::WhileHigh).into_iter().map(|(t, _)| t).collect();
        let low: Vec<usize> = fires(EdgePolicy::WhileLow).into_iter().map(|(t, _)| t).collect();
        assert_eq!(high, vec![3, 4, 6]);
        assert_eq!(low, vec![1, 2, 5]);
    }

    #[test]
    fn true_on_first_poll_is_an_edge() {
        let mut d = EdgeDetector::default();
        assert_eq!(d.poll(true), Some(Transition::Rising));
        assert_eq!(d.poll(true), None);
        assert!(d.previous());
    }

    #[test]
    fn reset_forgets_history() {
        let mut d = EdgeDetector::new(EdgePolicy::Rising);
        d.poll(true);
        d.reset();
        assert_eq!(d.poll(true), Some(Transition::Rising));
    }
}

#[cfg(test)]
mod condition_tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::script;
    use crate::{Condition, ConditionExt};

    #[test]
    fn closures_are_conditions() {
        let flag = Rc::new(Cell::new(false));
        let f = Rc::clone(&flag);
        let mut cond = move || f.get();
        assert!(!cond.evaluate());
        flag.set(true);
        assert!(cond.evaluate());
    }

    #[test]
    fn and_or_negate() {
        assert!((|| true).and(|| true).evaluate());
        assert!(!(|| true).and(|| false).evaluate());
        assert!((|| false).or(|| true).evaluate());
        assert!((|| false).negate().evaluate());
    }

    #[test]
    fn combinators_evaluate_both_sides() {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let mut cond = (|| false).and(move || {
            c.set(c.get() + 1);
            true
        });
        cond.evaluate();
        cond.evaluate();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn debounce_requires_consecutive_polls() {
        let raw = [true, false, true, true, true, false, false, false];
        let mut cond = script(&raw).debounce(3);
        let out: Vec<bool> = raw.iter().map(|_| cond.evaluate()).collect();
        assert_eq!(out, vec![false, false, false, false, true, true, true, false]);
    }

    #[test]
    fn debounce_of_one_passes_through() {
        let raw = [true, false, true];
        let mut cond = script(&raw).debounce(1);
        let out: Vec<bool> = raw.iter().map(|_| cond.evaluate()).collect();
        assert_eq!(out, raw.to_vec());
    }
}

#[cfg(test)]
mod trigger_tests {
    use super::{fired_ticks, script};
    use crate::{ConditionExt, EdgePolicy, Transition, Trigger};

    #[test]
    fn rising_trigger_matches_edge_sequence() {
        let mut t = Trigger::new("T", script(&[false, false, true, true, false, true]));
        assert_eq!(fired_ticks(&mut t, 6), vec![3, 6]);
        assert_eq!(t.name(), "T");
        assert_eq!(t.policy(), EdgePolicy::Rising);
    }

    #[test]
    fn falling_and_while_high_constructors() {
        let seq = [true, true, false];
        let mut falling = Trigger::on_falling("release", script(&seq));
        let mut held = Trigger::while_high("held", script(&seq));
        assert_eq!(fired_ticks(&mut falling, 3), vec![3]);
        assert_eq!(fired_ticks(&mut held, 3), vec![1, 2]);
    }

    #[test]
    fn composed_condition_drives_trigger() {
        let mut t = Trigger::new(
            "chord",
            script(&[true, true, true, true]).and(script(&[false, true, true, false])),
        )
        .with_policy(EdgePolicy::Changed);
        assert_eq!(t.poll(), None);
        assert_eq!(t.poll(), Some(Transition::Rising));
        assert_eq!(t.poll(), None);
        assert_eq!(t.poll(), Some(Transition::Falling));
    }
}
