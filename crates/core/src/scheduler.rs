//! Kahn topological sort over `Step::depends_on` (`spec.md` §4.3).

use std::collections::{BTreeMap, VecDeque};

use crate::step::Step;

/// Orders `steps` so every step follows all of its `depends_on` predecessors.
///
/// Ties among zero-indegree steps are broken by input order: the ready
/// queue is seeded and refilled in the order `steps` was given, never by
/// id or any other derived order. If a cycle leaves some steps
/// permanently blocked, the original input order is returned unchanged —
/// the scheduler trusts the planner's edges and never drops a step
/// (`spec.md` §4.3).
#[must_use]
pub fn schedule_steps(steps: Vec<Step>) -> Vec<Step> {
    let mut indegree: BTreeMap<String, usize> =
        steps.iter().map(|s| (s.id.clone(), 0)).collect();
    let mut dependents: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for step in &steps {
        for dep in &step.depends_on {
            dependents.entry(dep.clone()).or_default().push(step.id.clone());
            *indegree.get_mut(&step.id).expect("step id seeded above") += 1;
        }
    }

    let by_id: BTreeMap<String, Step> = steps
        .iter()
        .cloned()
        .map(|s| (s.id.clone(), s))
        .collect();

    let mut queue: VecDeque<String> = steps
        .iter()
        .filter(|s| indegree[&s.id] == 0)
        .map(|s| s.id.clone())
        .collect();

    let mut ordered = Vec::with_capacity(steps.len());
    while let Some(id) = queue.pop_front() {
        if let Some(next_ids) = dependents.get(&id) {
            for next in next_ids {
                let deg = indegree.get_mut(next).expect("next id seeded above");
                *deg -= 1;
                if *deg == 0 {
                    queue.push_back(next.clone());
                }
            }
        }
        ordered.push(by_id[&id].clone());
    }

    if ordered.len() != steps.len() {
        return steps;
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Phase;

    fn step(id: &str, depends_on: &[&str]) -> Step {
        Step::new(id, None, format!("-- {id}"), Phase::Prep)
            .depends_on(depends_on.iter().map(|s| s.to_string()))
    }

    #[test]
    fn orders_by_dependency() {
        let steps = vec![step("s3", &["s2"]), step("s1", &[]), step("s2", &["s1"])];
        let ordered = schedule_steps(steps);
        let ids: Vec<&str> = ordered.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn ties_broken_by_input_order() {
        let steps = vec![step("b", &[]), step("a", &[]), step("c", &[])];
        let ordered = schedule_steps(steps);
        let ids: Vec<&str> = ordered.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn cycle_falls_back_to_original_order() {
        let steps = vec![step("s1", &["s2"]), step("s2", &["s1"])];
        let original_ids: Vec<String> = steps.iter().map(|s| s.id.clone()).collect();
        let ordered = schedule_steps(steps);
        let ids: Vec<String> = ordered.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, original_ids);
    }
}
