use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Direction of a sort. Descending is the default because callers mostly
/// want the most urgent work first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// True when `a` must be placed strictly before `b`.
    fn precedes<K: Ord>(self, a: &K, b: &K) -> bool {
        matches!(
            (self, a.cmp(b)),
            (SortOrder::Desc, Ordering::Greater) | (SortOrder::Asc, Ordering::Less)
        )
    }
}

/// Task field a batch can be ordered by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Priority,
    EstimatedEffort,
    Id,
}

/// Top-down merge sort over `items`, returning a new vector.
///
/// The merge only lets the right run go first when its key strictly precedes
/// the left one, so equal keys keep their input order in either direction.
pub fn merge_sort_by_key<T, K, F>(items: &[T], key: F, order: SortOrder) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    sort_run(items, &key, order)
}

fn sort_run<T, K, F>(items: &[T], key: &F, order: SortOrder) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    if items.len() <= 1 {
        return items.to_vec();
    }
    let mid = items.len() / 2;
    let left = sort_run(&items[..mid], key, order);
    let right = sort_run(&items[mid..], key, order);
    merge(left, right, key, order)
}

fn merge<T, K, F>(left: Vec<T>, right: Vec<T>, key: &F, order: SortOrder) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let right_first = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => order.precedes(&key(r), &key(l)),
            _ => break,
        };
        if right_first {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

pub fn sort_tasks(tasks: &[Task], key: SortKey, order: SortOrder) -> Vec<Task> {
    match key {
        SortKey::Priority => merge_sort_by_key(tasks, |t| t.priority, order),
        SortKey::EstimatedEffort => merge_sort_by_key(tasks, |t| t.estimated_effort, order),
        SortKey::Id => merge_sort_by_key(tasks, |t| t.id, order),
    }
}

/// Highest priority first.
pub fn sort_by_priority(tasks: &[Task]) -> Vec<Task> {
    sort_tasks(tasks, SortKey::Priority, SortOrder::Desc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    fn task(id: i64, priority: i64, effort: u32) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: None,
            priority,
            assigned_employee_id: None,
            dependencies: vec![],
            urgency_flag: false,
            estimated_effort: effort,
            status: TaskStatus::Pending,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<i64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_priority_descending_is_permutation() {
        let input = vec![
            task(1, 3, 1),
            task(2, 8, 1),
            task(3, -2, 1),
            task(4, 5, 1),
            task(5, 8, 1),
            task(6, 0, 1),
            task(7, 11, 1),
        ];
        let sorted = sort_by_priority(&input);

        assert_eq!(sorted.len(), input.len());
        let mut got = ids(&sorted);
        got.sort();
        assert_eq!(got, vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(sorted.windows(2).all(|w| w[0].priority >= w[1].priority));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let input = vec![task(1, 5, 1), task(2, 5, 1), task(3, 9, 1), task(4, 5, 1)];
        assert_eq!(ids(&sort_by_priority(&input)), vec![3, 1, 2, 4]);
        assert_eq!(
            ids(&sort_tasks(&input, SortKey::Priority, SortOrder::Asc)),
            vec![1, 2, 4, 3]
        );
    }

    #[test]
    fn test_ascending_by_effort() {
        let input = vec![task(1, 0, 4), task(2, 0, 1), task(3, 0, 3), task(4, 0, 1)];
        let sorted = sort_tasks(&input, SortKey::EstimatedEffort, SortOrder::Asc);
        assert_eq!(ids(&sorted), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_trivial_inputs() {
        assert!(sort_by_priority(&[]).is_empty());
        assert_eq!(ids(&sort_by_priority(&[task(9, 1, 1)])), vec![9]);
    }

    #[test]
    fn test_generic_key() {
        let words = ["pear", "fig", "banana", "kiwi"];
        let sorted = merge_sort_by_key(&words, |w| w.len(), SortOrder::Asc);
        assert_eq!(sorted, vec!["fig", "pear", "kiwi", "banana"]);
    }

    #[test]
    fn test_input_untouched() {
        let input = vec![task(1, 1, 1), task(2, 2, 1)];
        let _ = sort_by_priority(&input);
        assert_eq!(ids(&input), vec![1, 2]);
    }
}
