//! Allocation and scheduling engine.
//!
//! Every entry point borrows its input records and hands back owned results,
//! including an updated copy of the employee list where workloads change.
//! Nothing here keeps state between calls.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Employee, EmployeeId, Task, TaskId};

pub mod allocator;
pub mod rebalancer;
pub mod sorter;
pub mod urgent;

pub use allocator::{Allocation, allocate};
pub use rebalancer::{BalanceThresholds, Rebalance, balance, balance_with};
pub use sorter::{SortKey, SortOrder, merge_sort_by_key, sort_by_priority, sort_tasks};
pub use urgent::{UrgentPlacement, dispatch_urgent};

/// Returns `tasks` with `assigned_employee_id` rewritten from `assignments`.
/// Assignments naming unknown tasks are ignored; the last one for a task wins.
pub fn apply_assignments(tasks: &[Task], assignments: &[Assignment]) -> Vec<Task> {
    let owners: HashMap<TaskId, EmployeeId> = assignments
        .iter()
        .map(|a| (a.task_id, a.employee_id))
        .collect();

    tasks
        .iter()
        .cloned()
        .map(|mut task| {
            if let Some(owner) = owners.get(&task.id) {
                task.assigned_employee_id = Some(*owner);
            }
            task
        })
        .collect()
}

/// Sum of all workloads, pinned at `u64::MAX` instead of overflowing.
pub fn total_workload(employees: &[Employee]) -> u64 {
    employees
        .iter()
        .fold(0u64, |acc, e| acc.saturating_add(e.current_workload))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WorkloadSummary {
    pub total: u64,
    pub average: f64,
    pub max_normalized: f64,
    pub min_normalized: f64,
}

pub fn workload_summary(employees: &[Employee]) -> WorkloadSummary {
    if employees.is_empty() {
        return WorkloadSummary::default();
    }
    let total = total_workload(employees);
    let normalized = employees.iter().map(Employee::normalized_workload);

    WorkloadSummary {
        total,
        average: total as f64 / employees.len() as f64,
        max_normalized: normalized.clone().fold(f64::MIN, f64::max),
        min_normalized: normalized.fold(f64::MAX, f64::min),
    }
}
