use std::{cmp::Ordering, collections::BinaryHeap};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    engine::sorter::sort_by_priority,
    models::{Assignment, Employee, EmployeeId, Task},
};

/// Heap entry for one employee. `slot` indexes the working roster.
#[derive(Debug, Clone, Copy)]
struct LoadEntry {
    load: f64,
    employee_id: EmployeeId,
    slot: usize,
}

impl LoadEntry {
    fn of(slot: usize, employee: &Employee) -> Self {
        Self {
            load: employee.normalized_workload(),
            employee_id: employee.id,
            slot,
        }
    }
}

impl Ord for LoadEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed so BinaryHeap pops the lightest load, then the smallest id
        other
            .load
            .total_cmp(&self.load)
            .then_with(|| other.employee_id.cmp(&self.employee_id))
    }
}

impl PartialOrd for LoadEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LoadEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LoadEntry {}

/// Result of an allocation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Allocation {
    pub assignments: Vec<Assignment>,
    /// Input employees, same order, with workloads including the new assignments.
    pub updated_employees: Vec<Employee>,
}

/// Assigns every open, unowned task to the employee with the lowest
/// normalized workload at that moment, highest priority first.
///
/// Tasks that already have an owner or are completed are left alone and do
/// not touch the heap. Runs in O(n log n + n log m).
pub fn allocate(tasks: &[Task], employees: &[Employee]) -> Allocation {
    let mut roster = employees.to_vec();
    let mut assignments = Vec::new();

    if roster.is_empty() {
        return Allocation {
            assignments,
            updated_employees: roster,
        };
    }

    let mut heap: BinaryHeap<LoadEntry> = roster
        .iter()
        .enumerate()
        .map(|(slot, employee)| LoadEntry::of(slot, employee))
        .collect();

    for task in sort_by_priority(tasks) {
        if !task.is_assignable() {
            continue;
        }
        let Some(lightest) = heap.pop() else {
            break;
        };
        let employee = &mut roster[lightest.slot];
        employee.current_workload = employee
            .current_workload
            .saturating_add(u64::from(task.estimated_effort));
        debug!(
            "Task {} (priority {}) -> employee {} (workload now {})",
            task.id, task.priority, employee.id, employee.current_workload
        );
        heap.push(LoadEntry::of(lightest.slot, employee));
        assignments.push(Assignment::new(task.id, employee.id));
    }

    Allocation {
        assignments,
        updated_employees: roster,
    }
}
