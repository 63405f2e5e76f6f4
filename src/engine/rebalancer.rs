use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{
        sorter::{SortOrder, merge_sort_by_key},
        total_workload,
    },
    models::{Assignment, Employee, EmployeeId, Task},
};

/// Multipliers of the average workload that drive a balancing pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceThresholds {
    /// Above `average * overload_factor` an employee gives work away.
    pub overload_factor: f64,
    /// Below `average * underload_factor` an employee can receive work.
    pub underload_factor: f64,
    /// A receiver never ends above `average * target_ceiling_factor`.
    pub target_ceiling_factor: f64,
}

impl Default for BalanceThresholds {
    fn default() -> Self {
        Self {
            overload_factor: 1.2,
            underload_factor: 0.8,
            target_ceiling_factor: 1.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rebalance {
    pub reassignments: Vec<Assignment>,
    pub updated_employees: Vec<Employee>,
}

impl Rebalance {
    fn unchanged(employees: &[Employee]) -> Self {
        Self {
            reassignments: Vec::new(),
            updated_employees: employees.to_vec(),
        }
    }
}

pub fn balance(tasks: &[Task], employees: &[Employee]) -> Rebalance {
    balance_with(tasks, employees, &BalanceThresholds::default())
}

/// Greedy transfer from overloaded to underloaded employees.
///
/// The average is taken once from the incoming snapshot. Overloaded
/// employees are visited in input order and shed their open tasks
/// smallest-effort first until their excess over the average is gone. Each
/// task goes to the underloaded employee with the lowest projected normalized
/// load, unless that would push the receiver past the ceiling, in which case
/// the task stays where it is.
///
/// Employee ids must be unique; input with repeated ids comes back unchanged.
pub fn balance_with(
    tasks: &[Task],
    employees: &[Employee],
    thresholds: &BalanceThresholds,
) -> Rebalance {
    if employees.is_empty() {
        return Rebalance::unchanged(employees);
    }

    let total = total_workload(employees);
    let average = total as f64 / employees.len() as f64;

    let overloaded: Vec<EmployeeId> = employees
        .iter()
        .filter(|e| e.current_workload as f64 > average * thresholds.overload_factor)
        .map(|e| e.id)
        .collect();
    let underloaded: Vec<EmployeeId> = employees
        .iter()
        .filter(|e| (e.current_workload as f64) < average * thresholds.underload_factor)
        .map(|e| e.id)
        .collect();

    if overloaded.is_empty() || underloaded.is_empty() {
        debug!(
            "No rebalancing needed (average {average:.2}, {} overloaded, {} underloaded)",
            overloaded.len(),
            underloaded.len()
        );
        return Rebalance::unchanged(employees);
    }

    let ceiling = average * thresholds.target_ceiling_factor;
    let mut roster: IndexMap<EmployeeId, Employee> =
        employees.iter().map(|e| (e.id, e.clone())).collect();
    if roster.len() != employees.len() {
        warn!("Duplicate employee ids in balancing input, leaving workloads as they are");
        return Rebalance::unchanged(employees);
    }
    let mut reassignments = Vec::new();

    for source_id in overloaded {
        let owned: Vec<&Task> = tasks.iter().filter(|t| t.is_active_for(source_id)).collect();
        let owned = merge_sort_by_key(&owned, |t| t.estimated_effort, SortOrder::Asc);

        let mut excess = roster
            .get(&source_id)
            .map_or(0.0, |e| e.current_workload as f64 - average);

        for task in owned {
            if excess <= 0.0 {
                break;
            }
            let effort = task.estimated_effort;
            let Some(target_id) = lightest_receiver(&roster, &underloaded, source_id, effort)
            else {
                break;
            };

            let Some(target) = roster.get_mut(&target_id) else {
                continue;
            };
            let landed = target.current_workload.saturating_add(u64::from(effort));
            if landed as f64 > ceiling {
                debug!(
                    "Task {} stays with employee {source_id}: employee {target_id} would reach {landed} (ceiling {ceiling:.2})",
                    task.id
                );
                continue;
            }
            target.current_workload = landed;

            if let Some(source) = roster.get_mut(&source_id) {
                source.current_workload = source.current_workload.saturating_sub(u64::from(effort));
            }
            excess -= f64::from(effort);
            reassignments.push(Assignment::new(task.id, target_id));
        }
    }

    Rebalance {
        reassignments,
        updated_employees: roster.into_values().collect(),
    }
}

fn lightest_receiver(
    roster: &IndexMap<EmployeeId, Employee>,
    underloaded: &[EmployeeId],
    source_id: EmployeeId,
    effort: u32,
) -> Option<EmployeeId> {
    underloaded
        .iter()
        .filter(|id| **id != source_id)
        .filter_map(|id| roster.get(id))
        .min_by(|a, b| {
            a.projected_load(effort)
                .total_cmp(&b.projected_load(effort))
                .then_with(|| a.id.cmp(&b.id))
        })
        .map(|e| e.id)
}
