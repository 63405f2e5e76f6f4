use serde::{Deserialize, Serialize};

use crate::models::{Employee, EmployeeId, Task, TaskId};

/// Advisory placement for one urgent task. Nothing is committed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UrgentPlacement {
    pub task_id: TaskId,
    /// `None` when there was nobody to choose from.
    pub employee_id: Option<EmployeeId>,
    /// Normalized workload the chosen employee would carry with the task added.
    pub impact: f64,
}

pub fn impact_of(employee: &Employee, task: &Task) -> f64 {
    employee.projected_load(task.estimated_effort)
}

/// Picks the employee whose normalized workload would be lowest after taking
/// `task`, breaking ties on the smallest id. Employees are only read.
pub fn dispatch_urgent(task: &Task, employees: &[Employee]) -> UrgentPlacement {
    let best = employees
        .iter()
        .map(|e| (impact_of(e, task), e.id))
        .min_by(|(a_impact, a_id), (b_impact, b_id)| {
            a_impact.total_cmp(b_impact).then_with(|| a_id.cmp(b_id))
        });

    match best {
        Some((impact, employee_id)) => UrgentPlacement {
            task_id: task.id,
            employee_id: Some(employee_id),
            impact,
        },
        None => UrgentPlacement {
            task_id: task.id,
            employee_id: None,
            impact: 0.0,
        },
    }
}
