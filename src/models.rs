use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub type TaskId = i64;
pub type EmployeeId = i64;

/// Lifecycle state of a task. Only `Completed` changes how the engine treats it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// A unit of work as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    /// Display only.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Higher is more urgent.
    pub priority: i64,
    #[serde(default)]
    pub assigned_employee_id: Option<EmployeeId>,
    /// Carried through untouched; no algorithm orders by it.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    #[serde(default)]
    pub urgency_flag: bool,
    /// Work units, always at least 1 after validation.
    #[serde(default = "default_effort")]
    pub estimated_effort: u32,
    #[serde(default)]
    pub status: TaskStatus,
}

fn default_effort() -> u32 {
    1
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Eligible for the allocator: nobody owns it and it is still open.
    pub fn is_assignable(&self) -> bool {
        self.assigned_employee_id.is_none() && !self.is_completed()
    }

    pub fn is_active_for(&self, employee: EmployeeId) -> bool {
        self.assigned_employee_id == Some(employee) && !self.is_completed()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    /// Throughput multiplier, strictly positive.
    #[serde(default = "default_efficiency")]
    pub efficiency_score: f64,
    /// Sum of effort over the employee's open tasks.
    #[serde(default)]
    pub current_workload: u64,
}

fn default_efficiency() -> f64 {
    1.0
}

impl Employee {
    pub fn normalized_workload(&self) -> f64 {
        self.current_workload as f64 / self.efficiency_score
    }

    /// Normalized workload after hypothetically taking on `effort` more units.
    pub fn projected_load(&self, effort: u32) -> f64 {
        self.current_workload.saturating_add(u64::from(effort)) as f64 / self.efficiency_score
    }
}

/// Output record pairing a task with the employee it now belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub task_id: TaskId,
    pub employee_id: EmployeeId,
}

impl Assignment {
    pub fn new(task_id: TaskId, employee_id: EmployeeId) -> Self {
        Self {
            task_id,
            employee_id,
        }
    }
}

pub fn validate_task(task: &Task) -> AppResult<()> {
    if task.title.trim().is_empty() {
        return Err(AppError::validation(format!(
            "task {} has an empty title",
            task.id
        )));
    }
    if task.estimated_effort == 0 {
        return Err(AppError::validation(format!(
            "task {} must have a positive estimated_effort",
            task.id
        )));
    }
    Ok(())
}

pub fn validate_tasks(tasks: &[Task]) -> AppResult<()> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        validate_task(task)?;
        if !seen.insert(task.id) {
            return Err(AppError::validation(format!("duplicate task id {}", task.id)));
        }
    }
    Ok(())
}

pub fn validate_employees(employees: &[Employee]) -> AppResult<()> {
    let mut seen = HashSet::with_capacity(employees.len());
    for employee in employees {
        if employee.name.trim().is_empty() {
            return Err(AppError::validation(format!(
                "employee {} has an empty name",
                employee.id
            )));
        }
        if !employee.efficiency_score.is_finite() || employee.efficiency_score <= 0.0 {
            return Err(AppError::validation(format!(
                "employee {} has invalid efficiency_score {}",
                employee.id, employee.efficiency_score
            )));
        }
        if !seen.insert(employee.id) {
            return Err(AppError::validation(format!(
                "duplicate employee id {}",
                employee.id
            )));
        }
    }
    Ok(())
}

/// Rejects batches whose total workload plus total effort does not fit in a
/// `u64`, so no engine pass can run past the top of the range.
pub fn validate_capacity<'a, I>(tasks: I, employees: &[Employee]) -> AppResult<()>
where
    I: IntoIterator<Item = &'a Task>,
{
    let overflow = || AppError::validation("combined workload and effort exceed the supported range");

    let workload = employees
        .iter()
        .try_fold(0u64, |acc, e| acc.checked_add(e.current_workload))
        .ok_or_else(overflow)?;
    tasks
        .into_iter()
        .try_fold(workload, |acc, t| acc.checked_add(u64::from(t.estimated_effort)))
        .ok_or_else(overflow)?;
    Ok(())
}
