//! src/schema.rs
//!
//! Request bodies and query strings accepted by the algorithm endpoints.
//! Responses are the engine's own result types (`Allocation`, `Rebalance`,
//! `UrgentPlacement`), which already carry the wire field names.

use serde::{Deserialize, Serialize};

use crate::{
    engine::{SortKey, SortOrder},
    error::AppResult,
    models::{
        Employee, Task, validate_capacity, validate_employees, validate_task, validate_tasks,
    },
};

/// Record-level checks that serde cannot express.
pub trait Validate {
    fn validate(&self) -> AppResult<()>;
}

//=============================================================================
//  Sort
//=============================================================================

/// `?key=priority|estimated_effort|id&order=asc|desc`, both optional.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct SortQuery {
    #[serde(default)]
    pub key: SortKey,
    #[serde(default)]
    pub order: SortOrder,
}

impl Validate for Vec<Task> {
    fn validate(&self) -> AppResult<()> {
        validate_tasks(self)
    }
}

//=============================================================================
//  Allocate / balance
//=============================================================================

/// Body shared by allocate and balance. Missing lists count as empty.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkloadRequest {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub employees: Vec<Employee>,
}

impl Validate for WorkloadRequest {
    fn validate(&self) -> AppResult<()> {
        validate_tasks(&self.tasks)?;
        validate_employees(&self.employees)?;
        validate_capacity(&self.tasks, &self.employees)
    }
}

//=============================================================================
//  Urgent
//=============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrgentRequest {
    pub urgent_task: Task,
    /// Part of the contract but not consulted when choosing an employee.
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub employees: Vec<Employee>,
}

impl Validate for UrgentRequest {
    fn validate(&self) -> AppResult<()> {
        validate_task(&self.urgent_task)?;
        validate_tasks(&self.tasks)?;
        validate_employees(&self.employees)?;
        validate_capacity(std::iter::once(&self.urgent_task), &self.employees)
    }
}
