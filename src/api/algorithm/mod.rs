use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use log::{debug, info};

use crate::{
    engine::{self, Allocation, Rebalance, UrgentPlacement},
    error::AppResult,
    middleware::{InvocationId, ValidatedJson},
    models::Task,
    schema::{SortQuery, UrgentRequest, WorkloadRequest},
    state::AppState,
};

pub async fn sort_tasks(
    InvocationId(run): InvocationId,
    query: Result<Query<SortQuery>, QueryRejection>,
    ValidatedJson(tasks): ValidatedJson<Vec<Task>>,
) -> AppResult<Json<Vec<Task>>> {
    let Query(query) = query?;
    info!(
        "[{run}] Sorting {} tasks by {:?} ({:?})",
        tasks.len(),
        query.key,
        query.order
    );
    Ok(Json(engine::sort_tasks(&tasks, query.key, query.order)))
}

pub async fn allocate_tasks(
    InvocationId(run): InvocationId,
    ValidatedJson(req): ValidatedJson<WorkloadRequest>,
) -> AppResult<Json<Allocation>> {
    let allocation = engine::allocate(&req.tasks, &req.employees);
    info!(
        "[{run}] Allocated {} of {} tasks across {} employees",
        allocation.assignments.len(),
        req.tasks.len(),
        req.employees.len()
    );
    Ok(Json(allocation))
}

pub async fn balance_workload(
    InvocationId(run): InvocationId,
    State(app_state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<WorkloadRequest>,
) -> AppResult<Json<Rebalance>> {
    let before = engine::workload_summary(&req.employees);
    let rebalance = engine::balance_with(&req.tasks, &req.employees, &app_state.config.thresholds);
    let after = engine::workload_summary(&rebalance.updated_employees);
    info!(
        "[{run}] Rebalanced with {} reassignments (average {:.2}, normalized spread {:.2} -> {:.2})",
        rebalance.reassignments.len(),
        before.average,
        before.max_normalized - before.min_normalized,
        after.max_normalized - after.min_normalized
    );
    Ok(Json(rebalance))
}

pub async fn handle_urgent(
    InvocationId(run): InvocationId,
    ValidatedJson(req): ValidatedJson<UrgentRequest>,
) -> AppResult<Json<UrgentPlacement>> {
    debug!(
        "[{run}] Urgent task {} arrived with {} tasks in context (not consulted)",
        req.urgent_task.id,
        req.tasks.len()
    );
    let placement = engine::dispatch_urgent(&req.urgent_task, &req.employees);
    match placement.employee_id {
        Some(employee) => info!(
            "[{run}] Urgent task {} best placed with employee {employee} (impact {:.2})",
            placement.task_id, placement.impact
        ),
        None => info!(
            "[{run}] Urgent task {} has no employee to go to",
            placement.task_id
        ),
    }
    Ok(Json(placement))
}
