//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Look up the first route matching (method, path)
//! - Return the route's action plus captured parameters
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered scan (n is four here; a map would be overkill)
//! - Actions are a closed enum so the HTTP layer owns dispatch

use axum::http::Method;

use crate::routing::matcher::{PathParams, RouteTemplate};

/// The operations the API exposes. The HTTP layer maps each to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListTasks,
    CreateTask,
    UpdateTask,
    DeleteTask,
}

impl Action {
    /// Stable name for logging and metrics labels.
    pub fn name(&self) -> &'static str {
        match self {
            Action::ListTasks => "list_tasks",
            Action::CreateTask => "create_task",
            Action::UpdateTask => "update_task",
            Action::DeleteTask => "delete_task",
        }
    }
}

/// One entry in the route table.
#[derive(Debug, Clone)]
struct Route {
    method: Method,
    template: RouteTemplate,
    action: Action,
}

/// Ordered route table. First match wins.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Append a route. Declaration order is match order.
    pub fn route(mut self, method: Method, template: &str, action: Action) -> Self {
        self.routes.push(Route {
            method,
            template: RouteTemplate::new(template),
            action,
        });
        self
    }

    /// The standard task API route table.
    pub fn task_routes() -> Self {
        Self::new()
            .route(Method::GET, "/tasks", Action::ListTasks)
            .route(Method::POST, "/tasks", Action::CreateTask)
            .route(Method::PUT, "/tasks/:id", Action::UpdateTask)
            .route(Method::DELETE, "/tasks/:id", Action::DeleteTask)
    }

    /// Scan the table in order; return the first matching route's action and
    /// captured path parameters, or `None` when nothing matches.
    pub fn match_request(&self, method: &Method, path: &str) -> Option<(Action, PathParams)> {
        self.routes.iter().find_map(|route| {
            if route.method != *method {
                return None;
            }
            route
                .template
                .capture(path)
                .map(|params| (route.action, params))
        })
    }
}
