//! Navigation router
//!
//! An explicit finite-state router over a declared route table. Routes are
//! registered up front as `(name, screen, options?)` entries with one
//! designated initial route; the table is validated when the navigator is
//! constructed, so a misconfigured table fails at startup rather than on
//! first use.
//!
//! Transitions are stack-shaped: `navigate` pushes, `go_back` pops. A route
//! may declare an explicit list of allowed targets; left out, it may reach
//! every registered route (a fully connected stack navigator). Navigation
//! history lives in memory only and is gone after a restart.

use std::collections::HashMap;

use thiserror::Error;

/// Parameters handed to a screen on navigation.
pub type Params = HashMap<String, String>;

/// Errors surfaced by table validation and navigation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("duplicate route name: {0}")]
    DuplicateRoute(String),

    #[error("initial route not declared: {0}")]
    UnknownInitialRoute(String),

    #[error("route {route} declares unknown transition target: {target}")]
    UnknownTransitionTarget { route: String, target: String },

    #[error("no route named {0}")]
    UnknownRoute(String),

    #[error("transition from {from} to {to} not allowed")]
    TransitionNotAllowed { from: String, to: String },
}

/// Per-route display options.
///
/// `header_shown` defaults to true, the platform convention; the
/// application turns it off globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOptions {
    pub header_shown: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self { header_shown: true }
    }
}

/// A named, navigable screen registration.
#[derive(Debug, Clone)]
pub struct Route<V> {
    pub name: String,
    pub screen: V,
    /// Overrides the table-wide default options when set.
    pub options: Option<ScreenOptions>,
    /// Routes reachable from this one. `None` means fully connected.
    pub allowed_targets: Option<Vec<String>>,
}

/// Ordered route declarations plus the designated initial route.
#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    routes: Vec<Route<V>>,
    initial: String,
    default_options: ScreenOptions,
}

impl<V> RouteTable<V> {
    /// Start a table with the given initial route name.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            routes: Vec::new(),
            initial: initial.into(),
            default_options: ScreenOptions::default(),
        }
    }

    /// Set options applied to every route that does not override them.
    pub fn with_default_options(mut self, options: ScreenOptions) -> Self {
        self.default_options = options;
        self
    }

    /// Declare a route with the table-wide default options, reachable from
    /// anywhere.
    pub fn route(self, name: impl Into<String>, screen: V) -> Self {
        self.declare(name, screen, None, None)
    }

    /// Declare a route with explicit options.
    pub fn route_with_options(
        self,
        name: impl Into<String>,
        screen: V,
        options: ScreenOptions,
    ) -> Self {
        self.declare(name, screen, Some(options), None)
    }

    /// Declare a route restricted to an explicit set of targets.
    pub fn route_with_targets(
        self,
        name: impl Into<String>,
        screen: V,
        targets: Vec<String>,
    ) -> Self {
        self.declare(name, screen, None, Some(targets))
    }

    fn declare(
        mut self,
        name: impl Into<String>,
        screen: V,
        options: Option<ScreenOptions>,
        allowed_targets: Option<Vec<String>>,
    ) -> Self {
        self.routes.push(Route {
            name: name.into(),
            screen,
            options,
            allowed_targets,
        });
        self
    }

    /// Declared routes, in registration order.
    pub fn routes(&self) -> &[Route<V>] {
        &self.routes
    }

    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// Check the table invariants: unique names, declared initial route,
    /// and every declared transition target registered.
    pub fn validate(&self) -> Result<(), NavError> {
        for (i, route) in self.routes.iter().enumerate() {
            if self.routes[..i].iter().any(|r| r.name == route.name) {
                return Err(NavError::DuplicateRoute(route.name.clone()));
            }
        }

        if !self.routes.iter().any(|r| r.name == self.initial) {
            return Err(NavError::UnknownInitialRoute(self.initial.clone()));
        }

        for route in &self.routes {
            if let Some(targets) = &route.allowed_targets {
                for target in targets {
                    if !self.routes.iter().any(|r| &r.name == target) {
                        return Err(NavError::UnknownTransitionTarget {
                            route: route.name.clone(),
                            target: target.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.routes.iter().position(|r| r.name == name)
    }
}

#[derive(Debug, Clone)]
struct StackEntry {
    route: usize,
    params: Params,
}

/// Root navigation controller.
///
/// Displays exactly one route at a time; the active route is the top of the
/// push/pop stack.
#[derive(Debug)]
pub struct Navigator<V> {
    table: RouteTable<V>,
    stack: Vec<StackEntry>,
}

impl<V> Navigator<V> {
    /// Validate the table and mount the initial route.
    pub fn new(table: RouteTable<V>) -> Result<Self, NavError> {
        table.validate()?;
        // Safe after validation.
        let initial = table
            .index_of(table.initial())
            .ok_or_else(|| NavError::UnknownInitialRoute(table.initial().to_string()))?;
        Ok(Self {
            table,
            stack: vec![StackEntry {
                route: initial,
                params: Params::new(),
            }],
        })
    }

    /// The active route.
    pub fn current(&self) -> &Route<V> {
        // The stack never empties; go_back refuses to pop the root.
        &self.table.routes()[self.stack[self.stack.len() - 1].route]
    }

    /// Parameters passed to the active route.
    pub fn current_params(&self) -> &Params {
        &self.stack[self.stack.len() - 1].params
    }

    /// Effective header option for the active route.
    pub fn header_shown(&self) -> bool {
        self.current()
            .options
            .unwrap_or(self.table.default_options)
            .header_shown
    }

    /// Push a route onto the stack.
    ///
    /// # Errors
    ///
    /// [`NavError::UnknownRoute`] for an unregistered name (no silent
    /// fallback), [`NavError::TransitionNotAllowed`] when the active route
    /// restricts its targets and the destination is not among them.
    pub fn navigate(&mut self, name: &str, params: Params) -> Result<(), NavError> {
        let target = self
            .table
            .index_of(name)
            .ok_or_else(|| NavError::UnknownRoute(name.to_string()))?;

        let from = self.current();
        if let Some(targets) = &from.allowed_targets {
            if !targets.iter().any(|t| t == name) {
                return Err(NavError::TransitionNotAllowed {
                    from: from.name.clone(),
                    to: name.to_string(),
                });
            }
        }

        tracing::debug!(from = %from.name, to = %name, "navigate");
        self.stack.push(StackEntry {
            route: target,
            params,
        });
        Ok(())
    }

    /// Pop the active route. Returns false when already at the root entry;
    /// leaving the last screen is the platform-exit boundary and is the
    /// caller's decision.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        tracing::debug!(to = %self.current().name, "go_back");
        true
    }

    /// Depth of the navigation stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The validated route table.
    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }
}
