//! # Dependency Resolver
//!
//! Expands a component selection with everything it transitively depends on
//! and orders the result for deployment.
//!
//! Resolution runs in two phases:
//!
//! 1. **Expand**: walk dependency names depth-first, fetching any component not
//!    yet in the working set from the [`ComponentSource`]. Names the source
//!    does not know (or only knows as inactive) are remembered as missing.
//! 2. **Order**: a pure depth-first pass over the working set with an explicit
//!    `resolving`/`resolved` marking. Meeting a component that is still being
//!    resolved is a cycle and aborts the whole resolution; a missing dependency
//!    is only recorded on the component that declared it.
//!
//! The result is sorted by deployment order (components without one use
//! [`DEFAULT_DEPLOYMENT_ORDER`](crate::model::DEFAULT_DEPLOYMENT_ORDER)), with
//! dependency-first order breaking ties.

use crate::model::Component;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::fmt;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Read access to the component registry.
///
/// Implemented by [`ComponentClient`](crate::clients::ComponentClient) for the
/// live catalog and by `[Component]` for snapshots.
#[async_trait]
pub trait ComponentSource: Send + Sync {
    type Error: fmt::Display + Send;

    /// Active, non-deprecated components, ascending by deployment order.
    async fn list_active(&self) -> Result<Vec<Component>, Self::Error>;

    /// The active, non-deprecated component named `name`.
    async fn find_active(&self, name: &str) -> Result<Option<Component>, Self::Error>;
}

#[async_trait]
impl ComponentSource for [Component] {
    type Error = Infallible;

    async fn list_active(&self) -> Result<Vec<Component>, Self::Error> {
        let mut active: Vec<Component> =
            self.iter().filter(|c| c.is_available()).cloned().collect();
        active.sort_by_key(Component::sort_key);
        Ok(active)
    }

    async fn find_active(&self, name: &str) -> Result<Option<Component>, Self::Error> {
        Ok(self
            .iter()
            .find(|c| c.name == name && c.is_available())
            .cloned())
    }
}

#[async_trait]
impl ComponentSource for Vec<Component> {
    type Error = Infallible;

    async fn list_active(&self) -> Result<Vec<Component>, Self::Error> {
        self.as_slice().list_active().await
    }

    async fn find_active(&self, name: &str) -> Result<Option<Component>, Self::Error> {
        self.as_slice().find_active(name).await
    }
}

/// Hard failures of selection and resolution.
///
/// Missing dependencies are not errors; they are reported on
/// [`ResolvedComponent::missing_dependencies`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// `component` is reachable from its own dependency chain.
    #[error("Dependency cycle at {component}: {}", .chain.join(" -> "))]
    Cycle {
        component: String,
        chain: Vec<String>,
    },

    #[error("Component registry unavailable: {0}")]
    Registry(String),
}

/// A component with the outcome of resolving its dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedComponent {
    #[serde(flatten)]
    pub component: Component,
    pub resolved_dependencies: Vec<String>,
    pub missing_dependencies: Vec<String>,
}

impl ResolvedComponent {
    /// True when every declared dependency was found.
    pub fn dependencies_met(&self) -> bool {
        self.missing_dependencies.is_empty()
    }
}

/// Resolves `selected` against `source`.
#[instrument(skip_all, fields(selected = selected.len()))]
pub async fn resolve<S>(
    selected: &[Component],
    source: &S,
) -> Result<Vec<ResolvedComponent>, ResolveError>
where
    S: ComponentSource + ?Sized,
{
    let (names, graph) = expand(selected, source).await?;
    let resolved = order(&names, &graph)?;

    for component in resolved.iter().filter(|r| !r.dependencies_met()) {
        warn!(
            component = %component.component.name,
            missing = ?component.missing_dependencies,
            "Component has unresolved dependencies"
        );
    }
    debug!(resolved = resolved.len(), "Resolution complete");
    Ok(resolved)
}

async fn expand<S>(
    selected: &[Component],
    source: &S,
) -> Result<(Vec<String>, HashMap<String, Component>), ResolveError>
where
    S: ComponentSource + ?Sized,
{
    let mut names: Vec<String> = Vec::new();
    let mut graph: HashMap<String, Component> = HashMap::new();
    for component in selected {
        if !graph.contains_key(&component.name) {
            names.push(component.name.clone());
            graph.insert(component.name.clone(), component.clone());
        }
    }

    let mut pending: Vec<String> = names.iter().rev().cloned().collect();
    let mut unavailable: HashSet<String> = HashSet::new();

    while let Some(name) = pending.pop() {
        let dependencies = graph
            .get(&name)
            .map(|c| c.dependencies.clone())
            .unwrap_or_default();

        for dependency in dependencies.into_iter().rev() {
            if graph.contains_key(&dependency) || unavailable.contains(&dependency) {
                continue;
            }
            let fetched = source
                .find_active(&dependency)
                .await
                .map_err(|e| ResolveError::Registry(e.to_string()))?;
            match fetched {
                Some(component) => {
                    debug!(component = %name, dependency = %dependency, "Pulled in dependency");
                    names.push(dependency.clone());
                    graph.insert(dependency.clone(), component);
                    pending.push(dependency);
                }
                None => {
                    unavailable.insert(dependency);
                }
            }
        }
    }

    Ok((names, graph))
}

enum Mark {
    Resolving,
    Resolved,
}

/// Pure ordering pass; all state lives in this call.
fn order(
    names: &[String],
    graph: &HashMap<String, Component>,
) -> Result<Vec<ResolvedComponent>, ResolveError> {
    let mut marks: HashMap<String, Mark> = HashMap::new();
    let mut path: Vec<String> = Vec::new();
    let mut out: Vec<ResolvedComponent> = Vec::with_capacity(names.len());

    for name in names {
        visit(name, graph, &mut marks, &mut path, &mut out)?;
    }

    out.sort_by_key(|r| r.component.sort_key());
    Ok(out)
}

fn visit(
    name: &str,
    graph: &HashMap<String, Component>,
    marks: &mut HashMap<String, Mark>,
    path: &mut Vec<String>,
    out: &mut Vec<ResolvedComponent>,
) -> Result<(), ResolveError> {
    match marks.get(name) {
        Some(Mark::Resolved) => return Ok(()),
        Some(Mark::Resolving) => {
            let start = path.iter().position(|p| p == name).unwrap_or(0);
            let mut chain = path[start..].to_vec();
            chain.push(name.to_string());
            return Err(ResolveError::Cycle {
                component: name.to_string(),
                chain,
            });
        }
        None => {}
    }

    let Some(component) = graph.get(name) else {
        return Ok(());
    };

    marks.insert(name.to_string(), Mark::Resolving);
    path.push(name.to_string());

    let mut resolved_dependencies = Vec::new();
    let mut missing_dependencies = Vec::new();
    for dependency in &component.dependencies {
        if graph.contains_key(dependency) {
            visit(dependency, graph, marks, path, out)?;
            resolved_dependencies.push(dependency.clone());
        } else {
            missing_dependencies.push(dependency.clone());
        }
    }

    path.pop();
    marks.insert(name.to_string(), Mark::Resolved);
    out.push(ResolvedComponent {
        component: component.clone(),
        resolved_dependencies,
        missing_dependencies,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentType;

    fn comp(name: &str, deps: &[&str]) -> Component {
        Component::new(name, ComponentType::Core).depends_on(deps)
    }

    fn names(resolved: &[ResolvedComponent]) -> Vec<&str> {
        resolved.iter().map(|r| r.component.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_pulls_in_transitive_dependencies() {
        let registry = vec![
            comp("appointments", &["calendar"]).order(30),
            comp("calendar", &["notifications"]).order(20),
            comp("notifications", &[]).order(10),
        ];
        let selected = vec![registry[0].clone()];

        let resolved = resolve(&selected, registry.as_slice()).await.unwrap();

        assert_eq!(names(&resolved), vec!["notifications", "calendar", "appointments"]);
        assert_eq!(resolved[2].resolved_dependencies, vec!["calendar"]);
        assert!(resolved.iter().all(ResolvedComponent::dependencies_met));
    }

    #[tokio::test]
    async fn test_missing_dependency_is_kept_and_reported() {
        let selected = vec![comp("whatsapp_bot", &["whatsapp_api", "faq_engine"]).order(5)];
        let registry = vec![comp("faq_engine", &[]).order(1)];

        let resolved = resolve(&selected, registry.as_slice()).await.unwrap();

        assert_eq!(names(&resolved), vec!["faq_engine", "whatsapp_bot"]);
        let bot = &resolved[1];
        assert_eq!(bot.missing_dependencies, vec!["whatsapp_api"]);
        assert_eq!(bot.resolved_dependencies, vec!["faq_engine"]);
        assert!(!bot.dependencies_met());
    }

    #[tokio::test]
    async fn test_inactive_dependency_counts_as_missing() {
        let selected = vec![comp("loyalty_program", &["points_ledger"])];
        let registry = vec![comp("points_ledger", &[]).deprecated()];

        let resolved = resolve(&selected, registry.as_slice()).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].missing_dependencies, vec!["points_ledger"]);
    }

    #[tokio::test]
    async fn test_two_component_cycle_fails() {
        let registry = vec![comp("a", &["b"]), comp("b", &["a"])];
        let selected = vec![registry[0].clone()];

        let err = resolve(&selected, registry.as_slice()).await.unwrap_err();
        assert_eq!(
            err,
            ResolveError::Cycle {
                component: "a".into(),
                chain: vec!["a".into(), "b".into(), "a".into()],
            }
        );
        assert_eq!(err.to_string(), "Dependency cycle at a: a -> b -> a");
    }

    #[tokio::test]
    async fn test_self_dependency_fails() {
        let selected = vec![comp("loop", &["loop"])];
        let err = resolve(&selected, &[] as &[Component]).await.unwrap_err();
        assert!(matches!(err, ResolveError::Cycle { component, .. } if component == "loop"));
    }

    #[tokio::test]
    async fn test_unordered_components_sort_last() {
        let selected = vec![
            comp("reports", &[]),
            comp("auth", &[]).order(1),
            comp("billing", &[]).order(150),
            comp("dashboard", &[]).order(50),
        ];

        let resolved = resolve(&selected, &[] as &[Component]).await.unwrap();
        assert_eq!(names(&resolved), vec!["auth", "dashboard", "reports", "billing"]);
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let registry = vec![
            comp("crm", &["contacts", "ghost"]).order(40),
            comp("contacts", &[]).order(10),
            comp("inbox", &["contacts"]),
        ];
        let selected = vec![registry[0].clone(), registry[2].clone()];

        let first = resolve(&selected, registry.as_slice()).await.unwrap();
        let again: Vec<Component> = first.iter().map(|r| r.component.clone()).collect();
        let second = resolve(&again, registry.as_slice()).await.unwrap();

        assert_eq!(first, second);
    }

    struct BrokenRegistry;

    #[async_trait]
    impl ComponentSource for BrokenRegistry {
        type Error = String;

        async fn list_active(&self) -> Result<Vec<Component>, String> {
            Err("connection reset".into())
        }

        async fn find_active(&self, _name: &str) -> Result<Option<Component>, String> {
            Err("connection reset".into())
        }
    }

    #[tokio::test]
    async fn test_registry_failure_is_fatal() {
        let selected = vec![comp("crm", &["contacts"])];
        let err = resolve(&selected, &BrokenRegistry).await.unwrap_err();
        assert_eq!(err, ResolveError::Registry("connection reset".into()));
    }
}
