//! # Component Selector
//!
//! Narrows the active registry to the components one client should get.

use super::resolver::{ComponentSource, ResolveError};
use crate::model::{ClientConfig, Component, ComponentType};
use tracing::{debug, instrument};

/// Components of `registry` that apply to `client`, in registry order.
pub fn select_components(registry: &[Component], client: &ClientConfig) -> Vec<Component> {
    registry
        .iter()
        .filter(|component| is_selected(component, client))
        .cloned()
        .collect()
}

/// The type rule for `component`, then the client's explicit override.
pub fn is_selected(component: &Component, client: &ClientConfig) -> bool {
    let by_type = match component.component_type {
        ComponentType::Core => true,
        ComponentType::PlanFeature => client.plan.satisfies(component.min_plan),
        ComponentType::VerticalModule => {
            component.applies_to(&client.vertical) && client.plan.satisfies(component.min_plan)
        }
        ComponentType::Addon => client.addons.iter().any(|addon| *addon == component.name),
        ComponentType::Integration => client
            .legacy_system
            .as_deref()
            .is_some_and(|legacy| names_overlap(&component.name, legacy)),
    };
    client.override_for(&component.name).unwrap_or(by_type)
}

/// Case-insensitive containment in either direction; blank names never match.
fn names_overlap(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

/// Reads the active registry from `source` and selects for `client`.
#[instrument(skip_all, fields(client = %client.client_id, plan = %client.plan, vertical = %client.vertical))]
pub async fn select_for_client<S>(
    source: &S,
    client: &ClientConfig,
) -> Result<Vec<Component>, ResolveError>
where
    S: ComponentSource + ?Sized,
{
    let registry = source
        .list_active()
        .await
        .map_err(|e| ResolveError::Registry(e.to_string()))?;
    let selected = select_components(&registry, client);
    debug!(registry = registry.len(), selected = selected.len(), "Selected components");
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlanTier;

    fn names(components: &[Component]) -> Vec<&str> {
        components.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_core_is_always_selected() {
        let core = Component::new("auth", ComponentType::Core).verticals(&["dental"]);
        for plan in PlanTier::ALL {
            let client = ClientConfig::new("c1", "restaurant", plan);
            assert!(is_selected(&core, &client), "core dropped at {plan}");
        }
    }

    #[test]
    fn test_plan_feature_is_monotonic() {
        for min in PlanTier::ALL {
            let feature = Component::new("reports", ComponentType::PlanFeature).min_plan(min);
            let mut satisfied = false;
            for plan in PlanTier::ALL {
                let selected = is_selected(&feature, &ClientConfig::new("c1", "dental", plan));
                assert!(!satisfied || selected, "{min} feature lost at {plan}");
                satisfied |= selected;
            }
            assert!(satisfied);
        }
    }

    #[test]
    fn test_vertical_module_needs_vertical_and_plan() {
        let module = Component::new("odontogram", ComponentType::VerticalModule)
            .verticals(&["dental"])
            .min_plan(PlanTier::Essentials);

        assert!(is_selected(&module, &ClientConfig::new("c1", "dental", PlanTier::Growth)));
        assert!(!is_selected(&module, &ClientConfig::new("c1", "dental", PlanTier::Starter)));
        assert!(!is_selected(&module, &ClientConfig::new("c1", "restaurant", PlanTier::Scale)));
    }

    #[test]
    fn test_integration_matches_legacy_system_either_way() {
        let integration = Component::new("dentrix_sync", ComponentType::Integration);
        let mut client = ClientConfig::new("c1", "dental", PlanTier::Starter);
        assert!(!is_selected(&integration, &client));

        client.legacy_system = Some("Dentrix".into());
        assert!(is_selected(&integration, &client));

        client.legacy_system = Some("Dentrix Enterprise dentrix_sync".into());
        assert!(is_selected(&integration, &client));

        client.legacy_system = Some("  ".into());
        assert!(!is_selected(&integration, &client));
    }

    #[test]
    fn test_overrides_win_both_ways() {
        let core = Component::new("auth", ComponentType::Core);
        let addon = Component::new("loyalty_program", ComponentType::Addon);
        let mut client = ClientConfig::new("c1", "dental", PlanTier::Scale);
        client.feature_overrides.insert("auth".into(), false);
        client.feature_overrides.insert("loyalty_program".into(), true);

        assert!(!is_selected(&core, &client));
        assert!(is_selected(&addon, &client));
    }

    #[test]
    fn test_restaurant_essentials_scenario() {
        let registry = vec![
            Component::new("core_platform", ComponentType::Core).order(1),
            Component::new("advanced_analytics", ComponentType::PlanFeature)
                .min_plan(PlanTier::Growth)
                .order(10),
            Component::new("loyalty_program", ComponentType::Addon).order(20),
            Component::new("dental_charting", ComponentType::VerticalModule)
                .verticals(&["dental"])
                .order(30),
        ];
        let mut client = ClientConfig::new("c1", "restaurant", PlanTier::Essentials);
        client.addons = vec!["loyalty_program".into()];

        let selected = select_components(&registry, &client);
        assert_eq!(names(&selected), vec!["core_platform", "loyalty_program"]);
    }

    #[test]
    fn test_registry_order_is_preserved() {
        let registry = vec![
            Component::new("zeta", ComponentType::Core).order(1),
            Component::new("alpha", ComponentType::Core),
            Component::new("mid", ComponentType::Core).order(50),
        ];
        let client = ClientConfig::new("c1", "dental", PlanTier::Starter);
        assert_eq!(names(&select_components(&registry, &client)), vec!["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn test_empty_registry_selects_nothing() {
        let client = ClientConfig::new("c1", "dental", PlanTier::Scale);
        let selected = select_for_client(&[] as &[Component], &client).await.unwrap();
        assert!(selected.is_empty());
    }
}
