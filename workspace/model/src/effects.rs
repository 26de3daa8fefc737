use crate::filters::{FilterState, RefetchPolicy};

/// A fetch the host has to run as a consequence of a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadYears,
    /// Filtered rows and year counts for the given selection.
    ApplyFilters(FilterState),
    LoadCountryBreakdown(Option<i32>),
    LoadTypeBreakdown(Option<i32>),
    LoadChartImage(FilterState),
    LoadVisualizations,
}

/// Fetches issued once when the dashboard mounts.
pub fn startup_effects(policy: RefetchPolicy) -> Vec<Effect> {
    let mut effects = vec![
        Effect::LoadYears,
        Effect::LoadCountryBreakdown(None),
        Effect::LoadTypeBreakdown(None),
        Effect::LoadVisualizations,
    ];
    if policy == RefetchPolicy::OnChange {
        effects.push(Effect::ApplyFilters(FilterState::default()));
    }
    effects
}

/// Fetches implied by moving from `previous` to `next` filters.
///
/// Breakdowns depend on the year only. Rows and year counts follow every
/// change under [`RefetchPolicy::OnChange`] and wait for an explicit submit
/// otherwise.
pub fn effects_for(previous: &FilterState, next: &FilterState, policy: RefetchPolicy) -> Vec<Effect> {
    let mut effects = Vec::new();
    if previous.year != next.year {
        effects.push(Effect::LoadCountryBreakdown(next.year));
        effects.push(Effect::LoadTypeBreakdown(next.year));
    }
    if policy == RefetchPolicy::OnChange && previous != next {
        effects.push(Effect::ApplyFilters(next.clone()));
    }
    effects
}
