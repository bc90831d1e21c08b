//! The ordered cascade of search strategies.
//!
//! Each [`Strategy`] pairs a method tag and endpoint with a plan function that
//! derives the query from a [`QueryPlan`], or returns `None` when the step
//! should be skipped for this input. The resolver walks [`CASCADE`] in order
//! and stops at the first in-bounds hit.

use fleamap_core::Method;

use crate::classify::{classify, AddressKind};
use crate::normalize::{
    clean_search_term, extract_building_name, extract_place_name, extract_upper_region,
    strip_house_number, CleanLevel,
};
use crate::provider::Endpoint;

/// Every derived form of one input, computed once per resolution.
#[derive(Debug, Clone)]
pub struct QueryPlan<'a> {
    pub raw: &'a str,
    pub hint: Option<&'a str>,
    pub kind: AddressKind,
    pub light: String,
    pub medium: String,
    pub aggressive: String,
    /// Place-name token from the lightly cleaned text (or the raw text when
    /// light cleaning leaves nothing).
    pub place_name: Option<String>,
}

impl<'a> QueryPlan<'a> {
    #[must_use]
    pub fn new(raw: &'a str, hint: Option<&'a str>) -> Self {
        let light = clean_search_term(raw, CleanLevel::Light);
        let medium = clean_search_term(raw, CleanLevel::Medium);
        let aggressive = clean_search_term(raw, CleanLevel::Aggressive);
        let place_name = extract_place_name(if light.is_empty() { raw } else { &light });

        Self {
            raw,
            hint,
            kind: classify(raw),
            light,
            medium,
            aggressive,
            place_name,
        }
    }
}

/// One step of the cascade.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub method: Method,
    pub endpoint: Endpoint,
    pub plan: fn(&QueryPlan<'_>) -> Option<String>,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("method", &self.method)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// The ten strategies, in priority order.
pub static CASCADE: [Strategy; 10] = [
    Strategy {
        method: Method::KeywordSearchOriginal,
        endpoint: Endpoint::Keyword,
        plan: plan_original,
    },
    Strategy {
        method: Method::AddressSearch,
        endpoint: Endpoint::Address,
        plan: plan_address,
    },
    Strategy {
        method: Method::KeywordSearchLight,
        endpoint: Endpoint::Keyword,
        plan: plan_light,
    },
    Strategy {
        method: Method::KeywordSearchPlaceName,
        endpoint: Endpoint::Keyword,
        plan: plan_place_name,
    },
    Strategy {
        method: Method::KeywordSearchMedium,
        endpoint: Endpoint::Keyword,
        plan: plan_medium,
    },
    Strategy {
        method: Method::KeywordSearchAggressive,
        endpoint: Endpoint::Keyword,
        plan: plan_aggressive,
    },
    Strategy {
        method: Method::KeywordSearchUpperRegion,
        endpoint: Endpoint::Keyword,
        plan: plan_upper_region,
    },
    Strategy {
        method: Method::KeywordSearchBuildingName,
        endpoint: Endpoint::Keyword,
        plan: plan_building_name,
    },
    Strategy {
        method: Method::KeywordSearchWithoutNumber,
        endpoint: Endpoint::Keyword,
        plan: plan_without_number,
    },
    Strategy {
        method: Method::KeywordSearchPlaceNameAggressive,
        endpoint: Endpoint::Keyword,
        plan: plan_place_name_aggressive,
    },
];

/// `candidate` as an owned query if it is non-empty and differs from every
/// entry in `earlier`.
fn distinct(candidate: &str, earlier: &[&str]) -> Option<String> {
    (!candidate.is_empty() && !earlier.contains(&candidate)).then(|| candidate.to_owned())
}

fn plan_original(plan: &QueryPlan<'_>) -> Option<String> {
    Some(plan.raw.to_owned())
}

fn plan_address(plan: &QueryPlan<'_>) -> Option<String> {
    (plan.kind == AddressKind::CompleteAddress).then(|| plan.raw.to_owned())
}

fn plan_light(plan: &QueryPlan<'_>) -> Option<String> {
    distinct(&plan.light, &[plan.raw])
}

fn plan_place_name(plan: &QueryPlan<'_>) -> Option<String> {
    distinct(plan.place_name.as_deref()?, &[plan.raw, plan.light.as_str()])
}

fn plan_medium(plan: &QueryPlan<'_>) -> Option<String> {
    distinct(&plan.medium, &[plan.raw, plan.light.as_str()])
}

fn plan_aggressive(plan: &QueryPlan<'_>) -> Option<String> {
    distinct(&plan.aggressive, &[plan.raw, plan.medium.as_str()])
}

fn plan_upper_region(plan: &QueryPlan<'_>) -> Option<String> {
    if plan.kind != AddressKind::IncompleteAddress {
        return None;
    }
    distinct(&extract_upper_region(plan.raw), &[plan.raw])
}

fn plan_building_name(plan: &QueryPlan<'_>) -> Option<String> {
    let hint = plan.hint.filter(|h| !h.trim().is_empty())?;
    distinct(&extract_building_name(hint)?, &[plan.raw])
}

fn plan_without_number(plan: &QueryPlan<'_>) -> Option<String> {
    if plan.kind != AddressKind::CompleteAddress {
        return None;
    }
    distinct(&strip_house_number(plan.raw), &[plan.raw])
}

fn plan_place_name_aggressive(plan: &QueryPlan<'_>) -> Option<String> {
    if plan.kind != AddressKind::Place {
        return None;
    }
    let source = [plan.aggressive.as_str(), plan.medium.as_str(), plan.raw]
        .into_iter()
        .find(|s| !s.is_empty())?;
    let name = extract_place_name(source)?;
    (plan.place_name.as_deref() != Some(name.as_str())).then_some(name)
}
