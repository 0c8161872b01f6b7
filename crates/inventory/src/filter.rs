//! Multi-criteria filter engine.
//!
//! Every criterion is optional; the ones that are present are ANDed. Results
//! keep the input order.

use crate::asset::Asset;
use crate::equipment::{Equipment, EquipmentKind, EquipmentSite};
use crate::peripheral::{Condition, Peripheral, PeripheralKind};

/// A predicate over one asset kind.
pub trait Criteria<A> {
    fn matches(&self, asset: &A) -> bool;
}

/// Select the items matching `criteria`, preserving their order.
pub fn filter<'a, A, C>(items: &'a [A], criteria: &C) -> Vec<&'a A>
where
    C: Criteria<A> + ?Sized,
{
    items.iter().filter(|item| criteria.matches(item)).collect()
}

/// Case-insensitive substring search over asset tag, serial, model and brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery(String);

impl TextQuery {
    /// Returns `None` for an empty query, which constrains nothing.
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            None
        } else {
            Some(Self(query.to_lowercase()))
        }
    }

    pub fn matches<A: Asset>(&self, asset: &A) -> bool {
        [
            asset.asset_tag(),
            asset.serial_number(),
            asset.model(),
            asset.brand(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.0))
    }
}

fn brand_matches(expected: Option<&str>, actual: &str) -> bool {
    expected.is_none_or(|b| b == actual)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentCriteria {
    pub text_query: Option<TextQuery>,
    pub brand: Option<String>,
    pub kind: Option<EquipmentKind>,
    pub site: Option<EquipmentSite>,
}

impl EquipmentCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, query: &str) -> Self {
        self.text_query = TextQuery::new(query);
        self
    }

    /// Exact brand match; an empty brand constrains nothing.
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into()).filter(|b: &String| !b.is_empty());
        self
    }

    pub fn kind(mut self, kind: EquipmentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn site(mut self, site: EquipmentSite) -> Self {
        self.site = Some(site);
        self
    }
}

impl Criteria<Equipment> for EquipmentCriteria {
    fn matches(&self, e: &Equipment) -> bool {
        self.text_query.as_ref().is_none_or(|q| q.matches(e))
            && brand_matches(self.brand.as_deref(), &e.brand)
            && self.kind.is_none_or(|k| k == e.kind)
            && self.site.is_none_or(|s| s == e.site)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeripheralCriteria {
    pub text_query: Option<TextQuery>,
    pub brand: Option<String>,
    pub kind: Option<PeripheralKind>,
    pub condition: Option<Condition>,
}

impl PeripheralCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, query: &str) -> Self {
        self.text_query = TextQuery::new(query);
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into()).filter(|b: &String| !b.is_empty());
        self
    }

    pub fn kind(mut self, kind: PeripheralKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

impl Criteria<Peripheral> for PeripheralCriteria {
    fn matches(&self, p: &Peripheral) -> bool {
        self.text_query.as_ref().is_none_or(|q| q.matches(p))
            && brand_matches(self.brand.as_deref(), &p.brand)
            && self.kind.is_none_or(|k| k == p.kind)
            && self.condition.is_none_or(|c| c == p.condition)
    }
}
