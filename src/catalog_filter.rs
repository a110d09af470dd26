//! Catalog filter engine.
//!
//! [`FilterCriteria::apply`] is a pure function from a catalog slice to a new,
//! ordered `Vec`: every active criterion is an independent predicate, the
//! effective predicate is their conjunction, and sorting runs last with a
//! stable sort so equal keys keep catalog order.
//!
//! A criterion in its default state never excludes anything. When a
//! criterion is active, items whose kind lacks the attribute cannot satisfy
//! it and are dropped; the spice ceiling is the one exception and reads a
//! missing spice level as 0.

use serde::{Deserialize, Serialize};

use crate::catalog_model::{Filterable, MAX_SPICE_LEVEL};

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    /// Highest popularity first; a missing score counts as 0.
    #[serde(alias = "popularity-desc")]
    Popularity,
}

/// Inclusive price bounds. A missing bound is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Bounds actually enforced. An inverted range (min above max) or a
    /// non-finite bound enforces nothing on that side.
    fn effective(&self) -> (Option<f64>, Option<f64>) {
        let min = self.min.filter(|v| v.is_finite());
        let max = self.max.filter(|v| v.is_finite());
        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => (None, None),
            bounds => bounds,
        }
    }

    fn contains(&self, price: f64) -> bool {
        let (min, max) = self.effective();
        min.map_or(true, |lo| price >= lo) && max.map_or(true, |hi| price <= hi)
    }

    fn is_unbounded(&self) -> bool {
        self.effective() == (None, None)
    }
}

/// Lowest and highest price of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

/// Search, filter and sort parameters for one catalog query.
///
/// Deserializes from the host's view state, e.g.
/// `{"search":"curry","vegetarianOnly":true,"sort":"price-asc"}`; omitted
/// fields keep their neutral defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Free text matched against name, category, tags and description.
    pub search: String,
    /// Exact category (menu category, gallery category, staff role).
    pub category: Option<String>,
    pub vegetarian_only: bool,
    pub featured_only: bool,
    /// Inclusive ceiling. At [`MAX_SPICE_LEVEL`] or above it is inactive.
    pub max_spice_level: u8,
    pub price_range: Option<PriceRange>,
    /// Minimum guest capacity, inclusive.
    pub min_guests: Option<u32>,
    /// Case-insensitive substring of the bed type.
    pub bed_type: Option<String>,
    pub sort: SortKey,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            vegetarian_only: false,
            featured_only: false,
            max_spice_level: MAX_SPICE_LEVEL,
            price_range: None,
            min_guests: None,
            bed_type: None,
            sort: SortKey::Default,
        }
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn vegetarian_only(mut self) -> Self {
        self.vegetarian_only = true;
        self
    }

    pub fn featured_only(mut self) -> Self {
        self.featured_only = true;
        self
    }

    pub fn with_max_spice_level(mut self, level: u8) -> Self {
        self.max_spice_level = level;
        self
    }

    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    pub fn with_min_guests(mut self, guests: u32) -> Self {
        self.min_guests = Some(guests);
        self
    }

    pub fn with_bed_type(mut self, bed_type: impl Into<String>) -> Self {
        self.bed_type = Some(bed_type.into());
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Restores every criterion to its neutral default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any criterion (or the sort key) differs from neutral, given the
    /// catalog's price bounds. A price range spanning the whole catalog counts
    /// as neutral.
    pub fn has_active_filters(&self, bounds: PriceBounds) -> bool {
        let price_narrowed = self.price_range.map_or(false, |range| {
            let (min, max) = range.effective();
            min.map_or(false, |lo| lo > bounds.min) || max.map_or(false, |hi| hi < bounds.max)
        });

        self.search_query().is_some()
            || self.active_category().is_some()
            || self.vegetarian_only
            || self.featured_only
            || self.max_spice_level < MAX_SPICE_LEVEL
            || price_narrowed
            || self.min_guests.is_some()
            || self.active_bed_type().is_some()
            || self.sort != SortKey::Default
    }

    /// Filters then sorts `items`. The input is left untouched.
    pub fn apply<T: Filterable + Clone>(&self, items: &[T]) -> Vec<T> {
        let query = self.search_query();
        let bed_type = self.active_bed_type();

        let mut filtered: Vec<T> = items
            .iter()
            .filter(|item| self.matches_with(*item, query.as_deref(), bed_type.as_deref()))
            .cloned()
            .collect();

        sort_items(&mut filtered, self.sort);
        filtered
    }

    /// Whether a single item passes every active criterion.
    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        let query = self.search_query();
        let bed_type = self.active_bed_type();
        self.matches_with(item, query.as_deref(), bed_type.as_deref())
    }

    fn matches_with<T: Filterable + ?Sized>(
        &self,
        item: &T,
        query: Option<&str>,
        bed_type: Option<&str>,
    ) -> bool {
        if let Some(query) = query {
            if !matches_search(item, query) {
                return false;
            }
        }

        if let Some(category) = self.active_category() {
            if item.category() != Some(category) {
                return false;
            }
        }

        if self.vegetarian_only && item.is_vegetarian() != Some(true) {
            return false;
        }

        if self.featured_only && item.is_featured() != Some(true) {
            return false;
        }

        if self.max_spice_level < MAX_SPICE_LEVEL
            && item.spice_level().unwrap_or(0) > self.max_spice_level
        {
            return false;
        }

        if let Some(range) = self.price_range.filter(|r| !r.is_unbounded()) {
            match item.price() {
                Some(price) if range.contains(price) => {}
                _ => return false,
            }
        }

        if let Some(guests) = self.min_guests {
            if item.guest_capacity().map_or(true, |capacity| capacity < guests) {
                return false;
            }
        }

        if let Some(wanted) = bed_type {
            match item.bed_type() {
                Some(bed) if bed.to_lowercase().contains(wanted) => {}
                _ => return false,
            }
        }

        true
    }

    fn search_query(&self) -> Option<String> {
        let query = self.search.trim().to_lowercase();
        (!query.is_empty()).then_some(query)
    }

    fn active_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn active_bed_type(&self) -> Option<String> {
        self.bed_type
            .as_deref()
            .map(|b| b.trim().to_lowercase())
            .filter(|b| !b.is_empty() && b != "any")
    }
}

fn matches_search<T: Filterable + ?Sized>(item: &T, query: &str) -> bool {
    item.name().to_lowercase().contains(query)
        || item
            .category()
            .map_or(false, |c| c.to_lowercase().contains(query))
        || item
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
        || item
            .description()
            .map_or(false, |d| d.to_lowercase().contains(query))
}

fn sort_items<T: Filterable>(items: &mut [T], sort: SortKey) {
    let price = |item: &T| item.price().unwrap_or(0.0);
    let popularity = |item: &T| item.popularity().unwrap_or(0.0);

    match sort {
        SortKey::Default => {}
        SortKey::PriceAsc => items.sort_by(|a, b| price(a).total_cmp(&price(b))),
        SortKey::PriceDesc => items.sort_by(|a, b| price(b).total_cmp(&price(a))),
        SortKey::Popularity => items.sort_by(|a, b| popularity(b).total_cmp(&popularity(a))),
    }
}

/// Distinct categories in order of first appearance.
pub fn categories<T: Filterable>(items: &[T]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in items.iter().filter_map(|item| item.category()) {
        if !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}

/// Price bounds of the priced items; `{0, 0}` when nothing is priced.
pub fn price_bounds<T: Filterable>(items: &[T]) -> PriceBounds {
    let mut prices = items.iter().filter_map(|item| item.price());
    let first = match prices.next() {
        Some(price) => price,
        None => return PriceBounds::default(),
    };
    prices.fold(PriceBounds { min: first, max: first }, |bounds, price| PriceBounds {
        min: bounds.min.min(price),
        max: bounds.max.max(price),
    })
}

pub fn find_by_id<T: Filterable>(items: &[T], id: u32) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

pub fn find_by_slug<'a, T: Filterable>(items: &'a [T], slug: &str) -> Option<&'a T> {
    items.iter().find(|item| item.slug() == Some(slug))
}

/// Other items in the same category as `item` (any other item when the kind
/// has no category), in catalog order, at most `limit`.
pub fn related<'a, T: Filterable>(items: &'a [T], item: &T, limit: usize) -> Vec<&'a T> {
    let category = item.category();
    items
        .iter()
        .filter(|other| other.id() != item.id())
        .filter(|other| category.is_none() || other.category() == category)
        .take(limit)
        .collect()
}

/// Featured items in catalog order, at most `limit`. Kinds without a
/// featured flag yield the first `limit` items.
pub fn featured<T: Filterable>(items: &[T], limit: usize) -> Vec<&T> {
    items
        .iter()
        .filter(|item| item.is_featured().unwrap_or(true))
        .take(limit)
        .collect()
}
