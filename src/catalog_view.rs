//! Loaded catalogs and their query views.
//!
//! A catalog is loaded whole, once, from the bundled JSON and is immutable
//! afterwards. [`CatalogView`] remembers the last criteria it was queried
//! with so that re-rendering with unchanged criteria does not refilter.

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::app_response::AppResponse;
use crate::catalog_filter::{self, FilterCriteria, PriceBounds};
use crate::catalog_model::{
    BanquetVenue, CatalogItem, CatalogKind, Filterable, GalleryImage, MenuItem, Room, StaffMember,
};
use crate::formatters::slugify;

/// Default number of related and featured items shown on detail pages.
pub const DEFAULT_SHOWCASE_LIMIT: usize = 3;

/// An immutable catalog plus the result of its last query.
#[derive(Debug, Clone)]
pub struct CatalogView<T> {
    items: Vec<T>,
    last_query: Option<(FilterCriteria, Vec<T>)>,
}

impl<T> Default for CatalogView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            last_query: None,
        }
    }
}

impl<T: Filterable + Clone> CatalogView<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            last_query: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Filtered and sorted items for `criteria`. An empty slice is a valid
    /// "no results" answer.
    pub fn query(&mut self, criteria: &FilterCriteria) -> &[T] {
        let reuse = matches!(&self.last_query, Some((last, _)) if last == criteria);
        if !reuse {
            let result = criteria.apply(&self.items);
            debug!("Catalog query matched {} of {} items", result.len(), self.items.len());
            self.last_query = Some((criteria.clone(), result));
        }

        match &self.last_query {
            Some((_, result)) => result.as_slice(),
            None => &[],
        }
    }

    pub fn categories(&self) -> Vec<String> {
        catalog_filter::categories(&self.items)
    }

    pub fn price_bounds(&self) -> PriceBounds {
        catalog_filter::price_bounds(&self.items)
    }

    pub fn find(&self, id: u32) -> Option<&T> {
        catalog_filter::find_by_id(&self.items, id)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&T> {
        catalog_filter::find_by_slug(&self.items, slug)
    }

    /// Items related to the one with `id`; empty when `id` is unknown.
    pub fn related(&self, id: u32, limit: usize) -> Vec<&T> {
        match self.find(id) {
            Some(item) => catalog_filter::related(&self.items, item, limit),
            None => Vec::new(),
        }
    }

    pub fn featured(&self, limit: usize) -> Vec<&T> {
        catalog_filter::featured(&self.items, limit)
    }
}

/// Every catalog the storefront bundles, one view per [`CatalogKind`].
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub menu: CatalogView<MenuItem>,
    pub rooms: CatalogView<Room>,
    pub banquets: CatalogView<BanquetVenue>,
    pub gallery: CatalogView<GalleryImage>,
    pub staff: CatalogView<StaffMember>,
}

fn parse_items<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, AppResponse> {
    Ok(serde_json::from_str(json)?)
}

/// Records without a slug get one derived from their name.
fn fill_missing_slug(slug: &mut String, name: &str) {
    if slug.is_empty() {
        *slug = slugify(name);
        debug!("Derived slug '{}' for '{}'", slug, name);
    }
}

impl Catalogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the catalog of `kind` with the records in `json` (a JSON
    /// array). Returns the number of records loaded.
    pub fn load_json(&mut self, kind: CatalogKind, json: &str) -> Result<usize, AppResponse> {
        let count = match kind {
            CatalogKind::Menu => {
                self.menu = CatalogView::new(parse_items(json)?);
                self.menu.len()
            }
            CatalogKind::Rooms => {
                let mut rooms: Vec<Room> = parse_items(json)?;
                for room in rooms.iter_mut() {
                    fill_missing_slug(&mut room.slug, &room.name);
                }
                self.rooms = CatalogView::new(rooms);
                self.rooms.len()
            }
            CatalogKind::Banquets => {
                let mut venues: Vec<BanquetVenue> = parse_items(json)?;
                for venue in venues.iter_mut() {
                    fill_missing_slug(&mut venue.slug, &venue.name);
                }
                self.banquets = CatalogView::new(venues);
                self.banquets.len()
            }
            CatalogKind::Gallery => {
                self.gallery = CatalogView::new(parse_items(json)?);
                self.gallery.len()
            }
            CatalogKind::Staff => {
                self.staff = CatalogView::new(parse_items(json)?);
                self.staff.len()
            }
        };
        info!("Loaded {} {} records", count, kind);
        Ok(count)
    }

    pub fn len(&self, kind: CatalogKind) -> usize {
        match kind {
            CatalogKind::Menu => self.menu.len(),
            CatalogKind::Rooms => self.rooms.len(),
            CatalogKind::Banquets => self.banquets.len(),
            CatalogKind::Gallery => self.gallery.len(),
            CatalogKind::Staff => self.staff.len(),
        }
    }

    /// Filtered records of `kind`, serialized as a plain JSON array.
    pub fn filter_json(
        &mut self,
        kind: CatalogKind,
        criteria: &FilterCriteria,
    ) -> Result<String, AppResponse> {
        let json = match kind {
            CatalogKind::Menu => serde_json::to_string(self.menu.query(criteria))?,
            CatalogKind::Rooms => serde_json::to_string(self.rooms.query(criteria))?,
            CatalogKind::Banquets => serde_json::to_string(self.banquets.query(criteria))?,
            CatalogKind::Gallery => serde_json::to_string(self.gallery.query(criteria))?,
            CatalogKind::Staff => serde_json::to_string(self.staff.query(criteria))?,
        };
        Ok(json)
    }

    /// Applies `criteria` to every catalog and returns the matches tagged by
    /// kind: menu, rooms, banquets, gallery, then staff.
    pub fn search_all(&mut self, criteria: &FilterCriteria) -> Vec<CatalogItem> {
        let mut results = Vec::new();
        results.extend(self.menu.query(criteria).iter().cloned().map(CatalogItem::Menu));
        results.extend(self.rooms.query(criteria).iter().cloned().map(CatalogItem::Rooms));
        results.extend(
            self.banquets
                .query(criteria)
                .iter()
                .cloned()
                .map(CatalogItem::Banquets),
        );
        results.extend(self.gallery.query(criteria).iter().cloned().map(CatalogItem::Gallery));
        results.extend(self.staff.query(criteria).iter().cloned().map(CatalogItem::Staff));
        results
    }

    pub fn categories(&self, kind: CatalogKind) -> Vec<String> {
        match kind {
            CatalogKind::Menu => self.menu.categories(),
            CatalogKind::Rooms => self.rooms.categories(),
            CatalogKind::Banquets => self.banquets.categories(),
            CatalogKind::Gallery => self.gallery.categories(),
            CatalogKind::Staff => self.staff.categories(),
        }
    }

    pub fn price_bounds(&self, kind: CatalogKind) -> PriceBounds {
        match kind {
            CatalogKind::Menu => self.menu.price_bounds(),
            CatalogKind::Rooms => self.rooms.price_bounds(),
            CatalogKind::Banquets => self.banquets.price_bounds(),
            CatalogKind::Gallery => self.gallery.price_bounds(),
            CatalogKind::Staff => self.staff.price_bounds(),
        }
    }

    pub fn find(&self, kind: CatalogKind, id: u32) -> Option<CatalogItem> {
        match kind {
            CatalogKind::Menu => self.menu.find(id).cloned().map(CatalogItem::Menu),
            CatalogKind::Rooms => self.rooms.find(id).cloned().map(CatalogItem::Rooms),
            CatalogKind::Banquets => self.banquets.find(id).cloned().map(CatalogItem::Banquets),
            CatalogKind::Gallery => self.gallery.find(id).cloned().map(CatalogItem::Gallery),
            CatalogKind::Staff => self.staff.find(id).cloned().map(CatalogItem::Staff),
        }
    }

    /// Looks a room or banquet venue up by its slug.
    pub fn find_by_slug(&self, kind: CatalogKind, slug: &str) -> Option<CatalogItem> {
        match kind {
            CatalogKind::Rooms => self.rooms.find_by_slug(slug).cloned().map(CatalogItem::Rooms),
            CatalogKind::Banquets => self
                .banquets
                .find_by_slug(slug)
                .cloned()
                .map(CatalogItem::Banquets),
            _ => None,
        }
    }

    pub fn related(&self, kind: CatalogKind, id: u32, limit: usize) -> Vec<CatalogItem> {
        match kind {
            CatalogKind::Menu => tagged(self.menu.related(id, limit), CatalogItem::Menu),
            CatalogKind::Rooms => tagged(self.rooms.related(id, limit), CatalogItem::Rooms),
            CatalogKind::Banquets => tagged(self.banquets.related(id, limit), CatalogItem::Banquets),
            CatalogKind::Gallery => tagged(self.gallery.related(id, limit), CatalogItem::Gallery),
            CatalogKind::Staff => tagged(self.staff.related(id, limit), CatalogItem::Staff),
        }
    }

    pub fn featured(&self, kind: CatalogKind, limit: usize) -> Vec<CatalogItem> {
        match kind {
            CatalogKind::Menu => tagged(self.menu.featured(limit), CatalogItem::Menu),
            CatalogKind::Rooms => tagged(self.rooms.featured(limit), CatalogItem::Rooms),
            CatalogKind::Banquets => tagged(self.banquets.featured(limit), CatalogItem::Banquets),
            CatalogKind::Gallery => tagged(self.gallery.featured(limit), CatalogItem::Gallery),
            CatalogKind::Staff => tagged(self.staff.featured(limit), CatalogItem::Staff),
        }
    }
}

fn tagged<T: Clone>(items: Vec<&T>, wrap: fn(T) -> CatalogItem) -> Vec<CatalogItem> {
    items.into_iter().cloned().map(wrap).collect()
}
