//! Catalog data model.
//!
//! Each kind of displayable record (menu dishes, rooms, banquet venues,
//! gallery photos, staff) has its own struct mirroring the bundled JSON,
//! and all of them share the [`Filterable`] capability the filter engine
//! works against. [`CatalogItem`] is the closed set of kinds for places
//! that need to hold items of mixed kinds.
//!
//! Catalog records are created once when a catalog is loaded and never
//! mutated afterwards.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

/// Highest spice level a dish can carry.
pub const MAX_SPICE_LEVEL: u8 = 5;

/// Shared read-only view of a catalog record used for searching, filtering
/// and sorting.
///
/// Attributes a kind does not have return `None` (or an empty slice).
pub trait Filterable {
    fn id(&self) -> u32;
    fn name(&self) -> &str;

    fn category(&self) -> Option<&str> {
        None
    }

    fn tags(&self) -> &[String] {
        &[]
    }

    /// Long-form text matched by free-text search.
    fn description(&self) -> Option<&str> {
        None
    }

    fn price(&self) -> Option<f64> {
        None
    }

    fn popularity(&self) -> Option<f64> {
        None
    }

    fn is_vegetarian(&self) -> Option<bool> {
        None
    }

    fn spice_level(&self) -> Option<u8> {
        None
    }

    /// Number of guests the item accommodates.
    fn guest_capacity(&self) -> Option<u32> {
        None
    }

    fn bed_type(&self) -> Option<&str> {
        None
    }

    fn is_featured(&self) -> Option<bool> {
        None
    }

    fn slug(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub spice_level: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: u32,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub max_guests: u32,
    pub bed_type: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_true")]
    pub availability: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub rating: f64,
}

/// Guest counts per room layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capacity {
    pub seated: u32,
    pub standing: u32,
    pub theater: u32,
}

impl Capacity {
    /// Largest headcount across layouts.
    pub fn max(&self) -> u32 {
        self.seated.max(self.standing).max(self.theater)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanquetVenue {
    pub id: u32,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub capacity: Capacity,
    #[serde(default)]
    pub size: String,
    pub price_per_hour: f64,
    #[serde(default)]
    pub minimum_hours: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: u32,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub experience: String,
}

fn default_true() -> bool {
    true
}

impl Filterable for MenuItem {
    fn id(&self) -> u32 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn price(&self) -> Option<f64> {
        Some(self.price)
    }
    fn popularity(&self) -> Option<f64> {
        self.popularity
    }
    fn is_vegetarian(&self) -> Option<bool> {
        Some(self.is_vegetarian)
    }
    fn spice_level(&self) -> Option<u8> {
        Some(self.spice_level)
    }
}

impl Filterable for Room {
    fn id(&self) -> u32 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn tags(&self) -> &[String] {
        &self.amenities
    }
    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }
    fn price(&self) -> Option<f64> {
        Some(self.price)
    }
    fn popularity(&self) -> Option<f64> {
        Some(self.rating)
    }
    fn guest_capacity(&self) -> Option<u32> {
        Some(self.max_guests)
    }
    fn bed_type(&self) -> Option<&str> {
        Some(&self.bed_type)
    }
    fn is_featured(&self) -> Option<bool> {
        Some(self.featured)
    }
    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl Filterable for BanquetVenue {
    fn id(&self) -> u32 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn price(&self) -> Option<f64> {
        Some(self.price_per_hour)
    }
    fn popularity(&self) -> Option<f64> {
        Some(self.rating)
    }
    fn guest_capacity(&self) -> Option<u32> {
        Some(self.capacity.max())
    }
    fn is_featured(&self) -> Option<bool> {
        Some(self.featured)
    }
    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl Filterable for GalleryImage {
    fn id(&self) -> u32 {
        self.id
    }
    fn name(&self) -> &str {
        &self.title
    }
    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
    fn is_featured(&self) -> Option<bool> {
        Some(self.featured)
    }
}

impl Filterable for StaffMember {
    fn id(&self) -> u32 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    // The role is what the staff page filters on.
    fn category(&self) -> Option<&str> {
        Some(&self.role)
    }
    fn tags(&self) -> &[String] {
        if self.specialty.is_empty() {
            &[]
        } else {
            std::slice::from_ref(&self.specialty)
        }
    }
}

/// The kinds of catalog bundled with the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Menu,
    Rooms,
    Banquets,
    Gallery,
    Staff,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Menu => "menu",
            CatalogKind::Rooms => "rooms",
            CatalogKind::Banquets => "banquets",
            CatalogKind::Gallery => "gallery",
            CatalogKind::Staff => "staff",
        }
    }
}

impl Display for CatalogKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = AppResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "menu" => Ok(CatalogKind::Menu),
            "rooms" | "room" => Ok(CatalogKind::Rooms),
            "banquets" | "banquet" => Ok(CatalogKind::Banquets),
            "gallery" => Ok(CatalogKind::Gallery),
            "staff" => Ok(CatalogKind::Staff),
            other => Err(AppResponse::ValidationError(format!(
                "Unknown catalog kind: {other}"
            ))),
        }
    }
}

/// A catalog record of any kind, tagged with its kind when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogItem {
    Menu(MenuItem),
    Rooms(Room),
    Banquets(BanquetVenue),
    Gallery(GalleryImage),
    Staff(StaffMember),
}

impl CatalogItem {
    fn as_filterable(&self) -> &dyn Filterable {
        match self {
            CatalogItem::Menu(item) => item,
            CatalogItem::Rooms(item) => item,
            CatalogItem::Banquets(item) => item,
            CatalogItem::Gallery(item) => item,
            CatalogItem::Staff(item) => item,
        }
    }
}

impl Filterable for CatalogItem {
    fn id(&self) -> u32 {
        self.as_filterable().id()
    }
    fn name(&self) -> &str {
        self.as_filterable().name()
    }
    fn category(&self) -> Option<&str> {
        self.as_filterable().category()
    }
    fn tags(&self) -> &[String] {
        self.as_filterable().tags()
    }
    fn description(&self) -> Option<&str> {
        self.as_filterable().description()
    }
    fn price(&self) -> Option<f64> {
        self.as_filterable().price()
    }
    fn popularity(&self) -> Option<f64> {
        self.as_filterable().popularity()
    }
    fn is_vegetarian(&self) -> Option<bool> {
        self.as_filterable().is_vegetarian()
    }
    fn spice_level(&self) -> Option<u8> {
        self.as_filterable().spice_level()
    }
    fn guest_capacity(&self) -> Option<u32> {
        self.as_filterable().guest_capacity()
    }
    fn bed_type(&self) -> Option<&str> {
        self.as_filterable().bed_type()
    }
    fn is_featured(&self) -> Option<bool> {
        self.as_filterable().is_featured()
    }
    fn slug(&self) -> Option<&str> {
        self.as_filterable().slug()
    }
}
