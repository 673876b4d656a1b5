//! Catalog items and the static sponsor product table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Product family an item belongs to. Serialized as `"Tech"` / `"Home"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Tech,
    Home,
}

impl Category {
    /// Catalog build order. Ids within a category are numbered in this order.
    pub const ALL: [Category; 2] = [Category::Tech, Category::Home];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Tech => "Tech",
            Category::Home => "Home",
        }
    }

    /// Lowercase prefix used when deriving item ids (`tech-3`).
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Category::Tech => "tech",
            Category::Home => "home",
        }
    }

    /// Static product metadata available for this category.
    #[must_use]
    pub fn products(self) -> &'static [Product] {
        match self {
            Category::Tech => &TECH_PRODUCTS,
            Category::Home => &HOME_PRODUCTS,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the static sponsor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub title: &'static str,
    pub price: &'static str,
    pub image: &'static str,
}

const fn product(title: &'static str, price: &'static str, image: &'static str) -> Product {
    Product {
        title,
        price,
        image,
    }
}

pub const TECH_PRODUCTS: [Product; 8] = [
    product("Quantum Headset X", "€299", "/assets/images/product_tech_1_1.jpg"),
    product("Smart Lens Pro", "€149", "/assets/images/product_tech_1_2.jpg"),
    product("Nebula Drone", "€899", "/assets/images/product_tech_1_3.jpg"),
    product("CyberWatch 5", "€349", "/assets/images/product_tech_1_4.jpg"),
    product("Sonic Budz", "€129", "/assets/images/product_tech_1_5.jpg"),
    product("HyperDeck Dock", "€199", "/assets/images/product_tech_1_6.jpg"),
    product("StreamCam Ultra", "€179", "/assets/images/product_tech_1_7.jpg"),
    product("NanoCharge Pad", "€49", "/assets/images/product_tech_1_8.jpg"),
];

pub const HOME_PRODUCTS: [Product; 7] = [
    product("Lumina Lamp", "€89", "/assets/images/product_home_1_1.jpg"),
    product("Zen Diffuser", "€45", "/assets/images/product_home_1_2.jpg"),
    product("Aero Vase", "€65", "/assets/images/product_home_1_3.jpg"),
    product("Moda Chair", "€249", "/assets/images/product_home_1_4.jpg"),
    product("Pure Air Mini", "€120", "/assets/images/product_home_1_5.jpg"),
    product("Ceramic Set", "€75", "/assets/images/product_home_1_6.jpg"),
    product("Botanical Frame", "€35", "/assets/images/product_home_1_7.jpg"),
];

/// Stable identifier of a catalog item, derived from category and index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn derive(category: Category, index: usize) -> Self {
        Self(format!("{}-{index}", category.id_prefix()))
    }

    /// Wrap an id received from outside (CLI argument, stale UI reference).
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A sponsor item in the current catalog.
///
/// Everything except the clicked flag is fixed at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: ItemId,
    title: String,
    price: String,
    image: String,
    category: Category,
    is_clicked: bool,
}

impl Item {
    /// Build the unclicked item at `index` of `category`'s product table.
    ///
    /// Returns `None` when the table has no product at that index.
    #[must_use]
    pub fn from_product(category: Category, index: usize) -> Option<Self> {
        let product = category.products().get(index)?;
        Some(Self {
            id: ItemId::derive(category, index),
            title: product.title.to_string(),
            price: product.price.to_string(),
            image: product.image.to_string(),
            category,
            is_clicked: false,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn is_clicked(&self) -> bool {
        self.is_clicked
    }

    pub fn mark_clicked(&mut self) {
        self.is_clicked = true;
    }

    pub fn rearm(&mut self) {
        self.is_clicked = false;
    }
}
