use crate::listing::Marketplace;
use serde::{Deserialize, Serialize};

/// Parsed dollar range, already scaled for a target marketplace where noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Brands worth calling out on resale platforms. Matching is
/// case-insensitive substring over the item name.
const KNOWN_BRANDS: &[&str] = &[
    "Nike",
    "Air Jordan",
    "Jordan",
    "Adidas",
    "New Balance",
    "Converse",
    "Vans",
    "Apple",
    "Samsung",
    "Sony",
    "Nintendo",
    "Bose",
    "Levi's",
    "Patagonia",
    "The North Face",
    "Carhartt",
    "Supreme",
    "Lululemon",
    "Coach",
    "Michael Kors",
    "Kate Spade",
    "Gucci",
    "Louis Vuitton",
    "Ray-Ban",
    "Lego",
    "Funko",
    "KitchenAid",
    "Yeti",
    "Stanley",
    "Dyson",
];

pub fn detect_brand(item_name: &str) -> Option<&'static str> {
    let haystack = item_name.to_lowercase();
    KNOWN_BRANDS
        .iter()
        .find(|brand| haystack.contains(&brand.to_lowercase()))
        .copied()
}

pub fn is_vintage(analysis_text: &str) -> bool {
    let haystack = analysis_text.to_lowercase();
    ["vintage", "retro", "antique", "90s", "80s", "70s"]
        .iter()
        .any(|kw| haystack.contains(kw))
}

/// Pulls the first one or two dollar amounts out of free text like
/// "$80 - $120" or "around $45". One amount yields a degenerate range;
/// no amount yields `None`.
pub fn parse_price_range(value_text: &str) -> Option<PriceRange> {
    let mut amounts = Vec::new();
    let cleaned = value_text.replace(',', "");
    let mut current = String::new();

    for ch in cleaned.chars() {
        if ch.is_ascii_digit() || (ch == '.' && !current.is_empty()) {
            current.push(ch);
        } else if !current.is_empty() {
            if let Ok(n) = current.parse::<f64>() {
                amounts.push(n);
            }
            current.clear();
        }
    }
    if !current.is_empty() {
        if let Ok(n) = current.parse::<f64>() {
            amounts.push(n);
        }
    }

    match amounts.as_slice() {
        [] => None,
        [single] => Some(PriceRange {
            min: *single,
            max: *single,
        }),
        [first, second, ..] => Some(PriceRange {
            min: first.min(*second),
            max: first.max(*second),
        }),
    }
}

/// Audience adjustment applied to the analyzed range when projecting to a
/// marketplace. StockX buyers pay a premium on hyped goods; local-pickup
/// platforms price lower.
fn price_multiplier(marketplace: Marketplace) -> f64 {
    match marketplace {
        Marketplace::Ebay => 1.0,
        Marketplace::Amazon => 1.1,
        Marketplace::Etsy => 1.15,
        Marketplace::Facebook => 0.85,
        Marketplace::StockX => 1.2,
        Marketplace::Mercari => 0.9,
        Marketplace::Poshmark => 0.95,
        Marketplace::Depop => 0.9,
    }
}

pub fn suggested_range(marketplace: Marketplace, value_text: &str) -> PriceRange {
    let base = parse_price_range(value_text).unwrap_or(PriceRange { min: 0.0, max: 0.0 });
    let mult = price_multiplier(marketplace);
    PriceRange {
        min: round_cents(base.min * mult),
        max: round_cents(base.max * mult),
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// eBay Trading API numeric condition ids.
pub fn ebay_condition_id(condition: &str) -> u32 {
    match condition.to_lowercase().as_str() {
        "new" => 1000,
        "like new" => 1500,
        "good" => 3000,
        "fair" => 3000,
        "poor" => 7000,
        _ => 3000,
    }
}

pub fn poshmark_condition(condition: &str) -> &'static str {
    match condition.to_lowercase().as_str() {
        "new" => "NWT",
        "like new" => "NWOT",
        _ => "Used",
    }
}

/// StockX only trades deadstock; anything else is rejected before submit.
pub fn stockx_accepts_condition(condition: &str) -> bool {
    condition.eq_ignore_ascii_case("new")
}

pub fn ebay_category_id(category: &str) -> &'static str {
    match category.to_lowercase().as_str() {
        "electronics" => "293",
        "clothing" => "11450",
        "shoes" => "93427",
        "accessories" => "4251",
        "home" => "11700",
        "toys" => "220",
        "sports" => "888",
        "books" => "267",
        "collectibles" => "1",
        _ => "99",
    }
}

pub fn etsy_taxonomy_id(category: &str) -> u32 {
    match category.to_lowercase().as_str() {
        "clothing" => 69150353,
        "shoes" => 68887482,
        "accessories" => 1,
        "home" => 891,
        "toys" => 974,
        "books" => 323,
        "collectibles" => 12,
        _ => 69150425,
    }
}
