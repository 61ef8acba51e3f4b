pub mod handoff;
pub mod heuristics;

use crate::analysis::parser::ScannedItemAnalysis;
use crate::listing::heuristics::{
    PriceRange, detect_brand, ebay_category_id, ebay_condition_id, etsy_taxonomy_id, is_vintage,
    poshmark_condition, suggested_range,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marketplace {
    Ebay,
    Amazon,
    Etsy,
    Facebook,
    StockX,
    Mercari,
    Poshmark,
    Depop,
}

impl Marketplace {
    pub const ALL: [Marketplace; 8] = [
        Marketplace::Ebay,
        Marketplace::Amazon,
        Marketplace::Etsy,
        Marketplace::Facebook,
        Marketplace::StockX,
        Marketplace::Mercari,
        Marketplace::Poshmark,
        Marketplace::Depop,
    ];

    /// Platforms reached through their listing-creation REST API. The rest
    /// go through the clipboard/deep-link handoff.
    pub fn is_api_integrated(self) -> bool {
        matches!(
            self,
            Marketplace::Ebay | Marketplace::Etsy | Marketplace::StockX
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Marketplace::Ebay => "ebay",
            Marketplace::Amazon => "amazon",
            Marketplace::Etsy => "etsy",
            Marketplace::Facebook => "facebook",
            Marketplace::StockX => "stockx",
            Marketplace::Mercari => "mercari",
            Marketplace::Poshmark => "poshmark",
            Marketplace::Depop => "depop",
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Marketplace {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ebay" => Ok(Marketplace::Ebay),
            "amazon" => Ok(Marketplace::Amazon),
            "etsy" => Ok(Marketplace::Etsy),
            "facebook" => Ok(Marketplace::Facebook),
            "stockx" => Ok(Marketplace::StockX),
            "mercari" => Ok(Marketplace::Mercari),
            "poshmark" => Ok(Marketplace::Poshmark),
            "depop" => Ok(Marketplace::Depop),
            other => Err(anyhow::anyhow!("unknown marketplace: {}", other)),
        }
    }
}

/// Fields every platform shares, projected once from the scanned item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingBase {
    pub title: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub price_range: PriceRange,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// One tagged union instead of eight near-duplicate structs; the mapping
/// stage below is a single exhaustive switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "marketplace", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum MarketplaceListing {
    Ebay {
        #[serde(flatten)]
        base: ListingBase,
        condition_id: u32,
        category_id: String,
        listing_format: String,
    },
    Amazon {
        #[serde(flatten)]
        base: ListingBase,
        brand: Option<String>,
        bullet_points: Vec<String>,
        fulfillment_channel: String,
    },
    Etsy {
        #[serde(flatten)]
        base: ListingBase,
        who_made: String,
        when_made: String,
        is_vintage: bool,
        taxonomy_id: u32,
        tags: Vec<String>,
    },
    Facebook {
        #[serde(flatten)]
        base: ListingBase,
        availability: String,
        delivery_method: String,
    },
    StockX {
        #[serde(flatten)]
        base: ListingBase,
        brand: String,
        size: Option<String>,
        style_id: Option<String>,
    },
    Mercari {
        #[serde(flatten)]
        base: ListingBase,
        brand: Option<String>,
        shipping_payer: String,
    },
    Poshmark {
        #[serde(flatten)]
        base: ListingBase,
        brand: Option<String>,
        department: String,
        size: Option<String>,
    },
    Depop {
        #[serde(flatten)]
        base: ListingBase,
        brand: Option<String>,
        size: Option<String>,
        style_tags: Vec<String>,
    },
}

impl MarketplaceListing {
    pub fn marketplace(&self) -> Marketplace {
        match self {
            MarketplaceListing::Ebay { .. } => Marketplace::Ebay,
            MarketplaceListing::Amazon { .. } => Marketplace::Amazon,
            MarketplaceListing::Etsy { .. } => Marketplace::Etsy,
            MarketplaceListing::Facebook { .. } => Marketplace::Facebook,
            MarketplaceListing::StockX { .. } => Marketplace::StockX,
            MarketplaceListing::Mercari { .. } => Marketplace::Mercari,
            MarketplaceListing::Poshmark { .. } => Marketplace::Poshmark,
            MarketplaceListing::Depop { .. } => Marketplace::Depop,
        }
    }

    pub fn base(&self) -> &ListingBase {
        match self {
            MarketplaceListing::Ebay { base, .. }
            | MarketplaceListing::Amazon { base, .. }
            | MarketplaceListing::Etsy { base, .. }
            | MarketplaceListing::Facebook { base, .. }
            | MarketplaceListing::StockX { base, .. }
            | MarketplaceListing::Mercari { base, .. }
            | MarketplaceListing::Poshmark { base, .. }
            | MarketplaceListing::Depop { base, .. } => base,
        }
    }

    /// Projects one scanned item into a marketplace-shaped listing. Pure and
    /// deterministic; independent edits to two projections are never synced.
    pub fn from_analysis(marketplace: Marketplace, analysis: &ScannedItemAnalysis) -> Self {
        let base = ListingBase {
            title: analysis.item_name.clone(),
            description: analysis.description.clone(),
            category: analysis.category.clone(),
            condition: analysis.condition.clone(),
            price_range: suggested_range(marketplace, &analysis.estimated_value_range),
            attributes: analysis.attributes.clone(),
        };
        let brand = detect_brand(&analysis.item_name).map(String::from);
        let vintage =
            is_vintage(&analysis.item_name) || is_vintage(&analysis.description);

        match marketplace {
            Marketplace::Ebay => MarketplaceListing::Ebay {
                condition_id: ebay_condition_id(&analysis.condition),
                category_id: ebay_category_id(&analysis.category).to_string(),
                listing_format: "FixedPrice".to_string(),
                base,
            },
            Marketplace::Amazon => {
                let mut bullet_points = vec![analysis.description.clone()];
                bullet_points.push(format!("Condition: {}", analysis.condition));
                bullet_points.extend(
                    analysis
                        .attributes
                        .iter()
                        .map(|(k, v)| format!("{}: {}", k, v)),
                );
                MarketplaceListing::Amazon {
                    brand,
                    bullet_points,
                    fulfillment_channel: "FBM".to_string(),
                    base,
                }
            }
            Marketplace::Etsy => {
                let mut tags = vec![analysis.category.to_lowercase()];
                if let Some(b) = &brand {
                    tags.push(b.to_lowercase());
                }
                if vintage {
                    tags.push("vintage".to_string());
                }
                tags.retain(|t| !t.is_empty());
                tags.truncate(13); // Etsy caps listings at 13 tags
                MarketplaceListing::Etsy {
                    who_made: "someone_else".to_string(),
                    when_made: if vintage { "before_2005" } else { "2020_2025" }.to_string(),
                    is_vintage: vintage,
                    taxonomy_id: etsy_taxonomy_id(&analysis.category),
                    tags,
                    base,
                }
            }
            Marketplace::Facebook => MarketplaceListing::Facebook {
                availability: "in stock".to_string(),
                delivery_method: "shipping_and_pickup".to_string(),
                base,
            },
            Marketplace::StockX => MarketplaceListing::StockX {
                brand: brand.unwrap_or_else(|| "Unknown".to_string()),
                size: analysis.attributes.get("size").cloned(),
                style_id: analysis
                    .attributes
                    .get("style_id")
                    .or_else(|| analysis.attributes.get("style"))
                    .cloned(),
                base,
            },
            Marketplace::Mercari => MarketplaceListing::Mercari {
                brand,
                shipping_payer: "seller".to_string(),
                base,
            },
            Marketplace::Poshmark => {
                let mut base = base;
                base.condition = poshmark_condition(&analysis.condition).to_string();
                MarketplaceListing::Poshmark {
                    brand,
                    department: analysis
                        .attributes
                        .get("department")
                        .or_else(|| analysis.attributes.get("gender"))
                        .cloned()
                        .unwrap_or_else(|| "Other".to_string()),
                    size: analysis.attributes.get("size").cloned(),
                    base,
                }
            }
            Marketplace::Depop => {
                let mut style_tags = vec![analysis.category.to_lowercase()];
                if vintage {
                    style_tags.push("vintage".to_string());
                }
                if let Some(b) = &brand {
                    style_tags.push(b.to_lowercase());
                }
                style_tags.retain(|t| !t.is_empty());
                MarketplaceListing::Depop {
                    brand,
                    size: analysis.attributes.get("size").cloned(),
                    style_tags,
                    base,
                }
            }
        }
    }
}
