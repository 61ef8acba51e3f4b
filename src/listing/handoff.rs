use crate::analysis::parser::ScannedItemAnalysis;
use crate::listing::{Marketplace, MarketplaceListing};
use serde::{Deserialize, Serialize};
use url::Url;

/// The copy-to-clipboard payload for platforms without a listing API: the
/// user pastes the text block into the marketplace's own create-listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffPayload {
    pub clipboard_text: String,
    pub url: String,
}

fn create_listing_url(marketplace: Marketplace) -> Option<Url> {
    let raw = match marketplace {
        Marketplace::Amazon => "https://sell.amazon.com/",
        Marketplace::Facebook => "https://www.facebook.com/marketplace/create/item",
        Marketplace::Mercari => "https://www.mercari.com/sell/",
        Marketplace::Poshmark => "https://poshmark.com/create-listing",
        Marketplace::Depop => "https://www.depop.com/products/create/",
        Marketplace::Ebay | Marketplace::Etsy | Marketplace::StockX => return None,
    };
    Url::parse(raw).ok()
}

/// Builds the handoff block for one marketplace, or `None` for the
/// API-integrated platforms that go through `/submit` instead.
pub fn handoff_payload(
    marketplace: Marketplace,
    analysis: &ScannedItemAnalysis,
) -> Option<HandoffPayload> {
    let url = create_listing_url(marketplace)?;
    let listing = MarketplaceListing::from_analysis(marketplace, analysis);
    let base = listing.base();

    let mut lines = vec![
        base.title.clone(),
        String::new(),
        base.description.clone(),
        String::new(),
        format!("Condition: {}", base.condition),
        format!("Category: {}", base.category),
        format!(
            "Suggested price: ${:.2} - ${:.2}",
            base.price_range.min, base.price_range.max
        ),
    ];
    for (key, value) in &base.attributes {
        lines.push(format!("{}: {}", key, value));
    }

    Some(HandoffPayload {
        clipboard_text: lines.join("\n"),
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_analysis() -> ScannedItemAnalysis {
        ScannedItemAnalysis {
            item_name: "Red Ceramic Mug".to_string(),
            category: "Home".to_string(),
            condition: "Good".to_string(),
            description: "A sturdy red mug with no chips.".to_string(),
            estimated_value_range: "$5 - $10".to_string(),
            attributes: BTreeMap::new(),
        }
    }

    #[test]
    fn clipboard_marketplaces_get_a_payload() {
        for marketplace in [
            Marketplace::Amazon,
            Marketplace::Facebook,
            Marketplace::Mercari,
            Marketplace::Poshmark,
            Marketplace::Depop,
        ] {
            let payload = handoff_payload(marketplace, &sample_analysis()).unwrap();
            assert!(payload.clipboard_text.starts_with("Red Ceramic Mug"));
            assert!(payload.clipboard_text.contains("Suggested price:"));
            assert!(payload.url.starts_with("https://"));
        }
    }

    #[test]
    fn api_marketplaces_have_no_handoff() {
        for marketplace in [Marketplace::Ebay, Marketplace::Etsy, Marketplace::StockX] {
            assert!(handoff_payload(marketplace, &sample_analysis()).is_none());
        }
    }

    #[test]
    fn mercari_price_is_scaled_in_the_text_block() {
        let payload = handoff_payload(Marketplace::Mercari, &sample_analysis()).unwrap();
        assert!(payload.clipboard_text.contains("$4.50 - $9.00"));
    }
}
