//! Catalog and order snapshots, and historical price resolution.
//!
//! These structs mirror the JSON shapes the backend returns for the order
//! views. An article carries its full price history; order totals are
//! computed against the price that was effective when the cart was made,
//! not the current one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// One entry in an article's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    /// When this price became effective.
    pub created_at: DateTime<Utc>,
    /// Price in the shop currency.
    pub price: f64,
}

impl PriceRecord {
    /// Creates a price record.
    #[must_use]
    pub const fn new(created_at: DateTime<Utc>, price: f64) -> Self {
        Self { created_at, price }
    }
}

/// Article as embedded in cart and order payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSnapshot {
    /// Backend identifier.
    pub article_id: u32,
    /// Display name.
    pub name: String,
    /// Short description shown in listings.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Full price history, as fetched. Immutable within a view's lifetime.
    #[serde(rename = "articlePrices")]
    pub prices: Vec<PriceRecord>,
}

/// One line of a cart: an article and its ordered quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartArticle {
    /// Ordered quantity.
    pub quantity: u32,
    /// The article as it appeared in the catalog.
    pub article: ArticleSnapshot,
}

/// A shopping cart snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Backend identifier.
    pub cart_id: u32,
    /// When the cart was created. Reference timestamp for pricing.
    pub created_at: DateTime<Utc>,
    /// Cart lines.
    #[serde(rename = "cartArticles")]
    pub articles: Vec<CartArticle>,
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, awaiting review.
    #[default]
    Pending,
    /// Rejected by the administrator.
    Rejected,
    /// Accepted for fulfilment.
    Accepted,
    /// Handed to the carrier.
    Shipped,
}

/// An order as returned by the order endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend identifier.
    pub order_id: u32,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// Current fulfilment status.
    pub status: OrderStatus,
    /// The cart the order was placed from.
    pub cart: Cart,
}

/// Resolves the price effective at `as_of` from a price history.
///
/// The history is sorted ascending by timestamp (stable, so ties keep
/// their fetched order) and the latest record at or before `as_of` wins.
/// When every record postdates `as_of`, the earliest record is used as a
/// fallback so a non-empty history always resolves.
///
/// `as_of` is supplied by the caller (typically the cart's creation
/// timestamp); the resolver never reads the clock.
///
/// # Errors
///
/// Returns [`DomainError::EmptyPriceHistory`] when `history` is empty.
pub fn effective_price(history: &[PriceRecord], as_of: DateTime<Utc>) -> DomainResult<f64> {
    let mut records: Vec<&PriceRecord> = history.iter().collect();
    records.sort_by_key(|record| record.created_at);

    let earliest = records.first().ok_or(DomainError::EmptyPriceHistory)?;
    let effective = records
        .iter()
        .rev()
        .find(|record| record.created_at <= as_of)
        .unwrap_or(earliest);

    Ok(effective.price)
}

/// Sums a cart at the prices effective when the cart was created.
///
/// # Errors
///
/// Returns [`DomainError::EmptyPriceHistory`] if any article in the cart
/// has no price history.
pub fn order_total(cart: &Cart) -> DomainResult<f64> {
    let mut sum = 0.0;
    for line in &cart.articles {
        let price = effective_price(&line.article.prices, cart.created_at)?;
        sum += f64::from(line.quantity) * price;
    }
    Ok(sum)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    fn history() -> Vec<PriceRecord> {
        vec![PriceRecord::new(ts(10), 5.0), PriceRecord::new(ts(20), 7.0)]
    }

    #[test]
    fn test_effective_price_between_records() {
        assert_eq!(effective_price(&history(), ts(15)).unwrap(), 5.0);
    }

    #[test]
    fn test_effective_price_after_last_record() {
        assert_eq!(effective_price(&history(), ts(25)).unwrap(), 7.0);
    }

    #[test]
    fn test_effective_price_falls_back_to_earliest() {
        let single = vec![PriceRecord::new(ts(10), 5.0)];
        assert_eq!(effective_price(&single, ts(5)).unwrap(), 5.0);
    }

    #[test]
    fn test_effective_price_is_order_independent() {
        let mut shuffled = history();
        shuffled.reverse();
        assert_eq!(
            effective_price(&history(), ts(15)).unwrap(),
            effective_price(&shuffled, ts(15)).unwrap()
        );
        assert_eq!(
            effective_price(&history(), ts(25)).unwrap(),
            effective_price(&shuffled, ts(25)).unwrap()
        );
    }

    #[test]
    fn test_effective_price_empty_history() {
        assert_eq!(
            effective_price(&[], ts(15)),
            Err(DomainError::EmptyPriceHistory)
        );
    }

    #[test]
    fn test_order_total_uses_cart_creation_prices() {
        // Price rose to 7.0 after the cart was made; the total must use 5.0.
        let cart = Cart {
            cart_id: 1,
            created_at: ts(15),
            articles: vec![CartArticle {
                quantity: 3,
                article: ArticleSnapshot {
                    article_id: 42,
                    name: "Keyboard".to_string(),
                    excerpt: None,
                    prices: history(),
                },
            }],
        };

        assert_eq!(order_total(&cart).unwrap(), 15.0);
    }

    #[test]
    fn test_order_total_empty_cart_is_zero() {
        let cart = Cart {
            cart_id: 1,
            created_at: ts(15),
            articles: vec![],
        };
        assert_eq!(order_total(&cart).unwrap(), 0.0);
    }

    #[test]
    fn test_cart_deserializes_backend_shape() {
        let json = r#"{
            "cartId": 9,
            "createdAt": "2024-03-01T12:00:00Z",
            "cartArticles": [
                {
                    "quantity": 2,
                    "article": {
                        "articleId": 42,
                        "name": "Keyboard",
                        "articlePrices": [
                            { "createdAt": "2024-01-01T00:00:00Z", "price": 5.0 }
                        ]
                    }
                }
            ]
        }"#;

        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.cart_id, 9);
        assert_eq!(cart.articles[0].article.prices[0].price, 5.0);
        assert_eq!(order_total(&cart).unwrap(), 10.0);
    }

    #[test]
    fn test_order_deserializes_backend_shape() {
        let json = r#"{
            "orderId": 3,
            "createdAt": "2024-03-02T08:00:00Z",
            "status": "pending",
            "cart": {
                "cartId": 9,
                "createdAt": "2024-03-01T12:00:00Z",
                "cartArticles": []
            }
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, 3);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.cart.cart_id, 9);
    }
}
