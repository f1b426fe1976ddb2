//! Market cache and order-price validation
//!
//! Upbit identifies tradable pairs by `"<QUOTE>-<BASE>"` strings such as
//! `"KRW-BTC"`. The client fetches the full list once at construction and
//! validates every market parameter against that snapshot before issuing a
//! request. The snapshot is never refreshed; a long-lived client will not see
//! newly listed markets without being reconstructed.
//!
//! This module also carries the KRW tick-size rule: limit orders on
//! KRW-quoted markets must price on a bracket-dependent grid.

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::error::{RestError, RestResult};

/// Quote-currency prefix of markets subject to the tick-size rule
const KRW_PREFIX: &str = "KRW-";

/// Immutable snapshot of the tradable market list
///
/// Built once during client construction from `GET /v1/market/all`.
/// Membership queries are pure and side-effect free, so concurrent reads are
/// safe.
#[derive(Debug, Clone)]
pub struct MarketCache {
    /// Identifiers in the order the exchange listed them
    ids: Vec<String>,
    /// Membership index
    index: HashSet<String>,
}

impl MarketCache {
    /// Build the cache from the identifiers extracted from the market list
    pub(crate) fn new(ids: Vec<String>) -> Self {
        let index = ids.iter().cloned().collect();
        Self { ids, index }
    }

    /// Check whether an identifier was tradable when the snapshot was taken
    pub fn contains(&self, market: &str) -> bool {
        self.index.contains(market)
    }

    /// All cached identifiers, in exchange listing order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of cached markets
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if the snapshot holds no markets
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Require `market` to be a known identifier
    pub(crate) fn ensure(&self, market: &str) -> RestResult<()> {
        if self.contains(market) {
            Ok(())
        } else {
            Err(RestError::InvalidMarket(market.to_string()))
        }
    }

    /// Validate a list parameter and join it into one query value
    ///
    /// The list must be non-empty and every element a known market. Elements
    /// are joined comma-separated in input order; duplicates are kept as
    /// given, matching the upstream API's interpretation of repeated markets.
    pub(crate) fn ensure_all(&self, markets: &[&str]) -> RestResult<String> {
        if markets.is_empty() {
            return Err(RestError::InvalidParameter("no markets".to_string()));
        }
        for market in markets {
            self.ensure(market)?;
        }
        Ok(markets.join(","))
    }
}

/// True when `market` is quoted in KRW and therefore subject to the
/// tick-size rule
pub fn is_krw_market(market: &str) -> bool {
    market.starts_with(KRW_PREFIX)
}

/// Mandated price increment for a KRW-market order price
///
/// | Price range (inclusive upper bound) | Increment |
/// |---|---|
/// | ≤ 10 | 0.01 |
/// | ≤ 100 | 0.1 |
/// | ≤ 1,000 | 1 |
/// | ≤ 10,000 | 5 |
/// | ≤ 100,000 | 10 |
/// | ≤ 500,000 | 50 |
/// | ≤ 1,000,000 | 100 |
/// | ≤ 2,000,000 | 500 |
/// | > 2,000,000 | 1,000 |
pub fn tick_size(price: Decimal) -> Decimal {
    if price <= Decimal::from(10) {
        Decimal::new(1, 2) // 0.01
    } else if price <= Decimal::from(100) {
        Decimal::new(1, 1) // 0.1
    } else if price <= Decimal::from(1_000) {
        Decimal::ONE
    } else if price <= Decimal::from(10_000) {
        Decimal::from(5)
    } else if price <= Decimal::from(100_000) {
        Decimal::from(10)
    } else if price <= Decimal::from(500_000) {
        Decimal::from(50)
    } else if price <= Decimal::from(1_000_000) {
        Decimal::from(100)
    } else if price <= Decimal::from(2_000_000) {
        Decimal::from(500)
    } else {
        Decimal::from(1_000)
    }
}

/// Check that a KRW order price lies exactly on the tick-size grid
///
/// Exact decimal arithmetic with zero tolerance, so 0.01 is accepted and
/// 0.015 rejected without binary floating-point artifacts.
pub fn is_valid_price(price: Decimal) -> bool {
    (price % tick_size(price)).is_zero()
}

/// Require `price` to be on the grid, reporting the offending value
pub(crate) fn ensure_valid_price(price: Decimal) -> RestResult<()> {
    if is_valid_price(price) {
        Ok(())
    } else {
        Err(RestError::InvalidPrice(price))
    }
}
