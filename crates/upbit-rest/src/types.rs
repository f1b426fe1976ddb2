//! Types for Upbit REST API requests and responses
//!
//! Response shapes follow the Upbit API reference. Prices and volumes are
//! `rust_decimal::Decimal` throughout; the exchange serializes some of them
//! as JSON numbers (quotation endpoints) and some as strings (exchange
//! endpoints), and `Decimal`'s deserializer accepts both.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request Parameter Types
// ============================================================================

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy
    Bid,
    /// Sell
    Ask,
}

impl OrderSide {
    /// Wire value for query/body parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bid => "bid",
            Self::Ask => "ask",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order state filter for order listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    /// Waiting to be filled
    Wait,
    /// Fully executed
    Done,
    /// Cancelled
    Cancel,
}

impl OrderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wait => "wait",
            Self::Done => "done",
            Self::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result ordering for paged listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Withdrawal state filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawState {
    Submitting,
    Submitted,
    AlmostAccepted,
    Rejected,
    Accepted,
    Processing,
    Done,
    Canceled,
}

impl WithdrawState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::AlmostAccepted => "almost_accepted",
            Self::Rejected => "rejected",
            Self::Accepted => "accepted",
            Self::Processing => "processing",
            Self::Done => "done",
            Self::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for WithdrawState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Limit order request
///
/// Upbit's order endpoint also accepts market orders (`ord_type` of `price`
/// or `market`), but this client only places limit orders, matching the
/// behavior it reimplements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Market identifier (e.g. "KRW-BTC")
    pub market: String,
    /// Buy or sell
    pub side: OrderSide,
    /// Order volume in the base currency
    pub volume: Decimal,
    /// Price per unit in the quote currency
    pub price: Decimal,
}

impl OrderRequest {
    /// Create a limit order request
    pub fn limit(
        market: impl Into<String>,
        side: OrderSide,
        volume: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            market: market.into(),
            side,
            volume,
            price,
        }
    }

    /// Serialize to ordered key/value pairs
    ///
    /// The pair order is fixed because the signed `query` claim must match
    /// the transmitted body byte-for-byte.
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("market", self.market.clone()),
            ("side", self.side.as_str().to_string()),
            ("volume", self.volume.to_string()),
            ("price", self.price.to_string()),
            ("ord_type", "limit".to_string()),
        ]
    }
}

// ============================================================================
// Quotation Types
// ============================================================================

/// One entry of the tradable market list
#[derive(Debug, Clone, Deserialize)]
pub struct MarketInfo {
    /// Market identifier (e.g. "KRW-BTC")
    pub market: String,
    /// Korean display name
    pub korean_name: String,
    /// English display name
    pub english_name: String,
    /// Investment warning flag ("NONE" or "CAUTION"), when requested
    pub market_warning: Option<String>,
}

/// Minute candle
#[derive(Debug, Clone, Deserialize)]
pub struct MinuteCandle {
    pub market: String,
    /// Candle open time (UTC, `yyyy-MM-dd'T'HH:mm:ss`)
    pub candle_date_time_utc: String,
    /// Candle open time (KST)
    pub candle_date_time_kst: String,
    pub opening_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub trade_price: Decimal,
    /// Last tick timestamp in the candle (ms)
    pub timestamp: u64,
    pub candle_acc_trade_price: Decimal,
    pub candle_acc_trade_volume: Decimal,
    /// Candle width in minutes
    pub unit: u32,
}

/// Day candle
#[derive(Debug, Clone, Deserialize)]
pub struct DayCandle {
    pub market: String,
    pub candle_date_time_utc: String,
    pub candle_date_time_kst: String,
    pub opening_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub trade_price: Decimal,
    pub timestamp: u64,
    pub candle_acc_trade_price: Decimal,
    pub candle_acc_trade_volume: Decimal,
    /// Previous day's closing price
    pub prev_closing_price: Option<Decimal>,
    /// Change versus previous close
    pub change_price: Option<Decimal>,
    pub change_rate: Option<Decimal>,
    /// Close converted to the requested currency, when one was given
    pub converted_trade_price: Option<Decimal>,
}

/// Week or month candle
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodCandle {
    pub market: String,
    pub candle_date_time_utc: String,
    pub candle_date_time_kst: String,
    pub opening_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub trade_price: Decimal,
    pub timestamp: u64,
    pub candle_acc_trade_price: Decimal,
    pub candle_acc_trade_volume: Decimal,
    /// First day of the aggregated period (`yyyy-MM-dd`)
    pub first_day_of_period: String,
}

/// Executed trade tick
#[derive(Debug, Clone, Deserialize)]
pub struct TradeTick {
    pub market: String,
    pub trade_date_utc: String,
    pub trade_time_utc: String,
    /// Execution timestamp (ms)
    pub timestamp: u64,
    pub trade_price: Decimal,
    pub trade_volume: Decimal,
    pub prev_closing_price: Decimal,
    pub change_price: Decimal,
    /// Taker side ("ASK" or "BID")
    pub ask_bid: String,
    /// Pagination cursor
    pub sequential_id: u64,
}

/// Ticker snapshot for one market
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    pub market: String,
    pub trade_date: String,
    pub trade_time: String,
    pub trade_date_kst: String,
    pub trade_time_kst: String,
    pub opening_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    /// Last trade price
    pub trade_price: Decimal,
    pub prev_closing_price: Decimal,
    /// "RISE", "EVEN" or "FALL"
    pub change: String,
    pub change_price: Decimal,
    pub change_rate: Decimal,
    pub signed_change_price: Decimal,
    pub signed_change_rate: Decimal,
    pub trade_volume: Decimal,
    /// Accumulated trade price since 00:00 KST
    pub acc_trade_price: Decimal,
    pub acc_trade_price_24h: Decimal,
    pub acc_trade_volume: Decimal,
    pub acc_trade_volume_24h: Decimal,
    pub highest_52_week_price: Decimal,
    pub highest_52_week_date: String,
    pub lowest_52_week_price: Decimal,
    pub lowest_52_week_date: String,
    /// Snapshot timestamp (ms)
    pub timestamp: u64,
}

/// Orderbook snapshot for one market
#[derive(Debug, Clone, Deserialize)]
pub struct Orderbook {
    pub market: String,
    /// Snapshot timestamp (ms)
    pub timestamp: u64,
    pub total_ask_size: Decimal,
    pub total_bid_size: Decimal,
    /// Price levels, best first
    pub orderbook_units: Vec<OrderbookUnit>,
}

/// One orderbook price level
#[derive(Debug, Clone, Deserialize)]
pub struct OrderbookUnit {
    pub ask_price: Decimal,
    pub bid_price: Decimal,
    pub ask_size: Decimal,
    pub bid_size: Decimal,
}

impl Orderbook {
    /// Best ask price, if the book has any depth
    pub fn best_ask(&self) -> Option<Decimal> {
        self.orderbook_units.first().map(|u| u.ask_price)
    }

    /// Best bid price, if the book has any depth
    pub fn best_bid(&self) -> Option<Decimal> {
        self.orderbook_units.first().map(|u| u.bid_price)
    }

    /// Absolute spread between best ask and best bid
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

// ============================================================================
// Exchange Types
// ============================================================================

/// Account balance for one currency
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Currency code (e.g. "KRW", "BTC")
    pub currency: String,
    /// Available balance
    pub balance: Decimal,
    /// Balance locked in open orders or withdrawals
    pub locked: Decimal,
    /// Average buy price
    pub avg_buy_price: Decimal,
    /// True if the average buy price was manually adjusted
    pub avg_buy_price_modified: bool,
    /// Currency the average buy price is denominated in
    pub unit_currency: String,
}

/// Order-placement constraints for a market
#[derive(Debug, Clone, Deserialize)]
pub struct OrderChance {
    /// Maker/taker fee for buys
    pub bid_fee: Decimal,
    /// Maker/taker fee for sells
    pub ask_fee: Decimal,
    /// Market-level constraints
    pub market: OrderChanceMarket,
    /// Quote-currency account used for buys
    pub bid_account: Account,
    /// Base-currency account used for sells
    pub ask_account: Account,
}

/// Market constraints inside an order chance
#[derive(Debug, Clone, Deserialize)]
pub struct OrderChanceMarket {
    /// Market identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Supported order types
    pub order_types: Vec<String>,
    /// Supported sides
    pub order_sides: Vec<String>,
    pub bid: OrderConstraint,
    pub ask: OrderConstraint,
    /// Maximum order total in the quote currency
    pub max_total: Decimal,
    /// Market state ("active", ...)
    pub state: String,
}

/// Per-side order constraint
#[derive(Debug, Clone, Deserialize)]
pub struct OrderConstraint {
    /// Currency the constraint is denominated in
    pub currency: String,
    /// Price unit, when the exchange mandates one
    pub price_unit: Option<String>,
    /// Minimum order total
    pub min_total: Decimal,
}

/// Order detail
#[derive(Debug, Clone, Deserialize)]
pub struct OrderInfo {
    /// Order identifier
    pub uuid: String,
    pub side: OrderSide,
    /// "limit" for this client's orders
    pub ord_type: String,
    /// Limit price (absent for market orders)
    pub price: Option<Decimal>,
    /// "wait", "done" or "cancel"
    pub state: String,
    pub market: String,
    /// Creation time (ISO 8601)
    pub created_at: String,
    /// Requested volume
    pub volume: Option<Decimal>,
    pub remaining_volume: Option<Decimal>,
    /// Fee reserved at placement
    pub reserved_fee: Decimal,
    pub remaining_fee: Decimal,
    pub paid_fee: Decimal,
    /// Amount locked for this order
    pub locked: Decimal,
    pub executed_volume: Decimal,
    /// Number of executions so far
    pub trades_count: u32,
    /// Per-execution detail, present on single-order lookups
    #[serde(default)]
    pub trades: Vec<OrderTrade>,
}

/// One execution of an order
#[derive(Debug, Clone, Deserialize)]
pub struct OrderTrade {
    pub market: String,
    pub uuid: String,
    pub price: Decimal,
    pub volume: Decimal,
    /// price * volume
    pub funds: Decimal,
    pub side: OrderSide,
}

/// Withdrawal record
#[derive(Debug, Clone, Deserialize)]
pub struct Withdraw {
    /// "withdraw"
    #[serde(rename = "type")]
    pub kind: String,
    pub uuid: String,
    pub currency: String,
    /// On-chain transaction id, once broadcast
    pub txid: Option<String>,
    pub state: String,
    pub created_at: String,
    pub done_at: Option<String>,
    pub amount: Decimal,
    pub fee: Decimal,
    /// KRW value at submission time, when reported
    pub krw_amount: Option<Decimal>,
    /// "default" or "internal"
    pub transaction_type: Option<String>,
}

/// Withdrawal constraints for a currency
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawChance {
    pub member_level: MemberLevel,
    pub currency: CurrencyInfo,
    /// Account for the currency being withdrawn
    pub account: Account,
    pub withdraw_limit: WithdrawLimit,
}

/// Verification level of the requesting member
#[derive(Debug, Clone, Deserialize)]
pub struct MemberLevel {
    pub security_level: u32,
    pub fee_level: u32,
    pub email_verified: bool,
    pub identity_auth_verified: bool,
    pub bank_account_verified: bool,
    pub locked: bool,
    pub wallet_locked: bool,
}

/// Currency metadata inside a withdraw chance
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyInfo {
    /// Currency code
    pub code: String,
    pub withdraw_fee: Decimal,
    pub is_coin: bool,
    /// Wallet state ("working", "paused", ...)
    pub wallet_state: String,
    /// Supported operations ("deposit", "withdraw")
    pub wallet_support: Vec<String>,
}

/// Withdrawal limits
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawLimit {
    pub currency: String,
    /// Minimum per withdrawal
    pub minimum: Option<Decimal>,
    /// Maximum per withdrawal
    pub onetime: Option<Decimal>,
    /// Daily maximum
    pub daily: Option<Decimal>,
    /// Remaining daily quota
    pub remaining_daily: Option<Decimal>,
    /// Remaining daily quota in KRW
    pub remaining_daily_krw: Option<Decimal>,
    /// Decimal places enforced on amounts
    pub fixed: Option<u32>,
    pub can_withdraw: bool,
}

/// Deposit record
#[derive(Debug, Clone, Deserialize)]
pub struct Deposit {
    /// "deposit"
    #[serde(rename = "type")]
    pub kind: String,
    pub uuid: String,
    pub currency: String,
    pub txid: Option<String>,
    pub state: String,
    pub created_at: String,
    pub done_at: Option<String>,
    pub amount: Decimal,
    pub fee: Decimal,
    pub transaction_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_request_param_order() {
        let order = OrderRequest::limit("KRW-BTC", OrderSide::Bid, dec!(0.01), dec!(50000000));
        let params = order.to_params();

        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["market", "side", "volume", "price", "ord_type"]);
        assert_eq!(params[1].1, "bid");
        assert_eq!(params[4].1, "limit");
    }

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(OrderSide::Ask.to_string(), "ask");
        assert_eq!(OrderState::Wait.to_string(), "wait");
        assert_eq!(SortOrder::Desc.to_string(), "desc");
        assert_eq!(WithdrawState::AlmostAccepted.to_string(), "almost_accepted");
    }

    #[test]
    fn test_deserialize_ticker() {
        // Numeric prices, as the quotation endpoints return them
        let json = r#"{
            "market": "KRW-BTC",
            "trade_date": "20180418", "trade_time": "102340",
            "trade_date_kst": "20180418", "trade_time_kst": "192340",
            "opening_price": 8450000, "high_price": 8679000, "low_price": 8445000,
            "trade_price": 8616000, "prev_closing_price": 8450000,
            "change": "RISE", "change_price": 166000, "change_rate": 0.0196449704,
            "signed_change_price": 166000, "signed_change_rate": 0.0196449704,
            "trade_volume": 0.02722337,
            "acc_trade_price": 19255371040.89, "acc_trade_price_24h": 21006225936.85,
            "acc_trade_volume": 2195.36295861, "acc_trade_volume_24h": 2463.31655736,
            "highest_52_week_price": 28885000, "highest_52_week_date": "2018-01-06",
            "lowest_52_week_price": 4175000, "lowest_52_week_date": "2017-09-25",
            "timestamp": 1524047026072
        }"#;

        let ticker: Ticker = serde_json::from_str(json).unwrap();
        assert_eq!(ticker.market, "KRW-BTC");
        assert_eq!(ticker.trade_price, dec!(8616000));
        assert_eq!(ticker.change, "RISE");
    }

    #[test]
    fn test_deserialize_account() {
        // String balances, as the exchange endpoints return them
        let json = r#"{
            "currency": "KRW",
            "balance": "1000000.0",
            "locked": "0.0",
            "avg_buy_price": "0",
            "avg_buy_price_modified": false,
            "unit_currency": "KRW"
        }"#;

        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.currency, "KRW");
        assert_eq!(account.balance, dec!(1000000.0));
    }

    #[test]
    fn test_deserialize_order_without_trades() {
        let json = r#"{
            "uuid": "cdd92199-2897-4e14-9448-f923320408ad",
            "side": "bid", "ord_type": "limit", "price": "100.0",
            "state": "wait", "market": "KRW-BTC",
            "created_at": "2018-04-10T15:42:23+09:00",
            "volume": "0.01", "remaining_volume": "0.01",
            "reserved_fee": "0.0005", "remaining_fee": "0.0005", "paid_fee": "0.0",
            "locked": "1.0005", "executed_volume": "0.0", "trades_count": 0
        }"#;

        let order: OrderInfo = serde_json::from_str(json).unwrap();
        assert_eq!(order.side, OrderSide::Bid);
        assert_eq!(order.price, Some(dec!(100.0)));
        assert!(order.trades.is_empty());
    }

    #[test]
    fn test_orderbook_accessors() {
        let json = r#"{
            "market": "KRW-BTC", "timestamp": 1529910247984,
            "total_ask_size": 8.83, "total_bid_size": 2.43,
            "orderbook_units": [
                {"ask_price": 6956000, "bid_price": 6954000, "ask_size": 0.24, "bid_size": 0.08},
                {"ask_price": 6958000, "bid_price": 6953000, "ask_size": 1.12, "bid_size": 0.11}
            ]
        }"#;

        let book: Orderbook = serde_json::from_str(json).unwrap();
        assert_eq!(book.best_ask(), Some(dec!(6956000)));
        assert_eq!(book.best_bid(), Some(dec!(6954000)));
        assert_eq!(book.spread(), Some(dec!(2000)));
    }
}
