use crate::types::*;

use serde_json::Value;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors raised by the REST collaborator. Never retried or reinterpreted.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Http(#[from] isahc::Error),

    #[error("cannot build request: {0}")]
    Request(#[from] isahc::http::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("cannot read response: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("gemini responded with status {status}: {body}")]
    Response { status: u16, body: String },
}

/// One operation per Gemini REST endpoint.
/// Results are handed back as decoded json, untouched.
pub trait GeminiApi {
    /// /v1/account
    fn account_detail(&self) -> ApiResult<Value>;

    /// /v1/balances
    fn balances(&self) -> ApiResult<Value>;

    /// /v1/transfers
    fn transfers(&self, args: &ArgumentBag) -> ApiResult<Value>;

    /// /v1/addresses/:network
    fn deposit_addresses(&self, network: DepositNetwork) -> ApiResult<Value>;

    /// /v1/deposit/:network/newAddress
    fn new_deposit_address(&self, network: DepositNetwork, label: Option<&str>) -> ApiResult<Value>;

    /// /v1/symbols
    fn symbols(&self) -> ApiResult<Value>;

    /// /v2/ticker/:symbol
    fn ticker(&self, symbol: &str) -> ApiResult<Value>;

    /// /v1/tradevolume
    fn trade_volume(&self) -> ApiResult<Value>;

    /// /v1/trades/:symbol
    fn trades(&self, symbol: &str, args: &ArgumentBag) -> ApiResult<Value>;

    /// /v1/book/:symbol
    fn order_book(&self, symbol: &str, args: &ArgumentBag) -> ApiResult<Value>;

    /// /v1/auction/:symbol
    fn current_auction(&self, symbol: &str) -> ApiResult<Value>;

    /// /v1/auction/:symbol/history
    fn auction_history(&self, symbol: &str, args: &ArgumentBag) -> ApiResult<Value>;

    /// /v1/order/new
    fn new_order(&self, order: &NewOrder) -> ApiResult<Value>;

    /// /v1/orders
    fn active_orders(&self) -> ApiResult<Value>;

    /// /v1/mytrades
    fn past_trades(&self, symbol: &str, args: &ArgumentBag) -> ApiResult<Value>;

    /// /v1/order/status
    fn order_status(&self, order_id: &str) -> ApiResult<Value>;

    /// /v1/order/cancel
    fn cancel_order(&self, order_id: &str) -> ApiResult<Value>;

    /// /v1/order/cancel/all
    fn cancel_all(&self) -> ApiResult<Value>;

    /// /v1/withdraw/:currency
    fn withdraw_funds(&self, currency: WithdrawCurrency, address: &str, amount: f64) -> ApiResult<Value>;
}
