//! Per-command optional parameters.
//!
//! Each builder only inserts options the user actually passed; endpoint
//! defaults are left to the endpoint.

use crate::errors::Result;
use crate::timestamp::{epoch_millis, normalize};
use crate::types::*;

/// `/v1/transfers` wants `timestamp` as epoch milliseconds and the limit as a number.
pub fn transfers_args(opts: &TransfersArgs) -> Result<ArgumentBag> {
    let mut bag = ArgumentBag::new();
    if let Some(limit) = opts.limit_transfers {
        bag.insert("limit_transfers", ArgValue::Integer(i64::from(limit)));
    }
    if let Some(raw) = &opts.timestamp {
        let ts = normalize(raw)?;
        bag.insert("timestamp", ArgValue::Integer(epoch_millis(&ts)));
    }
    if opts.show_completed_deposit_advances {
        bag.insert("show_completed_deposit_advances", ArgValue::flag());
    }
    Ok(bag)
}

pub fn trades_args(opts: &TradesArgs) -> Result<ArgumentBag> {
    let mut bag = ArgumentBag::new();
    if let Some(raw) = &opts.timestamp {
        bag.insert("timestamp", ArgValue::Timestamp(normalize(raw)?));
    }
    if let Some(limit) = opts.limit_trades {
        bag.insert("limit_trades", ArgValue::Text(limit.to_string()));
    }
    if opts.include_breaks {
        bag.insert("include_breaks", ArgValue::flag());
    }
    Ok(bag)
}

pub fn orderbook_args(opts: &OrderBookArgs) -> ArgumentBag {
    let mut bag = ArgumentBag::new();
    if let Some(limit) = opts.limit_bids {
        bag.insert("limit_bids", ArgValue::Text(limit.to_string()));
    }
    if let Some(limit) = opts.limit_asks {
        bag.insert("limit_asks", ArgValue::Text(limit.to_string()));
    }
    bag
}

/// `--limit` maps onto the endpoint's `limit_auction_results`.
pub fn auction_history_args(opts: &AuctionHistoryArgs) -> Result<ArgumentBag> {
    let mut bag = ArgumentBag::new();
    if let Some(raw) = &opts.since {
        bag.insert("since", ArgValue::Timestamp(normalize(raw)?));
    }
    if let Some(limit) = opts.limit {
        bag.insert("limit_auction_results", ArgValue::Text(limit.to_string()));
    }
    if opts.include_indicative {
        bag.insert("include_indicative", ArgValue::flag());
    }
    Ok(bag)
}

pub fn past_trades_args(opts: &PastTradesArgs) -> Result<ArgumentBag> {
    let mut bag = ArgumentBag::new();
    if let Some(limit) = opts.limit_trades {
        bag.insert("limit_trades", ArgValue::Integer(i64::from(limit)));
    }
    if let Some(raw) = &opts.timestamp {
        bag.insert("timestamp", ArgValue::Timestamp(normalize(raw)?));
    }
    Ok(bag)
}
