use crate::api::GeminiApi;
use crate::args::*;
use crate::defines::*;
use crate::errors::Result;
use crate::types::*;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// A fully validated request for exactly one collaborator operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Account,
    Balances,
    Transfers(ArgumentBag),
    DepositAddresses(DepositNetwork),
    NewDepositAddress { network: DepositNetwork, label: Option<String> },
    Symbols,
    Ticker(String),
    TradeVolume,
    Trades { symbol: String, args: ArgumentBag },
    OrderBook { symbol: String, args: ArgumentBag },
    Auction(String),
    AuctionHistory { symbol: String, args: ArgumentBag },
    NewOrder(NewOrder),
    ActiveOrders,
    PastTrades { symbol: String, args: ArgumentBag },
    OrderStatus(String),
    CancelOrder(String),
    CancelAll,
    Withdraw { currency: WithdrawCurrency, address: String, amount: f64 },
}

/// Validate choices and build argument bags for `command`.
/// Nothing here touches the network.
pub fn plan(command: &Command) -> Result<Endpoint> {
    let endpoint = match command {
        Command::Get(get) => match get {
            GetCommand::Account => Endpoint::Account,
            GetCommand::Balances => Endpoint::Balances,
            GetCommand::Transfers(opts) => Endpoint::Transfers(transfers_args(opts)?),
            GetCommand::DepositAddresses(opts) => {
                Endpoint::DepositAddresses(opts.currency.parse()?)
            }
            GetCommand::NewDepositAddresses(opts) => Endpoint::NewDepositAddress {
                network: opts.currency.parse()?,
                label: opts.label.clone(),
            },
            GetCommand::Symbols => Endpoint::Symbols,
            GetCommand::Ticker(opts) => Endpoint::Ticker(opts.ticker.clone()),
            GetCommand::TradeVolume => Endpoint::TradeVolume,
            GetCommand::Trades(opts) => Endpoint::Trades {
                symbol: opts.ticker.clone(),
                args: trades_args(opts)?,
            },
            GetCommand::OrderBook(opts) => Endpoint::OrderBook {
                symbol: opts.ticker.clone(),
                args: orderbook_args(opts),
            },
            GetCommand::Auction(opts) => Endpoint::Auction(opts.ticker.clone()),
            GetCommand::AuctionHistory(opts) => Endpoint::AuctionHistory {
                symbol: opts.ticker.clone(),
                args: auction_history_args(opts)?,
            },
        },
        Command::Order(order) => match order {
            OrderCommand::New(opts) => Endpoint::NewOrder(NewOrder {
                symbol: opts.ticker.clone(),
                client_order_id: opts.client_order_id.clone(),
                side: opts.side.parse()?,
                amount: opts.amount,
                price: opts.price,
                options: vec![ORDER_OPTION_IOC],
            }),
            OrderCommand::Active => Endpoint::ActiveOrders,
            OrderCommand::PastTrades(opts) => Endpoint::PastTrades {
                symbol: opts.ticker.clone(),
                args: past_trades_args(opts)?,
            },
            OrderCommand::OrderId(opts) => Endpoint::OrderStatus(opts.orderid.clone()),
            OrderCommand::Cancel(opts) => Endpoint::CancelOrder(opts.orderid.clone()),
            OrderCommand::CancelAll => Endpoint::CancelAll,
        },
        Command::Withdraw(opts) => Endpoint::Withdraw {
            currency: opts.currency.parse()?,
            address: opts.address.clone(),
            amount: opts.amount,
        },
    };
    log::debug!("planned {:?}", endpoint);
    Ok(endpoint)
}

/// Perform the single collaborator call for `endpoint` and format its result.
pub fn dispatch<A: GeminiApi>(endpoint: &Endpoint, api: &A) -> Result<String> {
    let result = match endpoint {
        Endpoint::Account => api.account_detail()?,
        Endpoint::Balances => api.balances()?,
        Endpoint::Transfers(args) => api.transfers(args)?,
        Endpoint::DepositAddresses(network) => api.deposit_addresses(*network)?,
        Endpoint::NewDepositAddress { network, label } => {
            api.new_deposit_address(*network, label.as_deref())?
        }
        Endpoint::Symbols => api.symbols()?,
        Endpoint::Ticker(symbol) => api.ticker(symbol)?,
        Endpoint::TradeVolume => api.trade_volume()?,
        Endpoint::Trades { symbol, args } => api.trades(symbol, args)?,
        Endpoint::OrderBook { symbol, args } => api.order_book(symbol, args)?,
        Endpoint::Auction(symbol) => api.current_auction(symbol)?,
        Endpoint::AuctionHistory { symbol, args } => api.auction_history(symbol, args)?,
        Endpoint::NewOrder(order) => api.new_order(order)?,
        Endpoint::ActiveOrders => api.active_orders()?,
        Endpoint::PastTrades { symbol, args } => api.past_trades(symbol, args)?,
        Endpoint::OrderStatus(order_id) => api.order_status(order_id)?,
        Endpoint::CancelOrder(order_id) => api.cancel_order(order_id)?,
        Endpoint::CancelAll => api.cancel_all()?,
        Endpoint::Withdraw { currency, address, amount } => {
            api.withdraw_funds(*currency, address, *amount)?
        }
    };
    render(&result)
}

/// Plan `command`, then connect and dispatch.
/// `connect` is only called once the command has been validated.
pub fn execute<A, F>(command: &Command, connect: F) -> Result<String>
where
    A: GeminiApi,
    F: FnOnce() -> Result<A>,
{
    let endpoint = plan(command)?;
    let api = connect()?;
    dispatch(&endpoint, &api)
}

/// Pretty-print with one space of indentation per level.
pub fn render(value: &Value) -> Result<String> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b" "));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
