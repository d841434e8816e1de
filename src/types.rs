use clap::{Args, Parser, Subcommand};
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;

#[derive(Debug, Parser)]
#[clap(name="gemini_cli", version)]
#[clap(about="rest-api cli commands, reference: https://docs.gemini.com/rest-api/", long_about=None)]
pub struct CommandlineArgs {
    /// Load yml configuration file e.g.
    ///     gemini_api_credentials:
    ///         gemini_api_key: "mygeminikey"
    ///         gemini_api_secret: "mygeminisecret"
    ///         gemini_api_production: "false" (if false it uses sandbox server)
    /// Instead of a configuration file you can export GEMINI_API_KEY, GEMINI_API_SECRET
    /// and GEMINI_API_PRODUCTION. Values in the configuration file override the
    /// environment variables.
    #[clap(short='c', long, verbatim_doc_comment)]
    pub config: Option<String>,

    /// Run in debug mode
    #[clap(short='d', long)]
    pub debug: bool,

    /// More debug, this will also show gemini key and secret !
    #[clap(long)]
    pub trace: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Account, market data and funding queries
    #[clap(subcommand)]
    Get(GetCommand),

    /// Order placement, status and cancellation
    #[clap(subcommand)]
    Order(OrderCommand),

    /// Withdraw Crypto Funds - You must have an approved address list for your account (Private)
    #[clap(name="withdraw")]
    Withdraw(WithdrawArgs),
}

#[derive(Debug, Subcommand)]
pub enum GetCommand {
    /// Get account details (Private)
    #[clap(name="account")]
    Account,

    /// This will show the available balances in the supported currencies (Private)
    #[clap(name="balances")]
    Balances,

    /// Shows deposits and withdrawals in the supported currencies (Private)
    #[clap(name="transfers")]
    Transfers(TransfersArgs),

    /// Get deposit addresses (Private)
    #[clap(name="depositaddresses")]
    DepositAddresses(DepositAddressesArgs),

    /// Generate a new deposit addresses (Private)
    #[clap(name="new_depositaddresses")]
    NewDepositAddresses(NewDepositAddressArgs),

    /// Retrieves all available symbols for trading (Public)
    #[clap(name="symbols")]
    Symbols,

    /// Recent trading activity for the provided symbol (Public)
    #[clap(name="ticker")]
    Ticker(TickerArgs),

    /// Get trade volume, up to 30 days of trade volume for each symbol (Private)
    #[clap(name="tradevolume")]
    TradeVolume,

    /// Trades that have executed since the specified timestamp (Public)
    #[clap(name="trades")]
    Trades(TradesArgs),

    /// Current order book as two arrays bids/asks (Public)
    #[clap(name="orderbook")]
    OrderBook(OrderBookArgs),

    /// Current auction (Public)
    #[clap(name="auction")]
    Auction(TickerArgs),

    /// Auction events, optionally including publications of indicative prices (Public)
    #[clap(name="auction-hystory")]
    AuctionHistory(AuctionHistoryArgs),
}

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    /// Place a new order (Private)
    #[clap(name="new")]
    New(NewOrderArgs),

    /// Get active orders (Private)
    #[clap(name="active")]
    Active,

    /// Get past trades (Private)
    #[clap(name="past_trades")]
    PastTrades(PastTradesArgs),

    /// Get order status (Private)
    #[clap(name="orderid")]
    OrderId(OrderIdArgs),

    /// Cancel an order. If the order is already canceled, the message will succeed but have no effect (Private)
    #[clap(name="cancel")]
    Cancel(OrderIdArgs),

    /// Cancel ALL orders including those placed through the UI !!! (Private)
    #[clap(name="cancel_all")]
    CancelAll,
}

#[derive(Debug, Args)]
pub struct TickerArgs {
    /// e.g. --ticker btcusd
    #[clap(short='t', long)]
    pub ticker: String,
}

#[derive(Debug, Args)]
pub struct TransfersArgs {
    /// e.g. --timestamp 2021-02-05T15:04:01
    #[clap(short='t', long)]
    pub timestamp: Option<String>,

    /// e.g. --limit_transfers 10
    #[clap(short='l', long="limit_transfers")]
    pub limit_transfers: Option<u32>,

    #[clap(short='s', long="show_completed_deposit_advances")]
    pub show_completed_deposit_advances: bool,
}

#[derive(Debug, Args)]
pub struct DepositAddressesArgs {
    /// bitcoin|ethereum|bitcoincash|litecoin|zcash|filecoin
    #[clap(short='c', long)]
    pub currency: String,
}

#[derive(Debug, Args)]
pub struct NewDepositAddressArgs {
    /// bitcoin|ethereum|bitcoincash|litecoin|zcash|filecoin
    #[clap(short='c', long)]
    pub currency: String,

    /// Optional label for the deposit address
    #[clap(short='l', long)]
    pub label: Option<String>,
}

#[derive(Debug, Args)]
pub struct TradesArgs {
    /// e.g. --ticker btcusd
    #[clap(long)]
    pub ticker: String,

    /// e.g. --timestamp 2021-02-05T15:04:01
    #[clap(short='t', long)]
    pub timestamp: Option<String>,

    /// e.g. --limit_trades 10 (default 50, set to 0 for all)
    #[clap(short='l', long="limit_trades")]
    pub limit_trades: Option<u32>,

    #[clap(short='b', long="include_breaks")]
    pub include_breaks: bool,
}

#[derive(Debug, Args)]
pub struct OrderBookArgs {
    /// e.g. --ticker btcusd
    #[clap(short='t', long)]
    pub ticker: String,

    /// e.g. --limit_bids 10 (default 50, set to 0 for all)
    #[clap(short='b', long="limit_bids")]
    pub limit_bids: Option<u32>,

    /// e.g. --limit_asks 10 (default 50, set to 0 for all)
    #[clap(short='a', long="limit_asks")]
    pub limit_asks: Option<u32>,
}

#[derive(Debug, Args)]
pub struct AuctionHistoryArgs {
    /// e.g. --ticker btcusd
    #[clap(short='t', long)]
    pub ticker: String,

    /// e.g. --since 2021-02-05T15:04:01
    #[clap(short='s', long)]
    pub since: Option<String>,

    /// e.g. --limit 10 (default 50, set to 0 for all)
    #[clap(short='l', long)]
    pub limit: Option<u32>,

    #[clap(short='i', long="include_indicative")]
    pub include_indicative: bool,
}

#[derive(Debug, Args)]
pub struct NewOrderArgs {
    /// e.g. --client_order_id "20170208_example" (optional but recommended)
    #[clap(short='i', long="client_order_id")]
    pub client_order_id: Option<String>,

    /// e.g. --ticker btcusd
    #[clap(short='t', long)]
    pub ticker: String,

    /// buy or sell
    #[clap(short='s', long)]
    pub side: String,

    /// Decimal amount to purchase e.g. --amount 0.021
    #[clap(short='a', long)]
    pub amount: f64,

    /// Decimal amount to spend per unit e.g. --price 3633.00
    #[clap(short='p', long)]
    pub price: f64,
}

#[derive(Debug, Args)]
pub struct PastTradesArgs {
    /// e.g. --ticker btcusd
    #[clap(long)]
    pub ticker: String,

    /// e.g. --limit_trades 10
    #[clap(short='l', long="limit_trades")]
    pub limit_trades: Option<u32>,

    /// e.g. --timestamp 2021-02-05T15:04:01
    #[clap(short='t', long)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Args)]
pub struct OrderIdArgs {
    /// e.g. --orderid 121212
    #[clap(short='o', long)]
    pub orderid: String,
}

#[derive(Debug, Args)]
pub struct WithdrawArgs {
    /// btc|eth
    #[clap(short='c', long)]
    pub currency: String,

    /// Standard string format of cryptocurrency address
    #[clap(short='a', long)]
    pub address: String,

    /// Decimal amount to withdraw e.g. --amount 0.021
    #[clap(long)]
    pub amount: f64,
}

/// How chatty logging is for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Normal,
    Debug,

    /// Also discloses api key and secret.
    Trace,
}

/// Per-invocation settings handed down to whatever needs them, instead of
/// mutating process-wide state.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub verbosity: Verbosity,
}

/// Resolved api credentials.
/// Built once per invocation, see `config::resolve`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,

    /// `true` targets production, `false` targets the sandbox
    pub production: bool,
}

/// A closed set of accepted values for a command parameter.
/// Matching is case-sensitive.
pub trait EnumeratedChoice: Sized + Copy + 'static {
    /// Parameter name used in error messages, e.g. "currency"
    const WHAT: &'static str;

    /// Plural of `WHAT`
    const WHAT_PLURAL: &'static str;

    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;
}

/// Networks supported by deposit address endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositNetwork {
    Bitcoin,
    Ethereum,
    BitcoinCash,
    Litecoin,
    Zcash,
    Filecoin,
}

/// Currencies supported by the withdraw endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawCurrency {
    Btc,
    Eth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Value of a single optional endpoint parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    Integer(i64),
    Timestamp(DateTime<FixedOffset>),
}

/// Optional endpoint parameters, holding only those the caller explicitly set.
/// Absence of a key means "endpoint default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentBag(pub(crate) BTreeMap<&'static str, ArgValue>);

/// Order placement request handed to the collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub symbol: String,
    pub client_order_id: Option<String>,
    pub side: OrderSide,
    pub amount: f64,
    pub price: f64,
    pub options: Vec<&'static str>,
}
