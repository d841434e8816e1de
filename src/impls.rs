use crate::errors::{Error, Result};
use crate::types::*;

use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

impl Verbosity {
    /// Log filter for this verbosity.
    /// Warnings are always shown as they report missing or malformed credentials.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Normal => LevelFilter::Warn,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }

    pub fn discloses_secrets(self) -> bool {
        self == Verbosity::Trace
    }
}

/// `--trace` wins over `--debug`
impl From<&CommandlineArgs> for Context {
    fn from(args: &CommandlineArgs) -> Context {
        let verbosity = if args.trace {
            Verbosity::Trace
        } else if args.debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        };
        Context { verbosity }
    }
}

impl Default for Context {
    fn default() -> Context {
        Context { verbosity: Verbosity::Normal }
    }
}

// keep the secret out of accidental `{:?}` output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("production", &self.production)
            .finish()
    }
}

/// Parse `value` as a member of `T`, reporting every accepted value on failure.
pub fn parse_choice<T: EnumeratedChoice>(value: &str) -> Result<T> {
    T::ALL
        .iter()
        .copied()
        .find(|choice| choice.as_str() == value)
        .ok_or_else(|| Error::InvalidChoice {
            what: T::WHAT,
            what_plural: T::WHAT_PLURAL,
            value: value.to_string(),
            valid: T::ALL
                .iter()
                .map(|choice| choice.as_str())
                .collect::<Vec<&str>>()
                .join(", "),
        })
}

impl EnumeratedChoice for DepositNetwork {
    const WHAT: &'static str = "currency";
    const WHAT_PLURAL: &'static str = "currencies";
    const ALL: &'static [DepositNetwork] = &[
        DepositNetwork::Bitcoin,
        DepositNetwork::Ethereum,
        DepositNetwork::BitcoinCash,
        DepositNetwork::Litecoin,
        DepositNetwork::Zcash,
        DepositNetwork::Filecoin,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            DepositNetwork::Bitcoin => "bitcoin",
            DepositNetwork::Ethereum => "ethereum",
            DepositNetwork::BitcoinCash => "bitcoincash",
            DepositNetwork::Litecoin => "litecoin",
            DepositNetwork::Zcash => "zcash",
            DepositNetwork::Filecoin => "filecoin",
        }
    }
}

impl EnumeratedChoice for WithdrawCurrency {
    const WHAT: &'static str = "currency";
    const WHAT_PLURAL: &'static str = "currencies";
    const ALL: &'static [WithdrawCurrency] = &[WithdrawCurrency::Btc, WithdrawCurrency::Eth];

    fn as_str(&self) -> &'static str {
        match self {
            WithdrawCurrency::Btc => "btc",
            WithdrawCurrency::Eth => "eth",
        }
    }
}

impl EnumeratedChoice for OrderSide {
    const WHAT: &'static str = "side";
    const WHAT_PLURAL: &'static str = "sides";
    const ALL: &'static [OrderSide] = &[OrderSide::Buy, OrderSide::Sell];

    fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

impl FromStr for DepositNetwork {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_choice(s)
    }
}

impl FromStr for WithdrawCurrency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_choice(s)
    }
}

impl FromStr for OrderSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_choice(s)
    }
}

impl ArgValue {
    /// Flags are sent as the literal string "true" rather than a json boolean.
    pub fn flag() -> ArgValue {
        ArgValue::Text("true".to_string())
    }

    /// Render for the wire. Timestamps go out as epoch milliseconds.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ArgValue::Text(s) => serde_json::Value::String(s.clone()),
            ArgValue::Integer(i) => serde_json::Value::from(*i),
            ArgValue::Timestamp(ts) => serde_json::Value::from(ts.timestamp_millis()),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Text(s) => f.write_str(s),
            ArgValue::Integer(i) => write!(f, "{}", i),
            ArgValue::Timestamp(ts) => write!(f, "{}", ts.timestamp_millis()),
        }
    }
}

impl ArgumentBag {
    pub fn new() -> ArgumentBag {
        ArgumentBag::default()
    }

    pub fn insert(&mut self, key: &'static str, value: ArgValue) {
        self.0.insert(key, value);
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ArgValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}
