use crate::api::*;
use crate::defines::*;
use crate::types::*;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use isahc::{prelude::*, Body, Request, Response};
use ring::hmac;
use serde_json::{json, Map, Value};
use url::Url;

/// Blocking Gemini REST client, pointed at either production or the sandbox.
pub struct GeminiClient {
    api_key: String,
    api_secret: String,
    base_url: &'static str,
}

impl GeminiClient {
    pub fn new(credentials: &Credentials) -> GeminiClient {
        GeminiClient {
            api_key: credentials.api_key.clone(),
            api_secret: credentials.api_secret.clone(),
            base_url: if credentials.production { PRODUCTION_BASE_URL } else { SANDBOX_BASE_URL },
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url
    }

    /// Url of `segments` below the base url, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = Url::parse(self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn public_url(&self, segments: &[&str], args: &ArgumentBag) -> ApiResult<Url> {
        let mut url = self.endpoint(segments)?;
        if !args.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in args.iter() {
                query.append_pair(key, &value.to_string());
            }
        }
        Ok(url)
    }

    fn get_public(&self, segments: &[&str], args: &ArgumentBag) -> ApiResult<Value> {
        let url = self.public_url(segments, args)?;
        log::debug!("GET {}", url);
        read_json(isahc::get(url.as_str())?)
    }

    /// Signed POST. `params` land in the payload next to `request` and `nonce`.
    fn post_private(&self, segments: &[&str], params: Map<String, Value>) -> ApiResult<Value> {
        let url = self.endpoint(segments)?;
        let payload = build_payload(url.path(), nonce(), params);
        log::debug!("POST {}", url);
        log::trace!("payload {}", payload);

        let encoded = STANDARD.encode(payload.to_string());
        let signature = sign(&self.api_secret, &encoded);

        let response = Request::post(url.as_str())
            .header("Content-Type", "text/plain")
            .header("Cache-Control", "no-cache")
            .header("X-GEMINI-APIKEY", self.api_key.as_str())
            .header("X-GEMINI-PAYLOAD", encoded.as_str())
            .header("X-GEMINI-SIGNATURE", signature.as_str())
            .body(())?
            .send()?;
        read_json(response)
    }
}

/// Millisecond nonce, increasing across invocations.
fn nonce() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn build_payload(request: &str, nonce: i64, params: Map<String, Value>) -> Value {
    let mut payload = params;
    payload.insert("request".to_string(), Value::from(request));
    payload.insert("nonce".to_string(), Value::from(nonce));
    Value::Object(payload)
}

/// Hex HMAC-SHA384 of the base64 payload.
fn sign(secret: &str, encoded_payload: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA384, secret.as_bytes());
    hex::encode(hmac::sign(&key, encoded_payload.as_bytes()).as_ref())
}

fn bag_params(args: &ArgumentBag) -> Map<String, Value> {
    args.iter().map(|(k, v)| (k.to_string(), v.to_json())).collect()
}

/// Order ids are numeric on the exchange; anything else is sent as given and
/// left for the exchange to reject.
fn order_id_value(order_id: &str) -> Value {
    order_id.parse::<i64>().map_or_else(|_| Value::from(order_id), Value::from)
}

fn read_json(mut response: Response<Body>) -> ApiResult<Value> {
    let status = response.status();
    let body = response.text()?;
    log::trace!("response {}: {}", status, body);

    if !status.is_success() {
        return Err(ApiError::Response { status: status.as_u16(), body });
    }
    Ok(serde_json::from_str(&body)?)
}

impl GeminiApi for GeminiClient {
    fn account_detail(&self) -> ApiResult<Value> {
        self.post_private(&["v1", "account"], Map::new())
    }

    fn balances(&self) -> ApiResult<Value> {
        self.post_private(&["v1", "balances"], Map::new())
    }

    fn transfers(&self, args: &ArgumentBag) -> ApiResult<Value> {
        self.post_private(&["v1", "transfers"], bag_params(args))
    }

    fn deposit_addresses(&self, network: DepositNetwork) -> ApiResult<Value> {
        self.post_private(&["v1", "addresses", network.as_str()], Map::new())
    }

    fn new_deposit_address(&self, network: DepositNetwork, label: Option<&str>) -> ApiResult<Value> {
        let mut params = Map::new();
        if let Some(label) = label {
            params.insert("label".to_string(), Value::from(label));
        }
        self.post_private(&["v1", "deposit", network.as_str(), "newAddress"], params)
    }

    fn symbols(&self) -> ApiResult<Value> {
        self.get_public(&["v1", "symbols"], &ArgumentBag::new())
    }

    fn ticker(&self, symbol: &str) -> ApiResult<Value> {
        self.get_public(&["v2", "ticker", symbol], &ArgumentBag::new())
    }

    fn trade_volume(&self) -> ApiResult<Value> {
        self.post_private(&["v1", "tradevolume"], Map::new())
    }

    fn trades(&self, symbol: &str, args: &ArgumentBag) -> ApiResult<Value> {
        self.get_public(&["v1", "trades", symbol], args)
    }

    fn order_book(&self, symbol: &str, args: &ArgumentBag) -> ApiResult<Value> {
        self.get_public(&["v1", "book", symbol], args)
    }

    fn current_auction(&self, symbol: &str) -> ApiResult<Value> {
        self.get_public(&["v1", "auction", symbol], &ArgumentBag::new())
    }

    fn auction_history(&self, symbol: &str, args: &ArgumentBag) -> ApiResult<Value> {
        self.get_public(&["v1", "auction", symbol, "history"], args)
    }

    fn new_order(&self, order: &NewOrder) -> ApiResult<Value> {
        let mut params = Map::new();
        if let Some(id) = &order.client_order_id {
            params.insert("client_order_id".to_string(), Value::from(id.as_str()));
        }
        params.insert("symbol".to_string(), Value::from(order.symbol.as_str()));
        params.insert("amount".to_string(), Value::from(order.amount.to_string()));
        params.insert("price".to_string(), Value::from(order.price.to_string()));
        params.insert("side".to_string(), Value::from(order.side.as_str()));
        params.insert("type".to_string(), Value::from(ORDER_TYPE_LIMIT));
        params.insert("options".to_string(), json!(order.options));
        self.post_private(&["v1", "order", "new"], params)
    }

    fn active_orders(&self) -> ApiResult<Value> {
        self.post_private(&["v1", "orders"], Map::new())
    }

    fn past_trades(&self, symbol: &str, args: &ArgumentBag) -> ApiResult<Value> {
        let mut params = bag_params(args);
        params.insert("symbol".to_string(), Value::from(symbol));
        self.post_private(&["v1", "mytrades"], params)
    }

    fn order_status(&self, order_id: &str) -> ApiResult<Value> {
        let mut params = Map::new();
        params.insert("order_id".to_string(), order_id_value(order_id));
        self.post_private(&["v1", "order", "status"], params)
    }

    fn cancel_order(&self, order_id: &str) -> ApiResult<Value> {
        let mut params = Map::new();
        params.insert("order_id".to_string(), order_id_value(order_id));
        self.post_private(&["v1", "order", "cancel"], params)
    }

    fn cancel_all(&self) -> ApiResult<Value> {
        self.post_private(&["v1", "order", "cancel", "all"], Map::new())
    }

    fn withdraw_funds(&self, currency: WithdrawCurrency, address: &str, amount: f64) -> ApiResult<Value> {
        let mut params = Map::new();
        params.insert("address".to_string(), Value::from(address));
        params.insert("amount".to_string(), Value::from(amount.to_string()));
        self.post_private(&["v1", "withdraw", currency.as_str()], params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(production: bool) -> GeminiClient {
        GeminiClient::new(&Credentials {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            production,
        })
    }

    #[test]
    fn production_flag_selects_site() {
        assert_eq!(client(true).base_url(), "https://api.gemini.com");
        assert_eq!(client(false).base_url(), "https://api.sandbox.gemini.com");
    }

    #[test]
    fn public_url_carries_bag_as_query() {
        let mut bag = ArgumentBag::new();
        bag.insert("limit_trades", ArgValue::Text("10".to_string()));
        bag.insert("include_breaks", ArgValue::flag());

        let url = client(false).public_url(&["v1", "trades", "btcusd"], &bag).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.sandbox.gemini.com/v1/trades/btcusd?include_breaks=true&limit_trades=10"
        );
    }

    #[test]
    fn empty_bag_leaves_no_query() {
        let url = client(true).public_url(&["v2", "ticker", "btcusd"], &ArgumentBag::new()).unwrap();
        assert_eq!(url.as_str(), "https://api.gemini.com/v2/ticker/btcusd");
    }

    #[test]
    fn symbols_are_escaped_as_path_segments() {
        let url = client(true).endpoint(&["v1", "book", "btc/usd"]).unwrap();
        assert_eq!(url.path(), "/v1/book/btc%2Fusd");
    }

    #[test]
    fn payload_holds_request_nonce_and_params() {
        let mut params = Map::new();
        params.insert("limit_transfers".to_string(), Value::from(20));
        let payload = build_payload("/v1/transfers", 123, params);
        assert_eq!(
            payload,
            json!({"request": "/v1/transfers", "nonce": 123, "limit_transfers": 20})
        );
    }

    #[test]
    fn signature_is_hex_hmac_sha384() {
        let encoded = "eyJyZXF1ZXN0IjoiL3YxL2JhbGFuY2VzIiwibm9uY2UiOjEyM30=";
        assert_eq!(
            sign("secret", encoded),
            "9a6bea050a27096dccce06703514c18ea706f574b3a0cda0be7fd21d93bf1800c5690dfdd689e4dc06eb3fbed37be076"
        );
    }

    #[test]
    fn bag_timestamps_are_sent_as_millis() {
        let ts = crate::timestamp::normalize_with_offset("2021-02-05T15:04:01", 3600).unwrap();
        let mut bag = ArgumentBag::new();
        bag.insert("timestamp", ArgValue::Timestamp(ts));
        bag.insert("limit_trades", ArgValue::Integer(10));

        let params = bag_params(&bag);
        assert_eq!(params["timestamp"], json!(1_612_533_841_000_i64));
        assert_eq!(params["limit_trades"], json!(10));
    }

    #[test]
    fn numeric_order_ids_are_numbers() {
        assert_eq!(order_id_value("121212"), json!(121212));
        assert_eq!(order_id_value("abc"), json!("abc"));
    }
}
