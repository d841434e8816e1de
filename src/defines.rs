/// Environment variable holding the api key
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";

/// Environment variable holding the api secret
pub const ENV_API_SECRET: &str = "GEMINI_API_SECRET";

/// Environment variable holding either "true" or "false"
pub const ENV_API_PRODUCTION: &str = "GEMINI_API_PRODUCTION";

pub const PRODUCTION_BASE_URL: &str = "https://api.gemini.com";
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.gemini.com";

/// Layout accepted for `--timestamp` and `--since`, in chrono's format syntax.
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

/// Same layout with trailing `±HH:MM` offset.
pub const TIMESTAMP_OFFSET_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Strict shape check for timestamp input; chrono alone accepts single-digit fields.
pub const TIMESTAMP_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$";

/// The only order execution option quick orders are placed with
pub const ORDER_OPTION_IOC: &str = "immediate-or-cancel";

/// Gemini only supports limit orders via the api
pub const ORDER_TYPE_LIMIT: &str = "exchange limit";
