//! Client constants
//!
//! Batch limits, paging defaults and transport tunables shared by every
//! operation module.

// Transport defaults
pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_USER_AGENT: &str = "easemob-server-rust";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 6;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 60 * 60;
pub const DEFAULT_MAX_CONNECTIONS_PER_HOST: usize = 5;
pub const DEFAULT_RETRY_COUNT: usize = 2;
pub const MAX_RETRY_COUNT: usize = 10;

/// ttl < 0 means "use the console-configured default"
pub const TTL_SERVER_DEFAULT: i64 = -1;

// Paging
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

// Batch limits
pub const MAX_ADD_USERS: usize = 60;
pub const MAX_STATUS_QUERY_USERS: usize = 100;
pub const MAX_LABEL_USERS: usize = 100;
pub const MAX_PUSH_LABELS: usize = 5;
pub const MAX_PUSH_TARGETS: usize = 100;

// Stateless user tokens
pub const DYNAMIC_TOKEN_PREFIX: &str = "dt-";

/// Wire format for scheduled push start times (no timezone)
pub const PUSH_START_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
