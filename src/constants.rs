/// Header carrying the session id on authenticated calls
pub const SESSION_ID_HEADER: &str = "X-FTL-SID";
/// Header carrying the anti-forgery token on authenticated calls
pub const CSRF_HEADER: &str = "X-FTL-CSRF";
/// Endpoint used for login (POST) and logout (DELETE)
pub const AUTH_ENDPOINT: &str = "auth";
/// Root path segment appended to every base URL during normalization
pub const API_ROOT_SEGMENT: &str = "api";
/// Default number of attempts for authentication and transport retries
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default base delay in seconds between retry attempts
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 1;
/// Default connection timeout in seconds
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 10;
/// Connection pool size when pooling is enabled; a disabled pool collapses to 1
pub const DEFAULT_POOL_SIZE: usize = 10;
/// Upper bound in seconds for a single transport-level backoff delay
pub const MAX_BACKOFF_SECS: u64 = 120;
/// Safety margin in seconds applied when checking whether a session's
/// validity window has elapsed
pub const SESSION_EXPIRY_MARGIN_SECS: i64 = 5;
/// User agent string used in HTTP requests to identify this client
pub const USER_AGENT: &str = "pihole-client/0.1.0";
