// UI Constants
pub const APP_TITLE: &str = "Course Chat";
pub const INPUT_PLACEHOLDER: &str = "Ask your course question...";
pub const LOG_VIEW_CAPACITY: usize = 200;
pub const TICK_RATE_MS: u64 = 50;

// API Constants
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_COURSE_ID: &str = "course-123";
pub const DEFAULT_TOKEN: &str = "dummy-token";
pub const QUERY_SUMMARY: &str = "course query";

// Message id prefixes
pub const USER_ID_PREFIX: &str = "user";
pub const AI_ERROR_ID_PREFIX: &str = "ai-error";
pub const AI_NETWORK_ERROR_ID_PREFIX: &str = "ai-network-error";

// Text prefixes for error replies
pub const HTTP_ERROR_PREFIX: &str = "Error: ";
pub const NETWORK_ERROR_PREFIX: &str = "Network error: ";

// Environment overrides
pub const ENV_BASE_URL: &str = "COURSE_CHAT_BASE_URL";
pub const ENV_COURSE_ID: &str = "COURSE_CHAT_COURSE_ID";
pub const ENV_TOKEN: &str = "COURSE_CHAT_TOKEN";
pub const ENV_LOG_LEVEL: &str = "COURSE_CHAT_LOG_LEVEL";
