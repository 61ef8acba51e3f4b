// 20MB request body cap, enough for a base64-encoded phone photo
pub const SERVER_REQUEST_BODY_LIMIT: usize = 20 * 1024 * 1024;

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com";

pub const DEFAULT_ANALYSIS_MODEL: &str = "gpt-4o";
pub const DEFAULT_ANALYSIS_MAX_TOKENS: u32 = 500;
pub const DEFAULT_ANALYSIS_TEMPERATURE: f64 = 0.3;
