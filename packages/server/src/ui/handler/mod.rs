mod http;
mod websocket;

pub use http::{debug_gateway_state, debug_issue_token, get_presence, health_check};
pub use websocket::websocket_handler;
