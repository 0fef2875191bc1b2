mod websocket;

pub use websocket::{FrameSender, OutboundFrame, WebSocketHandle};
