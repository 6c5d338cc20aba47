pub mod catalogs;
pub mod codec;
pub mod registry;

// Re-export key types for convenience
pub use codec::{
    build_request, build_response, decode_call, decode_call_result, encode_call,
    encode_call_result, encode_call_result_text, encode_call_text, DecodedCall, RawMessage,
};
pub use registry::ProtocolRegistry;
