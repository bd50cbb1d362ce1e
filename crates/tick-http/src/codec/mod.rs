//! Wire-level encoding and decoding.
//!
//! The decoder side turns a session's accumulated byte buffer into a
//! [`RequestHead`], reporting how many bytes the request consumed so the
//! caller can discard them and immediately decode the next pipelined
//! request. The encoder side renders complete responses (status line,
//! fixed header set, body) as a single byte run ready for a non-blocking
//! write.

mod request_decoder;
pub use request_decoder::RequestHead;
pub use request_decoder::contains_terminator;
pub use request_decoder::decode_head;

mod response_encoder;
pub use response_encoder::SERVER_STRING;
pub use response_encoder::encode_not_found;
pub use response_encoder::encode_response;
pub use response_encoder::encode_too_large;
