//! Binary framing of protocol messages with `bincode`.

use crate::core::error::GameError;

use super::inbound::InboundMessage;
use super::outbound::Outbound;

/// Encode an outbound request.
pub fn encode_request(request: &Outbound) -> Result<Vec<u8>, GameError> {
    Ok(bincode::serialize(request)?)
}

/// Decode an outbound request.
pub fn decode_request(bytes: &[u8]) -> Result<Outbound, GameError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Encode an inbound message.
pub fn encode_message(message: &InboundMessage) -> Result<Vec<u8>, GameError> {
    Ok(bincode::serialize(message)?)
}

/// Decode an inbound message.
pub fn decode_message(bytes: &[u8]) -> Result<InboundMessage, GameError> {
    Ok(bincode::deserialize(bytes)?)
}
