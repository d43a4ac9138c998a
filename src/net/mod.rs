//! Wire protocol: inbound server messages, outbound client requests and
//! their binary codec.
//!
//! Every inbound message type maps 1:1 onto a channel of the network bus.
//! Outbound requests mirror the proposing half of the inbound catalogue
//! and always carry the client's last applied seq.

pub mod codec;
pub mod inbound;
pub mod outbound;

pub use codec::{decode_message, decode_request, encode_message, encode_request};
pub use inbound::{InboundMessage, RoleCard, ServerMessage, ServerMessageKind};
pub use outbound::{ClientRequest, ClientRequestKind, Outbound};
