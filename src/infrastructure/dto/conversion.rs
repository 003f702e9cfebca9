//! Conversion logic between wire DTOs and domain events.
//!
//! Inbound messages convert DTO → domain, outbound events convert
//! domain → DTO. Neither direction is reversible and no round-trip
//! is expected.

use crate::domain::{InboundEvent, OutboundEvent};
use crate::infrastructure::dto::websocket::{ClientEvent, ServerEvent};

// ========================================
// DTO → Domain Event
// ========================================

impl From<ClientEvent> for InboundEvent {
    fn from(dto: ClientEvent) -> Self {
        match dto {
            ClientEvent::Ping {} => InboundEvent::Keepalive,
            ClientEvent::Message { message } => InboundEvent::ChatMessage { text: message },
            ClientEvent::Typing { is_typing } => InboundEvent::TypingSignal { is_typing },
        }
    }
}

// ========================================
// Domain Event → DTO
// ========================================

impl From<OutboundEvent> for ServerEvent {
    fn from(event: OutboundEvent) -> Self {
        match event {
            OutboundEvent::JoinAccepted {
                display_name,
                room_id,
                participant_count,
            } => ServerEvent::Connected {
                user_name: display_name.into_string(),
                room_id: room_id.into_string(),
                participant_count,
            },
            OutboundEvent::ParticipantJoined {
                display_name,
                participant_count,
            } => ServerEvent::UserJoined {
                user_name: display_name.into_string(),
                participant_count,
            },
            OutboundEvent::ParticipantLeft {
                display_name,
                participant_count,
            } => ServerEvent::UserLeft {
                user_name: display_name.into_string(),
                participant_count,
            },
            OutboundEvent::ChatMessage {
                display_name,
                text,
                timestamp,
            } => ServerEvent::Message {
                user_name: display_name.into_string(),
                message: text,
                timestamp: timestamp.value(),
            },
            OutboundEvent::TypingSignal {
                display_name,
                is_typing,
            } => ServerEvent::Typing {
                user_name: display_name.into_string(),
                is_typing,
            },
            OutboundEvent::KeepaliveAck => ServerEvent::Pong {},
            OutboundEvent::ErrorNotice { reason } => ServerEvent::Error { message: reason },
        }
    }
}
