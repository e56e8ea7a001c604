//! Zones: the common pile, per-player seats and emergency slots.
//!
//! Ordered zones keep their top at the end of the vec, except the personal
//! pile and decks, which draw from the front.

pub mod pile;
pub mod seat;
pub mod slots;

pub use pile::{BurnReport, CommonPile};
pub use seat::{Player, SlotGrant, Zone};
pub use slots::{ActionAllowance, EmergencyAction, EmergencySlot, EmergencySlots};
