//! Game flow: timed pair resolution and table orchestration.
//!
//! ## Key Types
//!
//! - `FlowCoordinator`: resolves a two-card selection and schedules the
//!   delayed flip-back or selection clear
//! - `GameTable`: engine + coordinator + session + store + source
//! - `DealTicket`: guards deck delivery against superseded requests

pub mod coordinator;
pub mod table;

pub use coordinator::{FlowCoordinator, Resolution, SharedEngine};
pub use table::{DealTicket, GameTable};
