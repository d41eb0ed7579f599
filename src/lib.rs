//! # sector-account
//!
//! Account orchestration for the sector editor client: login, signup,
//! social sign-in, password reset, profile edits, and logout, mapped onto
//! plain `StateMessage`s for the client store.
//!
//! The crate owns no UI and no identity SDK. Hosts implement the traits in
//! [`ports`] (and [`dispatch::Dispatch`] for their store), build a
//! [`actions::UserActions`], and call one intent per user action with a
//! snapshot of the current [`state::UserState`].

pub mod actions;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod guard;
pub mod i18n;
pub mod message;
pub mod ports;
pub mod profile;
pub mod remote;
pub mod sector;
pub mod state;

pub use actions::{Collaborators, IntentOutcome, UserActions};
pub use message::StateMessage;
pub use state::UserState;
