//! Editable tactics board for football: the scene state machine behind a pitch editor.
//!
//! The crate owns one mutable document (players, ball, tactic lines,
//! selection, draw mode), a snapshot-based undo/redo history, and the
//! interaction controller that turns raw pointer and keyboard events into
//! document commands. Rendering is left to the host: it reads state from
//! [`store::BoardStore`] (or subscribes to change notifications) and forwards
//! gestures to [`engine::EngineCore`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | The live document and every mutating command |
//! | [`history`] | Past/future snapshot stacks for undo and redo |
//! | [`doc`] | Token, ball, line and snapshot types |
//! | [`formation`] | Teams, preset formations and token instantiation |
//! | [`engine`] | Pointer/keyboard interaction controller ([`engine::EngineCore`]) |
//! | [`input`] | Draw modes, modifiers, keys and the gesture state machine |
//! | [`hit`] | Hit-testing lines, ball and players in pixel space |
//! | [`pitch`] | Percent/pixel conversion and pitch layout |
//! | [`export`] | Versioned JSON export |
//! | [`script`] | Line-oriented command scripts for headless use |
//! | [`config`] | Environment-driven configuration |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod export;
pub mod formation;
pub mod history;
pub mod hit;
pub mod input;
pub mod pitch;
pub mod script;
pub mod store;

pub use error::BoardError;
