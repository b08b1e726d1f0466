//! Prompt cooldown policy for GutWise
//!
//! This crate decides whether a recurring, user-interruptive prompt may be
//! shown:
//! - `CooldownPolicy`: two gates over persisted timestamps (dismissed-until
//!   and minimum interval since last show)
//! - `CheckInTracker`: the daily check-in card
//! - `NotificationPromptService`: the eating-out notification permission ask
//! - `PromptRegistry`: one policy per configured prompt
//!
//! Store failures never reach callers: they are logged and read as "no
//! restriction", so prompts fail open.

mod checkin;
mod cooldown;
mod notification;
mod registry;

pub use checkin::*;
pub use cooldown::*;
pub use notification::*;
pub use registry::*;
