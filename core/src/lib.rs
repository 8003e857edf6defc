#![no_std]

//! Game logic for rebus, a guess-the-phrase game over generated SVG puzzles.
//!
//! Nothing in here touches the browser: the network is reached through [`PuzzleTransport`], and timers are left to
//! the caller through [`FeedbackTicket`]s.

extern crate alloc;

pub use display::*;
pub use error::*;
pub use fetcher::*;
pub use normalize::*;
pub use puzzle::*;
pub use session::*;
pub use topic::*;

mod display;
mod error;
mod fetcher;
mod normalize;
mod puzzle;
mod session;
mod topic;
