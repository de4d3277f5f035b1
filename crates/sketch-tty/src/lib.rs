#![forbid(unsafe_code)]

//! Terminal front-end: session lifecycle, input mapping, cell rendering and the frame loop.

pub mod cli;
pub mod header;
pub mod input;
pub mod layout;
pub mod logging;
pub mod present;
pub mod runner;
pub mod session;
