//! Listening-socket lifecycle: bind, accept, and hand each connection to
//! its own task.

pub mod listener;
