//! Embassy async tasks
//!
//! Each task runs independently and communicates through the statics in
//! `channels`.

pub mod frame_rx;
pub mod refresh;
pub mod status_tx;

pub use frame_rx::frame_rx_task;
pub use refresh::refresh_task;
pub use status_tx::status_tx_task;
