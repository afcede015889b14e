//! SSD1963 parallel TFT controller driver
//!
//! The controller sits on a 16-bit 8080-style parallel bus driven pin by
//! pin through GPIO. The driver is split along the hardware seams: the raw
//! bus (`bus`), the command/data channel discipline over it (`command`),
//! the one-shot bring-up sequence (`init`), the clipped rendering engine
//! (`driver`) and the per-tick refresh dispatch (`refresh`). A recording
//! bus for host tests lives in `sim`.

pub mod bus;
pub mod command;
pub mod driver;
pub mod init;
pub mod refresh;
pub mod sim;

pub use bus::{ControlLine, GpioBus, ParallelBus};
pub use command::CommandChannel;
pub use driver::Ssd1963;
pub use init::{InitPhase, InitSequence, PanelTiming, PllConfig};
pub use refresh::{run_refresh, RefreshConfig};
