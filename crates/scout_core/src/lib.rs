//! Scout core: the ranked result accumulator and the delivery state machine.
//!
//! Nothing in this crate performs I/O; the engine drives it.
mod effect;
mod msg;
mod paths;
mod record;
mod result;
mod state;
mod update;

pub use effect::Effect;
pub use msg::Msg;
pub use paths::{base_path, root_path};
pub use record::{RecordError, ResultRecord};
pub use result::{ErrorCode, Priority, RankedResult};
pub use state::DeliveryState;
pub use update::update;
