pub mod message_id;
pub mod ocpp_frame;

pub use message_id::new_message_id;
pub use ocpp_frame::{FrameError, OcppFrame};
