pub mod gradient;
pub mod import;
pub mod oadate;
pub mod playback;
pub mod sensor;
pub mod series;
pub mod session;
pub mod state;
pub mod ticks;
pub mod viewport;
