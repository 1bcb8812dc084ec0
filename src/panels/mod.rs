pub mod controls;
pub mod histogram;
pub mod scrub_bar;
pub mod sensors;
pub mod timeline;

pub use controls::ControlsPanel;
pub use histogram::HistogramWindows;
pub use scrub_bar::ScrubBarPanel;
pub use sensors::SensorsPanel;
pub use timeline::TimelinePanel;
