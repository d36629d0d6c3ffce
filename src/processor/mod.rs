pub mod event_processor;

pub use event_processor::{Enrollment, EventProcessor, Outcome};
