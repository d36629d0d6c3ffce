pub mod alert;
pub mod coordinate;
pub mod digital_id;
pub mod language;
pub mod message;
pub mod tourist;
