//! Event-sourcing mechanics shared by domain modules: events, commands,
//! envelopes and the decide/evolve helper.

pub mod command;
pub mod envelope;
pub mod event;
pub mod handler;

pub use command::Command;
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::execute;
