//! Application use cases. Orchestrate domain logic via ports.

pub mod interpreter;
pub mod poll_loop;
pub mod renderer;

pub use interpreter::CommandInterpreter;
pub use poll_loop::PollLoop;
