pub mod bot_api;

pub use bot_api::BotApiGateway;
