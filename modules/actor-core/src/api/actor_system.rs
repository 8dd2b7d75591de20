mod actor_system_config;
mod actor_system_impl;

pub use actor_system_config::ActorSystemConfig;
pub use actor_system_impl::ActorSystem;
