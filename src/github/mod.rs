/// GitHub domain layer: events API client, event model, descriptions.
pub mod client;
pub mod describe;
pub mod errors;
pub mod events;
pub mod timestamps;

pub use client::{DEFAULT_API_URL, GitHubClient};
pub use describe::describe;
pub use errors::ActivityError;
pub use events::ActivityEvent;
