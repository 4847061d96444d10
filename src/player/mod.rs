pub use handlers::get_player_stats;
pub use models::PlayerProfile;
pub use repository::{InMemoryProfileRepository, ProfileRepository};

mod handlers;
pub mod models;
pub mod repository;
