pub mod component_repo;
pub mod generation_repo;
pub mod message_repo;
pub mod session_repo;

pub use component_repo::ComponentRepo;
pub use generation_repo::GenerationRepo;
pub use message_repo::MessageRepo;
pub use session_repo::SessionRepo;
