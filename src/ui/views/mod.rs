pub mod ai_dj;
pub mod home;
pub mod library;
pub mod search;

pub use ai_dj::AiDj;
pub use home::Home;
pub use library::Library;
pub use search::Search;
