pub mod events;
pub mod settle;
