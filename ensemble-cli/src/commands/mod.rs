pub mod generate;
pub mod policies;
pub mod verify;
