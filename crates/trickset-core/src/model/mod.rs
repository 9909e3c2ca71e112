pub mod book;
pub mod card;
pub mod rank;
pub mod requirement;
pub mod suit;
pub mod trick;
