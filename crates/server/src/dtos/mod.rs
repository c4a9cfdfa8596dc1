pub mod catalog;
pub mod movie;
pub mod movie_session;
pub mod order;
