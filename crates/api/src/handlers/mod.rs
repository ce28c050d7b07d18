pub mod crud;
pub mod movies;
pub mod topics;
pub mod users;
