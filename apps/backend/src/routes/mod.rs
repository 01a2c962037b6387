pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod decks;
pub mod generate;
pub mod session;
pub mod study;
