pub mod accounts;
pub mod activity;
pub mod auth;
pub mod health;
