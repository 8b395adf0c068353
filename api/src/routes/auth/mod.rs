//! Session endpoints: login, refresh token rotation, and logout.

pub mod login;
pub mod logout;
pub mod refresh;
