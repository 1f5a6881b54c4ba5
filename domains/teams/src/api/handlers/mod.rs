//! API handlers for the Teams domain

pub mod auth;
pub mod invitations;
pub mod teams;
