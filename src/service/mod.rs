pub mod auth;
pub mod commitments;
pub mod gigs;
pub mod members;
