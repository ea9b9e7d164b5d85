pub mod store;

pub use store::{ClientState, ClientStore};
