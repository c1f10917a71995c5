pub mod app_context;
pub mod broadcast;

pub use app_context::AppGlobalContext;
pub use broadcast::{Broadcast, Subscription};
