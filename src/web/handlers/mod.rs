//! HTML template rendering handlers.

mod account;
mod dashboard;
mod index;
mod not_found;
mod short_link;

pub use account::{
    login_handler, login_submit_handler, logout_handler, register_handler,
    register_submit_handler,
};
pub use dashboard::{dashboard_handler, dashboard_submit_handler};
pub use index::{index_handler, index_submit_handler};
pub use not_found::not_found_handler;
