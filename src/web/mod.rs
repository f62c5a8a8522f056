//! Web shell - axum routes serving the dashboard

mod page;
mod server;

pub use page::{data_uri, render_page, PAGE_TITLE};
pub use server::{router, serve, AppState};
