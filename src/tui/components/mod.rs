// Components module - shell building blocks rendered around the active view
//
// - Title bar: app name, mode, loading spinner
// - Pagination: `◀ Prev | Page N | Next ▶`
// - Log strip: recent tracing lines
// - Status bar: last error or key hints
// - Toast: transient overlay

pub mod formatters;
pub mod log_strip;
pub mod pagination;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
