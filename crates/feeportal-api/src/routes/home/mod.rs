//! Home routes - Landing page

pub mod page;

pub use page::page_home;
