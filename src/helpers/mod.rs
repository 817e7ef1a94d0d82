//! Helper functions shared by collections, builders and the server

mod date;
mod nav;
mod url;
mod xml;

pub use date::*;
pub use nav::*;
pub use url::*;
pub use xml::*;
