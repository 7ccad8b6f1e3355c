//! Address rating server.
//!
//! A web application that answers: "which of these apartments is best
//! placed for the way I get around Hyde Park?"

pub mod cache;
pub mod domain;
pub mod live;
pub mod maps;
pub mod rating;
pub mod stops;
pub mod web;
