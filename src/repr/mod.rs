//! # Representation Mapper
//!
//! Acyclic wire views of the tweet↔account graph. Stored documents link
//! both directions by id; the wire never sees a cycle — a tweet carries
//! its account as an id plus a canonical URL, an account embeds full
//! tweet projections one level deep.

mod errors;
mod mapper;

pub use errors::{ReprError, ReprResult};
pub use mapper::{AccountView, Links, Mapper, TweetView};
