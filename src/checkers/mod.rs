//! SEO, social and text checkers.
//!
//! Each checker takes an input struct and returns a [`ToolResult`]. Missing
//! required input fails the call; problems found in the input are reported
//! as issues inside the result data.
//!
//! [`ToolResult`]: crate::results::ToolResult

pub mod canonical;
pub mod headings;
pub mod keyword_density;
pub mod meta;
pub mod noindex;
pub mod robots;
pub mod serp;
pub mod sitemap;
pub mod slug;
pub mod social;
pub mod text_stats;
