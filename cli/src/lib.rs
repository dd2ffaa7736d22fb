//! Command-line front end for the HashBlog content client.

pub mod cli;
pub mod commands;
pub mod output;
