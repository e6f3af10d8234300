//! Web front-end for the newsapi.org search endpoint.

pub mod config;
pub mod error;
pub mod news;
pub mod web;
