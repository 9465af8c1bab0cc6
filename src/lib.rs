//! Finds WordPress core files that an upgrade was meant to remove but that
//! are still on disk, so an operator can review them by hand.
//!
//! The pipeline is a known-path list ([`known`]) filtered through an
//! existence check ([`scan`]) into a [`report::Report`]. Nothing is ever
//! deleted.

pub mod actions;
pub mod config;
pub mod error;
pub mod fs;
pub mod known;
mod php;
pub mod report;
pub mod scan;
