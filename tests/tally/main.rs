//! Integration tests for the tally data layer (stores + aggregation + persistence).

mod aggregation;
mod persistence;
mod selection;
mod setup;
mod subscriptions;
