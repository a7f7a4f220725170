//! core data model and algorithms for importing transit feeds into a graph of
//! Onestop-identified entities: identifiers, route geometry, change payloads
//! for the changeset journal and geometric quality checks.
pub mod changeset;
pub mod geometry;
pub mod model;
pub mod quality;
