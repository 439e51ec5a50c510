//! Parsing tests against real-world export shapes.

mod fixtures;
