pub mod destination;
pub mod offer;
pub mod recommendation;
pub mod search;
