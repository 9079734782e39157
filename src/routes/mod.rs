pub mod recommendation;
pub mod travel;
