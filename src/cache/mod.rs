//! Response cache shared by the lookup collaborators.

pub mod response;
