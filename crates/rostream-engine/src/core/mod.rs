pub use self::{lineup::*, player::*, slot::*};

pub(crate) mod lineup;
pub(crate) mod player;
pub(crate) mod slot;
