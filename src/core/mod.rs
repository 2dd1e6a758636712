// Domain-layer modules and shared errors/models
pub mod lead_scoring {
    pub use crate::lead_scoring::*;
}

pub mod qscore {
    pub use crate::qscore::*;
}

pub mod signals {
    pub use crate::signals::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
