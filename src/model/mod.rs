mod aggregate;
mod event;
mod match_record;
mod view;

pub use aggregate::*;
pub use event::*;
pub use match_record::*;
pub use view::*;
