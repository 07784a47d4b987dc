pub mod done;
pub mod due;
pub mod event;
