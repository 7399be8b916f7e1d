pub mod employees;
pub mod events;
pub mod notification;
pub mod roster;
pub mod strikes;
