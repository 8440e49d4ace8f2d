pub mod controls;
pub mod gauge;
pub mod progress;
pub mod sidebar;
pub mod song_list;
pub mod spinner;
