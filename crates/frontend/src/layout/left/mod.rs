pub mod menu;
pub mod sidebar;
