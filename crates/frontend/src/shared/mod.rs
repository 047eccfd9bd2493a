pub mod dropdown;
pub mod icons;
