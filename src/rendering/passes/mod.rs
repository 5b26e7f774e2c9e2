pub mod orbit_path_pass;
pub mod pass;
pub mod phong_pass;
