pub mod render_controller;
