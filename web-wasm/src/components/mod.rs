pub mod header;
pub mod login_form;
pub mod upload_area;
pub mod file_list;
pub mod filter_editor;
pub mod process_panel;
pub mod history_panel;
pub mod admin_panel;
