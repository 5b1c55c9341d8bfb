pub mod font_data;
pub mod track;
