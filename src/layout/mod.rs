pub(crate) mod fit;
pub(crate) mod text_box;
