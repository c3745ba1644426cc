pub(crate) mod canvas;
pub(crate) mod legend;
