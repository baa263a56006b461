pub(crate) mod sfx;
