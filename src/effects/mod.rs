pub(crate) mod vfx;
