mod linspace;
mod spline;

pub(crate) use {linspace::linspace, spline::catmull_rom};
