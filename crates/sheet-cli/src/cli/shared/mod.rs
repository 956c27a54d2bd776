use super::*;

mod io_render;
mod prompts;

pub(in crate::cli) use io_render::*;
pub(in crate::cli) use prompts::*;
