mod resize;

use crate::{
    arg_parsers::{Filter, Size},
    error::ResizeError,
    image::Image,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Operation {
    Resize { size: Size, filter: Filter },
}

impl Operation {
    pub fn execute(&self, image: &mut Image) -> Result<(), ResizeError> {
        match self {
            Operation::Resize { size, filter } => resize::resize(image, *size, *filter),
        }
    }
}
