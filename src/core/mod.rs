pub mod builder;
pub mod etl;
pub mod export;
pub mod items;
pub mod modules;
pub mod pipeline;
pub mod registry;
pub mod term;
pub mod title;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{CourseRecord, SyllabusMap};
pub use crate::domain::ports::{CanvasApi, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
