use crate::pipeline::Pipeline;

#[derive(Debug, Clone)]
pub struct HandlerState {
    pub pipeline: Pipeline,
}

impl HandlerState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }
}
