mod step_flow;

pub use step_flow::StepFlow;
