use crate::pipeline::PipelineEvent;

#[derive(Clone, Debug)]
pub enum Message {
    // Search events
    QueryChanged(String),
    SelectResult(usize),
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // Error dialog
    DismissError,

    // Pipeline notifications
    Pipeline(PipelineEvent),

    // UI events
    SetStatus(String),
    ClearStatus,
}
