#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    None,
    SetQuery(String),
    /// Carries the id of the error the dialog was showing
    DismissError(String),
}
