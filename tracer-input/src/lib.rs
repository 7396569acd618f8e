/// Commands sent from input sources (simulator keys, Ctrl + C) to the host loop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    IncreaseProgress,
    DecreaseProgress,
    Shutdown,
}
