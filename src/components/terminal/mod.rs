mod block;
mod input;
mod shell;

pub use block::Block;
pub use input::Input;
pub use shell::Shell;
