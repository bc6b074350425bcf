/// Interactive runtime module - Gateway

mod shell;

pub use shell::{Shell, ShellCommand};
