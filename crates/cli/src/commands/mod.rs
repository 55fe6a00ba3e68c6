pub mod config;
pub mod email;
pub mod export;
pub mod quote;
pub mod reset;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self { exit_code: 0, output: message.into() }
    }

    pub fn failure(message: impl Into<String>, exit_code: u8) -> Self {
        Self { exit_code, output: message.into() }
    }
}
