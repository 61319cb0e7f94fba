use std::io::{BufRead, Write};
use std::path::PathBuf;

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use precis_core::PrecisError;

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const PROMPT: Color = Color::Green;
    const SUCCESS: Color = Color::Cyan;
    const ERROR: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
}

/// Prompts and status lines for one interactive run.
///
/// Reader and writer are injected so a session can be driven from a script
/// or a test instead of the real stdin/stdout.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show `prompt` and read one line, without its line ending.
    pub fn ask(&mut self, prompt: &str) -> Result<String, PrecisError> {
        queue!(
            self.output,
            SetForegroundColor(Colors::PROMPT),
            Print(prompt),
            ResetColor,
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PrecisError::InvalidInput(
                "input ended before a value was entered".to_string(),
            ));
        }
        Ok(line.trim().to_string())
    }

    pub fn ask_input_file(&mut self) -> Result<PathBuf, PrecisError> {
        let name = self.ask("Enter the name of the file to summarize: ")?;
        non_empty_path(name)
    }

    pub fn ask_word_count(&mut self) -> Result<usize, PrecisError> {
        let answer = self.ask("Enter the number of words for the summary: ")?;
        parse_word_count(&answer)
    }

    pub fn ask_output_file(&mut self) -> Result<PathBuf, PrecisError> {
        let name = self.ask("Enter the name for the output PDF file: ")?;
        non_empty_path(name)
    }

    pub fn print_success(&mut self, msg: &str) -> Result<(), PrecisError> {
        self.print_line(Colors::SUCCESS, msg)
    }

    pub fn print_info(&mut self, msg: &str) -> Result<(), PrecisError> {
        self.print_line(Colors::DIM, msg)
    }

    pub fn print_error(&mut self, msg: &str) -> Result<(), PrecisError> {
        self.print_line(Colors::ERROR, &format!("Error: {msg}"))
    }

    fn print_line(&mut self, color: Color, msg: &str) -> Result<(), PrecisError> {
        queue!(
            self.output,
            SetForegroundColor(color),
            Print(msg),
            ResetColor,
            Print("\n"),
        )?;
        self.output.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Parse a summary length: a positive whole number of words.
pub fn parse_word_count(answer: &str) -> Result<usize, PrecisError> {
    let answer = answer.trim();
    match answer.parse::<usize>() {
        Ok(0) => Err(PrecisError::InvalidInput(
            "word count must be at least 1".to_string(),
        )),
        Ok(n) => Ok(n),
        Err(_) => Err(PrecisError::InvalidInput(format!(
            "word count must be a positive whole number, got '{answer}'"
        ))),
    }
}

fn non_empty_path(name: String) -> Result<PathBuf, PrecisError> {
    if name.is_empty() {
        return Err(PrecisError::InvalidInput("file name cannot be empty".to_string()));
    }
    Ok(PathBuf::from(name))
}
