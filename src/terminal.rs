//! A [Prompt] that asks questions on a text terminal.

use std::io::{self, BufRead, Write};

use crate::{
    Error,
    category::Category,
    details::{AmountRequest, DetailRequest, DetailResponse, Prompt},
};

/// Typing this at any detail question cancels the form.
pub const CANCEL_INPUT: &str = "q";

/// Asks for input line by line.
///
/// Blank answers keep the shown default, `q` or end of input cancels.
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stderr> {
    /// Read answers from stdin and write questions to stderr, keeping stdout for reports.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Create a prompt over any reader and writer.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Get back the writer, e.g. to inspect what was shown.
    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, question: &str) -> Result<Option<String>, Error> {
        write!(self.output, "{question}").map_err(prompt_error)?;
        self.output.flush().map_err(prompt_error)?;

        let mut line = String::new();
        let bytes_read = self.input.read_line(&mut line).map_err(prompt_error)?;

        if bytes_read == 0 {
            writeln!(self.output).map_err(prompt_error)?;
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }

    fn show_problem(&mut self, problem: Option<&Error>) -> Result<(), Error> {
        if let Some(problem) = problem {
            writeln!(self.output, "Error: {problem}. Try again.").map_err(prompt_error)?;
        }

        Ok(())
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn request_details(&mut self, request: &DetailRequest<'_>) -> Result<DetailResponse, Error> {
        writeln!(self.output, "\nExpense details").map_err(prompt_error)?;
        writeln!(self.output, "Amount: {}", request.amount).map_err(prompt_error)?;
        self.show_problem(request.problem)?;

        for (number, category) in Category::ALL.iter().enumerate() {
            writeln!(self.output, "  {}. {category}", number + 1).map_err(prompt_error)?;
        }

        let category = match self.ask(&format!(
            "Category [{}] (number or name, {CANCEL_INPUT} to cancel): ",
            request.category
        ))? {
            None => return Ok(DetailResponse::Cancelled),
            Some(answer) if answer.eq_ignore_ascii_case(CANCEL_INPUT) => {
                return Ok(DetailResponse::Cancelled);
            }
            Some(answer) if answer.is_empty() => request.category.to_string(),
            Some(answer) => category_from_answer(&answer),
        };

        let date = match self.ask(&format!(
            "Date [{}] (YYYY-MM-DD, {CANCEL_INPUT} to cancel): ",
            request.date
        ))? {
            None => return Ok(DetailResponse::Cancelled),
            Some(answer) if answer.eq_ignore_ascii_case(CANCEL_INPUT) => {
                return Ok(DetailResponse::Cancelled);
            }
            Some(answer) if answer.is_empty() => request.date.to_string(),
            Some(answer) => answer,
        };

        Ok(DetailResponse::Submitted { category, date })
    }

    fn request_amount(&mut self, request: &AmountRequest<'_>) -> Result<Option<String>, Error> {
        writeln!(self.output, "\n{}", request.reason).map_err(prompt_error)?;
        self.show_problem(request.problem)?;

        self.ask("Amount (leave blank to cancel): ")
    }
}

/// Map a menu number to its category name, passing anything else through.
fn category_from_answer(answer: &str) -> String {
    answer
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| Category::ALL.get(index))
        .map(|category| category.to_string())
        .unwrap_or_else(|| answer.to_owned())
}

fn prompt_error(error: io::Error) -> Error {
    Error::Prompt(error.to_string())
}
