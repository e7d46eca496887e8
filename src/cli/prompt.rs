use colored::Colorize;
use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

use crate::error::{Result, TabHeroError};

/// Questions the commands ask the user. `Ok(None)` means the user backed out.
pub trait Prompter {
    fn select(&mut self, title: &str, items: &[String]) -> Result<Option<usize>>;
    /// Picks any number of items; an empty answer picks all of them
    fn multi_select(&mut self, title: &str, items: &[String]) -> Result<Option<Vec<usize>>>;
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>>;
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>>;
    fn info(&mut self, message: &str);
    fn warn(&mut self, message: &str);
}

/// Line-based prompts on a terminal
pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
}

impl TerminalPrompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, line: &str) {
        let _ = writeln!(self.writer, "{}  {}", "┃".bright_magenta(), line);
    }

    /// Reads one trimmed line; `None` at end of input
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.writer, "{}  {} ", "┃".bright_magenta(), prompt.bright_white())
            .and_then(|_| self.writer.flush())
            .map_err(|source| TabHeroError::Prompt { source })?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|source| TabHeroError::Prompt { source })?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn list_items(&mut self, title: &str, items: &[String]) {
        self.say(&title.bold().to_string());
        for (idx, item) in items.iter().enumerate() {
            self.say(&format!("{}. {}", (idx + 1).to_string().bright_yellow(), item));
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn select(&mut self, title: &str, items: &[String]) -> Result<Option<usize>> {
        if items.is_empty() {
            return Ok(None);
        }
        self.list_items(title, items);

        loop {
            let Some(answer) = self.ask(&format!("Select 1-{} (empty to cancel):", items.len()))?
            else {
                return Ok(None);
            };
            if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match parse_index(&answer, items.len()) {
                Some(idx) => return Ok(Some(idx)),
                None => self.say(&format!("'{}' is not a valid choice", answer).yellow().to_string()),
            }
        }
    }

    fn multi_select(&mut self, title: &str, items: &[String]) -> Result<Option<Vec<usize>>> {
        self.list_items(title, items);

        loop {
            let Some(answer) = self.ask("Numbers separated by commas (empty for all, q to cancel):")?
            else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some((0..items.len()).collect()));
            }
            if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }

            let picked: Option<Vec<usize>> = answer
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(|part| parse_index(part, items.len()))
                .collect();

            match picked {
                Some(mut indices) => {
                    indices.sort_unstable();
                    indices.dedup();
                    return Ok(Some(indices));
                }
                None => self.say(&format!("'{}' is not a valid selection", answer).yellow().to_string()),
            }
        }
    }

    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        let question = match default {
            Some(default) => format!("{} [{}]:", prompt, default),
            None => format!("{}:", prompt),
        };
        let Some(answer) = self.ask(&question)? else {
            return Ok(None);
        };

        match default {
            Some(default) if answer.is_empty() => Ok(Some(default.to_string())),
            _ => Ok(Some(answer)),
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let Some(answer) = self.ask(&format!("{} {}", prompt, hint))? else {
                return Ok(None);
            };
            match answer.to_lowercase().as_str() {
                "" => return Ok(Some(default)),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => self.say("Please answer y or n"),
            }
        }
    }

    fn info(&mut self, message: &str) {
        self.say(message);
    }

    fn warn(&mut self, message: &str) {
        self.say(&message.bright_yellow().to_string());
    }
}

/// One-based answer to zero-based index
fn parse_index(answer: &str, len: usize) -> Option<usize> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn select_retries_until_valid() {
        let mut p = prompter("7\nabc\n2\n");
        let choice = p.select("Pick", &items(&["a", "b"])).unwrap();
        assert_eq!(choice, Some(1));
    }

    #[test]
    fn select_empty_answer_cancels() {
        let mut p = prompter("\n");
        assert_eq!(p.select("Pick", &items(&["a"])).unwrap(), None);
        let mut eof = prompter("");
        assert_eq!(eof.select("Pick", &items(&["a"])).unwrap(), None);
    }

    #[test]
    fn multi_select_defaults_to_everything() {
        let mut p = prompter("\n");
        let picked = p.multi_select("Files", &items(&["a", "b", "c"])).unwrap();
        assert_eq!(picked, Some(vec![0, 1, 2]));
    }

    #[test]
    fn multi_select_parses_lists() {
        let mut p = prompter("3, 1 3\n");
        let picked = p.multi_select("Files", &items(&["a", "b", "c"])).unwrap();
        assert_eq!(picked, Some(vec![0, 2]));

        let mut q = prompter("q\n");
        assert_eq!(q.multi_select("Files", &items(&["a"])).unwrap(), None);
    }

    #[test]
    fn input_uses_default_on_empty_answer() {
        let mut p = prompter("\nCustom\n");
        assert_eq!(p.input("Name", Some("main tabs")).unwrap().as_deref(), Some("main tabs"));
        assert_eq!(p.input("Name", Some("main tabs")).unwrap().as_deref(), Some("Custom"));
    }

    #[test]
    fn confirm_understands_yes_and_no() {
        let mut p = prompter("maybe\ny\n\nno\n");
        assert_eq!(p.confirm("Sure?", false).unwrap(), Some(true));
        assert_eq!(p.confirm("Sure?", false).unwrap(), Some(false));
        assert_eq!(p.confirm("Sure?", true).unwrap(), Some(false));
    }

    #[test]
    fn messages_are_written_with_margin() {
        colored::control::set_override(false);
        let mut p = prompter("");
        p.info("Saved");
        let out = String::from_utf8(p.into_writer()).unwrap();
        assert_eq!(out, "┃  Saved\n");
    }
}
