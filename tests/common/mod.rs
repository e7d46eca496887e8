#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tabhero::TabReference;
use tabhero::cli::prompt::Prompter;
use tabhero::host::TabHost;

pub struct TestDir {
    path: PathBuf,
}

impl TestDir {
    pub fn new(label: &str) -> Self {
        let mut path = std::env::temp_dir();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        path.push(format!(
            "tabhero-{label}-{:?}-{timestamp}",
            std::thread::current().id()
        ));
        fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

pub fn tab(name: &str) -> TabReference {
    TabReference::new(format!("file:///ws/{name}"), name, "plaintext")
}

/// Host with a fixed list of open tabs that records what it was asked to do
#[derive(Default)]
pub struct RecordingHost {
    pub open: Vec<TabReference>,
    pub opened: RefCell<Vec<Vec<TabReference>>>,
    pub closed: RefCell<usize>,
}

impl RecordingHost {
    pub fn with_open(open: Vec<TabReference>) -> Self {
        Self {
            open,
            ..Default::default()
        }
    }
}

impl TabHost for RecordingHost {
    fn open_tabs(&self) -> Vec<TabReference> {
        self.open.clone()
    }

    async fn open(&self, tabs: &[TabReference]) -> tabhero::Result<usize> {
        self.opened.borrow_mut().push(tabs.to_vec());
        Ok(tabs.len())
    }

    async fn close_all(&self) -> tabhero::Result<()> {
        *self.closed.borrow_mut() += 1;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum Answer {
    Select(Option<usize>),
    Multi(Option<Vec<usize>>),
    Input(Option<String>),
    Confirm(Option<bool>),
}

/// Replays canned answers and remembers every message shown
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub messages: Vec<String>,
    pub questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Default::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, question: &str) -> Answer {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected question: {question}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, title: &str, _items: &[String]) -> tabhero::Result<Option<usize>> {
        match self.next(title) {
            Answer::Select(choice) => Ok(choice),
            other => panic!("expected select answer for '{title}', got {other:?}"),
        }
    }

    fn multi_select(&mut self, title: &str, _items: &[String]) -> tabhero::Result<Option<Vec<usize>>> {
        match self.next(title) {
            Answer::Multi(choice) => Ok(choice),
            other => panic!("expected multi-select answer for '{title}', got {other:?}"),
        }
    }

    fn input(&mut self, prompt: &str, _default: Option<&str>) -> tabhero::Result<Option<String>> {
        match self.next(prompt) {
            Answer::Input(text) => Ok(text),
            other => panic!("expected input answer for '{prompt}', got {other:?}"),
        }
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> tabhero::Result<Option<bool>> {
        match self.next(prompt) {
            Answer::Confirm(choice) => Ok(choice),
            other => panic!("expected confirm answer for '{prompt}', got {other:?}"),
        }
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
