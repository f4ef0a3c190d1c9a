use std::io::{self, BufRead, Write};

use crate::page::ArticleDoc;

/// One selectable entry on a disambiguation page. Ordinals are 1-based and
/// contiguous over the valid (non-fragment) links, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisambigOption {
    pub ordinal: usize,
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Selected(usize),
    Cancelled,
}

/// Enumerate the valid options of a disambiguation page. Relative hrefs are
/// resolved against `base_url`.
pub fn options(doc: &ArticleDoc, base_url: &str) -> Vec<DisambigOption> {
    doc.list_links()
        .into_iter()
        .enumerate()
        .map(|(i, (href, label))| DisambigOption {
            ordinal: i + 1,
            url: if href.starts_with("http") {
                href
            } else {
                format!("{base_url}{href}")
            },
            label,
        })
        .collect()
}

/// Boundary for the blocking pick-one interaction, so the resolution logic
/// can be driven by scripted input in tests as well as by a terminal.
pub trait Chooser {
    fn choose(&mut self, options: &[DisambigOption]) -> Choice;
}

/// Chooser backed by stdin/stdout.
pub struct ConsoleChooser;

impl Chooser for ConsoleChooser {
    fn choose(&mut self, options: &[DisambigOption]) -> Choice {
        let stdin = io::stdin();
        let mut out = io::stdout();
        choose_from(stdin.lock(), &mut out, options).unwrap_or(Choice::Cancelled)
    }
}

/// Present the numbered options and read a selection. "0" cancels; anything
/// that is not a listed ordinal re-prompts, as many times as it takes. EOF on
/// the input counts as cancellation.
pub fn choose_from<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    options: &[DisambigOption],
) -> io::Result<Choice> {
    writeln!(out, "The name is ambiguous. Options:")?;
    for opt in options {
        writeln!(out, "  {}. {}", opt.ordinal, opt.label)?;
    }
    loop {
        write!(out, "Choose an option (number), or 0 to cancel: ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Choice::Cancelled);
        }
        match line.trim().parse::<usize>() {
            Ok(0) => return Ok(Choice::Cancelled),
            Ok(n) if options.iter().any(|o| o.ordinal == n) => {
                return Ok(Choice::Selected(n));
            }
            Ok(_) => writeln!(out, "That option is not on the list, try again.")?,
            Err(_) => writeln!(out, "Please enter a number.")?,
        }
    }
}
