//! Line-based interactive loops: one calculator page, or the basic
//! calculator.
//!
//! Both loops read from any `BufRead` and write to any `Write`, so they run
//! the same against a terminal or a test buffer.

use std::io::{BufRead, Write};

use anyhow::Result;
use rand::RngCore;

use calc_core::presenter::PresentationSettings;
use calc_core::{BasicCalculator, Page};

use crate::clipboard;
use crate::render;

const PAGE_HELP: &str = "\
  name=value   set a field
  :run         validate and compute
  :reset       restore defaults, clear the result
  :copy        copy the last result
  :fields      show current values
  :help        this text
  :quit        leave";

const BASIC_HELP: &str = "\
  keys     0-9 . + - * / ^ % =   (n: sign, <: backspace, c: clear entry, a: all clear)
  history  past calculations, newest first
  clear    forget the history
  help     this text
  quit     leave";

fn prompt<W: Write>(out: &mut W, text: &str) -> Result<()> {
    write!(out, "{}", text)?;
    out.flush()?;
    Ok(())
}

pub fn page_loop<R: BufRead, W: Write>(
    page: &mut Page,
    settings: &PresentationSettings,
    rng: &mut dyn RngCore,
    input: R,
    out: &mut W,
) -> Result<()> {
    let def = page.def();
    writeln!(out, "{} - {}", def.name, def.description)?;
    writeln!(out, "Formula: {}", def.formula)?;
    for line in render::field_values(page) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "Type :help for commands.")?;
    prompt(out, "> ")?;

    for line in input.lines() {
        let line = line?;
        match line.trim() {
            "" => {}
            ":quit" | ":q" => break,
            ":help" => writeln!(out, "{}", PAGE_HELP)?,
            ":fields" => {
                for line in render::field_values(page) {
                    writeln!(out, "{}", line)?;
                }
            }
            ":reset" => {
                page.reset();
                writeln!(out, "Reset to defaults.")?;
            }
            ":run" => match page.submit(rng) {
                Ok(_) => {
                    for line in page.display(settings) {
                        writeln!(out, "{}", line)?;
                    }
                }
                Err(errors) => {
                    for line in render::field_errors(page, &errors) {
                        writeln!(out, "{}", line)?;
                    }
                }
            },
            ":copy" => match page.copy_text() {
                Some(text) if clipboard::copy(&text) => writeln!(out, "Copied.")?,
                Some(_) => writeln!(out, "Clipboard unavailable.")?,
                None => writeln!(out, "Nothing to copy yet.")?,
            },
            other => match line.split_once('=') {
                // Text fields keep their spaces; only the name is trimmed
                Some((name, value)) => {
                    if let Err(e) = page.set(name.trim(), value) {
                        writeln!(out, "  ! {}", e)?;
                    }
                }
                None => writeln!(out, "Unknown command '{}'. Type :help.", other)?,
            },
        }
        prompt(out, "> ")?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn basic_loop<R: BufRead, W: Write>(calc: &mut BasicCalculator, input: R, out: &mut W) -> Result<()> {
    writeln!(out, "Basic calculator. Type help for keys, quit to leave.")?;
    prompt(out, &format!("{}\n> ", calc.display()))?;

    for line in input.lines() {
        let line = line?;
        match line.trim() {
            "" => {}
            "quit" | "q" | "exit" => break,
            "help" => writeln!(out, "{}", BASIC_HELP)?,
            "history" => {
                if calc.history().is_empty() {
                    writeln!(out, "  (empty)")?;
                }
                for entry in calc.history().entries() {
                    writeln!(out, "  {}  {}", entry.created_at.format("%H:%M:%S"), entry)?;
                }
            }
            "clear" => {
                calc.clear_history();
                writeln!(out, "History cleared.")?;
            }
            keys => {
                calc.press_str(keys);
                match calc.pending_expression() {
                    Some(pending) => writeln!(out, "{} {}", pending, calc.display())?,
                    None => writeln!(out, "{}", calc.display())?,
                }
            }
        }
        prompt(out, "> ")?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn run_page(slug: &str, script: &str) -> (Page, String) {
        let mut page = Page::open(slug).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut out = Vec::new();
        page_loop(
            &mut page,
            &PresentationSettings::default(),
            &mut rng,
            Cursor::new(script.to_string()),
            &mut out,
        )
        .unwrap();
        (page, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_page_set_and_run() {
        let (page, out) = run_page("lcm", "values=4, 6\n:run\n:quit\n");
        assert!(out.contains("LCM: 12"));
        assert!(page.last_result().is_some());
    }

    #[test]
    fn test_page_reports_field_errors() {
        let (page, out) = run_page("tip", "bill=\n:run\n:quit\n");
        assert!(out.contains("! Bill amount:"));
        assert!(page.last_result().is_none());
    }

    #[test]
    fn test_page_unknown_field_and_reset() {
        let (page, out) = run_page("lcm", "nope=1\nvalues=8 12\n:run\n:reset\n");
        assert!(out.contains("! "));
        assert!(out.contains("LCM: 24"));
        assert!(out.contains("Reset to defaults."));
        assert!(page.last_result().is_none());
    }

    #[test]
    fn test_page_keeps_value_whitespace() {
        let (page, _) = run_page("case-converter", "text=  two  words \n:quit\n");
        assert_eq!(page.form().raw_value("text"), Some("  two  words "));
    }

    #[test]
    fn test_basic_loop_history() {
        let mut calc = BasicCalculator::new();
        let mut out = Vec::new();
        basic_loop(&mut calc, Cursor::new("12+30=\n5/0=\nhistory\nquit\n"), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("> 42\n"));
        assert!(out.contains("Error"));
        assert!(out.contains("12 + 30 = 42"));
        assert_eq!(calc.history().len(), 1);
    }

    #[test]
    fn test_basic_loop_shows_pending() {
        let mut calc = BasicCalculator::new();
        let mut out = Vec::new();
        basic_loop(&mut calc, Cursor::new("7*\n"), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("7 × 7"));
    }
}
