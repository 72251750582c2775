// SPDX: CC0-1.0

use crate::{
    color::{self, PALETTE},
    eval::FunctionModel,
    lex::SubStr,
    parse::{ParseErr, ParseErrTyp},
    sample::sample,
    sheet::{Sheet, Status},
    stdlib::Trig,
};
use anyhow::Context;
use core::fmt;
use std::{
    io::{self, stdin, BufRead, Write},
    sync::Arc,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Add,
    Edit,
    Remove,
    Toggle,
    Color,
    List,
    Points,
    Window,
    Plot,
}

impl Command {
    pub const fn exhaustive() -> &'static [Command] {
        &[
            Self::Help,
            Self::Quit,
            Self::Add,
            Self::Edit,
            Self::Remove,
            Self::Toggle,
            Self::Color,
            Self::List,
            Self::Points,
            Self::Window,
            Self::Plot,
        ]
    }

    pub const fn help(&self) -> &'static str {
        match self {
            Self::Help => "display help for each command",
            Self::Quit => "quit the shell",
            Self::Add => "add an equation, like 'y=3x^2-2x+1' or 'x=2cos(t);y=sin(t);0<t<2pi'",
            Self::Edit => "replace the text of an equation",
            Self::Remove => "remove an equation",
            Self::Toggle => "show or hide a valid equation",
            Self::Color => "set the color of an equation",
            Self::List => "list equations with their status and color",
            Self::Points => "print the points sampled from an equation (for debugging)",
            Self::Window => "set window parameters",
            Self::Plot => "plot every graphed equation to an svg file",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Quit => "quit",
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Remove => "remove",
            Self::Toggle => "toggle",
            Self::Color => "color",
            Self::List => "list",
            Self::Points => "points",
            Self::Window => "window",
            Self::Plot => "plot",
        }
    }
}

impl core::str::FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for c in Self::exhaustive() {
            if s == c.name() {
                return Ok(*c);
            }
        }
        Err(())
    }
}

/// The candidate most similar to `text`, if any is similar enough to be worth
/// suggesting.
pub fn most_similar<'a>(text: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let text = text.to_ascii_lowercase();
    candidates
        .into_iter()
        .map(|candidate| {
            (
                strsim::normalized_damerau_levenshtein(&text, &candidate.to_ascii_lowercase()),
                candidate,
            )
        })
        .reduce(|(acc_sim, acc), (elem_sim, elem)| {
            if elem_sim > acc_sim {
                (elem_sim, elem)
            } else {
                (acc_sim, acc)
            }
        })
        .and_then(|(sim, candidate)| (sim > 0.3).then_some(candidate))
}

/// Standard input closed before a line could be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndOfInput;

impl fmt::Display for EndOfInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "end of input")
    }
}

impl std::error::Error for EndOfInput {}

pub fn input<W: Write>(out: W, prompt: impl fmt::Display) -> anyhow::Result<String> {
    input_from(stdin().lock(), out, prompt)
}

/// Prompt, then read one trimmed line from `src`. Fails with [`EndOfInput`]
/// once `src` is exhausted.
pub fn input_from<R: BufRead, W: Write>(
    src: R,
    out: W,
    prompt: impl fmt::Display,
) -> anyhow::Result<String> {
    fn inner<R: BufRead, W: Write>(
        mut src: R,
        mut out: W,
        prompt: impl fmt::Display,
    ) -> io::Result<Option<String>> {
        write!(out, "{prompt}")?;
        out.flush()?;
        let mut s = String::new();
        if src.read_line(&mut s)? == 0 {
            return Ok(None);
        }
        Ok(Some(s.trim().to_string()))
    }

    let s = inner(src, out, prompt).context("read from standard input failed")?;
    s.ok_or_else(|| anyhow::Error::new(EndOfInput))
}

pub fn read_fromstr<W: Write, T: core::str::FromStr>(
    mut out: W,
    prompt: impl fmt::Display,
    ignore_empty: bool,
) -> anyhow::Result<Result<Option<T>, <T as core::str::FromStr>::Err>>
where
    <T as core::str::FromStr>::Err: fmt::Display,
{
    let input = Arc::new(input(&mut out, prompt)?);
    if ignore_empty && input.is_empty() {
        return Ok(Ok(None));
    }
    match input.parse::<T>() {
        Ok(new) => Ok(Ok(Some(new))),
        Err(err) => {
            writeln!(out)?;
            underline(&mut out, &SubStr::all(input))?;
            writeln!(out, "parse error: {err}")?;
            Ok(Err(err))
        }
    }
}

pub fn underline<W: Write>(mut out: W, span: &SubStr) -> io::Result<()> {
    let src = span.src();
    writeln!(out, "{src}")?;
    // @unicode: columns are counted in chars, not bytes
    let pad = src[..span.start()].chars().count();
    let len = span.get().chars().count().max(1);
    writeln!(out, "{}{}", " ".repeat(pad), "^".repeat(len))?;
    Ok(())
}

pub fn report_parse_err<W: Write>(mut out: W, err: &ParseErr) -> io::Result<()> {
    underline(&mut out, &err.loc)?;
    writeln!(out, "parse error: {err}")?;
    match &err.typ {
        ParseErrTyp::BadForm(_) => {
            writeln!(
                out,
                "note: equations look like 'y=3x^2-2x+1' or 'x=2cos(t);y=sin(t);0<t<2pi'"
            )?;
        }

        ParseErrTyp::BadCoefficient(_) => {
            writeln!(
                out,
                "note: coefficients are written right before 'x', so '2*x' would be '2x'"
            )?;
        }

        ParseErrTyp::BadExponent(_) => {
            writeln!(
                out,
                "note: exponents are non-negative integers after '^', like 'x^2'"
            )?;
        }

        ParseErrTyp::BadConstant(_) => {}

        ParseErrTyp::BadRange(_) => {
            writeln!(out, "note: the range looks like '0<t<2pi'")?;
        }

        ParseErrTyp::UnsupportedFunction => {
            // the name of whatever is being called, if anything is
            let callee = err.loc.get().split_once('(').map_or("", |(head, _)| head);
            let word: String = callee
                .chars()
                .skip_while(|chr| !chr.is_ascii_alphabetic())
                .take_while(|chr| chr.is_ascii_alphabetic())
                .collect();
            let names = Trig::exhaustive().iter().map(|trig| trig.name());
            match most_similar(&word, names.clone()) {
                Some(name) if !word.is_empty() => {
                    writeln!(out, "note: function '{name}' has a similar name")?;
                }
                _ => {
                    let names: Vec<&str> = names.collect();
                    writeln!(
                        out,
                        "note: each coordinate must use exactly one of {}",
                        names.join(", ")
                    )?;
                }
            }
        }

        ParseErrTyp::NumericParseFailure(_) => {
            writeln!(out, "note: parsing as floating point number")?
        }
    }
    Ok(())
}

pub fn dump_sheet<W: Write>(mut out: W, sheet: &Sheet) -> io::Result<()> {
    writeln!(out, "equations: ")?;
    if sheet.is_empty() {
        writeln!(out, "  (empty)")?;
    }
    for (idx, entry) in sheet.entries().iter().enumerate() {
        let glyph = match entry.status() {
            Status::Graphed => '*',
            Status::Hidden => 'o',
            Status::Invalid => '!',
        };
        let color = match color::name_of(entry.color) {
            Some(name) => name.to_string(),
            None => entry.color.to_string(),
        };
        writeln!(
            out,
            "  {idx}: {glyph} {text}  ({status}, {color})",
            text = entry.text(),
            status = entry.status()
        )?;
        match entry.outcome() {
            Ok(model) => writeln!(out, "       {model}")?,
            Err(err) => writeln!(out, "       {err}")?,
        }
    }
    Ok(())
}

pub fn dump_palette<W: Write>(mut out: W) -> io::Result<()> {
    let names: Vec<&str> = PALETTE.iter().map(|(name, _)| *name).collect();
    writeln!(out, "colors: {} (or #rrggbb)", names.join(", "))
}

pub fn dump_points<W: Write>(
    mut out: W,
    model: &FunctionModel,
    title: core::fmt::Arguments,
) -> io::Result<()> {
    writeln!(out, "{title}: ")?;
    for (n, point) in sample(model).enumerate() {
        if point.is_gap() {
            writeln!(out, "  {n}: x = {x} (gap)", x = point.x())?;
        } else {
            writeln!(out, "  {n}: ({x}, {y})", x = point.x(), y = point.y())?;
        }
    }
    Ok(())
}

pub fn sheet_empty<W: Write>(mut out: W) -> io::Result<()> {
    writeln!(out, "error: no equations have been added")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn to_string(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn reads_trimmed_lines_until_the_end() {
        let mut out = Vec::new();
        assert_eq!(input_from(&b"  add \n"[..], &mut out, "> ").unwrap(), "add");
        assert_eq!(input_from(&b"\n"[..], &mut out, "> ").unwrap(), "");
        assert_eq!(String::from_utf8(out).unwrap(), "> > ");

        let err = input_from(&b""[..], Vec::new(), "> ").unwrap_err();
        assert!(err.is::<EndOfInput>());
    }

    #[test]
    fn commands_round_trip_through_names() {
        for c in Command::exhaustive() {
            assert_eq!(c.name().parse::<Command>(), Ok(*c));
        }
        assert_eq!("plto".parse::<Command>(), Err(()));
    }

    #[test]
    fn suggests_similar_names() {
        let names = Command::exhaustive().iter().map(|c| c.name());
        assert_eq!(most_similar("plto", names.clone()), Some("plot"));
        assert_eq!(most_similar("zzzzzzzz", names), None);
    }

    #[test]
    fn underlines_error_location() {
        let err = parse("y = 2x + 3x^b").unwrap_err();
        let text = to_string(|out| report_parse_err(out, &err));
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("y=2x+3x^b"));
        assert_eq!(lines.next(), Some("        ^"));
        assert!(lines.next().unwrap().starts_with("parse error: invalid exponent"));
    }

    #[test]
    fn suggests_trig_function() {
        let err = parse("x=2sn(t);y=cos(t);0<t<1").unwrap_err();
        let text = to_string(|out| report_parse_err(out, &err));
        assert!(text.contains("function 'sin' has a similar name"), "{text}");
    }

    #[test]
    fn lists_functions_when_nothing_is_close() {
        let err = parse("x=2t;y=cos(t);0<t<1").unwrap_err();
        let text = to_string(|out| report_parse_err(out, &err));
        assert!(text.contains("sin, cos, tan, sec, csc, cot"), "{text}");
    }

    #[test]
    fn dumps_sheet() {
        let mut sheet = Sheet::new();
        assert!(to_string(|out| dump_sheet(out, &sheet)).contains("(empty)"));
        sheet.add("y=x");
        sheet.add("y=x^");
        let text = to_string(|out| dump_sheet(out, &sheet));
        assert!(text.contains("0: * y=x  (graphed, black)"), "{text}");
        assert!(text.contains("1: ! y=x^  (invalid, black)"), "{text}");
    }

    #[test]
    fn dumps_points_with_gaps() {
        let model = match parse("y=x").unwrap() {
            FunctionModel::Polynomial(poly) => FunctionModel::Polynomial(poly.with_exclusions(vec![0.0])),
            other => other,
        };
        let text = to_string(|out| dump_points(out, &model, format_args!("points")));
        assert_eq!(text.lines().count(), 202);
        assert_eq!(text.matches("(gap)").count(), 1);
    }
}
