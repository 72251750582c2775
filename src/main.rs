// SPDX: CC0-1.0

use anyhow::Context;
use chrono::{DateTime, Local};
use grapher::{
    color::Rgb,
    render,
    sheet::{Sheet, Status},
    shell::{self, Command, EndOfInput},
    svg::SvgSurface,
    Number, Viewport,
};
use std::{
    fs::{File, OpenOptions},
    io::{self, stdout, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

fn output_svg_stem(now: DateTime<Local>) -> String {
    format!(
        "{}_output-{}",
        env!("CARGO_PKG_NAME"),
        now.format("%Y-%m-%d_%H-%M-%S")
    )
}

/// Exclusively create `<stem>.svg` in `dir`, trying `<stem>-1.svg`,
/// `<stem>-2.svg` and so on while the name is taken.
fn create_output(dir: &Path, stem: &str) -> io::Result<(File, PathBuf)> {
    let mut n: u32 = 0;
    loop {
        let path = if n == 0 {
            dir.join(format!("{stem}.svg"))
        } else {
            dir.join(format!("{stem}-{n}.svg"))
        };
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists && n < u32::MAX => n += 1,
            Err(err) => return Err(err),
        }
    }
}

/// Report an error in the shell without leaving it.
fn print_err<W: Write>(mut out: W, err: &anyhow::Error) -> io::Result<()> {
    writeln!(out, "error: {err}")?;
    let chain = err.chain();
    if chain.len() > 1 {
        writeln!(out)?;
        writeln!(out, "context:")?;
        for it in chain.skip(1) {
            writeln!(out, "  {it}")?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("unexpected error: {err}");
            let chain = err.chain();
            if chain.len() > 1 {
                eprintln!();
                eprintln!("context:");
                for it in chain.skip(1) {
                    eprintln!("  {it}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug)]
struct State {
    sheet: Sheet,
    viewport: Viewport,
}

fn try_main() -> anyhow::Result<()> {
    let mut state = State {
        sheet: Sheet::new(),
        viewport: Viewport::default(),
    };
    state.sheet.add("y = x^2 - 4");

    let mut stdout = BufWriter::new(stdout());
    match repl(&mut stdout, &mut state) {
        Err(err) if err.is::<EndOfInput>() => {
            log::info!("standard input closed, quitting");
            writeln!(stdout)?;
        }
        other => other?,
    }
    stdout.flush()?;
    Ok(())
}

fn repl<W: Write>(mut stdout: W, state: &mut State) -> anyhow::Result<()> {
    loop {
        let graphed = state
            .sheet
            .entries()
            .iter()
            .filter(|entry| entry.status() == Status::Graphed)
            .count();
        writeln!(
            stdout,
            "{total} equation{s}, {graphed} graphed",
            total = state.sheet.len(),
            s = if state.sheet.len() == 1 { "" } else { "s" }
        )?;

        let mut try_cmd = shell::input(&mut stdout, "> ")?;
        try_cmd.make_ascii_lowercase();
        writeln!(stdout)?;

        if let Ok(cmd) = try_cmd.parse::<Command>() {
            match cmd {
                Command::Help => {
                    for c in Command::exhaustive() {
                        writeln!(stdout, "{name}: {help}", name = c.name(), help = c.help())?;
                    }
                }

                Command::Quit => break,

                Command::Add => add_equation(&mut stdout, state)?,

                Command::Edit => edit_equation(&mut stdout, state)?,

                Command::Remove => {
                    if let Some(idx) = read_index(&mut stdout, &state.sheet)? {
                        if let Some(entry) = state.sheet.remove(idx) {
                            writeln!(stdout, "removed '{}'", entry.text())?;
                        }
                    }
                }

                Command::Toggle => {
                    if let Some(idx) = read_index(&mut stdout, &state.sheet)? {
                        match state.sheet.toggle(idx) {
                            Some(true) => {}
                            Some(false) => writeln!(
                                stdout,
                                "error: equation {idx} is invalid, so it cannot be toggled"
                            )?,
                            None => unreachable!("index was checked against the sheet"),
                        }
                    }
                }

                Command::Color => set_color(&mut stdout, state)?,

                Command::List => shell::dump_sheet(&mut stdout, &state.sheet)?,

                Command::Points => {
                    if let Some(idx) = read_index(&mut stdout, &state.sheet)? {
                        let entry = &state.sheet.entries()[idx];
                        match entry.outcome() {
                            Ok(model) => shell::dump_points(
                                &mut stdout,
                                model,
                                format_args!("points of '{}'", entry.text()),
                            )?,
                            Err(err) => shell::report_parse_err(&mut stdout, err)?,
                        }
                    }
                }

                Command::Window => set_win(&mut stdout, state)?,

                Command::Plot => {
                    if let Err(err) = plot_sheet(&mut stdout, state) {
                        log::warn!("plot failed: {err:#}");
                        print_err(&mut stdout, &err)?;
                    }
                }
            }
        } else {
            let names = Command::exhaustive().iter().map(|c| c.name());
            match shell::most_similar(&try_cmd, names) {
                Some(name) if !try_cmd.is_empty() => writeln!(
                    stdout,
                    r#"Unknown command, did you mean "{name}"? Try "help" for help"#
                )?,
                _ => writeln!(stdout, r#"Unknown command, try "help" for help"#)?,
            }
        }

        writeln!(stdout)?;
    }
    Ok(())
}

fn read_index<W: Write>(mut out: W, sheet: &Sheet) -> anyhow::Result<Option<usize>> {
    if sheet.is_empty() {
        shell::sheet_empty(&mut out)?;
        return Ok(None);
    }
    let last = sheet.len() - 1;
    match shell::read_fromstr::<_, usize>(&mut out, format_args!("?index (0-{last}) = "), true)? {
        Ok(Some(idx)) if idx <= last => Ok(Some(idx)),
        Ok(Some(idx)) => {
            writeln!(out, "error: there is no equation {idx}")?;
            Ok(None)
        }
        Ok(None) | Err(_) => Ok(None),
    }
}

fn add_equation<W: Write>(mut out: W, state: &mut State) -> anyhow::Result<()> {
    let input = shell::input(&mut out, "equation: ")?;
    if input.is_empty() {
        return Ok(());
    }

    let idx = state.sheet.add(input);
    report_entry(&mut out, &state.sheet, idx)
}

fn edit_equation<W: Write>(mut out: W, state: &mut State) -> anyhow::Result<()> {
    let Some(idx) = read_index(&mut out, &state.sheet)? else {
        return Ok(());
    };
    writeln!(out, "note: leave blank to skip")?;
    let input = shell::input(
        &mut out,
        format_args!("equation (is {}): ", state.sheet.entries()[idx].text()),
    )?;
    if input.is_empty() {
        return Ok(());
    }

    state.sheet.edit(idx, input);
    report_entry(&mut out, &state.sheet, idx)
}

fn report_entry<W: Write>(mut out: W, sheet: &Sheet, idx: usize) -> anyhow::Result<()> {
    let Some(entry) = sheet.get(idx) else {
        return Ok(());
    };
    match entry.outcome() {
        Ok(model) => writeln!(out, "{idx}: {model}")?,
        Err(err) => {
            writeln!(out)?;
            shell::report_parse_err(&mut out, err)?;
            writeln!(out, "note: the equation is kept but will not be plotted")?;
        }
    }
    Ok(())
}

fn set_color<W: Write>(mut out: W, state: &mut State) -> anyhow::Result<()> {
    let Some(idx) = read_index(&mut out, &state.sheet)? else {
        return Ok(());
    };
    shell::dump_palette(&mut out)?;
    let cur = state.sheet.entries()[idx].color;
    if let Ok(Some(color)) =
        shell::read_fromstr::<_, Rgb>(&mut out, format_args!("?color (is {cur}) = "), true)?
    {
        state.sheet.set_color(idx, color);
    }
    Ok(())
}

fn set_win<W: Write>(mut out: W, state: &mut State) -> anyhow::Result<()> {
    writeln!(out, "win = {:#}", state.viewport)?;
    writeln!(out)?;
    writeln!(out, "note: leave blank to skip")?;

    let mut win = state.viewport.clone();
    for (name, dst) in [
        ("x min", &mut win.x.start),
        ("x max", &mut win.x.end),
        ("y min", &mut win.y.start),
        ("y max", &mut win.y.end),
    ] {
        match shell::read_fromstr::<_, Number>(
            &mut out,
            format_args!("?{name} (is {cur}) = ", cur = *dst),
            true,
        )? {
            Ok(Some(new)) => *dst = new,
            Ok(None) => {}
            Err(_) => return Ok(()),
        }
    }

    writeln!(out, "note: width and height are in pixels")?;
    for (name, dst) in [
        ("width", &mut win.pixels.width),
        ("height", &mut win.pixels.height),
    ] {
        match shell::read_fromstr::<_, u32>(
            &mut out,
            format_args!("?{name} (is {cur}) = ", cur = *dst),
            true,
        )? {
            Ok(Some(new)) => *dst = new,
            Ok(None) => {}
            Err(_) => return Ok(()),
        }
    }

    if win.is_valid() {
        state.viewport = win;
    } else {
        writeln!(
            out,
            "error: ranges must be finite with min < max, and width and height nonzero"
        )?;
    }
    Ok(())
}

fn plot_sheet<W: Write>(mut out: W, state: &State) -> anyhow::Result<()> {
    if state.sheet.is_empty() {
        shell::sheet_empty(&mut out)?;
        return Ok(());
    }

    let view = &state.viewport;
    let specs = state.sheet.specs();
    let width = view.pixels.width.saturating_add(view.pixels.x.max(0).unsigned_abs());
    let height = view.pixels.height.saturating_add(view.pixels.y.max(0).unsigned_abs());
    let mut doc = String::new();
    let mut svg =
        SvgSurface::new(&mut doc, (width, height)).context("failed to start svg document")?;
    let stats = render::render(&mut svg, &specs, view);
    svg.finish().context("failed to draw svg document")?;

    let (file, svg_path) = create_output(Path::new("."), &output_svg_stem(Local::now()))
        .context("failed to open output svg file")?;
    let svg_path = svg_path.display();
    let mut file = BufWriter::new(file);
    file.write_all(doc.as_bytes())
        .context("failed to write to output svg file")?;
    file.flush()?;
    file.get_mut().sync_data()?;
    drop(file);

    log::info!("wrote {svg_path}");
    writeln!(
        out,
        "plotted {curves} curve{s} ({segments} segments) to {svg_path}",
        curves = stats.curves,
        s = if stats.curves == 1 { "" } else { "s" },
        segments = stats.segments
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn output_names_never_collide() {
        let dir = std::env::temp_dir().join(format!(
            "{}-output-test-{}",
            env!("CARGO_PKG_NAME"),
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let stem = output_svg_stem(Local::now());

        let (_, first) = create_output(&dir, &stem).unwrap();
        let (_, second) = create_output(&dir, &stem).unwrap();
        let (_, third) = create_output(&dir, &stem).unwrap();
        assert_eq!(first, dir.join(format!("{stem}.svg")));
        assert_eq!(second, dir.join(format!("{stem}-1.svg")));
        assert_eq!(third, dir.join(format!("{stem}-2.svg")));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn errors_print_their_context() {
        let err = anyhow::Error::new(io::Error::from(io::ErrorKind::NotFound))
            .context("failed to open output svg file");
        let mut out = Vec::new();
        print_err(&mut out, &err).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("error: failed to open output svg file\n"), "{text}");
        assert!(text.contains("context:"), "{text}");
    }
}
