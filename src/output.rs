//! Console formatting for retrieval and search results

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print raw record text, highlighting header lines
pub fn print_records(records: &str, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    write_records(&mut stdout, records)
}

/// Write record text to any color-aware writer
pub fn write_records<W: WriteColor>(out: &mut W, records: &str) -> io::Result<()> {
    for line in records.lines() {
        if line.starts_with('>') {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
            write!(out, "{}", line)?;
            out.reset()?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Print one identifier per line
pub fn print_identifiers(ids: &[String], choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    write_identifiers(&mut stdout, ids)
}

pub fn write_identifiers<W: WriteColor>(out: &mut W, ids: &[String]) -> io::Result<()> {
    for id in ids {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", id)?;
        out.reset()?;
        writeln!(out)?;
    }
    Ok(())
}

/// Print an error message to stderr
pub fn print_error(message: &str, choice: ColorChoice) -> io::Result<()> {
    let mut stderr = StandardStream::stderr(choice);
    stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(stderr, "Error:")?;
    stderr.reset()?;
    writeln!(stderr, " {}", message)?;
    Ok(())
}
