//! Interactive collection of image paths and the output file name

use std::io::{BufRead, Write};
use crate::error::Result;

/// Output name used when the user just presses Enter
pub const DEFAULT_OUTPUT_NAME: &str = "untitled.pdf";

/// Print the banner and the instructions for pasting image paths
pub fn print_path_instructions<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Image to PDF Converter")?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out)?;
    writeln!(out, "Enter image paths (you can paste multiple paths at once, one per line):")?;
    writeln!(out, "Example:")?;
    writeln!(out, "  \"C:\\Users\\Username\\Downloads\\image1.png\"")?;
    writeln!(out, "  \"C:\\Users\\Username\\Downloads\\image2.jpg\"")?;
    writeln!(out)?;
    writeln!(out, "Paste your paths (press Enter on empty line when done):")?;
    out.flush()?;
    Ok(())
}

/// Print the prompt for the output PDF name
pub fn print_name_prompt<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Enter output PDF name (default: [{}]):", DEFAULT_OUTPUT_NAME)?;
    write!(out, "PDF name: ")?;
    out.flush()?;
    Ok(())
}

/// Read image paths, one per line, until a blank line or end of input
///
/// Surrounding whitespace and one layer of matching quotes are removed,
/// so paths copied from a file manager (`"C:\dir\a.png"`) work as-is.
pub fn read_image_paths<R: BufRead>(reader: &mut R) -> Result<Vec<String>> {
    let mut paths = Vec::new();

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }

        let unquoted = strip_quotes(trimmed);
        if !unquoted.is_empty() {
            paths.push(unquoted.to_string());
        }
    }

    Ok(paths)
}

/// Remove one layer of matching double or single quotes
///
/// A lone quote character counts as both the opening and closing quote,
/// leaving an empty string.
pub fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.starts_with(quote) && s.ends_with(quote) {
            return s.get(1..s.len() - 1).unwrap_or("");
        }
    }
    s
}

/// Read the raw output name answer; end of input counts as an empty answer
pub fn read_output_name<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Apply the default name and make sure the name ends in `.pdf`
pub fn normalize_output_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        DEFAULT_OUTPUT_NAME.to_string()
    } else if !name.ends_with(".pdf") {
        format!("{}.pdf", name)
    } else {
        name.to_string()
    }
}
